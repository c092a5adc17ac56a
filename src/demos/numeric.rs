//! Demo numérica: `square` seguido de `weighted_log(weight)` sobre una matriz.

use pipetory_core::{factory, Pipe, PipeKind};

use crate::errors::AppError;

pub type Matrix = Vec<Vec<f64>>;

/// Matriz determinista `rows x cols` con valores en (0, 1].
pub fn matrix(rows: usize, cols: usize) -> Matrix {
    let total = (rows * cols) as f64;
    (0..rows).map(|i| (0..cols).map(|j| (i * cols + j + 1) as f64 / total).collect())
             .collect()
}

fn map_cells(m: Matrix, f: impl Fn(f64) -> f64) -> Matrix {
    m.into_iter().map(|row| row.into_iter().map(&f).collect()).collect()
}

pub fn square(m: Matrix) -> Matrix {
    map_cells(m, |x| x * x)
}

pub fn weighted_log(m: Matrix, weight: &f64) -> Matrix {
    map_cells(m, |x| weight * x.ln())
}

/// Sequencer `numpy` con los dos steps registrados vía `observe`.
pub fn numeric_pipe(weight: f64) -> Result<Pipe<Matrix>, AppError> {
    let mut pipe = factory(PipeKind::Sequential, "numpy")?;
    pipe.observe("square")(square);
    pipe.observe_with("weighted_log", weight)(weighted_log);
    pipe.compile();
    Ok(pipe)
}
