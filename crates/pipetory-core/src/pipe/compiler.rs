//! Compilación: para cada step, la composición izquierda-a-derecha de todas
//! las funciones registradas hasta él inclusive.
//!
//! `C[s_k] = f_k ∘ … ∘ f_1`. Todas las composiciones comparten una sola
//! cadena de funciones y aplican su prefijo en un bucle, así que la
//! profundidad de pila no crece con el número de steps.

use std::sync::Arc;

use indexmap::IndexMap;

use crate::errors::PipeError;
use crate::step::{LockPolicy, LockTable, StepBody, StepFn, StepRegistry};

/// Applies `chain[..end]` in order, stopping at the first error.
fn prefix<D: 'static>(chain: Arc<[StepFn<D>]>, end: usize) -> StepFn<D> {
    Arc::new(move |data: D| -> Result<D, PipeError> {
        let mut data = data;
        for f in &chain[..end] {
            data = f(data)?;
        }
        Ok(data)
    })
}

fn rejecting<D: 'static>(step: &str, pipeline: &str) -> StepFn<D> {
    let err = PipeError::locked_step(step, pipeline);
    Arc::new(move |_: D| -> Result<D, PipeError> { Err(err.clone()) })
}

/// Compila todos los steps de `registry` en orden de registro.
///
/// Los pipes anidados se compilan primero y aportan su función por defecto
/// (la composición de su último step). `locks` se consulta según `policy`.
pub(crate) fn compile_steps<D: 'static>(pipeline: &str,
                                        registry: &mut StepRegistry<D>,
                                        locks: &LockTable,
                                        policy: LockPolicy)
                                        -> IndexMap<String, StepFn<D>> {
    let mut chain: Vec<StepFn<D>> = Vec::with_capacity(registry.len());
    // (step, longitud del prefijo, primer step bloqueado hasta aquí)
    let mut ends: Vec<(String, usize, Option<String>)> = Vec::with_capacity(registry.len());
    let mut first_locked: Option<String> = None;

    for (name, entry) in registry.iter_mut() {
        let func = match &mut entry.body {
            StepBody::Func(f) => f.clone(),
            StepBody::Pipe(sub) => {
                sub.compile();
                sub.default_fn()
            }
        };

        let locked = locks.locked(name);
        if locked && first_locked.is_none() {
            first_locked = Some(name.to_string());
        }
        if !(locked && policy == LockPolicy::Skip) {
            chain.push(func);
        }
        ends.push((name.to_string(), chain.len(), first_locked.clone()));
    }

    let chain: Arc<[StepFn<D>]> = chain.into();
    ends.into_iter()
        .map(|(name, end, locked_step)| {
            let exposed = match (locked_step, policy) {
                (Some(locked_step), LockPolicy::Reject) => rejecting(&locked_step, pipeline),
                _ => prefix(chain.clone(), end),
            };
            (name, exposed)
        })
        .collect()
}
