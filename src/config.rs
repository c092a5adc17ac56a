//! Configuración de la demo.
//! Carga variables de entorno (.env) una sola vez y expone `CONFIG`.

use std::env;
use std::str::FromStr;

use dotenvy::dotenv;
use log::LevelFilter;
use once_cell::sync::Lazy;

use crate::errors::AppError;

// Carga perezosa del archivo .env una sola vez.
static DOTENV_LOADED: Lazy<()> = Lazy::new(|| {
    let _ = dotenv(); // ignora error si no existe .env
});

/// Configuración global, evaluada una sola vez.
pub static CONFIG: Lazy<DemoConfig> = Lazy::new(DemoConfig::from_env);

#[derive(Debug, Clone, PartialEq)]
pub struct DemoConfig {
    /// Nivel de log cuando `RUST_LOG` no está definido.
    pub log_level: LevelFilter,
    /// Dimensiones de la matriz de la demo numérica.
    pub rows: usize,
    pub cols: usize,
    /// Peso de `weighted_log`.
    pub weight: f64,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self { log_level: LevelFilter::Info,
               rows: 4,
               cols: 4,
               weight: 0.5 }
    }
}

fn var_or<T: FromStr>(key: &str, default: T) -> T {
    env::var(key).ok().and_then(|v| v.trim().parse().ok()).unwrap_or(default)
}

impl DemoConfig {
    /// Lee `PIPETORY_LOG`, `PIPETORY_ROWS`, `PIPETORY_COLS` y
    /// `PIPETORY_WEIGHT`. Valores no parseables usan el default.
    pub fn from_env() -> Self {
        Lazy::force(&DOTENV_LOADED);
        let d = Self::default();
        Self { log_level: var_or("PIPETORY_LOG", d.log_level),
               rows: var_or("PIPETORY_ROWS", d.rows),
               cols: var_or("PIPETORY_COLS", d.cols),
               weight: var_or("PIPETORY_WEIGHT", d.weight) }
    }

    pub fn validate(&self) -> Result<(), AppError> {
        if self.rows == 0 || self.cols == 0 {
            return Err(AppError::Config(format!("matrix shape must be non-empty, got {}x{}", self.rows, self.cols)));
        }
        if !(self.weight.is_finite() && self.weight > 0.0) {
            return Err(AppError::Config(format!("weight must be positive, got {}", self.weight)));
        }
        Ok(())
    }
}
