//! Pipetory
//!
//! Este crate agrupa la librería de pipes y sus escenarios de demostración:
//! - Re-exporta `pipetory_core` (registro, bloqueos, compilación, factory).
//! - Expone `config` para la configuración de la demo (.env / entorno).
//! - Expone `demos` con los pipes numérico, tabular y split/merge.

pub mod config;
pub mod demos;
pub mod errors;

pub use pipetory_core::*;
