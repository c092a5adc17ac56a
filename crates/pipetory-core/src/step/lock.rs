//! Tabla de bloqueos por step y política de aplicación en `compile`.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::errors::PipeError;

/// How `compile` treats locked steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LockPolicy {
    /// Locks are metadata only; composition ignores them.
    #[default]
    Advisory,
    /// A locked step contributes the identity function to the composition.
    Skip,
    /// Calling any step whose composition includes a locked step fails with
    /// `PipeError::LockedStep`.
    Reject,
}

/// Estado de bloqueo por nombre de step, en orden de registro.
#[derive(Debug, Clone, Default)]
pub struct LockTable {
    flags: IndexMap<String, bool>,
}

impl LockTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares a step as known (unlocked). Already known steps keep their flag.
    pub fn track(&mut self, step: &str) {
        if !self.flags.contains_key(step) {
            self.flags.insert(step.to_string(), false);
        }
    }

    pub fn lock(&mut self, step: &str, pipeline: &str) -> Result<(), PipeError> {
        self.set(step, pipeline, true)
    }

    pub fn unlock(&mut self, step: &str, pipeline: &str) -> Result<(), PipeError> {
        self.set(step, pipeline, false)
    }

    pub fn lock_all(&mut self) {
        self.flags.values_mut().for_each(|v| *v = true);
    }

    pub fn unlock_all(&mut self) {
        self.flags.values_mut().for_each(|v| *v = false);
    }

    pub fn is_locked(&self, step: &str, pipeline: &str) -> Result<bool, PipeError> {
        self.flags
            .get(step)
            .copied()
            .ok_or_else(|| PipeError::undefined_step(step, pipeline))
    }

    /// Unknown names read as unlocked.
    pub fn locked(&self, step: &str) -> bool {
        self.flags.get(step).copied().unwrap_or(false)
    }

    pub fn locked_steps(&self) -> Vec<&str> {
        self.flags
            .iter()
            .filter(|(_, locked)| **locked)
            .map(|(name, _)| name.as_str())
            .collect()
    }

    fn set(&mut self, step: &str, pipeline: &str, value: bool) -> Result<(), PipeError> {
        match self.flags.get_mut(step) {
            Some(flag) => {
                *flag = value;
                Ok(())
            }
            None => Err(PipeError::undefined_step(step, pipeline)),
        }
    }
}
