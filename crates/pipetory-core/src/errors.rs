//! Errores del core de pipes.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Clasificación de los errores asociados a un step concreto.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StepErrorKind {
    NotFound,
    Locked,
}

#[derive(Debug, Error, PartialEq, Eq, Clone, Serialize, Deserialize)]
pub enum PipeError {
    #[error("Step {step} not found in {pipeline}.")]
    UndefinedStep { step: String, pipeline: String },
    #[error("Step {step} from {pipeline} is locked.")]
    LockedStep { step: String, pipeline: String },
    #[error("undefined pipe kind: {0}")]
    UndefinedPipeKind(String),
    #[error("pipe {pipeline} has no steps")]
    EmptyPipe { pipeline: String },
    #[error("pipe {pipeline} must be compiled before calling it")]
    NotCompiled { pipeline: String },
    #[error("step {step} from {pipeline} failed: {message}")]
    StepFailed { step: String, pipeline: String, message: String },
}

impl PipeError {
    pub(crate) fn undefined_step(step: &str, pipeline: &str) -> Self {
        PipeError::UndefinedStep { step: step.to_string(),
                                   pipeline: pipeline.to_string() }
    }

    pub(crate) fn locked_step(step: &str, pipeline: &str) -> Self {
        PipeError::LockedStep { step: step.to_string(),
                                pipeline: pipeline.to_string() }
    }

    /// Kind of the step-scoped errors; `None` for pipe-level errors.
    pub fn step_kind(&self) -> Option<StepErrorKind> {
        match self {
            PipeError::UndefinedStep { .. } => Some(StepErrorKind::NotFound),
            PipeError::LockedStep { .. } => Some(StepErrorKind::Locked),
            _ => None,
        }
    }

    /// Step named by the error, if any.
    pub fn step(&self) -> Option<&str> {
        match self {
            PipeError::UndefinedStep { step, .. }
            | PipeError::LockedStep { step, .. }
            | PipeError::StepFailed { step, .. } => Some(step),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn step_errors_format_with_pipe_name() {
        let e = PipeError::undefined_step("dates", "df1");
        assert_eq!(e.to_string(), "Step dates not found in df1.");
        let e = PipeError::locked_step("dates", "df1");
        assert_eq!(e.to_string(), "Step dates from df1 is locked.");
    }

    #[test]
    fn step_kind_only_for_step_errors() {
        assert_eq!(PipeError::undefined_step("a", "p").step_kind(), Some(StepErrorKind::NotFound));
        assert_eq!(PipeError::locked_step("a", "p").step_kind(), Some(StepErrorKind::Locked));
        assert_eq!(PipeError::UndefinedPipeKind("bogus".into()).step_kind(), None);
        assert_eq!(PipeError::EmptyPipe { pipeline: "p".into() }.step(), None);
    }
}
