use pipetory_core::PipeError;
use thiserror::Error;

/// Errores de la aplicación de demostración.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("pipe error: {0}")]
    Pipe(#[from] PipeError),
    #[error("configuration error: {0}")]
    Config(String),
    #[error("invalid record: {0}")]
    Record(String),
    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pipe_variant_from() {
        let err: AppError = PipeError::UndefinedPipeKind("bogus".into()).into();
        assert_eq!(err.to_string(), "pipe error: undefined pipe kind: bogus");
    }

    #[test]
    fn config_variant_format() {
        let err = AppError::Config("PIPETORY_ROWS must be > 0".into());
        assert_eq!(err.to_string(), "configuration error: PIPETORY_ROWS must be > 0");
    }

    #[test]
    fn json_variant_from() {
        let err: AppError = serde_json::from_str::<serde_json::Value>("{").unwrap_err().into();
        assert!(matches!(err, AppError::Json(_)));
        assert!(err.to_string().starts_with("serialization error: "));
    }
}
