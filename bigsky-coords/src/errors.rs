use bigsky_core::AstroError;
use thiserror::Error;

pub type CoordResult<T> = Result<T, CoordError>;

#[derive(Debug, Error)]
pub enum CoordError {
    #[error("Invalid coordinate: {message}")]
    InvalidCoordinate { message: String },

    #[error("Core astronomical calculation failed: {message}")]
    CoreError { message: String },
}

impl CoordError {
    pub fn invalid_coordinate(message: impl Into<String>) -> Self {
        Self::InvalidCoordinate {
            message: message.into(),
        }
    }

    pub fn from_core(error: AstroError) -> Self {
        Self::CoreError {
            message: error.to_string(),
        }
    }
}

impl From<AstroError> for CoordError {
    fn from(error: AstroError) -> Self {
        Self::from_core(error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_coordinate() {
        let err = CoordError::invalid_coordinate("dec 91 out of range");
        assert!(err.to_string().contains("dec 91"));
    }

    #[test]
    fn test_from_core() {
        let err: CoordError = AstroError::invalid_angle("boom", "expected hh:mm:ss").into();
        assert!(matches!(err, CoordError::CoreError { .. }));
        assert!(err.to_string().contains("boom"));
    }
}
