//! Error type shared by the numeric building blocks.
//!
//! | Variant | Raised by |
//! |---------|-----------|
//! | [`InvalidAngle`](AstroError::InvalidAngle) | sexagesimal parsing |
//! | [`MathError`](AstroError::MathError) | degenerate vectors |

use thiserror::Error;

/// Classification of numerical failures.
#[derive(Debug, Clone, PartialEq)]
pub enum MathErrorKind {
    DivisionByZero,
}

#[derive(Error, Debug)]
pub enum AstroError {
    /// Text that could not be read as an angle.
    #[error("Invalid angle '{input}': {message}")]
    InvalidAngle { input: String, message: String },

    #[error("Math error in {operation} ({kind:?}): {message}")]
    MathError {
        operation: String,
        kind: MathErrorKind,
        message: String,
    },
}

pub type AstroResult<T> = Result<T, AstroError>;

impl AstroError {
    pub fn invalid_angle(input: &str, reason: &str) -> Self {
        Self::InvalidAngle {
            input: input.to_string(),
            message: reason.to_string(),
        }
    }

    pub fn math_error(operation: &str, kind: MathErrorKind, reason: &str) -> Self {
        Self::MathError {
            operation: operation.to_string(),
            kind,
            message: reason.to_string(),
        }
    }
}
