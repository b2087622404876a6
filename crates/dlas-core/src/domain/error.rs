//! Domain-level error taxonomy for DLAS.

use crate::contract::ContractViolation;

/// Errors produced by input payload validation.
///
/// Validation fails fast: the first offending field wins, and its path is
/// carried on the variant so callers can point at the exact input problem.
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("{path} is required")]
    MissingField { path: String },

    #[error("{path} must be a non-empty string")]
    EmptyString { path: String },

    #[error("{path} must be {expected}")]
    WrongType {
        path: String,
        expected: &'static str,
    },

    #[error("{path} must be {constraint}")]
    OutOfRange {
        path: String,
        constraint: &'static str,
    },

    #[error("{path} must be one of low|medium|high")]
    InvalidPriority { path: String },

    #[error("selected_option_id must be a non-empty string")]
    EmptyOptionId,
}

/// DLAS domain errors.
///
/// `Validation` means the caller sent a bad payload; `Contract` means the
/// pipeline assembled a response that breaks its own shape invariants — a
/// programming error, never user-recoverable.
#[derive(Debug, thiserror::Error)]
pub enum DlasError {
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("contract violation: {0}")]
    Contract(#[from] ContractViolation),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("canonicalization error: {0}")]
    Canonical(String),
}

/// Result type for DLAS domain operations.
pub type Result<T> = std::result::Result<T, DlasError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_display_carries_path() {
        let err = ValidationError::MissingField {
            path: "signals.charge_cycles".to_string(),
        };
        assert!(err.to_string().contains("signals.charge_cycles"));

        let err = ValidationError::OutOfRange {
            path: "signals.frame_drop_rate".to_string(),
            constraint: "in [0, 1]",
        };
        let msg = err.to_string();
        assert!(msg.contains("frame_drop_rate"));
        assert!(msg.contains("in [0, 1]"));
    }

    #[test]
    fn test_dlas_error_wraps_validation() {
        let err: DlasError = ValidationError::EmptyOptionId.into();
        assert!(err.to_string().contains("validation error"));
        assert!(err.to_string().contains("selected_option_id"));
    }
}
