//! # Error Types
//!
//! Structured error types for hydronic_core. Errors here are configuration
//! or data-integrity problems (an unknown pipe size, a fitting id that is not
//! in the catalog, a NaN that slipped into the inputs). Conditions the engine
//! can still compute through, like a fitting that is missing its Cv, are
//! reported as [`crate::warnings::Warning`]s instead.
//!
//! ## Example
//!
//! ```rust
//! use hydronic_core::errors::{CalcError, CalcResult};
//!
//! fn validate_length(length_ft: f64) -> CalcResult<()> {
//!     if length_ft < 0.0 {
//!         return Err(CalcError::invalid_input(
//!             "length_ft",
//!             length_ft.to_string(),
//!             "Length cannot be negative",
//!         ));
//!     }
//!     Ok(())
//! }
//!
//! assert!(validate_length(-1.0).is_err());
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for hydronic_core operations
pub type CalcResult<T> = Result<T, CalcError>;

/// Structured error type for calculation operations.
///
/// Each variant provides specific context about what went wrong,
/// enabling programmatic error handling by LLMs and other consumers.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum CalcError {
    /// An input value is invalid (out of range, not finite, etc.)
    #[error("Invalid input for '{field}': {value} - {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    /// No pipe geometry exists for this material and nominal size
    #[error("Pipe size not found: {nominal_size}\" {material}")]
    PipeSizeNotFound {
        material: String,
        nominal_size: String,
    },

    /// Fitting type id is not in the fitting catalog
    #[error("Fitting type not found: {fitting_type}")]
    FittingNotFound { fitting_type: String },

    /// System id is not present in the project
    #[error("System not found: {system_id}")]
    SystemNotFound { system_id: String },

    /// A derived quantity came out NaN or infinite
    #[error("Non-finite result for {quantity}")]
    NonFinite { quantity: String },

    /// Built-in data failed to load or interpolate
    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl CalcError {
    /// Create an InvalidInput error
    pub fn invalid_input(
        field: impl Into<String>,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        CalcError::InvalidInput {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create a PipeSizeNotFound error
    pub fn pipe_size_not_found(material: impl Into<String>, nominal_size: impl Into<String>) -> Self {
        CalcError::PipeSizeNotFound {
            material: material.into(),
            nominal_size: nominal_size.into(),
        }
    }

    /// Create a FittingNotFound error
    pub fn fitting_not_found(fitting_type: impl Into<String>) -> Self {
        CalcError::FittingNotFound {
            fitting_type: fitting_type.into(),
        }
    }

    /// Create a SystemNotFound error
    pub fn system_not_found(system_id: impl ToString) -> Self {
        CalcError::SystemNotFound {
            system_id: system_id.to_string(),
        }
    }

    /// Create a NonFinite error
    pub fn non_finite(quantity: impl Into<String>) -> Self {
        CalcError::NonFinite {
            quantity: quantity.into(),
        }
    }

    /// Create an Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        CalcError::Internal {
            message: message.into(),
        }
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            CalcError::InvalidInput { .. } => "INVALID_INPUT",
            CalcError::PipeSizeNotFound { .. } => "PIPE_SIZE_NOT_FOUND",
            CalcError::FittingNotFound { .. } => "FITTING_NOT_FOUND",
            CalcError::SystemNotFound { .. } => "SYSTEM_NOT_FOUND",
            CalcError::NonFinite { .. } => "NON_FINITE",
            CalcError::Internal { .. } => "INTERNAL_ERROR",
        }
    }
}

/// Reject NaN and infinite inputs before they reach any formula.
pub(crate) fn require_finite(field: &str, value: f64) -> CalcResult<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(CalcError::invalid_input(
            field,
            value.to_string(),
            "Value must be a finite number",
        ))
    }
}

/// Check a derived quantity before it leaves the engine.
pub(crate) fn ensure_finite(quantity: &str, value: f64) -> CalcResult<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(CalcError::non_finite(quantity))
    }
}
