//! Validation error types for phonebook records.
//!
//! Every constructor and mutator in this crate reports rejected input through
//! [`ValidationError`]. The variants follow a small taxonomy:
//!
//! - **Format**: a model code or name fails its pattern check
//! - **Range**: an id below its minimum or a year above its maximum
//! - **Length**: required text that is empty or longer than its limit
//!
//! # Example
//!
//! ```rust
//! use phonebook_core::error::{Result, ValidationError};
//!
//! fn check_id(id: i64) -> Result<()> {
//!     if id < 1 {
//!         return Err(ValidationError::BelowMinimum { field: "id", value: id, min: 1 });
//!     }
//!     Ok(())
//! }
//!
//! assert!(check_id(0).unwrap_err().is_range_error());
//! ```

use thiserror::Error;

/// The error returned when a record field fails validation.
///
/// Each variant names the offending field so callers can map the failure back
/// to user input without parsing the message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    // =========================================================================
    // FORMAT ERRORS
    // =========================================================================
    /// The value does not match the pattern required for the field.
    #[error("Invalid {field} format: '{value}'. {expected}")]
    Format {
        /// Field that was rejected.
        field: &'static str,
        /// The rejected value.
        value: String,
        /// Description of the accepted format.
        expected: &'static str,
    },

    // =========================================================================
    // RANGE ERRORS
    // =========================================================================
    /// The value is smaller than the field's minimum.
    #[error("{field} must be at least {min} (got {value})")]
    BelowMinimum {
        /// Field that was rejected.
        field: &'static str,
        /// The rejected value.
        value: i64,
        /// Smallest accepted value.
        min: i64,
    },

    /// The value is larger than the field's maximum.
    #[error("{field} must not exceed {max} (got {value})")]
    AboveMaximum {
        /// Field that was rejected.
        field: &'static str,
        /// The rejected value.
        value: i64,
        /// Largest accepted value.
        max: i64,
    },

    // =========================================================================
    // LENGTH ERRORS
    // =========================================================================
    /// Required text was empty.
    #[error("{field} cannot be empty")]
    Empty {
        /// Field that was rejected.
        field: &'static str,
    },

    /// Text exceeds the field's maximum length.
    #[error("{field} exceeds maximum length of {max} characters (got {actual})")]
    Length {
        /// Field that was rejected.
        field: &'static str,
        /// Maximum allowed length.
        max: usize,
        /// Actual length provided.
        actual: usize,
    },
}

/// A specialized [`Result`] type for record validation.
pub type Result<T> = std::result::Result<T, ValidationError>;

impl ValidationError {
    /// Returns the name of the field that failed validation.
    #[must_use]
    pub const fn field(&self) -> &'static str {
        match self {
            Self::Format { field, .. }
            | Self::BelowMinimum { field, .. }
            | Self::AboveMaximum { field, .. }
            | Self::Empty { field }
            | Self::Length { field, .. } => *field,
        }
    }

    /// Returns `true` if the value failed a pattern check.
    #[inline]
    #[must_use]
    pub const fn is_format_error(&self) -> bool {
        matches!(self, Self::Format { .. })
    }

    /// Returns `true` if the value was outside its numeric bounds.
    #[inline]
    #[must_use]
    pub const fn is_range_error(&self) -> bool {
        matches!(self, Self::BelowMinimum { .. } | Self::AboveMaximum { .. })
    }

    /// Returns `true` if text was empty or too long.
    #[inline]
    #[must_use]
    pub const fn is_length_error(&self) -> bool {
        matches!(self, Self::Empty { .. } | Self::Length { .. })
    }

    /// Returns a machine-readable error code.
    #[inline]
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::Format { .. } => "INVALID_FORMAT",
            Self::BelowMinimum { .. } => "BELOW_MINIMUM",
            Self::AboveMaximum { .. } => "ABOVE_MAXIMUM",
            Self::Empty { .. } => "EMPTY_VALUE",
            Self::Length { .. } => "TOO_LONG",
        }
    }
}

/// Checks that `value` is non-empty and at most `max` characters long.
///
/// Length is counted in Unicode scalar values, not bytes.
///
/// # Errors
///
/// Returns [`ValidationError::Empty`] or [`ValidationError::Length`].
pub(crate) fn check_text_length(field: &'static str, value: &str, max: usize) -> Result<()> {
    if value.is_empty() {
        return Err(ValidationError::Empty { field });
    }
    let actual = value.chars().count();
    if actual > max {
        return Err(ValidationError::Length { field, max, actual });
    }
    Ok(())
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_error_classification() {
        let err = ValidationError::Format {
            field: "model",
            value: "X-ABC-123".into(),
            expected: "Expected M-XXX-NNN.",
        };
        assert!(err.is_format_error());
        assert!(!err.is_range_error());
        assert!(!err.is_length_error());
    }

    #[test]
    fn test_range_error_classification() {
        assert!(ValidationError::BelowMinimum {
            field: "id",
            value: 0,
            min: 1
        }
        .is_range_error());
        assert!(ValidationError::AboveMaximum {
            field: "year",
            value: 2021,
            max: 2020
        }
        .is_range_error());
        assert!(!ValidationError::Empty { field: "name" }.is_range_error());
    }

    #[test]
    fn test_length_error_classification() {
        assert!(ValidationError::Empty { field: "name" }.is_length_error());
        assert!(ValidationError::Length {
            field: "name",
            max: 30,
            actual: 31
        }
        .is_length_error());
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(
            ValidationError::Empty { field: "name" }.error_code(),
            "EMPTY_VALUE"
        );
        assert_eq!(
            ValidationError::AboveMaximum {
                field: "year",
                value: 2030,
                max: 2020
            }
            .error_code(),
            "ABOVE_MAXIMUM"
        );
    }

    #[test]
    fn test_field_accessor() {
        let err = ValidationError::Length {
            field: "manufacturer_name",
            max: 30,
            actual: 40,
        };
        assert_eq!(err.field(), "manufacturer_name");
    }

    #[test]
    fn test_error_display_messages() {
        let err = ValidationError::BelowMinimum {
            field: "id",
            value: 0,
            min: 1,
        };
        assert_eq!(err.to_string(), "id must be at least 1 (got 0)");

        let err = ValidationError::Length {
            field: "name",
            max: 30,
            actual: 31,
        };
        assert!(err.to_string().contains("maximum length of 30"));
    }

    #[test]
    fn test_check_text_length() {
        assert!(check_text_length("name", "Jane Doe", 30).is_ok());
        assert_eq!(
            check_text_length("name", "", 30),
            Err(ValidationError::Empty { field: "name" })
        );
        assert_eq!(
            check_text_length("name", &"a".repeat(31), 30),
            Err(ValidationError::Length {
                field: "name",
                max: 30,
                actual: 31
            })
        );
    }

    #[test]
    fn test_check_text_length_counts_chars_not_bytes() {
        // 30 two-byte characters still fit.
        assert!(check_text_length("name", &"é".repeat(30), 30).is_ok());
    }

    #[test]
    fn test_error_is_send_and_sync() {
        fn assert_send<T: Send>() {}
        fn assert_sync<T: Sync>() {}

        assert_send::<ValidationError>();
        assert_sync::<ValidationError>();
    }
}
