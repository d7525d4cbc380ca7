//! Domain error types.
//!
//! These errors represent validation failures in trip input and lookups
//! against the reference tables. They are recoverable: the web layer turns
//! them into a 400 response and the user corrects the form.

/// Domain-level errors for validation and lookups.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DomainError {
    /// Unknown city, or manual coordinates that are missing or out of range
    #[error("invalid location: {0}")]
    InvalidLocation(String),

    /// Travel mode outside {Flight, Train, Car, Bus}
    #[error("unsupported travel mode: {0}")]
    UnsupportedMode(String),

    /// A count or distance outside its allowed range
    #[error("invalid {field}: {reason}")]
    InvalidQuantity {
        field: &'static str,
        reason: String,
    },

    /// Travel dates that cannot be parsed or are out of order
    #[error("invalid date: {0}")]
    InvalidDate(String),
}

impl DomainError {
    pub(crate) fn quantity(field: &'static str, reason: impl Into<String>) -> Self {
        DomainError::InvalidQuantity {
            field,
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = DomainError::InvalidLocation("Atlantis".into());
        assert_eq!(err.to_string(), "invalid location: Atlantis");

        let err = DomainError::UnsupportedMode("Boat".into());
        assert_eq!(err.to_string(), "unsupported travel mode: Boat");

        let err = DomainError::quantity("travelers", "must be at least 1");
        assert_eq!(err.to_string(), "invalid travelers: must be at least 1");

        let err = DomainError::InvalidDate("return date is before outbound date".into());
        assert_eq!(
            err.to_string(),
            "invalid date: return date is before outbound date"
        );
    }
}
