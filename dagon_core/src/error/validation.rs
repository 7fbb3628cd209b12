//! Validation related error types

use thiserror::Error;

/// Validation and configuration errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Salt length that is not a positive integer
    #[error("Invalid salt length '{input}': {reason}")]
    InvalidLength { input: String, reason: String },

    /// Salt placement other than prefix or suffix
    #[error("Invalid salt placement '{input}': expected 'prefix' or 'suffix'")]
    InvalidPlacement { input: String },

    /// Invalid input parameter
    #[error("Invalid parameter '{parameter}': {reason}")]
    InvalidParameter { parameter: String, reason: String },

    /// Invalid configuration
    #[error("Invalid configuration: {message}")]
    InvalidConfiguration { message: String },
}

impl ValidationError {
    /// Create an invalid salt length error
    pub fn invalid_length(input: &str, reason: &str) -> Self {
        Self::InvalidLength {
            input: input.to_string(),
            reason: reason.to_string(),
        }
    }

    /// Create an invalid placement error
    pub fn invalid_placement(input: &str) -> Self {
        Self::InvalidPlacement {
            input: input.to_string(),
        }
    }

    /// Create an invalid parameter error
    pub fn invalid_parameter(parameter: &str, reason: &str) -> Self {
        Self::InvalidParameter {
            parameter: parameter.to_string(),
            reason: reason.to_string(),
        }
    }

    /// Create an invalid configuration error
    pub fn invalid_configuration(message: &str) -> Self {
        Self::InvalidConfiguration {
            message: message.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_length_error() {
        let error = ValidationError::invalid_length("eight", "must be a positive integer");
        assert!(error.to_string().contains("Invalid salt length"));
        assert!(error.to_string().contains("eight"));
        assert!(error.to_string().contains("must be a positive integer"));
    }

    #[test]
    fn test_invalid_placement_error() {
        let error = ValidationError::invalid_placement("middle");
        assert!(error.to_string().contains("middle"));
        assert!(error.to_string().contains("prefix"));
    }

    #[test]
    fn test_invalid_parameter_error() {
        let error = ValidationError::invalid_parameter("workers", "must be positive");
        assert!(error.to_string().contains("Invalid parameter"));
        assert!(error.to_string().contains("workers"));
        assert!(error.to_string().contains("must be positive"));
    }

    #[test]
    fn test_invalid_configuration_error() {
        let error = ValidationError::invalid_configuration("Bad config");
        assert!(error.to_string().contains("Invalid configuration"));
        assert!(error.to_string().contains("Bad config"));
    }
}
