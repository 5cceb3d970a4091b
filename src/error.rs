//! Error types for Landmark operations.

use thiserror::Error;

/// Result type alias for Landmark operations.
pub type Result<T> = std::result::Result<T, LandmarkError>;

/// Main error type for Landmark operations.
#[derive(Error, Debug)]
pub enum LandmarkError {
    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Invalid input or arguments
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Malformed parent links (cycles) in route or comment hierarchies
    #[error("Hierarchy error: {0}")]
    Hierarchy(String),

    /// SOQL query construction errors
    #[error("Query error: {0}")]
    Query(String),
}

impl From<serde_json::Error> for LandmarkError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

impl LandmarkError {
    /// Creates a new serialization error.
    pub fn serialization<T: ToString>(msg: T) -> Self {
        Self::Serialization(msg.to_string())
    }

    /// Creates a new invalid input error.
    pub fn invalid_input<T: ToString>(msg: T) -> Self {
        Self::InvalidInput(msg.to_string())
    }

    /// Creates a new configuration error.
    pub fn config<T: ToString>(msg: T) -> Self {
        Self::Config(msg.to_string())
    }

    /// Creates a new hierarchy error.
    pub fn hierarchy<T: ToString>(msg: T) -> Self {
        Self::Hierarchy(msg.to_string())
    }

    /// Creates a new query error.
    pub fn query<T: ToString>(msg: T) -> Self {
        Self::Query(msg.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = LandmarkError::hierarchy("cycle through 'a'");
        assert_eq!(err.to_string(), "Hierarchy error: cycle through 'a'");

        let err = LandmarkError::query("empty select list");
        assert_eq!(err.to_string(), "Query error: empty select list");
    }

    #[test]
    fn test_json_error_conversion() {
        let json_err = serde_json::from_str::<u32>("not json").unwrap_err();
        let err: LandmarkError = json_err.into();
        assert!(matches!(err, LandmarkError::Serialization(_)));
    }
}
