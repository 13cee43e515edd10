//! Error types for famgraph operations.
//!
//! Queries over a loaded graph are total and never return these; only
//! builders and exports are fallible.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for famgraph operations.
pub type Result<T> = std::result::Result<T, GraphError>;

/// Error type for fallible graph construction and export.
#[derive(Error, Debug)]
pub enum GraphError {
    /// Person not found in the graph
    #[error("Person not found: {person_id}")]
    PersonNotFound {
        /// ID of the missing person
        person_id: String,
    },

    /// Family not found in the graph
    #[error("Family not found: {family_id}")]
    FamilyNotFound {
        /// ID of the missing family
        family_id: String,
    },

    /// Invalid operation (e.g., adding a duplicate id)
    #[error("Invalid operation: {message}")]
    InvalidOperation {
        /// Description of what went wrong
        message: String,
    },

    /// Serialization/deserialization error
    #[error("Serialization error: {message}")]
    Serialization {
        /// Error details
        message: String,
        /// Optional source error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Failed to write an export file
    #[error("IO error writing {}: {source}", path.display())]
    Io {
        /// Target path
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },
}

impl GraphError {
    /// Create a serialization error from a message and optional source.
    pub fn serialization<E>(message: impl Into<String>, source: Option<E>) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Serialization {
            message: message.into(),
            source: source.map(|e| Box::new(e) as Box<dyn std::error::Error + Send + Sync>),
        }
    }

    /// Create an invalid-operation error.
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidOperation {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_person_not_found_error() {
        let err = GraphError::PersonNotFound {
            person_id: "I42".to_string(),
        };
        assert_eq!(err.to_string(), "Person not found: I42");
    }

    #[test]
    fn test_serialization_error() {
        let err = GraphError::serialization("Failed to encode graph", None::<std::io::Error>);
        assert_eq!(err.to_string(), "Serialization error: Failed to encode graph");
    }

    #[test]
    fn test_invalid_operation_error() {
        let err = GraphError::invalid("Duplicate person id I1");
        assert_eq!(err.to_string(), "Invalid operation: Duplicate person id I1");
    }
}
