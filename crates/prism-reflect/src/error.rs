//! Error types for reflection
//!
//! None of these cross the public query boundary: queries fold them into
//! sentinels, and specialization turns them into diagnostics.

use thiserror::Error;

/// Failures reported by reflection collaborators
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ReflectError {
    /// Name resolution found nothing
    #[error("Cannot find type '{name}'")]
    TypeNotFound {
        /// Name that was looked up
        name: String,
    },

    /// The base type of a specialization has no slots to fill
    #[error("Type '{ty}' has no existential slots to specialize")]
    NotSpecializable {
        /// Display form of the base type
        ty: String,
    },

    /// Wrong number of specialization arguments
    #[error("Wrong number of specialization arguments: expected {expected}, got {actual}")]
    ArgumentCountMismatch {
        /// Slot count of the base type
        expected: usize,
        /// Arguments supplied
        actual: usize,
    },

    /// A specialization argument does not implement the slot's interface
    #[error("Type '{arg}' does not conform to interface '{interface}'")]
    DoesNotConform {
        /// Display form of the argument
        arg: String,
        /// Interface required by the slot
        interface: String,
    },

    /// A collaborator panicked; the panic was contained
    #[error("Internal failure while {during}: {message}")]
    Panicked {
        /// Operation that was running
        during: &'static str,
        /// Panic payload, when it was a string
        message: String,
    },
}

impl ReflectError {
    /// Build a [`ReflectError::Panicked`] from a `catch_unwind` payload
    pub fn from_panic(during: &'static str, payload: &(dyn std::any::Any + Send)) -> Self {
        let message = if let Some(s) = payload.downcast_ref::<&str>() {
            (*s).to_string()
        } else if let Some(s) = payload.downcast_ref::<String>() {
            s.clone()
        } else {
            "unknown panic".to_string()
        };
        ReflectError::Panicked { during, message }
    }
}

/// Failures extracting a typed value from a user-attribute argument
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum AttributeValueError {
    /// No argument at this index
    #[error("Attribute argument index {index} out of range (attribute has {count})")]
    IndexOutOfRange {
        /// Requested index
        index: usize,
        /// Argument count
        count: usize,
    },

    /// The argument's literal kind differs from the requested one
    #[error("Attribute argument is {found}, not {expected}")]
    KindMismatch {
        /// Requested kind
        expected: &'static str,
        /// Actual kind
        found: &'static str,
    },
}

/// Errors that can occur loading a [`crate::ReflectionConfig`]
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read the config file
    #[error("Failed to read reflection config: {0}")]
    IoError(#[from] std::io::Error),

    /// Failed to parse TOML
    #[error("Failed to parse reflection config: {0}")]
    ParseError(#[from] toml::de::Error),
}
