//! Error types for the AIngle term bridge.

use thiserror::Error;

use crate::engine::TermRef;

/// A specialized `Result` type for bridge operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Defines the errors that can occur while moving terms across the host/engine boundary.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// A variable name was missing, empty, or rejected by the active name policy.
    #[error("Invalid variable name: {0}")]
    InvalidName(String),

    /// A structural operation was invoked on a term kind that has no structure.
    #[error("{operation}() is undefined for {kind}")]
    Unsupported {
        operation: &'static str,
        kind: &'static str,
    },

    /// The handle was never allocated by the engine, or was allocated but never written.
    #[error("Dangling term handle: {0}")]
    DanglingHandle(TermRef),

    /// An engine-side bind targeted a handle that is not an unbound variable.
    #[error("Term handle is already bound: {0}")]
    AlreadyBound(TermRef),

    /// A compound term reached itself through its own arguments while being read.
    #[error("Cyclic term at handle: {0}")]
    CyclicTerm(TermRef),

    /// Any other failure reported by the native engine.
    #[error("Engine error: {0}")]
    Engine(String),

    /// A configuration value could not be interpreted.
    #[error("Config error: {0}")]
    Config(String),

    /// An error occurred during data serialization or deserialization.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl Error {
    pub(crate) fn unsupported(operation: &'static str, kind: &'static str) -> Self {
        Error::Unsupported { operation, kind }
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Serialization(e.to_string())
    }
}
