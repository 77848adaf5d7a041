// Copyright 2025 Cowboy AI, LLC.

//! Error types for composition and instantiation

use crate::capability::CapabilityKind;
use thiserror::Error;

/// Errors that can occur while composing Makers or creating instances
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum MakeError {
    /// A composition source was absent
    ///
    /// Composing with a missing reference is always a programmer error and is
    /// never silently skipped.
    #[error("undefined maker passed to composition")]
    UndefinedMaker,

    /// A capability requirement was still outstanding at instantiation
    #[error("required {kind} '{name}' not available")]
    MissingRequirement {
        /// Kind of capability that was required
        kind: CapabilityKind,
        /// Name of the behavior slot holding the requirement
        name: String,
    },

    /// No behavior with the given name resolves on the instance
    #[error("no behavior named '{0}'")]
    UnknownBehavior(String),

    /// The named behavior is a data value, not a callable method
    #[error("behavior '{0}' is not callable")]
    NotCallable(String),

    /// A user-supplied initializer failed during instantiation
    #[error("initializer failed: {0}")]
    Initializer(String),
}

/// Result type for composition and instantiation operations
pub type MakeResult<T> = Result<T, MakeError>;

impl MakeError {
    /// Create an initializer failure with the given message
    pub fn initializer(msg: impl Into<String>) -> Self {
        MakeError::Initializer(msg.into())
    }
}
