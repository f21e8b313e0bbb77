//! Errors raised by reactive properties.

use thiserror::Error;

/// A property refused an update.
///
/// None of these are transient: each one means the calling code broke a
/// contract of the model.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PropertyError {
    /// The value failed the property's validator or range.
    #[error("{name}: invalid value {value} (expected {constraint})")]
    InvalidValue {
        name: String,
        value: String,
        constraint: String,
    },
    /// The property was frozen and the new value differs from the fixed one.
    #[error("{name} is fixed and cannot change to {value}")]
    Frozen { name: String, value: String },
    /// A listener tried to set a non-reentrant property while it was notifying.
    #[error("{name} was set while notifying its listeners")]
    Reentrant { name: String },
    /// Settling recursed past the configured depth.
    #[error("{name} exceeded {depth} nested notifications without settling")]
    DepthExceeded { name: String, depth: usize },
}

impl PropertyError {
    /// Name of the property that rejected the update
    pub fn property_name(&self) -> &str {
        match self {
            PropertyError::InvalidValue { name, .. }
            | PropertyError::Frozen { name, .. }
            | PropertyError::Reentrant { name }
            | PropertyError::DepthExceeded { name, .. } => name,
        }
    }
}
