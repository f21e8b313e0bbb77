//! Error types for the Hooke's Law model.

use common::PropertyError;
use thiserror::Error;

/// Errors raised while building or driving the model.
///
/// All of them indicate a bug in the calling code; none is expected while
/// the model is driven through its documented ranges.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum HookesLawError {
    /// A spring was given both an applied force range and a displacement range.
    #[error("{spring}: supply either an applied force range or a displacement range, not both")]
    BothRangesSupplied { spring: String },
    /// A spring was given neither range.
    #[error("{spring}: an applied force range or a displacement range is required")]
    NoRangeSupplied { spring: String },
    /// Series and parallel systems hold the applied force fixed, so their
    /// sub-springs must be built from an applied force range.
    #[error("{system}: sub-springs need an applied force range")]
    ForceRangeRequired { system: &'static str },
    /// Spring constants must be strictly positive.
    #[error("{spring}: spring constant range must be positive, got minimum {min}")]
    NonPositiveSpringConstant { spring: String, min: f64 },
    /// Equilibrium length must be strictly positive.
    #[error("{spring}: equilibrium length must be positive, got {length}")]
    NonPositiveEquilibriumLength { spring: String, length: f64 },
    /// A range has unordered bounds or a default outside them.
    #[error("{spring}: invalid {quantity} range {range}")]
    InvalidRange {
        spring: String,
        quantity: &'static str,
        range: String,
    },
    /// The displacement range would let the right end reach the left end.
    #[error("{spring}: equilibrium length {length} cannot absorb a compression of {compression}")]
    SpringCanInvert {
        spring: String,
        length: f64,
        compression: f64,
    },
    /// A robotic arm must start left of its fixed right end.
    #[error("robotic arm left ({left}) must be less than right ({right})")]
    InvalidArmEndpoints { left: f64, right: f64 },
    /// A property rejected an update.
    #[error(transparent)]
    Property(#[from] PropertyError),
}
