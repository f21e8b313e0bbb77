//! Common utilities for the spring simulations
//!
//! This crate provides the small reactive layer the Hooke's Law model is built on:
//! observable properties, properties derived from them, numeric ranges and the
//! configuration that controls equality tolerance and re-entrant settling.

pub mod config;
pub mod derived;
pub mod error;
pub mod property;
pub mod range;

pub use config::*;
pub use derived::*;
pub use error::*;
pub use property::*;
pub use range::*;

/// Defaults for the reactive layer
pub mod constants {
    /// Two numbers closer than this are treated as the same value
    pub const EPSILON: f64 = 1e-10;

    /// How deeply a notification may re-enter before settling is abandoned
    pub const MAX_NOTIFICATION_DEPTH: usize = 64;
}
