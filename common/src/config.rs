//! Start-up configuration for reactive properties

use crate::constants::{EPSILON, MAX_NOTIFICATION_DEPTH};

/// Settings shared by every property in a model.
///
/// Read-only once the model is built; pass it to constructors instead of
/// keeping it in a global.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReactiveConfig {
    /// Numeric updates smaller than this are suppressed
    pub epsilon: f64,
    /// Bound on nested notification rounds for a single property
    pub max_notification_depth: usize,
}

impl ReactiveConfig {
    pub fn new(epsilon: f64, max_notification_depth: usize) -> Self {
        Self {
            epsilon,
            max_notification_depth,
        }
    }

    /// Equality used for f64 properties
    pub fn approx_eq(&self, a: f64, b: f64) -> bool {
        a == b || (a - b).abs() <= self.epsilon
    }
}

impl Default for ReactiveConfig {
    fn default() -> Self {
        Self::new(EPSILON, MAX_NOTIFICATION_DEPTH)
    }
}
