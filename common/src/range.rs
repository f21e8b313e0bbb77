//! Numeric ranges for slider-style quantities

use std::fmt;

/// A closed interval `[min, max]`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Range {
    pub min: f64,
    pub max: f64,
}

impl Range {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }

    /// Clamp a value into the range
    pub fn constrain(&self, value: f64) -> f64 {
        value.clamp(self.min, self.max)
    }

    pub fn length(&self) -> f64 {
        self.max - self.min
    }

    pub fn is_valid(&self) -> bool {
        self.min.is_finite() && self.max.is_finite() && self.min <= self.max
    }

    /// The same interval moved by `offset`
    pub fn shifted(&self, offset: f64) -> Self {
        Self::new(self.min + offset, self.max + offset)
    }
}

impl fmt::Display for Range {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.min, self.max)
    }
}

/// A range that also carries the value a quantity starts at
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RangeWithValue {
    pub min: f64,
    pub max: f64,
    pub default_value: f64,
}

impl RangeWithValue {
    pub const fn new(min: f64, max: f64, default_value: f64) -> Self {
        Self {
            min,
            max,
            default_value,
        }
    }

    pub fn range(&self) -> Range {
        Range::new(self.min, self.max)
    }

    pub fn contains(&self, value: f64) -> bool {
        self.range().contains(value)
    }

    /// True when the bounds are ordered and the default lies inside them
    pub fn is_valid(&self) -> bool {
        self.range().is_valid() && self.contains(self.default_value)
    }
}

impl fmt::Display for RangeWithValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}] (default {})", self.min, self.max, self.default_value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    #[test]
    fn constrain_clamps_both_ends() {
        let range = Range::new(-100.0, 100.0);
        assert_eq!(range.constrain(150.0), 100.0);
        assert_eq!(range.constrain(-150.0), -100.0);
        assert_eq!(range.constrain(42.0), 42.0);
    }

    #[test]
    fn contains_is_inclusive() {
        let range = Range::new(0.5, 2.5);
        assert!(range.contains(0.5));
        assert!(range.contains(2.5));
        assert!(!range.contains(2.5 + 1e-9));
    }

    #[test]
    fn default_outside_bounds_is_invalid() {
        assert!(RangeWithValue::new(100.0, 1000.0, 200.0).is_valid());
        assert!(!RangeWithValue::new(100.0, 1000.0, 50.0).is_valid());
        assert!(!RangeWithValue::new(10.0, 1.0, 5.0).is_valid());
    }

    #[test]
    fn shifted_moves_both_bounds() {
        let range = Range::new(-1.0, 1.0).shifted(1.5);
        assert_eq!(range, Range::new(0.5, 2.5));
        assert_eq!(range.length(), 2.0);
    }

    #[test]
    fn constrained_values_always_land_inside() {
        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..1000 {
            let a = rng.gen_range(-500.0..500.0);
            let b = rng.gen_range(-500.0..500.0);
            let range = Range::new(f64::min(a, b), f64::max(a, b));
            let value = rng.gen_range(-1000.0..1000.0);
            let constrained = range.constrain(value);
            assert!(range.contains(constrained));
            if range.contains(value) {
                assert_eq!(constrained, value);
            }
        }
    }
}
