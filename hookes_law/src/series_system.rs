//! Two springs joined end to end
//!
//! The same force runs through both springs, displacements add up, and the
//! equivalent spring constant obeys 1/k = 1/k_left + 1/k_right.

use common::{PropertyError, RangeWithValue, ReactiveConfig};

use crate::constants::{SERIES_EQUILIBRIUM_LENGTH, SYSTEMS_APPLIED_FORCE_RANGE, SYSTEMS_SPRING_CONSTANT_RANGE, WALL_X};
use crate::error::HookesLawError;
use crate::robotic_arm::{ArmCoupling, RoboticArm};
use crate::spring::{Spring, SpringOptions, SpringSnapshot};

/// Equivalent spring constant of two springs in series
pub fn series_spring_constant(k_left: f64, k_right: f64) -> f64 {
    1.0 / (1.0 / k_left + 1.0 / k_right)
}

/// Values of a [`SeriesSystem`] at one instant
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeriesSnapshot {
    pub left_spring: SpringSnapshot,
    pub right_spring: SpringSnapshot,
    pub equivalent_spring: SpringSnapshot,
    pub arm_left: f64,
}

pub struct SeriesSystem {
    left_spring: Spring,
    right_spring: Spring,
    equivalent_spring: Spring,
    robotic_arm: RoboticArm,
}

impl SeriesSystem {
    /// The series system shown on the Systems screen
    pub fn new(config: &ReactiveConfig) -> Result<Self, HookesLawError> {
        Self::with_spring_options(
            SpringOptions {
                equilibrium_length: SERIES_EQUILIBRIUM_LENGTH,
                spring_constant_range: SYSTEMS_SPRING_CONSTANT_RANGE,
                applied_force_range: Some(SYSTEMS_APPLIED_FORCE_RANGE),
                ..Default::default()
            },
            config,
        )
    }

    /// Build with both sub-springs made from `template`; its name and left
    /// end are ignored. The template must supply an applied force range.
    pub fn with_spring_options(template: SpringOptions, config: &ReactiveConfig) -> Result<Self, HookesLawError> {
        let force_range = template
            .applied_force_range
            .ok_or(HookesLawError::ForceRangeRequired { system: "series system" })?;

        let left_spring = Spring::new(
            SpringOptions {
                name: "leftSpring".to_string(),
                left: WALL_X,
                ..template.clone()
            },
            config,
        )?;
        let right_spring = Spring::new(
            SpringOptions {
                name: "rightSpring".to_string(),
                left: left_spring.right.get(),
                ..template
            },
            config,
        )?;

        let k_left = left_spring.spring_constant_range;
        let k_right = right_spring.spring_constant_range;
        let equivalent_spring = Spring::new(
            SpringOptions {
                name: "equivalentSpring".to_string(),
                left: left_spring.left.get(),
                equilibrium_length: left_spring.equilibrium_length + right_spring.equilibrium_length,
                spring_constant_range: RangeWithValue::new(
                    series_spring_constant(k_left.min, k_right.min),
                    series_spring_constant(k_left.max, k_right.max),
                    series_spring_constant(k_left.default_value, k_right.default_value),
                ),
                applied_force_range: Some(force_range),
                displacement_range: None,
            },
            config,
        )?;

        // Only the right spring's left end moves; it rides on the left spring.
        left_spring.left.freeze();
        equivalent_spring.left.freeze();
        equivalent_spring.equilibrium_x.freeze();

        {
            let right_spring_left = right_spring.left.downgrade();
            left_spring.right.link(move |&right| match right_spring_left.upgrade() {
                Some(left) => left.set(right),
                None => Ok(()),
            })?;
        }

        // The same force acts on every spring in series.
        {
            let left_force = left_spring.applied_force.downgrade();
            let right_force = right_spring.applied_force.downgrade();
            equivalent_spring.applied_force.link(move |&force| {
                if let Some(left_force) = left_force.upgrade() {
                    left_force.set(force)?;
                }
                if let Some(right_force) = right_force.upgrade() {
                    right_force.set(force)?;
                }
                Ok(())
            })?;
        }

        {
            let k_left = left_spring.spring_constant.downgrade();
            let k_right = right_spring.spring_constant.downgrade();
            let k_equivalent = equivalent_spring.spring_constant.downgrade();
            let update = move || {
                let (Some(k_left), Some(k_right), Some(k_equivalent)) =
                    (k_left.upgrade(), k_right.upgrade(), k_equivalent.upgrade())
                else {
                    return Ok(());
                };
                k_equivalent.set(series_spring_constant(k_left.get(), k_right.get()))
            };
            let update_from_right = update.clone();
            left_spring.spring_constant.link(move |_| update())?;
            right_spring.spring_constant.link(move |_| update_from_right())?;
        }

        let right_range = equivalent_spring.right_range.get();
        let robotic_arm = RoboticArm::new(
            equivalent_spring.right.get(),
            right_range.max + left_spring.equilibrium_length,
            config,
        )?;
        robotic_arm.attach(&equivalent_spring, ArmCoupling::Guarded)?;

        log::debug!(
            "series system: k_eq in {}",
            equivalent_spring.spring_constant_range
        );
        Ok(Self {
            left_spring,
            right_spring,
            equivalent_spring,
            robotic_arm,
        })
    }

    pub fn left_spring(&self) -> &Spring {
        &self.left_spring
    }

    pub fn right_spring(&self) -> &Spring {
        &self.right_spring
    }

    pub fn equivalent_spring(&self) -> &Spring {
        &self.equivalent_spring
    }

    pub fn robotic_arm(&self) -> &RoboticArm {
        &self.robotic_arm
    }

    pub fn reset(&self) -> Result<(), PropertyError> {
        self.left_spring.reset()?;
        self.right_spring.reset()?;
        self.equivalent_spring.reset()?;
        self.robotic_arm.reset()
    }

    pub fn snapshot(&self) -> SeriesSnapshot {
        SeriesSnapshot {
            left_spring: self.left_spring.snapshot(),
            right_spring: self.right_spring.snapshot(),
            equivalent_spring: self.equivalent_spring.snapshot(),
            arm_left: self.robotic_arm.left.get(),
        }
    }
}
