//! Two springs side by side, both pulled by the same bar
//!
//! Both springs share one displacement, their forces add up, and the
//! equivalent spring constant is k = k_top + k_bottom.

use common::{PropertyError, RangeWithValue, ReactiveConfig};

use crate::constants::{PARALLEL_EQUILIBRIUM_LENGTH, SYSTEMS_APPLIED_FORCE_RANGE, SYSTEMS_SPRING_CONSTANT_RANGE, WALL_X};
use crate::error::HookesLawError;
use crate::robotic_arm::{ArmCoupling, RoboticArm};
use crate::spring::{Spring, SpringOptions, SpringSnapshot};

/// Equivalent spring constant of two springs in parallel
pub fn parallel_spring_constant(k_top: f64, k_bottom: f64) -> f64 {
    k_top + k_bottom
}

/// Values of a [`ParallelSystem`] at one instant
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParallelSnapshot {
    pub top_spring: SpringSnapshot,
    pub bottom_spring: SpringSnapshot,
    pub equivalent_spring: SpringSnapshot,
    pub arm_left: f64,
}

pub struct ParallelSystem {
    top_spring: Spring,
    bottom_spring: Spring,
    equivalent_spring: Spring,
    robotic_arm: RoboticArm,
}

impl ParallelSystem {
    /// The parallel system shown on the Systems screen
    pub fn new(config: &ReactiveConfig) -> Result<Self, HookesLawError> {
        Self::with_spring_options(
            SpringOptions {
                equilibrium_length: PARALLEL_EQUILIBRIUM_LENGTH,
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
            .ok_or(HookesLawError::ForceRangeRequired { system: "parallel system" })?;

        let top_spring = Spring::new(
            SpringOptions {
                name: "topSpring".to_string(),
                left: WALL_X,
                ..template.clone()
            },
            config,
        )?;
        let bottom_spring = Spring::new(
            SpringOptions {
                name: "bottomSpring".to_string(),
                left: WALL_X,
                ..template
            },
            config,
        )?;

        let k_top = top_spring.spring_constant_range;
        let k_bottom = bottom_spring.spring_constant_range;
        // The equivalent spring shares the applied force range, so each
        // sub-spring carries at most its share of it.
        let equivalent_spring = Spring::new(
            SpringOptions {
                name: "equivalentSpring".to_string(),
                left: top_spring.left.get(),
                equilibrium_length: top_spring.equilibrium_length,
                spring_constant_range: RangeWithValue::new(
                    parallel_spring_constant(k_top.min, k_bottom.min),
                    parallel_spring_constant(k_top.max, k_bottom.max),
                    parallel_spring_constant(k_top.default_value, k_bottom.default_value),
                ),
                applied_force_range: Some(force_range),
                displacement_range: None,
            },
            config,
        )?;

        top_spring.left.freeze();
        bottom_spring.left.freeze();
        equivalent_spring.left.freeze();
        equivalent_spring.equilibrium_x.freeze();

        // Every spring in parallel has the same displacement.
        {
            let top_displacement = top_spring.displacement.downgrade();
            let bottom_displacement = bottom_spring.displacement.downgrade();
            equivalent_spring.displacement.link(move |&displacement| {
                if let Some(top) = top_displacement.upgrade() {
                    top.set(displacement)?;
                }
                if let Some(bottom) = bottom_displacement.upgrade() {
                    bottom.set(displacement)?;
                }
                Ok(())
            })?;
        }

        {
            let k_top = top_spring.spring_constant.downgrade();
            let k_bottom = bottom_spring.spring_constant.downgrade();
            let k_equivalent = equivalent_spring.spring_constant.downgrade();
            let update = move || {
                let (Some(k_top), Some(k_bottom), Some(k_equivalent)) =
                    (k_top.upgrade(), k_bottom.upgrade(), k_equivalent.upgrade())
                else {
                    return Ok(());
                };
                k_equivalent.set(parallel_spring_constant(k_top.get(), k_bottom.get()))
            };
            let update_from_bottom = update.clone();
            top_spring.spring_constant.link(move |_| update())?;
            bottom_spring.spring_constant.link(move |_| update_from_bottom())?;
        }

        let right_range = equivalent_spring.right_range.get();
        let robotic_arm = RoboticArm::new(
            equivalent_spring.right.get(),
            right_range.max + equivalent_spring.equilibrium_length,
            config,
        )?;
        robotic_arm.attach(&equivalent_spring, ArmCoupling::Guarded)?;

        log::debug!(
            "parallel system: k_eq in {}",
            equivalent_spring.spring_constant_range
        );
        Ok(Self {
            top_spring,
            bottom_spring,
            equivalent_spring,
            robotic_arm,
        })
    }

    pub fn top_spring(&self) -> &Spring {
        &self.top_spring
    }

    pub fn bottom_spring(&self) -> &Spring {
        &self.bottom_spring
    }

    pub fn equivalent_spring(&self) -> &Spring {
        &self.equivalent_spring
    }

    pub fn robotic_arm(&self) -> &RoboticArm {
        &self.robotic_arm
    }

    pub fn reset(&self) -> Result<(), PropertyError> {
        self.top_spring.reset()?;
        self.bottom_spring.reset()?;
        self.equivalent_spring.reset()?;
        self.robotic_arm.reset()
    }

    pub fn snapshot(&self) -> ParallelSnapshot {
        ParallelSnapshot {
            top_spring: self.top_spring.snapshot(),
            bottom_spring: self.bottom_spring.snapshot(),
            equivalent_spring: self.equivalent_spring.snapshot(),
            arm_left: self.robotic_arm.left.get(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equal_springs_double_the_constant() {
        let system = ParallelSystem::new(&ReactiveConfig::default()).unwrap();
        assert!((system.equivalent_spring().spring_constant.get() - 400.0).abs() < 1e-9);
    }

    #[test]
    fn force_splits_in_proportion_to_stiffness() {
        let system = ParallelSystem::new(&ReactiveConfig::default()).unwrap();
        system.top_spring().spring_constant.set(600.0).unwrap();
        system.equivalent_spring().applied_force.set(80.0).unwrap();

        // k_eq = 800, x = 0.1
        assert!((system.equivalent_spring().displacement.get() - 0.1).abs() < 1e-9);
        assert!((system.top_spring().applied_force.get() - 60.0).abs() < 1e-9);
        assert!((system.bottom_spring().applied_force.get() - 20.0).abs() < 1e-9);
    }

    #[test]
    fn displacement_template_is_rejected() {
        let result = ParallelSystem::with_spring_options(
            SpringOptions {
                spring_constant_range: SYSTEMS_SPRING_CONSTANT_RANGE,
                displacement_range: Some(RangeWithValue::new(-0.5, 0.5, 0.0)),
                ..Default::default()
            },
            &ReactiveConfig::default(),
        );
        assert!(matches!(result, Err(HookesLawError::ForceRangeRequired { .. })));
    }
}
