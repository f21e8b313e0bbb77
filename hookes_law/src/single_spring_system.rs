//! One spring attached to a wall on the left and a robotic arm on the right

use common::{PropertyError, ReactiveConfig};

use crate::error::HookesLawError;
use crate::robotic_arm::{ArmCoupling, RoboticArm};
use crate::spring::{Spring, SpringOptions, SpringSnapshot};

/// Values of a [`SingleSpringSystem`] at one instant
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SingleSpringSnapshot {
    pub spring: SpringSnapshot,
    pub arm_left: f64,
}

pub struct SingleSpringSystem {
    spring: Spring,
    robotic_arm: RoboticArm,
}

impl SingleSpringSystem {
    pub fn new(spring_options: SpringOptions, config: &ReactiveConfig) -> Result<Self, HookesLawError> {
        let spring = Spring::new(spring_options, config)?;

        // The wall end never moves.
        spring.left.freeze();
        spring.equilibrium_x.freeze();

        let right_range = spring.right_range.get();
        let robotic_arm = RoboticArm::new(
            spring.right.get(),
            right_range.max + spring.equilibrium_length,
            config,
        )?;
        robotic_arm.attach(&spring, ArmCoupling::Direct)?;

        log::debug!("single spring system built around {}", spring.name);
        Ok(Self { spring, robotic_arm })
    }

    pub fn spring(&self) -> &Spring {
        &self.spring
    }

    pub fn robotic_arm(&self) -> &RoboticArm {
        &self.robotic_arm
    }

    pub fn reset(&self) -> Result<(), PropertyError> {
        self.spring.reset()?;
        self.robotic_arm.reset()
    }

    pub fn snapshot(&self) -> SingleSpringSnapshot {
        SingleSpringSnapshot {
            spring: self.spring.snapshot(),
            arm_left: self.robotic_arm.left.get(),
        }
    }
}
