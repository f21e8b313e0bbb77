//! The robotic arm that grabs the free end of a spring

use std::cell::Cell;
use std::rc::Rc;

use common::{Property, PropertyError, ReactiveConfig};

use crate::error::HookesLawError;
use crate::spring::Spring;

/// How arm motion is fed back into the spring it holds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArmCoupling {
    /// Every arm change sets the spring's displacement; relies on re-entrant
    /// settling to stop once arm and spring agree.
    Direct,
    /// Arm changes made while the arm is already driving the spring are
    /// ignored, so the cascade through sub-springs finishes first.
    Guarded,
}

/// A movable left end with a fixed right end
#[derive(Debug)]
pub struct RoboticArm {
    /// x coordinate of the fixed end (m)
    pub right: f64,
    /// x coordinate of the gripper (m), always less than `right`
    pub left: Property<f64>,
}

impl RoboticArm {
    pub fn new(left: f64, right: f64, config: &ReactiveConfig) -> Result<Self, HookesLawError> {
        if left.is_nan() || right.is_nan() || left >= right {
            return Err(HookesLawError::InvalidArmEndpoints { left, right });
        }

        let left = Property::number("roboticArm.left", left, None, config)?
            .reentrant()
            .with_validator(format!("less than {right}"), move |left: &f64| *left < right)?;

        Ok(Self { right, left })
    }

    pub fn reset(&self) -> Result<(), PropertyError> {
        self.left.reset()
    }

    /// Grab `spring` by its free end.
    ///
    /// The arm follows the spring's right end, and moving the arm sets the
    /// spring's displacement. The spring's equilibrium position must already
    /// be fixed, and the arm is restricted to the spring's right range.
    pub fn attach(&self, spring: &Spring, coupling: ArmCoupling) -> Result<(), HookesLawError> {
        let right_range = spring.right_range.get();
        self.left
            .add_validator(format!("within {right_range}"), move |left: &f64| right_range.contains(*left))?;

        {
            let arm_left = self.left.downgrade();
            spring.right.lazy_link(move |&right| match arm_left.upgrade() {
                Some(arm_left) => arm_left.set(right),
                None => Ok(()),
            });
        }

        let displacement = spring.displacement.downgrade();
        let equilibrium_x = spring.equilibrium_x.get();
        let displacement_range = spring.displacement_range.range();
        let drive = move |left: f64| match displacement.upgrade() {
            // Round-off in left - equilibrium_x can step just outside the range.
            Some(displacement) => displacement.set(displacement_range.constrain(left - equilibrium_x)),
            None => Ok(()),
        };

        match coupling {
            ArmCoupling::Direct => {
                self.left.lazy_link(move |&left| drive(left));
            }
            ArmCoupling::Guarded => {
                let ignore_updates = Rc::new(Cell::new(false));
                self.left.lazy_link(move |&left| {
                    if ignore_updates.get() {
                        return Ok(());
                    }
                    ignore_updates.set(true);
                    let result = drive(left);
                    ignore_updates.set(false);
                    result
                });
            }
        }

        log::debug!("robotic arm attached to {} ({:?})", spring.name, coupling);
        Ok(())
    }
}
