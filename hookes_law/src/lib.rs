//! Hooke's Law
//!
//! The reactive model behind an interactive Hooke's Law simulation:
//!
//! - **Spring**: applied force, spring constant and displacement kept consistent with F = kx
//! - **Robotic arm**: the movable endpoint that pulls or pushes on a spring
//! - **Single spring system**: one spring driven by one arm
//! - **Series and parallel systems**: two springs plus their equivalent spring
//! - **Screens**: the Intro, Systems and Energy models with their display settings
//!
//! Everything is synchronous and single-threaded. Setting a property settles the
//! whole network before the setter returns.

pub mod config;
pub mod equations;
pub mod error;
pub mod parallel_system;
pub mod robotic_arm;
pub mod screens;
pub mod series_system;
pub mod single_spring_system;
pub mod spring;

pub use config::HookesLawConfig;
pub use error::HookesLawError;
pub use parallel_system::ParallelSystem;
pub use robotic_arm::{ArmCoupling, RoboticArm};
pub use screens::*;
pub use series_system::SeriesSystem;
pub use single_spring_system::SingleSpringSystem;
pub use spring::{FixedQuantity, Spring, SpringOptions, SpringSnapshot};

/// Ranges and lengths used by the three screens
pub mod constants {
    use common::RangeWithValue;

    /// x coordinate of the wall every system is attached to (m)
    pub const WALL_X: f64 = 0.0;

    // Intro screen: one spring per system
    pub const INTRO_SPRING_CONSTANT_RANGE: RangeWithValue = RangeWithValue::new(100.0, 1000.0, 200.0);
    pub const INTRO_APPLIED_FORCE_RANGE: RangeWithValue = RangeWithValue::new(-100.0, 100.0, 0.0);
    pub const INTRO_EQUILIBRIUM_LENGTH: f64 = 1.5;

    // Systems screen: two springs in series or parallel
    pub const SYSTEMS_SPRING_CONSTANT_RANGE: RangeWithValue = RangeWithValue::new(200.0, 600.0, 200.0);
    pub const SYSTEMS_APPLIED_FORCE_RANGE: RangeWithValue = RangeWithValue::new(-100.0, 100.0, 0.0);
    pub const SERIES_EQUILIBRIUM_LENGTH: f64 = 0.75;
    pub const PARALLEL_EQUILIBRIUM_LENGTH: f64 = 1.5;

    // Energy screen: displacement is the controlled quantity
    pub const ENERGY_SPRING_CONSTANT_RANGE: RangeWithValue = RangeWithValue::new(100.0, 400.0, 100.0);
    pub const ENERGY_DISPLACEMENT_RANGE: RangeWithValue = RangeWithValue::new(-1.0, 1.0, 0.0);
    pub const ENERGY_EQUILIBRIUM_LENGTH: f64 = 1.5;
}
