//! Screen models: Intro, Systems and Energy
//!
//! Each screen owns its spring systems plus the display settings its
//! controls toggle. Views observe these properties; nothing here draws.

use common::{Property, PropertyError};

use crate::config::HookesLawConfig;
use crate::constants::{
    ENERGY_DISPLACEMENT_RANGE, ENERGY_EQUILIBRIUM_LENGTH, ENERGY_SPRING_CONSTANT_RANGE, INTRO_APPLIED_FORCE_RANGE,
    INTRO_EQUILIBRIUM_LENGTH, INTRO_SPRING_CONSTANT_RANGE,
};
use crate::error::HookesLawError;
use crate::parallel_system::ParallelSystem;
use crate::series_system::SeriesSystem;
use crate::single_spring_system::SingleSpringSystem;
use crate::spring::{Spring, SpringOptions};

/// How many systems the Intro screen shows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumberOfSystems {
    One,
    Two,
}

/// Which compound system the Systems screen shows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SystemType {
    Parallel,
    Series,
}

/// Whether spring forces are drawn for the equivalent spring or each sub-spring
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpringForceRepresentation {
    Total,
    Components,
}

/// Graph selected on the Energy screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnergyGraph {
    BarGraph,
    ForcePlot,
    EnergyPlot,
}

fn flag(name: &str, config: &HookesLawConfig) -> Property<bool> {
    Property::new(name, config.check_all, &config.reactive)
}

// ============================================================================
// Intro
// ============================================================================

pub struct IntroViewProperties {
    pub number_of_systems: Property<NumberOfSystems>,
    pub applied_force_vector_visible: Property<bool>,
    pub spring_force_vector_visible: Property<bool>,
    pub displacement_vector_visible: Property<bool>,
    pub equilibrium_position_visible: Property<bool>,
    pub values_visible: Property<bool>,
}

impl IntroViewProperties {
    pub fn new(config: &HookesLawConfig) -> Self {
        Self {
            number_of_systems: Property::new("numberOfSystems", NumberOfSystems::One, &config.reactive),
            applied_force_vector_visible: flag("appliedForceVectorVisible", config),
            spring_force_vector_visible: flag("springForceVectorVisible", config),
            displacement_vector_visible: flag("displacementVectorVisible", config),
            equilibrium_position_visible: flag("equilibriumPositionVisible", config),
            values_visible: flag("valuesVisible", config),
        }
    }

    pub fn reset(&self) -> Result<(), PropertyError> {
        self.number_of_systems.reset()?;
        self.applied_force_vector_visible.reset()?;
        self.spring_force_vector_visible.reset()?;
        self.displacement_vector_visible.reset()?;
        self.equilibrium_position_visible.reset()?;
        self.values_visible.reset()
    }
}

/// One or two independent springs, each pulled by its own arm
pub struct IntroModel {
    pub system1: SingleSpringSystem,
    pub system2: SingleSpringSystem,
    pub view: IntroViewProperties,
}

impl IntroModel {
    pub fn new(config: &HookesLawConfig) -> Result<Self, HookesLawError> {
        let options = |name: &str| SpringOptions {
            name: name.to_string(),
            equilibrium_length: INTRO_EQUILIBRIUM_LENGTH,
            spring_constant_range: INTRO_SPRING_CONSTANT_RANGE,
            applied_force_range: Some(INTRO_APPLIED_FORCE_RANGE),
            ..Default::default()
        };

        log::debug!("building Intro screen");
        Ok(Self {
            system1: SingleSpringSystem::new(options("spring1"), &config.reactive)?,
            system2: SingleSpringSystem::new(options("spring2"), &config.reactive)?,
            view: IntroViewProperties::new(config),
        })
    }

    /// The systems currently on screen
    pub fn active_systems(&self) -> Vec<&SingleSpringSystem> {
        match self.view.number_of_systems.get() {
            NumberOfSystems::One => vec![&self.system1],
            NumberOfSystems::Two => vec![&self.system1, &self.system2],
        }
    }

    pub fn reset(&self) -> Result<(), HookesLawError> {
        self.system1.reset()?;
        self.system2.reset()?;
        self.view.reset()?;
        Ok(())
    }
}

// ============================================================================
// Systems
// ============================================================================

pub struct SystemsViewProperties {
    pub system_type: Property<SystemType>,
    pub spring_force_representation: Property<SpringForceRepresentation>,
    pub applied_force_vector_visible: Property<bool>,
    pub spring_force_vector_visible: Property<bool>,
    pub displacement_vector_visible: Property<bool>,
    pub equilibrium_position_visible: Property<bool>,
    pub values_visible: Property<bool>,
}

impl SystemsViewProperties {
    pub fn new(config: &HookesLawConfig) -> Self {
        Self {
            system_type: Property::new("systemType", SystemType::Parallel, &config.reactive),
            spring_force_representation: Property::new(
                "springForceRepresentation",
                SpringForceRepresentation::Total,
                &config.reactive,
            ),
            applied_force_vector_visible: flag("appliedForceVectorVisible", config),
            spring_force_vector_visible: flag("springForceVectorVisible", config),
            displacement_vector_visible: flag("displacementVectorVisible", config),
            equilibrium_position_visible: flag("equilibriumPositionVisible", config),
            values_visible: flag("valuesVisible", config),
        }
    }

    pub fn reset(&self) -> Result<(), PropertyError> {
        self.system_type.reset()?;
        self.spring_force_representation.reset()?;
        self.applied_force_vector_visible.reset()?;
        self.spring_force_vector_visible.reset()?;
        self.displacement_vector_visible.reset()?;
        self.equilibrium_position_visible.reset()?;
        self.values_visible.reset()
    }
}

/// A spring force arrow the Systems screen should draw
#[derive(Debug, Clone, PartialEq)]
pub struct ForceVector {
    pub spring: String,
    /// N, negative points left
    pub force: f64,
}

impl ForceVector {
    fn of(spring: &Spring) -> Self {
        Self {
            spring: spring.name.clone(),
            force: spring.spring_force.get(),
        }
    }
}

/// A series system and a parallel system, one shown at a time
pub struct SystemsModel {
    pub series_system: SeriesSystem,
    pub parallel_system: ParallelSystem,
    pub view: SystemsViewProperties,
}

impl SystemsModel {
    pub fn new(config: &HookesLawConfig) -> Result<Self, HookesLawError> {
        log::debug!("building Systems screen");
        Ok(Self {
            series_system: SeriesSystem::new(&config.reactive)?,
            parallel_system: ParallelSystem::new(&config.reactive)?,
            view: SystemsViewProperties::new(config),
        })
    }

    /// Equivalent spring of the system on screen
    pub fn active_equivalent_spring(&self) -> &Spring {
        match self.view.system_type.get() {
            SystemType::Parallel => self.parallel_system.equivalent_spring(),
            SystemType::Series => self.series_system.equivalent_spring(),
        }
    }

    /// Spring forces to draw for the selected system and representation
    pub fn spring_force_vectors(&self) -> Vec<ForceVector> {
        match (self.view.system_type.get(), self.view.spring_force_representation.get()) {
            (SystemType::Parallel, SpringForceRepresentation::Total) => {
                vec![ForceVector::of(self.parallel_system.equivalent_spring())]
            }
            (SystemType::Parallel, SpringForceRepresentation::Components) => vec![
                ForceVector::of(self.parallel_system.top_spring()),
                ForceVector::of(self.parallel_system.bottom_spring()),
            ],
            (SystemType::Series, SpringForceRepresentation::Total) => {
                vec![ForceVector::of(self.series_system.equivalent_spring())]
            }
            (SystemType::Series, SpringForceRepresentation::Components) => vec![
                ForceVector::of(self.series_system.left_spring()),
                ForceVector::of(self.series_system.right_spring()),
            ],
        }
    }

    pub fn reset(&self) -> Result<(), HookesLawError> {
        self.series_system.reset()?;
        self.parallel_system.reset()?;
        self.view.reset()?;
        Ok(())
    }
}

// ============================================================================
// Energy
// ============================================================================

pub struct EnergyViewProperties {
    pub graph: Property<EnergyGraph>,
    pub values_visible: Property<bool>,
    pub displacement_vector_visible: Property<bool>,
    pub equilibrium_position_visible: Property<bool>,
}

impl EnergyViewProperties {
    pub fn new(config: &HookesLawConfig) -> Self {
        Self {
            graph: Property::new("graph", EnergyGraph::BarGraph, &config.reactive),
            values_visible: flag("valuesVisible", config),
            displacement_vector_visible: flag("displacementVectorVisible", config),
            equilibrium_position_visible: flag("equilibriumPositionVisible", config),
        }
    }

    pub fn reset(&self) -> Result<(), PropertyError> {
        self.graph.reset()?;
        self.values_visible.reset()?;
        self.displacement_vector_visible.reset()?;
        self.equilibrium_position_visible.reset()
    }
}

/// What the selected Energy graph plots right now
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GraphReading {
    /// Height of the potential energy bar (J)
    Bar { potential_energy: f64 },
    /// Point on the force-displacement line (m, N)
    Force { displacement: f64, applied_force: f64 },
    /// Point on the energy-displacement parabola (m, J)
    Energy { displacement: f64, potential_energy: f64 },
}

/// One spring whose displacement is the controlled quantity
pub struct EnergyModel {
    pub system: SingleSpringSystem,
    pub view: EnergyViewProperties,
}

impl EnergyModel {
    pub fn new(config: &HookesLawConfig) -> Result<Self, HookesLawError> {
        log::debug!("building Energy screen");
        let system = SingleSpringSystem::new(
            SpringOptions {
                equilibrium_length: ENERGY_EQUILIBRIUM_LENGTH,
                spring_constant_range: ENERGY_SPRING_CONSTANT_RANGE,
                displacement_range: Some(ENERGY_DISPLACEMENT_RANGE),
                ..Default::default()
            },
            &config.reactive,
        )?;

        Ok(Self {
            system,
            view: EnergyViewProperties::new(config),
        })
    }

    pub fn graph_reading(&self) -> GraphReading {
        let spring = self.system.spring();
        match self.view.graph.get() {
            EnergyGraph::BarGraph => GraphReading::Bar {
                potential_energy: spring.potential_energy.get(),
            },
            EnergyGraph::ForcePlot => GraphReading::Force {
                displacement: spring.displacement.get(),
                applied_force: spring.applied_force.get(),
            },
            EnergyGraph::EnergyPlot => GraphReading::Energy {
                displacement: spring.displacement.get(),
                potential_energy: spring.potential_energy.get(),
            },
        }
    }

    pub fn reset(&self) -> Result<(), HookesLawError> {
        self.system.reset()?;
        self.view.reset()?;
        Ok(())
    }
}
