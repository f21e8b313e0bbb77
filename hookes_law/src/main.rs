//! Hooke's Law walkthrough
//!
//! Builds the Intro, Systems and Energy screen models, drives them the way the
//! sliders and the robotic arm would, and prints the settled quantities.
//!
//! Environment:
//! - RUST_LOG=debug: construction and reset of every spring and system
//! - RUST_LOG=trace: every individual property update

use hookes_law::equations::{EquationsPanel, HOOKES_LAW_EQUATIONS, HOOKES_LAW_VARIABLES, SYSTEMS_EQUATIONS};
use hookes_law::{
    EnergyGraph, EnergyModel, HookesLawConfig, HookesLawError, IntroModel, SpringForceRepresentation, Spring,
    SystemType, SystemsModel,
};

fn print_spring(spring: &Spring) {
    println!(
        "  {:<18} F = {:>8.2} N   k = {:>7.1} N/m   x = {:>7.4} m   E = {:>7.3} J",
        spring.name,
        spring.applied_force.get(),
        spring.spring_constant.get(),
        spring.displacement.get(),
        spring.potential_energy.get(),
    );
}

fn intro(config: &HookesLawConfig) -> Result<(), HookesLawError> {
    let model = IntroModel::new(config)?;
    let spring = model.system1.spring();

    println!("\nIntro: applied force 100 N, then k = 400 N/m");
    spring.applied_force.set(100.0)?;
    print_spring(spring);
    spring.spring_constant.set(400.0)?;
    print_spring(spring);

    println!("Intro: second spring dragged to x = 2.0 m by its arm");
    model.view.number_of_systems.set(hookes_law::NumberOfSystems::Two)?;
    model.system2.robotic_arm().left.set(2.0)?;
    for system in model.active_systems() {
        print_spring(system.spring());
    }

    model.reset()?;
    Ok(())
}

fn systems(config: &HookesLawConfig) -> Result<(), HookesLawError> {
    let model = SystemsModel::new(config)?;

    println!("\nSystems: series, k_left = 600 N/m, applied force 60 N");
    model.view.system_type.set(SystemType::Series)?;
    let series = &model.series_system;
    series.left_spring().spring_constant.set(600.0)?;
    series.equivalent_spring().applied_force.set(60.0)?;
    print_spring(series.left_spring());
    print_spring(series.right_spring());
    print_spring(series.equivalent_spring());

    println!("Systems: parallel, k_top = 600 N/m, arm pulled 0.1 m");
    model.view.system_type.set(SystemType::Parallel)?;
    model.view.spring_force_representation.set(SpringForceRepresentation::Components)?;
    let parallel = &model.parallel_system;
    parallel.top_spring().spring_constant.set(600.0)?;
    let equilibrium_x = parallel.equivalent_spring().equilibrium_x.get();
    parallel.robotic_arm().left.set(equilibrium_x + 0.1)?;
    print_spring(parallel.top_spring());
    print_spring(parallel.bottom_spring());
    print_spring(parallel.equivalent_spring());
    for vector in model.spring_force_vectors() {
        println!("  spring force on {:<14} {:>8.2} N", vector.spring, vector.force);
    }

    model.reset()?;
    Ok(())
}

fn energy(config: &HookesLawConfig) -> Result<(), HookesLawError> {
    let model = EnergyModel::new(config)?;
    let spring = model.system.spring();

    println!("\nEnergy: x = 0.8 m, k swept with displacement held");
    spring.displacement.set(0.8)?;
    for k in [100.0, 250.0, 400.0] {
        spring.spring_constant.set(k)?;
        print_spring(spring);
    }

    for graph in [EnergyGraph::BarGraph, EnergyGraph::ForcePlot, EnergyGraph::EnergyPlot] {
        model.view.graph.set(graph)?;
        println!("  {:?}: {:?}", graph, model.graph_reading());
    }

    model.reset()?;
    Ok(())
}

fn run() -> Result<(), HookesLawError> {
    let config = HookesLawConfig::default();

    println!("{}", EquationsPanel::new("Hooke's Law", HOOKES_LAW_EQUATIONS, HOOKES_LAW_VARIABLES));
    println!("{}", EquationsPanel::new("Spring Systems", SYSTEMS_EQUATIONS, &[]));

    intro(&config)?;
    systems(&config)?;
    energy(&config)?;
    Ok(())
}

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        log::error!("{e}");
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
