//! Hooke's Law invariants on a single spring and a single spring system

use common::{PropertyError, ReactiveConfig};
use hookes_law::constants::{
    ENERGY_DISPLACEMENT_RANGE, ENERGY_SPRING_CONSTANT_RANGE, INTRO_APPLIED_FORCE_RANGE, INTRO_SPRING_CONSTANT_RANGE,
};
use hookes_law::{SingleSpringSystem, Spring, SpringOptions};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn assert_close(actual: f64, expected: f64) {
    let tolerance = 1e-9 * (1.0 + expected.abs());
    assert!(
        (actual - expected).abs() <= tolerance,
        "expected {expected}, got {actual}"
    );
}

fn force_spring() -> Spring {
    Spring::new(
        SpringOptions {
            spring_constant_range: INTRO_SPRING_CONSTANT_RANGE,
            applied_force_range: Some(INTRO_APPLIED_FORCE_RANGE),
            equilibrium_length: 1.5,
            ..Default::default()
        },
        &ReactiveConfig::default(),
    )
    .unwrap()
}

fn displacement_spring() -> Spring {
    Spring::new(
        SpringOptions {
            spring_constant_range: ENERGY_SPRING_CONSTANT_RANGE,
            displacement_range: Some(ENERGY_DISPLACEMENT_RANGE),
            ..Default::default()
        },
        &ReactiveConfig::default(),
    )
    .unwrap()
}

#[test]
fn scenario_applied_force_then_stiffer_spring() {
    let spring = force_spring();

    spring.applied_force.set(100.0).unwrap();
    assert_close(spring.displacement.get(), 0.5);
    assert_close(spring.spring_force.get(), -100.0);
    assert_close(spring.potential_energy.get(), 25.0);

    spring.spring_constant.set(400.0).unwrap();
    assert_close(spring.applied_force.get(), 100.0);
    assert_close(spring.displacement.get(), 0.25);
    assert_close(spring.potential_energy.get(), 12.5);
}

#[test]
fn force_equals_k_times_x_for_every_valid_pair() {
    let mut rng = StdRng::seed_from_u64(0x5eed);
    let spring = displacement_spring();

    for _ in 0..500 {
        let k = rng.gen_range(ENERGY_SPRING_CONSTANT_RANGE.min..=ENERGY_SPRING_CONSTANT_RANGE.max);
        let x = rng.gen_range(ENERGY_DISPLACEMENT_RANGE.min..=ENERGY_DISPLACEMENT_RANGE.max);
        spring.spring_constant.set(k).unwrap();
        spring.displacement.set(x).unwrap();

        assert_close(spring.applied_force.get(), spring.spring_constant.get() * spring.displacement.get());
    }
}

#[test]
fn force_fixed_spring_honours_f_equals_kx_inside_the_force_range() {
    let mut rng = StdRng::seed_from_u64(11);
    let spring = force_spring();

    for _ in 0..500 {
        let k = rng.gen_range(INTRO_SPRING_CONSTANT_RANGE.min..=INTRO_SPRING_CONSTANT_RANGE.max);
        spring.spring_constant.set(k).unwrap();
        // Only displacements the force range can produce at this k.
        let x_max = INTRO_APPLIED_FORCE_RANGE.max / k;
        let x = rng.gen_range(-x_max..=x_max);
        spring.displacement.set(x).unwrap();

        assert_close(spring.displacement.get(), x);
        assert_close(spring.applied_force.get(), k * x);
    }
}

#[test]
fn displacement_from_force_round_trips() {
    let mut rng = StdRng::seed_from_u64(42);
    let spring = force_spring();

    for _ in 0..500 {
        let k = rng.gen_range(INTRO_SPRING_CONSTANT_RANGE.min..=INTRO_SPRING_CONSTANT_RANGE.max);
        let f = rng.gen_range(INTRO_APPLIED_FORCE_RANGE.min..=INTRO_APPLIED_FORCE_RANGE.max);
        spring.spring_constant.set(k).unwrap();
        spring.applied_force.set(f).unwrap();

        let x = spring.displacement.get();
        assert_close(x, f / k);
        assert_close(k * x, f);
        assert_close(spring.applied_force.get(), f);
    }
}

#[test]
fn potential_energy_tracks_every_reachable_state() {
    let mut rng = StdRng::seed_from_u64(7);
    let system = SingleSpringSystem::new(
        SpringOptions {
            applied_force_range: Some(INTRO_APPLIED_FORCE_RANGE),
            ..Default::default()
        },
        &ReactiveConfig::default(),
    )
    .unwrap();
    let spring = system.spring();
    let right_range = spring.right_range.get();

    for _ in 0..1000 {
        match rng.gen_range(0..3) {
            0 => spring
                .applied_force
                .set(rng.gen_range(INTRO_APPLIED_FORCE_RANGE.min..=INTRO_APPLIED_FORCE_RANGE.max))
                .unwrap(),
            1 => spring
                .spring_constant
                .set(rng.gen_range(INTRO_SPRING_CONSTANT_RANGE.min..=INTRO_SPRING_CONSTANT_RANGE.max))
                .unwrap(),
            _ => system
                .robotic_arm()
                .left
                .set(rng.gen_range(right_range.min..=right_range.max))
                .unwrap(),
        }

        let k = spring.spring_constant.get();
        let x = spring.displacement.get();
        assert_close(spring.potential_energy.get(), k * x * x / 2.0);
        assert_close(spring.applied_force.get(), k * x);
        assert_close(spring.right.get(), spring.equilibrium_x.get() + x);
        assert_close(system.robotic_arm().left.get(), spring.right.get());
        assert!(spring.right.get() > spring.left.get());
    }
}

#[test]
fn dragging_past_what_the_force_allows_settles_on_the_force_limit() {
    let system = SingleSpringSystem::new(
        SpringOptions {
            applied_force_range: Some(INTRO_APPLIED_FORCE_RANGE),
            ..Default::default()
        },
        &ReactiveConfig::default(),
    )
    .unwrap();
    let spring = system.spring();
    spring.spring_constant.set(1000.0).unwrap();

    system.robotic_arm().left.set(spring.right_range.get().max).unwrap();

    assert_close(spring.applied_force.get(), 100.0);
    assert_close(spring.displacement.get(), 0.1);
    assert_close(system.robotic_arm().left.get(), 1.6);
}

#[test]
fn successive_drags_past_the_force_limit_keep_f_equals_kx() {
    let system = SingleSpringSystem::new(
        SpringOptions {
            applied_force_range: Some(INTRO_APPLIED_FORCE_RANGE),
            ..Default::default()
        },
        &ReactiveConfig::default(),
    )
    .unwrap();
    let spring = system.spring();

    for left in [2.4, 2.45, 2.5] {
        system.robotic_arm().left.set(left).unwrap();
        assert_close(spring.applied_force.get(), 100.0);
        assert_close(spring.displacement.get(), 0.5);
        assert_close(system.robotic_arm().left.get(), 2.0);
    }

    // Holding at the limit while the spring stiffens moves the end inwards.
    spring.spring_constant.set(400.0).unwrap();
    system.robotic_arm().left.set(2.3).unwrap();
    assert_close(spring.applied_force.get(), 100.0);
    assert_close(spring.displacement.get(), 0.25);
    assert_close(system.robotic_arm().left.get(), 1.75);
}

#[test]
fn setting_out_of_range_values_is_a_contract_violation() {
    let spring = force_spring();
    assert!(matches!(spring.spring_constant.set(99.0), Err(PropertyError::InvalidValue { .. })));
    assert!(matches!(spring.spring_constant.set(1000.5), Err(PropertyError::InvalidValue { .. })));
    assert!(matches!(spring.displacement.set(1.5), Err(PropertyError::InvalidValue { .. })));
    assert!(spring.applied_force.set(-100.0).is_ok());
}

#[test]
fn reset_restores_single_system_snapshot() {
    let system = SingleSpringSystem::new(
        SpringOptions {
            spring_constant_range: ENERGY_SPRING_CONSTANT_RANGE,
            displacement_range: Some(ENERGY_DISPLACEMENT_RANGE),
            ..Default::default()
        },
        &ReactiveConfig::default(),
    )
    .unwrap();
    let initial = system.snapshot();

    system.spring().spring_constant.set(300.0).unwrap();
    system.robotic_arm().left.set(0.9).unwrap();
    assert_close(system.spring().applied_force.get(), -180.0);

    system.reset().unwrap();
    let after = system.snapshot();
    assert!(after.spring.approx_eq(&initial.spring, 1e-12));
    assert_close(after.arm_left, initial.arm_left);
}
