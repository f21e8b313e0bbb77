//! A spring obeying Hooke's Law
//!
//! Applied force F, spring constant k and displacement x are independent
//! properties tied together by three update rules:
//!
//! - F changed: x = F / k
//! - k changed: x = F / k when the force range was supplied, otherwise F = k·x
//! - x changed: F = k·x, clamped into the applied force range; if clamping
//!   was needed, x is pulled back to F / k
//!
//! A change settles after at most one extra hop. Everything else (spring force, positions, length,
//! potential energy) is derived after the rules have run.

use common::{DerivedProperty, Property, PropertyError, Range, RangeWithValue, ReactiveConfig};

use crate::constants::{INTRO_EQUILIBRIUM_LENGTH, INTRO_SPRING_CONSTANT_RANGE, WALL_X};
use crate::error::HookesLawError;

/// Which quantity stays put when the spring constant changes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FixedQuantity {
    /// Built with an applied force range; k changes move the displacement
    AppliedForce,
    /// Built with a displacement range; k changes move the applied force
    Displacement,
}

/// Construction parameters for a [`Spring`].
///
/// Exactly one of `applied_force_range` and `displacement_range` must be set.
#[derive(Debug, Clone)]
pub struct SpringOptions {
    pub name: String,
    /// x coordinate of the fixed end (m)
    pub left: f64,
    /// Length when neither stretched nor compressed (m)
    pub equilibrium_length: f64,
    /// N/m
    pub spring_constant_range: RangeWithValue,
    /// N
    pub applied_force_range: Option<RangeWithValue>,
    /// m
    pub displacement_range: Option<RangeWithValue>,
}

impl Default for SpringOptions {
    fn default() -> Self {
        Self {
            name: "spring".to_string(),
            left: WALL_X,
            equilibrium_length: INTRO_EQUILIBRIUM_LENGTH,
            spring_constant_range: INTRO_SPRING_CONSTANT_RANGE,
            applied_force_range: None,
            displacement_range: None,
        }
    }
}

/// Every value of a spring at one instant
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpringSnapshot {
    pub applied_force: f64,
    pub spring_constant: f64,
    pub displacement: f64,
    pub left: f64,
    pub spring_force: f64,
    pub equilibrium_x: f64,
    pub right: f64,
    pub right_range: Range,
    pub length: f64,
    pub potential_energy: f64,
}

impl SpringSnapshot {
    pub fn approx_eq(&self, other: &SpringSnapshot, epsilon: f64) -> bool {
        let close = |a: f64, b: f64| (a - b).abs() <= epsilon;
        close(self.applied_force, other.applied_force)
            && close(self.spring_constant, other.spring_constant)
            && close(self.displacement, other.displacement)
            && close(self.left, other.left)
            && close(self.spring_force, other.spring_force)
            && close(self.equilibrium_x, other.equilibrium_x)
            && close(self.right, other.right)
            && close(self.right_range.min, other.right_range.min)
            && close(self.right_range.max, other.right_range.max)
            && close(self.length, other.length)
            && close(self.potential_energy, other.potential_energy)
    }
}

/// A spring whose free end is on the right
#[derive(Debug)]
pub struct Spring {
    pub name: String,
    pub equilibrium_length: f64,
    pub spring_constant_range: RangeWithValue,
    pub applied_force_range: RangeWithValue,
    pub displacement_range: RangeWithValue,
    fixed: FixedQuantity,

    /// F (N)
    pub applied_force: Property<f64>,
    /// k (N/m)
    pub spring_constant: Property<f64>,
    /// x (m), measured from the equilibrium position
    pub displacement: Property<f64>,
    /// x coordinate of the fixed end (m)
    pub left: Property<f64>,

    /// -F (N)
    pub spring_force: DerivedProperty<f64>,
    /// left + equilibrium length (m)
    pub equilibrium_x: DerivedProperty<f64>,
    /// equilibrium x + displacement (m)
    pub right: DerivedProperty<f64>,
    /// Where the free end can go (m)
    pub right_range: DerivedProperty<Range>,
    /// |right - left| (m)
    pub length: DerivedProperty<f64>,
    /// k·x²/2 (J)
    pub potential_energy: DerivedProperty<f64>,
}

/// Smallest and largest value of `f(a, b)` over the corners of two ranges
fn corner_range(a: Range, b: Range, f: impl Fn(f64, f64) -> f64) -> Range {
    let corners = [f(a.min, b.min), f(a.min, b.max), f(a.max, b.min), f(a.max, b.max)];
    let min = corners.iter().copied().fold(f64::INFINITY, f64::min);
    let max = corners.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    Range::new(min, max)
}

fn check_range(spring: &str, quantity: &'static str, range: &RangeWithValue) -> Result<(), HookesLawError> {
    if range.is_valid() {
        Ok(())
    } else {
        Err(HookesLawError::InvalidRange {
            spring: spring.to_string(),
            quantity,
            range: range.to_string(),
        })
    }
}

impl Spring {
    pub fn new(options: SpringOptions, config: &ReactiveConfig) -> Result<Self, HookesLawError> {
        let SpringOptions {
            name,
            left,
            equilibrium_length,
            spring_constant_range: k_range,
            applied_force_range,
            displacement_range,
        } = options;

        check_range(&name, "spring constant", &k_range)?;
        if k_range.min <= 0.0 {
            return Err(HookesLawError::NonPositiveSpringConstant { spring: name, min: k_range.min });
        }
        if equilibrium_length.is_nan() || equilibrium_length <= 0.0 {
            return Err(HookesLawError::NonPositiveEquilibriumLength {
                spring: name,
                length: equilibrium_length,
            });
        }

        // Whichever range is supplied determines the other one.
        let (fixed, applied_force_range, displacement_range) = match (applied_force_range, displacement_range) {
            (Some(_), Some(_)) => return Err(HookesLawError::BothRangesSupplied { spring: name }),
            (None, None) => return Err(HookesLawError::NoRangeSupplied { spring: name }),
            (Some(f_range), None) => {
                check_range(&name, "applied force", &f_range)?;
                let x = corner_range(f_range.range(), k_range.range(), |f, k| f / k);
                let x_range = RangeWithValue::new(x.min, x.max, f_range.default_value / k_range.default_value);
                (FixedQuantity::AppliedForce, f_range, x_range)
            }
            (None, Some(x_range)) => {
                check_range(&name, "displacement", &x_range)?;
                let f = corner_range(k_range.range(), x_range.range(), |k, x| k * x);
                let f_range = RangeWithValue::new(f.min, f.max, k_range.default_value * x_range.default_value);
                (FixedQuantity::Displacement, f_range, x_range)
            }
        };

        if equilibrium_length + displacement_range.min <= 0.0 {
            return Err(HookesLawError::SpringCanInvert {
                spring: name,
                length: equilibrium_length,
                compression: -displacement_range.min,
            });
        }

        let applied_force = Property::number(
            format!("{name}.appliedForce"),
            applied_force_range.default_value,
            Some(applied_force_range.range()),
            config,
        )?
        .reentrant();
        let spring_constant = Property::number(
            format!("{name}.springConstant"),
            k_range.default_value,
            Some(k_range.range()),
            config,
        )?
        .reentrant();
        let displacement = Property::number(
            format!("{name}.displacement"),
            displacement_range.default_value,
            Some(displacement_range.range()),
            config,
        )?
        .reentrant();
        let left = Property::number(format!("{name}.left"), left, None, config)?;

        // The three Hooke's Law rules go in before any derived value so that
        // derived values only ever see settled F, k and x.
        {
            let x = displacement.downgrade();
            let k = spring_constant.downgrade();
            applied_force.lazy_link(move |&f| {
                let (Some(x), Some(k)) = (x.upgrade(), k.upgrade()) else {
                    return Ok(());
                };
                x.set(f / k.get())
            });
        }
        {
            let f = applied_force.downgrade();
            let x = displacement.downgrade();
            spring_constant.lazy_link(move |&k| {
                let (Some(f), Some(x)) = (f.upgrade(), x.upgrade()) else {
                    return Ok(());
                };
                match fixed {
                    FixedQuantity::AppliedForce => x.set(f.get() / k),
                    FixedQuantity::Displacement => f.set(k * x.get()),
                }
            });
        }
        {
            let f = applied_force.downgrade();
            let k = spring_constant.downgrade();
            let weak_x = displacement.downgrade();
            let force_range = applied_force_range.range();
            displacement.lazy_link(move |&x| {
                let (Some(f), Some(k), Some(this)) = (f.upgrade(), k.upgrade(), weak_x.upgrade()) else {
                    return Ok(());
                };
                let k = k.get();
                let force = k * x;
                let clamped = force_range.constrain(force);
                f.set(clamped)?;
                // F may already sit at the limit, in which case the set above
                // notifies nobody and x has to be pulled back here.
                if clamped != force {
                    this.set(clamped / k)?;
                }
                Ok(())
            });
        }

        let spring_force = {
            let f = applied_force.clone();
            DerivedProperty::<f64>::builder(format!("{name}.springForce"), config)
                .dependency(&applied_force)
                .numeric()
                .build(move || -f.get())?
        };

        let equilibrium_x = {
            let l = left.clone();
            DerivedProperty::<f64>::builder(format!("{name}.equilibriumX"), config)
                .dependency(&left)
                .numeric()
                .build(move || l.get() + equilibrium_length)?
        };

        let right = {
            let e = equilibrium_x.clone();
            let x = displacement.clone();
            let l = left.clone();
            DerivedProperty::<f64>::builder(format!("{name}.right"), config)
                .dependency(&equilibrium_x)
                .dependency(&displacement)
                .numeric()
                .validator("right of the left end", move |right: &f64| *right > l.get())
                .build(move || e.get() + x.get())?
        };

        let right_range = {
            let e = equilibrium_x.clone();
            let displacement_range = displacement_range.range();
            DerivedProperty::<Range>::builder(format!("{name}.rightRange"), config)
                .dependency(&equilibrium_x)
                .build(move || displacement_range.shifted(e.get()))?
        };

        let length = {
            let l = left.clone();
            let r = right.clone();
            DerivedProperty::<f64>::builder(format!("{name}.length"), config)
                .dependency(&left)
                .dependency(&right)
                .numeric()
                .build(move || (r.get() - l.get()).abs())?
        };

        let potential_energy = {
            let k = spring_constant.clone();
            let x = displacement.clone();
            DerivedProperty::<f64>::builder(format!("{name}.potentialEnergy"), config)
                .dependency(&spring_constant)
                .dependency(&displacement)
                .numeric()
                .build(move || {
                    let x = x.get();
                    k.get() * x * x / 2.0
                })?
        };

        log::debug!(
            "{name}: k in {k_range}, F in {applied_force_range}, x in {displacement_range}, {fixed:?} held fixed"
        );

        Ok(Self {
            name,
            equilibrium_length,
            spring_constant_range: k_range,
            applied_force_range,
            displacement_range,
            fixed,
            applied_force,
            spring_constant,
            displacement,
            left,
            spring_force,
            equilibrium_x,
            right,
            right_range,
            length,
            potential_energy,
        })
    }

    /// Which range was supplied at construction
    pub fn fixed_quantity(&self) -> FixedQuantity {
        self.fixed
    }

    /// Restore F, k, x and left to their construction-time values
    pub fn reset(&self) -> Result<(), PropertyError> {
        log::debug!("{}: reset", self.name);
        self.applied_force.reset()?;
        self.spring_constant.reset()?;
        self.displacement.reset()?;
        self.left.reset()
    }

    pub fn snapshot(&self) -> SpringSnapshot {
        SpringSnapshot {
            applied_force: self.applied_force.get(),
            spring_constant: self.spring_constant.get(),
            displacement: self.displacement.get(),
            left: self.left.get(),
            spring_force: self.spring_force.get(),
            equilibrium_x: self.equilibrium_x.get(),
            right: self.right.get(),
            right_range: self.right_range.get(),
            length: self.length.get(),
            potential_energy: self.potential_energy.get(),
        }
    }
}
