//! Observable properties
//!
//! A [`Property`] holds one value and notifies its listeners synchronously
//! whenever that value changes. Listeners may set other properties, or this
//! one again, from inside a notification; that is how the spring model keeps
//! F = kx settled. The rules for such re-entrant updates:
//!
//! - A listener always sees the property's value at the moment it is called.
//! - If a listener sets the property again, the nested round notifies every
//!   listener with the newer value and the outer round stops.
//! - A property that is not marked [`Property::reentrant`] rejects sets made
//!   while it is notifying.
//! - Nesting deeper than [`ReactiveConfig::max_notification_depth`] fails
//!   instead of recursing without bound.

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

use crate::config::ReactiveConfig;
use crate::error::PropertyError;
use crate::range::Range;

/// Callback invoked with the new value of a property
pub type Listener<T> = Rc<dyn Fn(&T) -> Result<(), PropertyError>>;

/// Callback invoked when any dependency of a derived property changes
pub type ChangeCallback = Rc<dyn Fn() -> Result<(), PropertyError>>;

type Equality<T> = Rc<dyn Fn(&T, &T) -> bool>;

/// Handle returned by `link`, used to remove the listener again
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

struct Constraint<T> {
    description: String,
    check: Rc<dyn Fn(&T) -> bool>,
}

struct Inner<T> {
    name: String,
    value: T,
    initial: T,
    constraints: Vec<Constraint<T>>,
    equals: Equality<T>,
    reentrant: bool,
    frozen: bool,
    rolling_back: bool,
    depth: usize,
    max_depth: usize,
    generation: u64,
    next_listener: u64,
    listeners: Vec<(ListenerId, Listener<T>)>,
}

impl<T: fmt::Debug> Inner<T> {
    fn snapshot_listeners(&self) -> Vec<Listener<T>> {
        self.listeners.iter().map(|(_, listener)| Rc::clone(listener)).collect()
    }

    fn validate(&self, value: &T) -> Result<(), PropertyError> {
        match self.constraints.iter().find(|c| !(c.check)(value)) {
            Some(constraint) => Err(PropertyError::InvalidValue {
                name: self.name.clone(),
                value: format!("{:?}", value),
                constraint: constraint.description.clone(),
            }),
            None => Ok(()),
        }
    }
}

/// Shared handle to an observable value.
///
/// Cloning the handle does not clone the value; all clones observe and
/// mutate the same property.
pub struct Property<T> {
    inner: Rc<RefCell<Inner<T>>>,
}

/// Non-owning handle, captured by listeners so that linked properties never
/// keep each other alive.
pub struct WeakProperty<T> {
    inner: Weak<RefCell<Inner<T>>>,
}

impl<T: Clone + fmt::Debug + PartialEq + 'static> Property<T> {
    pub fn new(name: impl Into<String>, value: T, config: &ReactiveConfig) -> Self {
        Self::with_equality_fn(name, value, config, Rc::new(|a: &T, b: &T| a == b))
    }
}

impl Property<f64> {
    /// A numeric property with epsilon equality, restricted to finite values
    /// and, when given, to `range`.
    pub fn number(
        name: impl Into<String>,
        value: f64,
        range: Option<Range>,
        config: &ReactiveConfig,
    ) -> Result<Self, PropertyError> {
        let config = *config;
        let property = Self::with_equality_fn(
            name,
            value,
            &config,
            Rc::new(move |a: &f64, b: &f64| config.approx_eq(*a, *b)),
        )
        .with_validator("a finite number", |v: &f64| v.is_finite())?;

        match range {
            Some(range) => property.with_validator(range.to_string(), move |v: &f64| range.contains(*v)),
            None => Ok(property),
        }
    }
}

impl<T: Clone + fmt::Debug + 'static> Property<T> {
    fn with_equality_fn(
        name: impl Into<String>,
        value: T,
        config: &ReactiveConfig,
        equals: Equality<T>,
    ) -> Self {
        Self {
            inner: Rc::new(RefCell::new(Inner {
                name: name.into(),
                initial: value.clone(),
                value,
                constraints: Vec::new(),
                equals,
                reentrant: false,
                frozen: false,
                rolling_back: false,
                depth: 0,
                max_depth: config.max_notification_depth,
                generation: 0,
                next_listener: 0,
                listeners: Vec::new(),
            })),
        }
    }

    /// Replace the equality used to suppress redundant updates
    pub fn with_equality<F>(self, equals: F) -> Self
    where
        F: Fn(&T, &T) -> bool + 'static,
    {
        self.inner.borrow_mut().equals = Rc::new(equals);
        self
    }

    /// Add a validator; fails if the current value does not satisfy it
    pub fn with_validator<F>(self, description: impl Into<String>, check: F) -> Result<Self, PropertyError>
    where
        F: Fn(&T) -> bool + 'static,
    {
        self.add_validator(description, check)?;
        Ok(self)
    }

    /// Allow this property to be set from inside its own notification
    pub fn reentrant(self) -> Self {
        self.inner.borrow_mut().reentrant = true;
        self
    }

    /// Tighten the property after construction, e.g. when an owning system
    /// knows a narrower legal range.
    pub fn add_validator<F>(&self, description: impl Into<String>, check: F) -> Result<(), PropertyError>
    where
        F: Fn(&T) -> bool + 'static,
    {
        let mut inner = self.inner.borrow_mut();
        inner.constraints.push(Constraint {
            description: description.into(),
            check: Rc::new(check),
        });
        let current = inner.value.clone();
        if let Err(e) = inner.validate(&current) {
            inner.constraints.pop();
            return Err(e);
        }
        Ok(())
    }

    pub fn name(&self) -> String {
        self.inner.borrow().name.clone()
    }

    pub fn get(&self) -> T {
        self.inner.borrow().value.clone()
    }

    pub fn initial_value(&self) -> T {
        self.inner.borrow().initial.clone()
    }

    /// Check a value against every validator without storing it
    pub fn validate(&self, value: &T) -> Result<(), PropertyError> {
        self.inner.borrow().validate(value)
    }

    /// Validate, store and notify.
    ///
    /// Values equal to the current one are accepted silently. If a listener
    /// fails, the previous value is restored and listeners are notified of it
    /// again before the error is returned.
    pub fn set(&self, value: T) -> Result<(), PropertyError> {
        let (previous, listeners) = {
            let mut inner = self.inner.borrow_mut();
            inner.validate(&value)?;
            if (inner.equals)(&inner.value, &value) {
                return Ok(());
            }
            if inner.frozen {
                return Err(PropertyError::Frozen {
                    name: inner.name.clone(),
                    value: format!("{:?}", value),
                });
            }
            if inner.depth > 0 && !inner.reentrant {
                return Err(PropertyError::Reentrant {
                    name: inner.name.clone(),
                });
            }
            if inner.depth >= inner.max_depth {
                return Err(PropertyError::DepthExceeded {
                    name: inner.name.clone(),
                    depth: inner.max_depth,
                });
            }

            log::trace!("{} = {:?} (was {:?})", inner.name, value, inner.value);
            let previous = std::mem::replace(&mut inner.value, value);
            inner.generation += 1;
            inner.depth += 1;
            let listeners = inner.snapshot_listeners();
            (previous, listeners)
        };

        let result = self.notify(listeners);
        if result.is_err() {
            self.roll_back(previous);
        }
        self.inner.borrow_mut().depth -= 1;
        result
    }

    /// Put back the value a failed `set` replaced so dependents match it again
    fn roll_back(&self, previous: T) {
        let (listeners, was_rolling_back) = {
            let mut inner = self.inner.borrow_mut();
            log::debug!("{}: restoring {:?} after a failed update", inner.name, previous);
            inner.value = previous;
            inner.generation += 1;
            let was_rolling_back = std::mem::replace(&mut inner.rolling_back, true);
            let listeners = inner.snapshot_listeners();
            (listeners, was_rolling_back)
        };

        // A failure nested inside another restore only restores its value.
        if !was_rolling_back {
            if let Err(e) = self.notify(listeners) {
                log::error!("{}: listeners failed while restoring: {e}", self.name());
            }
        }
        self.inner.borrow_mut().rolling_back = was_rolling_back;
    }

    fn notify(&self, listeners: Vec<Listener<T>>) -> Result<(), PropertyError> {
        let generation = self.inner.borrow().generation;
        for listener in listeners {
            let value = self.get();
            listener(&value)?;

            let inner = self.inner.borrow();
            if inner.generation != generation {
                log::trace!("{}: notification superseded by a nested update", inner.name);
                break;
            }
        }
        Ok(())
    }

    /// Restore the construction-time value
    pub fn reset(&self) -> Result<(), PropertyError> {
        self.set(self.initial_value())
    }

    /// Reject every future change of value
    pub fn freeze(&self) {
        let mut inner = self.inner.borrow_mut();
        log::debug!("{} fixed at {:?}", inner.name, inner.value);
        inner.frozen = true;
    }

    pub fn is_frozen(&self) -> bool {
        self.inner.borrow().frozen
    }

    /// True while listeners of this property are being called
    pub fn is_notifying(&self) -> bool {
        self.inner.borrow().depth > 0
    }

    /// Register a listener and call it once with the current value
    pub fn link<F>(&self, listener: F) -> Result<ListenerId, PropertyError>
    where
        F: Fn(&T) -> Result<(), PropertyError> + 'static,
    {
        let listener: Listener<T> = Rc::new(listener);
        let id = self.add_listener(Rc::clone(&listener));
        if let Err(e) = listener(&self.get()) {
            self.unlink(id);
            return Err(e);
        }
        Ok(id)
    }

    /// Register a listener that fires on the next change only
    pub fn lazy_link<F>(&self, listener: F) -> ListenerId
    where
        F: Fn(&T) -> Result<(), PropertyError> + 'static,
    {
        self.add_listener(Rc::new(listener))
    }

    fn add_listener(&self, listener: Listener<T>) -> ListenerId {
        let mut inner = self.inner.borrow_mut();
        let id = ListenerId(inner.next_listener);
        inner.next_listener += 1;
        inner.listeners.push((id, listener));
        id
    }

    /// Remove a listener; returns false if it was not registered
    pub fn unlink(&self, id: ListenerId) -> bool {
        let mut inner = self.inner.borrow_mut();
        let before = inner.listeners.len();
        inner.listeners.retain(|(listener_id, _)| *listener_id != id);
        inner.listeners.len() != before
    }

    pub fn listener_count(&self) -> usize {
        self.inner.borrow().listeners.len()
    }

    pub fn downgrade(&self) -> WeakProperty<T> {
        WeakProperty {
            inner: Rc::downgrade(&self.inner),
        }
    }
}

impl<T> Clone for Property<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Property<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.inner.try_borrow() {
            Ok(inner) => f
                .debug_struct("Property")
                .field("name", &inner.name)
                .field("value", &inner.value)
                .finish(),
            Err(_) => f.write_str("Property { <borrowed> }"),
        }
    }
}

impl<T> WeakProperty<T> {
    pub fn upgrade(&self) -> Option<Property<T>> {
        self.inner.upgrade().map(|inner| Property { inner })
    }
}

impl<T> Clone for WeakProperty<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Weak::clone(&self.inner),
        }
    }
}

/// A registration made through [`Dependency::on_change`]; dropping it
/// removes the callback again.
#[must_use]
pub struct Subscription {
    unsubscribe: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    fn new(unsubscribe: impl FnOnce() + 'static) -> Self {
        Self {
            unsubscribe: Some(Box::new(unsubscribe)),
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(unsubscribe) = self.unsubscribe.take() {
            unsubscribe();
        }
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.unsubscribe.is_some())
            .finish()
    }
}

/// Anything a [`DerivedProperty`](crate::DerivedProperty) can depend on
pub trait Dependency {
    /// Call `callback` after every change of this value, for as long as the
    /// returned subscription is alive
    fn on_change(&self, callback: ChangeCallback) -> Subscription;
}

impl<T: Clone + fmt::Debug + 'static> Dependency for Property<T> {
    fn on_change(&self, callback: ChangeCallback) -> Subscription {
        let id = self.lazy_link(move |_| callback());
        let weak = self.downgrade();
        Subscription::new(move || {
            if let Some(property) = weak.upgrade() {
                property.unlink(id);
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    fn config() -> ReactiveConfig {
        ReactiveConfig::default()
    }

    #[test]
    fn set_notifies_listeners_with_new_value() {
        let property = Property::new("count", 0_i32, &config());
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        property.lazy_link(move |v| {
            sink.borrow_mut().push(*v);
            Ok(())
        });

        property.set(3).unwrap();
        property.set(3).unwrap();
        property.set(5).unwrap();

        assert_eq!(*seen.borrow(), vec![3, 5]);
    }

    #[test]
    fn link_fires_immediately() {
        let property = Property::new("flag", true, &config());
        let calls = Rc::new(Cell::new(0));
        let counter = Rc::clone(&calls);
        property
            .link(move |_| {
                counter.set(counter.get() + 1);
                Ok(())
            })
            .unwrap();
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn out_of_range_values_are_rejected_and_not_stored() {
        let property = Property::number("force", 0.0, Some(Range::new(-100.0, 100.0)), &config()).unwrap();
        let err = property.set(100.5).unwrap_err();
        assert!(matches!(err, PropertyError::InvalidValue { .. }));
        assert_eq!(property.get(), 0.0);
        assert!(property.set(f64::NAN).is_err());
    }

    #[test]
    fn updates_within_epsilon_are_suppressed() {
        let property = Property::number("x", 1.0, None, &config()).unwrap();
        let calls = Rc::new(Cell::new(0));
        let counter = Rc::clone(&calls);
        property.lazy_link(move |_| {
            counter.set(counter.get() + 1);
            Ok(())
        });

        property.set(1.0 + 1e-13).unwrap();
        assert_eq!(calls.get(), 0);
        assert_eq!(property.get(), 1.0);

        property.set(1.5).unwrap();
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn non_reentrant_property_rejects_set_from_own_listener() {
        let property = Property::new("value", 0_i32, &config());
        let weak = property.downgrade();
        property.lazy_link(move |v| match weak.upgrade() {
            Some(p) => p.set(v + 1),
            None => Ok(()),
        });

        let err = property.set(1).unwrap_err();
        assert_eq!(err, PropertyError::Reentrant { name: "value".to_string() });
    }

    #[test]
    fn reentrant_set_wins_and_outer_round_stops() {
        let property = Property::new("value", 0_i32, &config()).reentrant();
        let weak = property.downgrade();
        property.lazy_link(move |v| match weak.upgrade() {
            Some(p) if *v < 10 => p.set(10),
            _ => Ok(()),
        });

        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        property.lazy_link(move |v| {
            sink.borrow_mut().push(*v);
            Ok(())
        });

        property.set(1).unwrap();
        assert_eq!(property.get(), 10);
        // The second listener never sees the superseded value 1.
        assert_eq!(*seen.borrow(), vec![10]);
        assert!(!property.is_notifying());
    }

    #[test]
    fn runaway_feedback_hits_depth_limit() {
        let config = ReactiveConfig::new(1e-10, 8);
        let property = Property::new("runaway", 0_i32, &config).reentrant();
        let weak = property.downgrade();
        property.lazy_link(move |v| match weak.upgrade() {
            Some(p) => p.set(v + 1),
            None => Ok(()),
        });

        let err = property.set(1).unwrap_err();
        assert!(matches!(err, PropertyError::DepthExceeded { depth: 8, .. }));
        assert!(!property.is_notifying());
        assert_eq!(property.get(), 0);
    }

    #[test]
    fn failed_listener_restores_value_and_dependents() {
        let source = Property::number("source", 0.0, None, &config()).unwrap();
        let mirror = Property::number("mirror", 0.0, None, &config()).unwrap();
        let weak_mirror = mirror.downgrade();
        source.lazy_link(move |&v| match weak_mirror.upgrade() {
            Some(mirror) => mirror.set(v),
            None => Ok(()),
        });
        source.lazy_link(|&v| {
            if v > 5.0 {
                Err(PropertyError::InvalidValue {
                    name: "limit".to_string(),
                    value: v.to_string(),
                    constraint: "at most 5".to_string(),
                })
            } else {
                Ok(())
            }
        });

        source.set(3.0).unwrap();
        assert!(source.set(7.0).is_err());
        assert_eq!(source.get(), 3.0);
        assert_eq!(mirror.get(), 3.0);
        assert!(!source.is_notifying());
    }

    #[test]
    fn frozen_property_accepts_same_value_only() {
        let property = Property::number("left", 0.0, None, &config()).unwrap();
        property.freeze();
        assert!(property.set(0.0).is_ok());
        let err = property.set(0.25).unwrap_err();
        assert!(matches!(err, PropertyError::Frozen { .. }));
        assert_eq!(err.property_name(), "left");
    }

    #[test]
    fn reset_restores_initial_value() {
        let property = Property::number("k", 200.0, Some(Range::new(100.0, 1000.0)), &config()).unwrap();
        property.set(750.0).unwrap();
        property.reset().unwrap();
        assert_eq!(property.get(), 200.0);
    }

    #[test]
    fn unlink_removes_listener() {
        let property = Property::new("value", 0_u8, &config());
        let id = property.lazy_link(|_| Ok(()));
        assert_eq!(property.listener_count(), 1);
        assert!(property.unlink(id));
        assert!(!property.unlink(id));
        assert_eq!(property.listener_count(), 0);
    }

    #[test]
    fn add_validator_rejects_current_value() {
        let property = Property::number("left", 5.0, None, &config()).unwrap();
        assert!(property.add_validator("< 3", |v: &f64| *v < 3.0).is_err());
        // The failed validator was not kept.
        assert!(property.set(4.0).is_ok());
    }

    #[test]
    fn weak_handle_does_not_keep_property_alive() {
        let property = Property::new("value", 1_i32, &config());
        let weak = property.downgrade();
        assert!(weak.upgrade().is_some());
        drop(property);
        assert!(weak.upgrade().is_none());
    }
}
