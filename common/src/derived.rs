//! Read-only properties computed from other properties

use std::fmt;
use std::rc::{Rc, Weak};

use crate::config::ReactiveConfig;
use crate::error::PropertyError;
use crate::property::{ChangeCallback, Dependency, ListenerId, Property, Subscription};

struct DerivedInner<T> {
    property: Property<T>,
    compute: Box<dyn Fn() -> T>,
    // Dropped with the derived value, which unhooks it from its dependencies
    _subscriptions: Vec<Subscription>,
}

impl<T: Clone + fmt::Debug + 'static> DerivedInner<T> {
    fn recompute(&self) -> Result<(), PropertyError> {
        self.property.set((self.compute)())
    }
}

/// A value recomputed synchronously whenever one of its dependencies changes.
///
/// There is no setter. Dependencies hold only weak references back to the
/// derived value, so dropping it unhooks it.
pub struct DerivedProperty<T> {
    inner: Rc<DerivedInner<T>>,
}

type Check<T> = Box<dyn Fn(&T) -> bool>;

/// Builder for [`DerivedProperty`]
pub struct DerivedBuilder<'a, T> {
    name: String,
    config: ReactiveConfig,
    dependencies: Vec<&'a dyn Dependency>,
    validators: Vec<(String, Check<T>)>,
    equals: Option<Rc<dyn Fn(&T, &T) -> bool>>,
}

impl<T: Clone + fmt::Debug + PartialEq + 'static> DerivedProperty<T> {
    pub fn builder<'a>(name: impl Into<String>, config: &ReactiveConfig) -> DerivedBuilder<'a, T> {
        DerivedBuilder {
            name: name.into(),
            config: *config,
            dependencies: Vec::new(),
            validators: Vec::new(),
            equals: None,
        }
    }
}

impl<T: Clone + fmt::Debug + 'static> DerivedProperty<T> {
    pub fn name(&self) -> String {
        self.inner.property.name()
    }

    pub fn get(&self) -> T {
        self.inner.property.get()
    }

    pub fn link<F>(&self, listener: F) -> Result<ListenerId, PropertyError>
    where
        F: Fn(&T) -> Result<(), PropertyError> + 'static,
    {
        self.inner.property.link(listener)
    }

    pub fn lazy_link<F>(&self, listener: F) -> ListenerId
    where
        F: Fn(&T) -> Result<(), PropertyError> + 'static,
    {
        self.inner.property.lazy_link(listener)
    }

    pub fn unlink(&self, id: ListenerId) -> bool {
        self.inner.property.unlink(id)
    }

    /// Any recomputation that would change the value becomes an error
    pub fn freeze(&self) {
        self.inner.property.freeze();
    }

    pub fn is_frozen(&self) -> bool {
        self.inner.property.is_frozen()
    }

    pub fn listener_count(&self) -> usize {
        self.inner.property.listener_count()
    }
}

impl<T: Clone + fmt::Debug + 'static> Dependency for DerivedProperty<T> {
    fn on_change(&self, callback: ChangeCallback) -> Subscription {
        self.inner.property.on_change(callback)
    }
}

impl<T> Clone for DerivedProperty<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for DerivedProperty<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("DerivedProperty").field(&self.inner.property).finish()
    }
}

impl<'a, T: Clone + fmt::Debug + PartialEq + 'static> DerivedBuilder<'a, T> {
    pub fn dependency(mut self, dependency: &'a dyn Dependency) -> Self {
        self.dependencies.push(dependency);
        self
    }

    pub fn validator<F>(mut self, description: impl Into<String>, check: F) -> Self
    where
        F: Fn(&T) -> bool + 'static,
    {
        self.validators.push((description.into(), Box::new(check)));
        self
    }

    /// Compute the initial value and subscribe to every dependency
    pub fn build<F>(self, compute: F) -> Result<DerivedProperty<T>, PropertyError>
    where
        F: Fn() -> T + 'static,
    {
        let mut property = Property::new(self.name, compute(), &self.config).reentrant();
        if let Some(equals) = self.equals {
            property = property.with_equality(move |a: &T, b: &T| equals(a, b));
        }
        for (description, check) in self.validators {
            property = property.with_validator(description, check)?;
        }

        let dependencies = self.dependencies;
        let inner = Rc::new_cyclic(|weak: &Weak<DerivedInner<T>>| {
            let subscriptions = dependencies
                .iter()
                .map(|dependency| {
                    let weak = Weak::clone(weak);
                    dependency.on_change(Rc::new(move || match weak.upgrade() {
                        Some(derived) => derived.recompute(),
                        None => Ok(()),
                    }))
                })
                .collect();
            DerivedInner {
                property,
                compute: Box::new(compute),
                _subscriptions: subscriptions,
            }
        });

        Ok(DerivedProperty { inner })
    }
}

impl<'a> DerivedBuilder<'a, f64> {
    /// Epsilon equality from the config, like [`Property::number`]
    pub fn numeric(mut self) -> Self {
        let config = self.config;
        self.equals = Some(Rc::new(move |a: &f64, b: &f64| config.approx_eq(*a, *b)));
        self
    }
}
