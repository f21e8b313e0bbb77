//! Start-up configuration for the simulation

use common::ReactiveConfig;

/// Settings fixed when the screens are built
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct HookesLawConfig {
    /// Equality tolerance and settling depth for every property
    pub reactive: ReactiveConfig,
    /// Start with every visibility checkbox checked
    pub check_all: bool,
}

impl HookesLawConfig {
    pub fn with_check_all(mut self, check_all: bool) -> Self {
        self.check_all = check_all;
        self
    }
}
