//! Explicit selection context.
//!
//! The [`Context`] owns the solution registry and the selector. It is created
//! once by the application and passed by reference to every dispatch site.
//!
//! # Thread Safety
//!
//! The registry is built lazily on the first call to [`Context::registry`].
//! Concurrent first callers block until that single build finishes; every
//! later call is a plain read.

use std::sync::Arc;

use once_cell::sync::OnceCell;

use crate::config::DispatchConfig;
use crate::dispatch::Dispatcher;
use crate::error::Result;
use crate::registry::SolutionRegistry;
use crate::selection::{DefaultSelector, InstanceSelector};

#[derive(Debug)]
pub struct Context {
    registry: OnceCell<SolutionRegistry>,
    selector: Arc<dyn InstanceSelector>,
    config: DispatchConfig,
}

impl Default for Context {
    fn default() -> Self {
        Self::new(DispatchConfig::default())
    }
}

impl Context {
    pub fn new(config: DispatchConfig) -> Self {
        Self { registry: OnceCell::new(), selector: Arc::new(DefaultSelector), config }
    }

    /// Context configured from `TESSERA_*` environment variables.
    pub fn from_env() -> Self {
        Self::new(DispatchConfig::from_env())
    }

    pub fn with_selector(mut self, selector: impl InstanceSelector + 'static) -> Self {
        self.selector = Arc::new(selector);
        self
    }

    /// The registry, building it on first use.
    pub fn registry(&self) -> Result<&SolutionRegistry> {
        self.registry.get_or_try_init(SolutionRegistry::build)
    }

    pub fn is_built(&self) -> bool {
        self.registry.get().is_some()
    }

    pub fn selector(&self) -> &dyn InstanceSelector {
        self.selector.as_ref()
    }

    pub fn config(&self) -> &DispatchConfig {
        &self.config
    }

    pub fn dispatcher(&self) -> Dispatcher<'_> {
        Dispatcher::new(self)
    }
}
