//! Named plugin registry.
//!
//! Targets refer to extra engine plugins by name. The registry maps those
//! names to factories so every build gets a fresh plugin instance.

use std::sync::Arc;

use rolldown_plugin::__inner::SharedPluginable;
use rustc_hash::FxHashMap;

/// Builds a new plugin instance for one bundle run.
pub type PluginFactory = Arc<dyn Fn() -> SharedPluginable + Send + Sync>;

#[derive(Clone, Default)]
pub struct PluginRegistry {
    factories: FxHashMap<String, PluginFactory>,
}

impl PluginRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a factory under `name`, replacing any previous one.
    pub fn register<F>(&mut self, name: impl Into<String>, factory: F)
    where
        F: Fn() -> SharedPluginable + Send + Sync + 'static,
    {
        self.factories.insert(name.into(), Arc::new(factory));
    }

    /// Instantiate the plugin registered under `name`.
    pub fn create(&self, name: &str) -> Option<SharedPluginable> {
        self.factories.get(name).map(|factory| factory())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.factories.contains_key(name)
    }

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<_> = self.factories.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.factories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }
}

impl std::fmt::Debug for PluginRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PluginRegistry")
            .field("plugins", &self.names())
            .finish()
    }
}
