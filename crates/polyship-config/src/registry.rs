//! Target registry.
//!
//! A constant, insertion-ordered table of targets built once at startup.

use indexmap::IndexMap;

use crate::error::{ConfigError, Result};
use crate::target::TargetSpec;

#[derive(Debug, Clone, Default)]
pub struct TargetRegistry {
    targets: IndexMap<String, TargetSpec>,
}

impl TargetRegistry {
    /// Build a registry, rejecting duplicate target names.
    pub fn from_targets(targets: impl IntoIterator<Item = TargetSpec>) -> Result<Self> {
        let mut map = IndexMap::new();
        for target in targets {
            if map.contains_key(&target.name) {
                return Err(ConfigError::DuplicateTarget(target.name));
            }
            map.insert(target.name.clone(), target);
        }
        Ok(Self { targets: map })
    }

    /// All targets in registration order.
    pub fn list_all(&self) -> impl Iterator<Item = &TargetSpec> {
        self.targets.values()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.targets.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    pub fn get(&self, name: &str) -> Result<&TargetSpec> {
        self.targets
            .get(name)
            .ok_or_else(|| ConfigError::UnknownTarget {
                name: name.to_string(),
                available: self.names().map(str::to_string).collect(),
            })
    }

    /// Targets to build for an optional selector.
    ///
    /// A selector restricts the run to that one target; without one every
    /// target is returned in order.
    pub fn select(&self, selector: Option<&str>) -> Result<Vec<&TargetSpec>> {
        match selector {
            Some(name) => Ok(vec![self.get(name)?]),
            None => Ok(self.list_all().collect()),
        }
    }
}
