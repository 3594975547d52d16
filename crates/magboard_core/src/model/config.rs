//! Module configuration and global configuration model.
//!
//! # Responsibility
//! - Hold one opaque config bag per module instance plus the mandatory
//!   `locked` flag.
//!
//! # Invariants
//! - The core treats config values opaquely; shape validation belongs to
//!   the rendering boundary, outside this crate.
//! - Unknown config keys survive serialization round-trips unchanged.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Open-ended per-module configuration.
///
/// `locked` is the only field the core interprets; everything else is an
/// opaque key/value bag the module renderer owns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ModuleConfig {
    #[serde(default)]
    pub locked: bool,
    #[serde(flatten)]
    pub values: Map<String, Value>,
}

impl ModuleConfig {
    pub fn from_values(values: Map<String, Value>) -> Self {
        Self {
            locked: false,
            values,
        }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    /// Merges `patch` over the existing bag. A `locked` key in the patch
    /// updates the typed flag instead of landing in the bag.
    pub fn merge(&mut self, patch: Map<String, Value>) {
        for (key, value) in patch {
            if key == "locked" {
                if let Value::Bool(flag) = value {
                    self.locked = flag;
                }
                continue;
            }
            self.values.insert(key, value);
        }
    }
}

/// Process-wide configuration consulted when a dashboard has no explicit
/// theme.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GlobalConfig {
    pub default_theme: String,
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            default_theme: "light".to_string(),
        }
    }
}
