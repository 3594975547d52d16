//! Inter-module link model.
//!
//! # Responsibility
//! - Represent directed, typed relationships between two module instances.
//!
//! # Invariants
//! - Links are stored flat, never nested under either endpoint, so
//!   source-side and target-side queries are symmetric lookups.
//! - A link is meaningful only while both endpoint modules exist; cascade
//!   deletion removes links with a dead endpoint.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::time::{SystemTime, UNIX_EPOCH};
use uuid::Uuid;

/// Semantic role of a link between two modules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LinkPattern {
    /// Source feeds data into the target.
    DataProvider,
    /// Target tracks the source's currently active item.
    ActiveItemTracker,
    /// Both ends mirror the same content list.
    ContentSync,
}

/// Free-form link annotations plus the enabled switch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinkMetadata {
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

fn default_enabled() -> bool {
    true
}

impl Default for LinkMetadata {
    fn default() -> Self {
        Self {
            enabled: true,
            label: None,
            extra: Map::new(),
        }
    }
}

/// Directed relationship between two module instances.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModuleLink {
    pub id: String,
    pub source_module_id: String,
    pub target_module_id: String,
    pub pattern: LinkPattern,
    #[serde(default)]
    pub metadata: LinkMetadata,
    /// Epoch milliseconds at creation time.
    pub created_at: i64,
}

impl ModuleLink {
    /// Creates an enabled link with a generated id and current timestamp.
    pub fn new(
        source_module_id: impl Into<String>,
        target_module_id: impl Into<String>,
        pattern: LinkPattern,
    ) -> Self {
        Self {
            id: format!("link-{}", Uuid::new_v4()),
            source_module_id: source_module_id.into(),
            target_module_id: target_module_id.into(),
            pattern,
            metadata: LinkMetadata::default(),
            created_at: epoch_ms_now(),
        }
    }

    /// Whether either endpoint is the given module.
    pub fn touches(&self, module_id: &str) -> bool {
        self.source_module_id == module_id || self.target_module_id == module_id
    }
}

pub(crate) fn epoch_ms_now() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_millis() as i64)
        .unwrap_or(0)
}
