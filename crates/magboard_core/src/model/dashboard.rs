//! Dashboard, module instance, and grid layout model.
//!
//! # Responsibility
//! - Define the dashboard tree: a board owns its module instances and one
//!   layout array per responsive breakpoint.
//!
//! # Invariants
//! - `DEFAULT_DASHBOARD_ID` identifies the permanent board; it is never
//!   deleted and its id is never reused.
//! - Layout arrays are the single source of truth for module position and
//!   size once they exist for a breakpoint.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

/// The permanent default board. Removal requests targeting it are no-ops.
pub const DEFAULT_DASHBOARD_ID: &str = "board-1";

/// Module instance seeded on a fresh install.
pub const DEFAULT_MODULE_ID: &str = "m-1";

/// Responsive viewport tier. Each tier has its own column count and an
/// independent set of layout entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Breakpoint {
    Lg,
    Md,
    Sm,
    Xs,
    Xxs,
}

impl Breakpoint {
    /// All breakpoints, widest first.
    pub const ALL: [Breakpoint; 5] = [
        Breakpoint::Lg,
        Breakpoint::Md,
        Breakpoint::Sm,
        Breakpoint::Xs,
        Breakpoint::Xxs,
    ];

    /// Grid column count for this tier.
    pub fn column_count(self) -> u32 {
        match self {
            Breakpoint::Lg => 12,
            Breakpoint::Md | Breakpoint::Sm => 6,
            Breakpoint::Xs => 3,
            Breakpoint::Xxs => 1,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Breakpoint::Lg => "lg",
            Breakpoint::Md => "md",
            Breakpoint::Sm => "sm",
            Breakpoint::Xs => "xs",
            Breakpoint::Xxs => "xxs",
        }
    }
}

/// Position and size of one module at one breakpoint.
///
/// Serialized field names follow the grid renderer's entry shape (`i` is the
/// module id, `static` marks non-draggable entries).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutEntry {
    pub i: String,
    pub x: u32,
    pub y: u32,
    pub w: u32,
    pub h: u32,
    #[serde(rename = "static", default)]
    pub pinned: bool,
    #[serde(rename = "minW", default, skip_serializing_if = "Option::is_none")]
    pub min_w: Option<u32>,
    #[serde(rename = "minH", default, skip_serializing_if = "Option::is_none")]
    pub min_h: Option<u32>,
    #[serde(rename = "maxW", default, skip_serializing_if = "Option::is_none")]
    pub max_w: Option<u32>,
    #[serde(rename = "maxH", default, skip_serializing_if = "Option::is_none")]
    pub max_h: Option<u32>,
}

impl LayoutEntry {
    pub fn new(module_id: impl Into<String>, x: u32, y: u32, w: u32, h: u32) -> Self {
        Self {
            i: module_id.into(),
            x,
            y,
            w,
            h,
            pinned: false,
            min_w: None,
            min_h: None,
            max_w: None,
            max_h: None,
        }
    }
}

/// One placed occurrence of a module type on one dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleInstance {
    pub id: String,
    /// Key into the module type registry.
    #[serde(rename = "type")]
    pub kind: String,
}

impl ModuleInstance {
    /// Creates an instance with a generated cross-dashboard-unique id.
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            id: format!("module-{}", Uuid::new_v4()),
            kind: kind.into(),
        }
    }

    pub fn with_id(id: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind: kind.into(),
        }
    }
}

/// Per-breakpoint layout map. Breakpoints with no entry for a module mean
/// "renderer should auto-place", never an error.
pub type LayoutMap = BTreeMap<Breakpoint, Vec<LayoutEntry>>;

/// A named board owning module instances and their grid positions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dashboard {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub modules: Vec<ModuleInstance>,
    #[serde(default)]
    pub layouts: LayoutMap,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub theme: Option<String>,
}

impl Dashboard {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            modules: Vec::new(),
            layouts: LayoutMap::new(),
            theme: None,
        }
    }

    pub fn module(&self, module_id: &str) -> Option<&ModuleInstance> {
        self.modules.iter().find(|module| module.id == module_id)
    }

    pub fn module_ids(&self) -> Vec<String> {
        self.modules.iter().map(|module| module.id.clone()).collect()
    }
}
