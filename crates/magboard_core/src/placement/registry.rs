//! Module type registry: grid size constraints per module type.
//!
//! # Responsibility
//! - Map module type keys to default/min/max grid sizes.
//! - Clamp computed sizes into the registered bounds.
//!
//! # Invariants
//! - Unknown module types fall back to `DEFAULT_MODULE_SIZE` with
//!   unconstrained bounds, never an error.

use std::collections::BTreeMap;

/// Grid size in columns x rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridSize {
    pub w: u32,
    pub h: u32,
}

impl GridSize {
    pub const fn new(w: u32, h: u32) -> Self {
        Self { w, h }
    }
}

/// Fallback for module types the registry does not know.
pub const DEFAULT_MODULE_SIZE: GridSize = GridSize::new(3, 3);

/// Size constraints registered for one module type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModuleTypeSpec {
    pub default: GridSize,
    pub min: GridSize,
    pub max: GridSize,
}

impl ModuleTypeSpec {
    /// Clamps width and height independently into `[min, max]`.
    pub fn clamp(&self, size: GridSize) -> GridSize {
        GridSize::new(
            size.w.clamp(self.min.w, self.max.w),
            size.h.clamp(self.min.h, self.max.h),
        )
    }
}

const FALLBACK_SPEC: ModuleTypeSpec = ModuleTypeSpec {
    default: DEFAULT_MODULE_SIZE,
    min: GridSize::new(1, 1),
    max: GridSize::new(12, 12),
};

/// Registry of size constraints consumed by the placement engine and the
/// add-module flow. Renderers are registered elsewhere, outside core.
#[derive(Debug, Clone)]
pub struct ModuleTypeRegistry {
    specs: BTreeMap<String, ModuleTypeSpec>,
}

impl Default for ModuleTypeRegistry {
    fn default() -> Self {
        let mut registry = Self {
            specs: BTreeMap::new(),
        };
        registry.register("timer", spec((3, 4), (2, 3), (6, 6)));
        registry.register("todo", spec((3, 5), (2, 3), (6, 9)));
        registry.register("quote", spec((4, 2), (2, 1), (8, 4)));
        registry.register("image", spec((4, 4), (2, 2), (12, 10)));
        registry.register("article", spec((4, 5), (3, 3), (8, 12)));
        registry.register("ai-output", spec((4, 4), (2, 2), (8, 10)));
        registry
    }
}

fn spec(default: (u32, u32), min: (u32, u32), max: (u32, u32)) -> ModuleTypeSpec {
    ModuleTypeSpec {
        default: GridSize::new(default.0, default.1),
        min: GridSize::new(min.0, min.1),
        max: GridSize::new(max.0, max.1),
    }
}

impl ModuleTypeRegistry {
    pub fn register(&mut self, kind: impl Into<String>, spec: ModuleTypeSpec) {
        self.specs.insert(kind.into(), spec);
    }

    /// Spec for a type; unknown types get the global fallback.
    pub fn spec(&self, kind: &str) -> ModuleTypeSpec {
        self.specs.get(kind).copied().unwrap_or(FALLBACK_SPEC)
    }

    pub fn default_size(&self, kind: &str) -> GridSize {
        self.spec(kind).default
    }
}
