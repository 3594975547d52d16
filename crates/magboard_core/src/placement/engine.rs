//! Free-position search and content-aware sizing.
//!
//! # Responsibility
//! - Shelf-pack new modules below/right of the current bottom-most block.
//! - Fit image modules to their true aspect ratio under the rendered cell
//!   geometry (grid cells are not square in general).
//!
//! # Invariants
//! - Returned rectangles never overlap an existing rectangle and never
//!   cross the breakpoint's column count.
//! - No gap-closing: the heuristic appends, it does not repack.

use crate::placement::registry::{GridSize, ModuleTypeSpec};

/// Grid rectangle in cell units.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridRect {
    pub x: u32,
    pub y: u32,
    pub w: u32,
    pub h: u32,
}

impl GridRect {
    pub fn new(x: u32, y: u32, w: u32, h: u32) -> Self {
        Self { x, y, w, h }
    }

    pub fn overlaps(&self, other: &GridRect) -> bool {
        self.x < other.x + other.w
            && other.x < self.x + self.w
            && self.y < other.y + other.h
            && other.y < self.y + self.h
    }
}

/// Next free rectangle for a `size`-sized block on a grid of `cols` columns.
///
/// Takes the bottom-most (then right-most) existing rectangle; if the new
/// block still fits to its right within the column count, it lands there at
/// the same `y`, otherwise it wraps to a fresh row below that block. If the
/// chosen spot would collide with any existing rectangle (legal inputs are
/// any non-overlapping set, not only shelf-packed ones), the block drops to
/// the first fully clear row instead.
pub fn next_free_position(existing: &[GridRect], size: GridSize, cols: u32) -> GridRect {
    let w = size.w.min(cols.max(1));
    let h = size.h;

    let mut sorted: Vec<&GridRect> = existing.iter().collect();
    sorted.sort_by_key(|rect| (rect.y, rect.x));

    let candidate = match sorted.last() {
        None => GridRect::new(0, 0, w, h),
        Some(last) => {
            if last.x + last.w + w <= cols {
                GridRect::new(last.x + last.w, last.y, w, h)
            } else {
                GridRect::new(0, last.y + last.h, w, h)
            }
        }
    };

    if existing.iter().any(|rect| candidate.overlaps(rect)) {
        let clear_y = existing
            .iter()
            .map(|rect| rect.y + rect.h)
            .max()
            .unwrap_or(0);
        return GridRect::new(0, clear_y, w, h);
    }
    candidate
}

/// Live container geometry of the rendered grid at one breakpoint.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridGeometry {
    pub container_width: f64,
    pub margin_x: f64,
    pub padding_x: f64,
    pub row_height: f64,
    pub cols: u32,
}

impl GridGeometry {
    /// Width of one rendered column in pixels.
    pub fn col_width(&self) -> f64 {
        let cols = f64::from(self.cols.max(1));
        (self.container_width - self.margin_x * (cols - 1.0) - 2.0 * self.padding_x) / cols
    }

    /// Ratio of rendered column width to row height. A block of `w x h`
    /// cells shows with visual aspect `(w / h) * cell_ratio`.
    pub fn cell_ratio(&self) -> f64 {
        self.col_width() / self.row_height
    }
}

/// Pixel dimensions (or a precomputed ratio) of an image to be placed.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ImageMeta {
    pub width: Option<f64>,
    pub height: Option<f64>,
    pub aspect_ratio: Option<f64>,
}

impl ImageMeta {
    fn aspect(&self) -> Option<f64> {
        if let Some(ratio) = self.aspect_ratio {
            if ratio > 0.0 {
                return Some(ratio);
            }
        }
        match (self.width, self.height) {
            (Some(w), Some(h)) if w > 0.0 && h > 0.0 => Some(w / h),
            _ => None,
        }
    }
}

/// Best `(w, h)` block for an image under the live cell geometry.
///
/// Searches every integer height in the type's bounds and keeps the pair
/// whose rendered visual aspect is closest to the image's true aspect;
/// width stays inside the type's bounds throughout. Falls back to the
/// type's default size when either the aspect or the geometry is unknown.
pub fn fit_image_size(
    spec: &ModuleTypeSpec,
    meta: &ImageMeta,
    geometry: Option<&GridGeometry>,
) -> GridSize {
    let (Some(aspect), Some(geometry)) = (meta.aspect(), geometry) else {
        return spec.default;
    };
    let cell_ratio = geometry.cell_ratio();
    if !cell_ratio.is_finite() || cell_ratio <= 0.0 {
        return spec.default;
    }

    let mut best: Option<(GridSize, f64)> = None;
    for h in spec.min.h..=spec.max.h.max(spec.min.h) {
        let ideal_w = aspect * f64::from(h) / cell_ratio;
        let w = (ideal_w.round() as i64)
            .clamp(i64::from(spec.min.w), i64::from(spec.max.w)) as u32;
        let visual = (f64::from(w) / f64::from(h)) * cell_ratio;
        let error = (visual - aspect).abs();
        let better = match best {
            None => true,
            Some((_, best_error)) => error < best_error,
        };
        if better {
            best = Some((GridSize::new(w, h), error));
        }
    }

    best.map(|(size, _)| size).unwrap_or(spec.default)
}
