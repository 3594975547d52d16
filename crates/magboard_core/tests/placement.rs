use magboard_core::placement::engine::{
    fit_image_size, next_free_position, GridGeometry, GridRect, ImageMeta,
};
use magboard_core::placement::registry::{GridSize, ModuleTypeRegistry};

fn assert_clear(existing: &[GridRect], size: GridSize, cols: u32) -> GridRect {
    let rect = next_free_position(existing, size, cols);
    for other in existing {
        assert!(!rect.overlaps(other), "{rect:?} overlaps {other:?}");
    }
    assert!(rect.x + rect.w <= cols, "{rect:?} crosses {cols} columns");
    rect
}

#[test]
fn shelf_packs_along_the_bottom_row() {
    let mut existing = Vec::new();
    for _ in 0..6 {
        let rect = assert_clear(&existing, GridSize::new(3, 3), 12);
        existing.push(rect);
    }
    // 12 columns fit four 3-wide blocks per row.
    assert_eq!(existing[3].y, 0);
    assert_eq!(existing[4], GridRect::new(0, 3, 3, 3));
    assert_eq!(existing[5], GridRect::new(3, 3, 3, 3));
}

#[test]
fn stays_clear_of_arbitrary_non_overlapping_sets() {
    let cases: Vec<Vec<GridRect>> = vec![
        vec![],
        vec![GridRect::new(0, 0, 12, 2)],
        // Tall early column hanging beside the bottom-most block.
        vec![GridRect::new(2, 0, 2, 6), GridRect::new(0, 2, 2, 2)],
        // Staggered heights.
        vec![
            GridRect::new(0, 0, 4, 5),
            GridRect::new(4, 0, 4, 2),
            GridRect::new(8, 0, 4, 3),
            GridRect::new(4, 2, 3, 2),
        ],
        // Single column grid.
        vec![GridRect::new(0, 0, 1, 4), GridRect::new(0, 4, 1, 2)],
    ];
    for existing in cases {
        let cols = if existing.iter().any(|rect| rect.x + rect.w > 3) { 12 } else { 3 };
        assert_clear(&existing, GridSize::new(2, 2), cols);
    }
}

#[test]
fn oversized_request_is_narrowed_to_the_grid() {
    let rect = assert_clear(&[], GridSize::new(9, 3), 6);
    assert_eq!(rect.w, 6);
}

#[test]
fn wide_image_lands_wider_than_tall() {
    let registry = ModuleTypeRegistry::default();
    let spec = registry.spec("image");
    let geometry = GridGeometry {
        container_width: 1200.0,
        margin_x: 10.0,
        padding_x: 10.0,
        row_height: 80.0,
        cols: 12,
    };
    let wide = fit_image_size(
        &spec,
        &ImageMeta {
            width: Some(1920.0),
            height: Some(1080.0),
            aspect_ratio: None,
        },
        Some(&geometry),
    );
    let tall = fit_image_size(
        &spec,
        &ImageMeta {
            width: Some(1080.0),
            height: Some(1920.0),
            aspect_ratio: None,
        },
        Some(&geometry),
    );
    assert!(
        f64::from(wide.w) / f64::from(wide.h) > f64::from(tall.w) / f64::from(tall.h),
        "wide={wide:?} tall={tall:?}"
    );
}

#[test]
fn precomputed_aspect_ratio_wins_over_dimensions() {
    let registry = ModuleTypeRegistry::default();
    let spec = registry.spec("image");
    let geometry = GridGeometry {
        container_width: 1210.0,
        margin_x: 10.0,
        padding_x: 0.0,
        row_height: 100.0,
        cols: 12,
    };
    let meta = ImageMeta {
        width: Some(100.0),
        height: Some(100.0),
        aspect_ratio: Some(2.0),
    };
    let size = fit_image_size(&spec, &meta, Some(&geometry));
    // Square cells, so a 2:1 aspect should come out about twice as wide.
    assert!(f64::from(size.w) / f64::from(size.h) > 1.5, "size={size:?}");
}

#[test]
fn degenerate_geometry_falls_back_to_default() {
    let registry = ModuleTypeRegistry::default();
    let spec = registry.spec("image");
    let geometry = GridGeometry {
        container_width: 0.0,
        margin_x: 0.0,
        padding_x: 0.0,
        row_height: 0.0,
        cols: 12,
    };
    let meta = ImageMeta {
        aspect_ratio: Some(1.5),
        ..ImageMeta::default()
    };
    assert_eq!(fit_image_size(&spec, &meta, Some(&geometry)), spec.default);
}
