use orgchart_core::{ChartConfig, ChartOptions, ScaleExtent};
use orgchart_render::model::LayoutExtent;
use orgchart_render::viewport::{
    SurfaceSize, Viewport, ViewportTransform, ZoomDirection, initial_transform,
};

fn config() -> ChartConfig {
    ChartOptions {
        id: Some("#chart".to_string()),
        ..Default::default()
    }
    .resolve()
    .unwrap()
}

fn viewport(width: f64, height: f64) -> Viewport {
    Viewport::new(SurfaceSize::new(width, height), ScaleExtent::default())
}

#[test]
fn repeated_zoom_in_never_exceeds_max_scale() {
    let mut vp = viewport(800.0, 600.0);
    let mut applied = 0;
    for _ in 0..50 {
        if let Some(t) = vp.step_zoom(ZoomDirection::In) {
            vp.set_transform(t);
            applied += 1;
        }
    }
    assert!(vp.transform.scale <= 2.0);
    // 1.2^4 ≈ 2.07, so only three steps land inside the extent.
    assert_eq!(applied, 3);
}

#[test]
fn repeated_zoom_out_never_drops_below_min_scale() {
    let mut vp = viewport(800.0, 600.0);
    for _ in 0..50 {
        if let Some(t) = vp.step_zoom(ZoomDirection::Out) {
            vp.set_transform(t);
        }
    }
    assert!(vp.transform.scale >= 0.4);
    // 0.8^4 ≈ 0.41 is the last step inside the extent.
    assert!((vp.transform.scale - 0.4096).abs() < 1e-9);
}

#[test]
fn out_of_range_step_is_a_noop() {
    let mut vp = viewport(800.0, 600.0);
    vp.set_transform(ViewportTransform::new(10.0, 20.0, 1.9));
    assert!(vp.step_zoom(ZoomDirection::In).is_none());
    // The stored transform is untouched by the rejected press.
    assert_eq!(vp.transform, ViewportTransform::new(10.0, 20.0, 1.9));
}

#[test]
fn step_zoom_keeps_the_viewport_center_fixed() {
    let mut vp = viewport(800.0, 600.0);
    vp.set_transform(ViewportTransform::new(37.0, -12.0, 1.0));
    let next = vp.step_zoom(ZoomDirection::In).expect("in range");

    // The world point under the viewport center must project to the same
    // screen point under the new transform.
    let (cx, cy) = vp.size.center();
    let world = (
        (cx - vp.transform.translate_x) / vp.transform.scale,
        (cy - vp.transform.translate_y) / vp.transform.scale,
    );
    let reprojected = (
        world.0 * next.scale + next.translate_x,
        world.1 * next.scale + next.translate_y,
    );
    assert!((reprojected.0 - cx).abs() < 1e-9);
    assert!((reprojected.1 - cy).abs() < 1e-9);
    assert!((next.scale - 1.2).abs() < 1e-12);
}

#[test]
fn fit_keeps_scale_one_for_small_content() {
    let vp = viewport(1000.0, 800.0);
    let cfg = config();
    let extent = LayoutExtent {
        node_left_x: 126.0,
        node_right_x: 126.0,
        node_y: 200.0,
    };

    let fitted = vp.fit_transform(&extent, &cfg);
    assert_eq!(fitted.scale, 1.0);
    // Centered horizontally, shifted by half the left margin.
    assert_eq!(fitted.translate_x, 500.0 - 10.0);
    assert_eq!(fitted.translate_y, 48.0);
}

#[test]
fn fit_shrinks_wide_content_to_the_width_bound() {
    let vp = viewport(1000.0, 800.0);
    let cfg = config();
    let extent = LayoutExtent {
        node_left_x: 1500.0,
        node_right_x: 1500.0,
        node_y: 400.0,
    };

    let fitted = vp.fit_transform(&extent, &cfg);
    let scale_x = 1000.0 / 3000.0 - 0.03;
    assert!((fitted.scale - scale_x).abs() < 1e-12);
    assert!(fitted.scale < 1.0);
    assert_eq!(fitted.translate_x, 1500.0 * fitted.scale + 10.0);
    assert_eq!(fitted.translate_y, 48.0);
}

#[test]
fn fit_shrinks_deep_content_to_the_height_bound() {
    let vp = viewport(1000.0, 500.0);
    let cfg = config();
    let extent = LayoutExtent {
        node_left_x: 200.0,
        node_right_x: 200.0,
        node_y: 2000.0,
    };

    let fitted = vp.fit_transform(&extent, &cfg);
    let content_height = 2000.0 + 120.0 * 2.0 + 48.0;
    let scale_y = 500.0 / content_height - 0.06;
    assert!((fitted.scale - scale_y).abs() < 1e-12);
    // Height-bound fits center horizontally.
    assert_eq!(fitted.translate_x, 500.0 - 10.0);
}

#[test]
fn initial_transform_centers_the_root_row() {
    let t = initial_transform(2, 800.0, 240.0, 20.0);
    // children_width = trunc(2 * 240 / 2) = 240.
    assert_eq!(t.translate_x, (240.0_f64 + (800.0 - 480.0) / 2.0 - 10.0).trunc());
    assert_eq!(t.translate_y, 20.0);
    assert_eq!(t.scale, 1.0);

    let leafless = initial_transform(0, 800.0, 240.0, 20.0);
    assert_eq!(leafless.translate_x, 390.0);
}

#[test]
fn gesture_transforms_apply_verbatim() {
    let mut vp = viewport(800.0, 600.0);
    let dragged = ViewportTransform::new(-140.0, 77.0, 0.8);
    vp.set_transform(dragged);
    assert_eq!(vp.transform, dragged);

    vp.resize(SurfaceSize::new(1024.0, 768.0));
    assert_eq!(vp.size, SurfaceSize::new(1024.0, 768.0));
    // Resize does not touch the transform.
    assert_eq!(vp.transform, dragged);
}
