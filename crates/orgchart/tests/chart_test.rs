use orgchart::{
    Chart, ChartOptions, Error, HeadlessHost, NodeId, PersonNode, RecordingScene, SceneOp, Toggle,
    ViewportTransform,
};

fn sample_data() -> PersonNode {
    serde_json::from_value(serde_json::json!({
        "id": "ceo",
        "person": { "name": "Avery", "title": "CEO", "totalReports": 2 },
        "children": [
            {
                "id": "eng",
                "person": { "name": "Robin", "title": "VP Engineering", "totalReports": 1 },
                "children": [
                    { "id": "eng-1", "person": { "name": "Kai", "title": "Engineer", "totalReports": 0 } },
                ],
            },
            {
                "id": "ops",
                "person": { "name": "Sam", "title": "VP Operations", "totalReports": 0 },
            },
        ],
    }))
    .expect("sample data")
}

fn options() -> ChartOptions {
    ChartOptions {
        id: Some("#chart".to_string()),
        zoom_in_id: Some("zoom-in".to_string()),
        zoom_out_id: Some("zoom-out".to_string()),
        zoom_extent_id: Some("zoom-extent".to_string()),
        ..Default::default()
    }
}

fn mounted() -> Chart<HeadlessHost, RecordingScene> {
    Chart::init(
        options(),
        sample_data(),
        HeadlessHost::new(800.0, 600.0),
        RecordingScene::new(),
    )
    .expect("chart mounts")
}

#[test]
fn missing_id_aborts_without_touching_the_scene() {
    let mut scene = RecordingScene::new();
    let result = Chart::init(
        ChartOptions::default(),
        sample_data(),
        HeadlessHost::new(800.0, 600.0),
        &mut scene,
    );
    match result {
        Err(Error::MissingRootSelector) => {}
        other => panic!("expected missing selector error, got {:?}", other.err()),
    }
    assert!(scene.ops.is_empty(), "no scene mutation on aborted init");
}

#[test]
fn missing_id_error_message_matches_contract() {
    assert_eq!(Error::MissingRootSelector.to_string(), "missing id for root");
}

#[test]
fn unresolved_mount_aborts_without_partial_state() {
    let mut host = HeadlessHost::new(800.0, 600.0);
    host.detached = true;
    let mut scene = RecordingScene::new();
    let result = Chart::init(options(), sample_data(), host, &mut scene);
    match result {
        Err(Error::RootNotFound { selector }) => assert_eq!(selector, "#chart"),
        other => panic!("expected root-not-found error, got {:?}", other.err()),
    }
    assert!(scene.ops.is_empty(), "no scene mutation on aborted init");
}

#[test]
fn duplicate_ids_are_rejected_at_init() {
    let data: PersonNode = serde_json::from_value(serde_json::json!({
        "id": "dup",
        "person": { "name": "A", "title": "t" },
        "children": [
            { "id": "dup", "person": { "name": "B", "title": "t" } },
        ],
    }))
    .expect("data");
    let result = Chart::init(
        options(),
        data,
        HeadlessHost::new(800.0, 600.0),
        RecordingScene::new(),
    );
    match result {
        Err(Error::DuplicateNodeId { id }) => assert_eq!(id, "dup"),
        other => panic!("expected duplicate id error, got {:?}", other.err()),
    }
}

#[test]
fn init_clears_styles_sizes_and_renders_the_first_level() {
    let chart = mounted();
    let scene = chart.scene();

    assert_eq!(scene.ops.first(), Some(&SceneOp::ClearSurface));
    assert!(
        scene
            .ops
            .iter()
            .any(|op| matches!(op, SceneOp::SetSurfaceSize { width, height } if *width == 800.0 && *height == 600.0))
    );

    // Root plus its two direct reports; grandchildren start collapsed.
    let created = scene.created_node_ids();
    assert_eq!(created.len(), 3);
    assert!(chart.tree().find(&NodeId::from("eng-1")).is_some());
    assert_eq!(chart.tree().visible_count(), 3);

    // Styles were pushed to the mount element, numbers px-suffixed.
    // (Default style map: cursor/height/width.)
    // The initial transform centers the root row.
    let transform = scene.last_root_transform().expect("initial transform");
    assert_eq!(transform.scale, 1.0);
    assert_eq!(transform.translate_y, 20.0);
}

#[test]
fn clicking_a_collapsed_node_expands_it() {
    let mut chart = mounted();
    chart.scene_mut().clear();

    let toggle = chart.handle_node_click(&NodeId::from("eng")).unwrap();
    assert_eq!(toggle, Toggle::Expanded);
    assert_eq!(chart.tree().visible_count(), 4);

    let created = chart.scene().created_node_ids();
    assert_eq!(created.len(), 1);
    assert_eq!(created[0].as_str(), "eng-1");
}

#[test]
fn clicking_again_collapses_and_removes() {
    let mut chart = mounted();
    chart.handle_node_click(&NodeId::from("eng")).unwrap();
    chart.scene_mut().clear();

    let toggle = chart.handle_node_click(&NodeId::from("eng")).unwrap();
    assert_eq!(toggle, Toggle::Collapsed);
    assert_eq!(chart.tree().visible_count(), 3);

    let removed = chart.scene().removed_node_ids();
    assert_eq!(removed.len(), 1);
    assert_eq!(removed[0].as_str(), "eng-1");
}

#[test]
fn clicking_a_leaf_is_a_no_op() {
    let mut chart = mounted();
    chart.scene_mut().clear();

    let toggle = chart.handle_node_click(&NodeId::from("ops")).unwrap();
    assert_eq!(toggle, Toggle::Leaf);
    assert!(chart.scene().ops.is_empty(), "no render for a leaf click");
}

#[test]
fn zoom_buttons_step_and_clamp() {
    let mut chart = mounted();
    for _ in 0..20 {
        chart.zoom_in();
    }
    assert!(chart.transform().scale <= 2.0);

    for _ in 0..40 {
        chart.zoom_out();
    }
    assert!(chart.transform().scale >= 0.4);
}

#[test]
fn control_clicks_dispatch_by_element_id() {
    let mut chart = mounted();
    let initial = chart.transform();

    chart.handle_control_click("zoom-in");
    assert!((chart.transform().scale - initial.scale * 1.2).abs() < 1e-12);

    chart.handle_control_click("unrelated-button");
    assert!((chart.transform().scale - initial.scale * 1.2).abs() < 1e-12);

    chart.handle_control_click("zoom-extent");
    // Content fits an 800x600 viewport, so fit settles on scale 1, centered.
    assert_eq!(chart.transform().scale, 1.0);
    assert_eq!(chart.transform().translate_x, 400.0 - 10.0);
}

#[test]
fn gesture_transforms_apply_without_animation() {
    let mut chart = mounted();
    chart.scene_mut().clear();

    let dragged = ViewportTransform::new(-25.0, 60.0, 0.9);
    chart.handle_gesture(dragged);
    assert_eq!(chart.transform(), dragged);

    match chart.scene().ops.last() {
        Some(SceneOp::SetRootTransform {
            transform,
            animate_ms,
        }) => {
            assert_eq!(*transform, dragged);
            assert!(animate_ms.is_none(), "gestures snap, buttons animate");
        }
        other => panic!("expected root transform op, got {other:?}"),
    }
}

#[test]
fn resize_reapplies_surface_size_without_relayout() {
    let mut chart = mounted();
    let before = chart.tree().visible_count();
    chart.scene_mut().clear();

    chart.handle_resize();
    assert!(
        chart
            .scene()
            .ops
            .iter()
            .all(|op| matches!(op, SceneOp::SetSurfaceSize { .. })),
        "resize only re-sizes the surface"
    );
    assert_eq!(chart.tree().visible_count(), before);
}

#[test]
fn teardown_silences_all_further_events() {
    let mut chart = mounted();
    chart.teardown();
    assert!(chart.is_torn_down());
    assert_eq!(chart.scene().ops.last(), Some(&SceneOp::ClearSurface));

    chart.scene_mut().clear();
    chart.zoom_in();
    chart.handle_gesture(ViewportTransform::new(1.0, 2.0, 1.5));
    chart.handle_resize();
    let _ = chart.handle_node_click(&NodeId::from("eng"));
    assert!(chart.scene().ops.is_empty());

    // Teardown twice is harmless.
    chart.teardown();
}

#[test]
fn person_link_clicks_reach_the_registered_handler() {
    let data: PersonNode = serde_json::from_value(serde_json::json!({
        "id": "ceo",
        "person": {
            "name": "Avery",
            "title": "CEO",
            "link": "https://example.com/avery",
            "totalReports": 0,
        },
    }))
    .expect("data");
    let mut chart = Chart::init(
        options(),
        data,
        HeadlessHost::new(800.0, 600.0),
        RecordingScene::new(),
    )
    .expect("chart mounts");

    let clicked = std::rc::Rc::new(std::cell::RefCell::new(Vec::<String>::new()));
    let sink = clicked.clone();
    chart.on_person_link_click(move |id, link| {
        sink.borrow_mut().push(format!("{id}:{link}"));
    });

    chart.handle_person_link_click(&NodeId::from("ceo"));
    assert_eq!(
        clicked.borrow().as_slice(),
        ["ceo:https://example.com/avery"]
    );
}
