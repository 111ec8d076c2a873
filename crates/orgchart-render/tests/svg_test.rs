use orgchart_core::{ChartConfig, ChartOptions, NodeId, OrgTree, PersonNode};
use orgchart_render::layout::layout_chart;
use orgchart_render::svg::{SvgSnapshotOptions, render_chart_svg};
use orgchart_render::text::DeterministicTextMeasurer;

fn sample_data() -> PersonNode {
    serde_json::from_value(serde_json::json!({
        "id": "ceo",
        "person": {
            "name": "Avery & Co <Founder>",
            "title": "Chief Executive Officer",
            "department": "Leadership",
            "avatar": "https://example.com/avatar.png",
            "link": "https://example.com/people/ceo",
            "totalReports": 2,
        },
        "children": [
            {
                "id": "eng",
                "person": { "name": "Robin", "title": "VP Engineering", "totalReports": 0 },
            },
            {
                "id": "ops",
                "person": { "name": "Sam", "title": "VP Operations", "totalReports": 0 },
            },
        ],
    }))
    .expect("sample data")
}

fn config() -> ChartConfig {
    ChartOptions {
        id: Some("#chart".to_string()),
        ..Default::default()
    }
    .resolve()
    .unwrap()
}

#[test]
fn snapshot_contains_defs_cards_and_links() {
    let mut tree = OrgTree::from_node(sample_data()).expect("tree");
    let cfg = config();
    let layout = layout_chart(&mut tree, &cfg);
    let measurer = DeterministicTextMeasurer::default();
    let svg = render_chart_svg(&tree, &layout, &cfg, &measurer, &SvgSnapshotOptions::default());

    assert!(svg.starts_with("<svg "));
    assert!(svg.trim_end().ends_with("</svg>"));
    assert!(svg.contains("org-chart-box-shadow"));
    assert!(svg.contains("org-chart-avatar-clip"));
    assert_eq!(svg.matches(r#"class="org-chart-node""#).count(), 3);
    assert_eq!(svg.matches(r#"class="org-chart-link""#).count(), 2);
    assert!(svg.contains(r#"data-node-id="ceo""#));
    assert!(svg.contains(r#"href="https://example.com/people/ceo""#));
}

#[test]
fn snapshot_escapes_person_text() {
    let mut tree = OrgTree::from_node(sample_data()).expect("tree");
    let cfg = config();
    let layout = layout_chart(&mut tree, &cfg);
    let measurer = DeterministicTextMeasurer::default();
    let svg = render_chart_svg(&tree, &layout, &cfg, &measurer, &SvgSnapshotOptions::default());

    assert!(svg.contains("&amp; Co"));
    assert!(svg.contains("&lt;Founder&gt;"));
    assert!(!svg.contains("<Founder>"));
}

#[test]
fn badge_rendering_follows_report_count() {
    let mut tree = OrgTree::from_node(sample_data()).expect("tree");
    let cfg = config();
    let layout = layout_chart(&mut tree, &cfg);
    let measurer = DeterministicTextMeasurer::default();
    let svg = render_chart_svg(&tree, &layout, &cfg, &measurer, &SvgSnapshotOptions::default());

    // Only the root has reports; the two VPs hide their badge.
    assert_eq!(svg.matches("org-chart-person-reports").count(), 1);
    assert!(svg.contains(r#">2</text>"#));
}

#[test]
fn collapsed_nodes_are_absent_from_the_snapshot() {
    let mut tree = OrgTree::from_node(sample_data()).expect("tree");
    tree.collapse(&NodeId::from("ceo")).unwrap();
    let cfg = config();
    let layout = layout_chart(&mut tree, &cfg);
    let measurer = DeterministicTextMeasurer::default();
    let svg = render_chart_svg(&tree, &layout, &cfg, &measurer, &SvgSnapshotOptions::default());

    assert_eq!(svg.matches(r#"class="org-chart-node""#).count(), 1);
    assert_eq!(svg.matches(r#"class="org-chart-link""#).count(), 0);
    assert!(!svg.contains(r#"data-node-id="eng""#));
}

#[test]
fn custom_chart_id_prefixes_defs() {
    let mut tree = OrgTree::from_node(sample_data()).expect("tree");
    let cfg = config();
    let layout = layout_chart(&mut tree, &cfg);
    let measurer = DeterministicTextMeasurer::default();
    let options = SvgSnapshotOptions {
        chart_id: "acme".to_string(),
        ..Default::default()
    };
    let svg = render_chart_svg(&tree, &layout, &cfg, &measurer, &options);

    assert!(svg.contains(r##"url(#acme-box-shadow)"##));
    assert!(svg.contains(r##"url(#acme-avatar-clip)"##));
    assert!(!svg.contains("org-chart-box-shadow"));
}
