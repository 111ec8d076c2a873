use assert_cmd::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

fn repo_root() -> PathBuf {
    let manifest_dir = Path::new(env!("CARGO_MANIFEST_DIR"));
    manifest_dir
        .parent()
        .and_then(|p| p.parent())
        .expect("expected crates/<name> layout")
        .to_path_buf()
}

fn fixture(name: &str) -> PathBuf {
    repo_root().join("fixtures").join("people").join(name)
}

fn orgchart() -> Command {
    Command::new(assert_cmd::cargo_bin!("orgchart"))
}

#[test]
fn layout_emits_json_with_initially_collapsed_levels() {
    let output = orgchart()
        .args(["layout", fixture("basic.json").to_string_lossy().as_ref()])
        .output()
        .expect("run");
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));

    let layout: serde_json::Value = serde_json::from_slice(&output.stdout).expect("layout JSON");
    // Root plus the two VPs; the managers start collapsed.
    assert_eq!(layout["nodes"].as_array().map(Vec::len), Some(3));
    assert_eq!(layout["links"].as_array().map(Vec::len), Some(2));
    assert!(layout["extent"]["nodeLeftX"].is_number());
}

#[test]
fn layout_expand_all_reaches_every_level() {
    let output = orgchart()
        .args([
            "layout",
            fixture("basic.json").to_string_lossy().as_ref(),
            "--expand-all",
        ])
        .output()
        .expect("run");
    assert!(output.status.success());

    let layout: serde_json::Value = serde_json::from_slice(&output.stdout).expect("layout JSON");
    assert_eq!(layout["nodes"].as_array().map(Vec::len), Some(5));

    // Sibling managers sit one node-plus-gap apart.
    let nodes = layout["nodes"].as_array().expect("nodes");
    let x = |id: &str| {
        nodes
            .iter()
            .find(|n| n["id"] == id)
            .and_then(|n| n["x"].as_f64())
            .expect("node x")
    };
    assert_eq!((x("103") - x("104")).abs(), 252.0);
}

#[test]
fn layout_respects_line_type_spacing() {
    let output = orgchart()
        .args([
            "layout",
            fixture("basic.json").to_string_lossy().as_ref(),
            "--line-type",
            "straight",
        ])
        .output()
        .expect("run");
    assert!(output.status.success());

    let layout: serde_json::Value = serde_json::from_slice(&output.stdout).expect("layout JSON");
    let nodes = layout["nodes"].as_array().expect("nodes");
    let depth_one_y = nodes
        .iter()
        .find(|n| n["depth"] == 1)
        .and_then(|n| n["y"].as_f64())
        .expect("depth-1 node");
    assert_eq!(depth_one_y, 180.0);
}

#[test]
fn render_writes_svg_to_a_file() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let out = tmp.path().join("chart.svg");

    orgchart()
        .args([
            "render",
            fixture("basic.json").to_string_lossy().as_ref(),
            "-o",
            out.to_string_lossy().as_ref(),
        ])
        .assert()
        .success();

    let svg = fs::read_to_string(&out).expect("svg written");
    assert!(svg.starts_with("<svg "));
    assert!(svg.contains("Jane Doe"));
    assert!(svg.contains("org-chart-node"));
}

#[test]
fn render_reads_stdin() {
    let data = fs::read_to_string(fixture("basic.json")).expect("fixture");
    let assert = assert_cmd::Command::new(assert_cmd::cargo_bin!("orgchart"))
        .arg("render")
        .write_stdin(data)
        .assert()
        .success();
    let svg = String::from_utf8_lossy(&assert.get_output().stdout);
    assert!(svg.contains("org-chart-link"));
}

#[test]
fn validate_accepts_good_trees_and_rejects_duplicates() {
    let output = orgchart()
        .args(["validate", fixture("basic.json").to_string_lossy().as_ref()])
        .output()
        .expect("run");
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("ok: 5 nodes"));

    let output = orgchart()
        .args([
            "validate",
            fixture("duplicate_id.json").to_string_lossy().as_ref(),
        ])
        .output()
        .expect("run");
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("duplicate node id: 2"));
}

#[test]
fn unknown_command_prints_usage() {
    let output = orgchart().arg("frobnicate").output().expect("run");
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("usage: orgchart"));
}
