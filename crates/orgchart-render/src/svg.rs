//! Static SVG snapshot of the currently visible chart state.
//!
//! Headless counterpart of what a live host draws: `<defs>` with the card
//! drop shadow and the circular avatar clip, one path per connector, one
//! group per card. Used by the CLI and by tests; interactive hosts drive
//! their own scene graph through [`crate::scene`] instead.

use std::fmt::Write as _;

use orgchart_core::{ChartConfig, NodeId, OrgTree, Person};
use rustc_hash::FxHashMap;

use crate::card::{CardLayout, TextBlock, compute_card};
use crate::model::{Bounds, ChartLayout, LayoutPoint};
use crate::text::TextMeasurer;

const CHART_NODE_CLASS: &str = "org-chart-node";
const PERSON_NAME_CLASS: &str = "org-chart-person-name";
const PERSON_TITLE_CLASS: &str = "org-chart-person-title";
const PERSON_DEPARTMENT_CLASS: &str = "org-chart-person-dept";
const PERSON_REPORTS_CLASS: &str = "org-chart-person-reports";
const LINK_CLASS: &str = "org-chart-link";

#[derive(Debug, Clone)]
pub struct SvgSnapshotOptions {
    /// Extra space around the computed viewBox.
    pub viewbox_padding: f64,
    /// Id prefix for `<defs>` references, so several charts can share a page.
    pub chart_id: String,
}

impl Default for SvgSnapshotOptions {
    fn default() -> Self {
        Self {
            viewbox_padding: 8.0,
            chart_id: "org-chart".to_string(),
        }
    }
}

fn fmt(v: f64) -> String {
    // Round-trippable decimal form without `-0` or tiny float noise.
    if !v.is_finite() {
        return "0".to_string();
    }
    let mut v = if v.abs() < 1e-9 { 0.0 } else { v };
    let nearest = v.round();
    if (v - nearest).abs() < 1e-6 {
        v = nearest;
    }
    let s = v.to_string();
    if s == "-0" { "0".to_string() } else { s }
}

fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

fn write_defs(out: &mut String, config: &ChartConfig, options: &SvgSnapshotOptions) {
    let shadow_id = format!("{}-box-shadow", options.chart_id);
    let clip_id = format!("{}-avatar-clip", options.chart_id);
    let _ = writeln!(out, "<defs>");
    let _ = writeln!(
        out,
        r#"<filter id="{shadow_id}" x="-50%" y="-50%" width="200%" height="200%"><feGaussianBlur in="SourceAlpha" stdDeviation="3"/><feOffset dx="0" dy="2" result="offsetblur"/><feComponentTransfer><feFuncA type="linear" slope="0.15"/></feComponentTransfer><feMerge><feMergeNode/><feMergeNode in="SourceGraphic"/></feMerge></filter>"#
    );
    let _ = writeln!(
        out,
        r#"<clipPath id="{clip_id}"><circle cx="{}" cy="{}" r="{}"/></clipPath>"#,
        fmt(config.node_width / 2.0),
        fmt(config.avatar_width / 2.0),
        fmt(config.avatar_width / 2.0),
    );
    let _ = writeln!(out, "</defs>");
}

fn write_text_block(out: &mut String, block: &TextBlock, class: &str) {
    let _ = write!(
        out,
        r#"<text class="{class}" x="{}" y="{}" text-anchor="middle" font-size="{}" font-weight="{}" fill="{}">"#,
        fmt(block.x),
        fmt(block.y),
        fmt(block.font_size),
        block.font_weight,
        escape_xml(&block.color),
    );
    for (i, line) in block.lines.iter().enumerate() {
        if i == 0 {
            let _ = write!(
                out,
                r#"<tspan x="{}" dy="0">{}</tspan>"#,
                fmt(block.x),
                escape_xml(line)
            );
        } else {
            let _ = write!(
                out,
                r#"<tspan x="{}" dy="{}">{}</tspan>"#,
                fmt(block.x),
                fmt(block.line_height),
                escape_xml(line)
            );
        }
    }
    let _ = writeln!(out, "</text>");
}

fn write_card(
    out: &mut String,
    id: &NodeId,
    at: LayoutPoint,
    card: &CardLayout,
    config: &ChartConfig,
    options: &SvgSnapshotOptions,
) {
    let shadow_id = format!("{}-box-shadow", options.chart_id);
    let clip_id = format!("{}-avatar-clip", options.chart_id);

    let _ = writeln!(
        out,
        r#"<g class="{CHART_NODE_CLASS}" data-node-id="{}" transform="translate({},{})">"#,
        escape_xml(id.as_str()),
        fmt(at.x),
        fmt(at.y),
    );
    let _ = writeln!(
        out,
        r#"<rect y="{}" width="{}" height="{}" rx="{}" ry="{}" fill="{}" stroke="{}" fill-opacity="0.05" stroke-opacity="0.025" filter="url(#{shadow_id})"/>"#,
        fmt(card.shadow.y),
        fmt(card.shadow.width),
        fmt(card.shadow.height),
        fmt(card.shadow.corner_radius),
        fmt(card.shadow.corner_radius),
        escape_xml(&config.background_color),
        escape_xml(&config.border_color),
    );
    let _ = writeln!(
        out,
        r#"<rect class="box" y="{}" width="{}" height="{}" rx="{}" ry="{}" fill="{}" stroke="{}"/>"#,
        fmt(card.frame.y),
        fmt(card.frame.width),
        fmt(card.frame.height),
        fmt(card.frame.corner_radius),
        fmt(card.frame.corner_radius),
        escape_xml(&config.background_color),
        escape_xml(&config.border_color),
    );
    if let Some(href) = &card.avatar.href {
        let _ = writeln!(
            out,
            r#"<image x="{}" y="{}" width="{}" height="{}" href="{}" clip-path="url(#{clip_id})"/>"#,
            fmt(card.avatar.x),
            fmt(card.avatar.y),
            fmt(card.avatar.size),
            fmt(card.avatar.size),
            escape_xml(href),
        );
    }

    match &card.link {
        Some(link) => {
            let _ = write!(out, r#"<a href="{}">"#, escape_xml(link));
            write_text_block(out, &card.name, PERSON_NAME_CLASS);
            let _ = writeln!(out, "</a>");
        }
        None => write_text_block(out, &card.name, PERSON_NAME_CLASS),
    }
    write_text_block(out, &card.title, PERSON_TITLE_CLASS);
    if let Some(department) = &card.department {
        write_text_block(out, department, PERSON_DEPARTMENT_CLASS);
    }
    if let Some(badge) = &card.reports {
        let _ = writeln!(
            out,
            r#"<circle cx="{}" cy="{}" r="{}" fill="{}"/>"#,
            fmt(badge.cx),
            fmt(badge.cy),
            fmt(badge.radius),
            escape_xml(&badge.fill),
        );
        let _ = writeln!(
            out,
            r##"<text class="{PERSON_REPORTS_CLASS}" x="{}" y="{}" text-anchor="middle" font-size="13" font-weight="700" fill="#FFFFFF">{}</text>"##,
            fmt(badge.cx),
            fmt(badge.text_y),
            escape_xml(&badge.label),
        );
    }
    let _ = writeln!(out, "</g>");
}

/// Renders the visible chart state as a standalone SVG document.
pub fn render_chart_svg(
    tree: &OrgTree,
    layout: &ChartLayout,
    config: &ChartConfig,
    measurer: &dyn TextMeasurer,
    options: &SvgSnapshotOptions,
) -> String {
    let mut people: FxHashMap<&str, &Person> = FxHashMap::default();
    for (node, _) in tree.visible_nodes() {
        people.insert(node.id.as_str(), &node.person);
    }

    let bounds = layout.bounds.unwrap_or(Bounds {
        min_x: 0.0,
        min_y: 0.0,
        max_x: config.node_width,
        max_y: config.node_height,
    });
    let pad = options.viewbox_padding.max(0.0);
    // Leave room for the report badges hanging below the deepest cards.
    let badge_overhang = config.node_padding_y + 22.0;

    let mut out = String::new();
    let _ = writeln!(
        &mut out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="{} {} {} {}">"#,
        fmt(bounds.min_x - pad),
        fmt(bounds.min_y - pad),
        fmt(bounds.width() + pad * 2.0),
        fmt(bounds.height() + badge_overhang + pad * 2.0),
    );
    write_defs(&mut out, config, options);

    out.push_str(r#"<g class="links">"#);
    out.push('\n');
    for link in &layout.links {
        if link.points.len() < 2 {
            continue;
        }
        let mut d = String::new();
        for (i, p) in link.points.iter().enumerate() {
            let cmd = if i == 0 { 'M' } else { 'L' };
            let _ = write!(&mut d, "{cmd}{},{}", fmt(p.x), fmt(p.y));
        }
        let _ = writeln!(
            &mut out,
            r#"<path class="{LINK_CLASS}" data-target-id="{}" d="{d}" fill="none" stroke="{}" stroke-width="1.25"/>"#,
            escape_xml(link.id.as_str()),
            escape_xml(&config.line_color),
        );
    }
    out.push_str("</g>\n");

    out.push_str(r#"<g class="nodes">"#);
    out.push('\n');
    for node in &layout.nodes {
        let Some(person) = people.get(node.id.as_str()) else {
            continue;
        };
        let card = compute_card(person, config, measurer);
        write_card(
            &mut out,
            &node.id,
            LayoutPoint::new(node.x, node.y),
            &card,
            config,
            options,
        );
    }
    out.push_str("</g>\n");

    out.push_str("</svg>\n");
    out
}
