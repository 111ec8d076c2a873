#![forbid(unsafe_code)]

//! Interactive organization chart engine.
//!
//! The chart renders a tree of people as cards connected by manager/report
//! lines, laid out by a tidy-tree algorithm. Subtrees collapse and expand on
//! click with animated transitions, and the viewport pans and zooms with
//! both button steps and host gestures. Drawing itself is delegated to the
//! embedding host through the [`orgchart_render::scene::Scene`] seam, which
//! keeps the engine headless and testable.
//!
//! [`chart::Chart`] is the entry point; `orgchart-core` and
//! `orgchart-render` are re-exported for direct use of the data model and
//! the layout pipeline.

pub mod chart;

pub use chart::{Chart, HeadlessHost, Host, Mount};
pub use orgchart_core::{
    ChartConfig, ChartOptions, Error, LineType, Margin, NodeId, OrgNode, OrgTree, Person,
    PersonNode, Result, ScaleExtent, StyleMap, StyleValue, Toggle,
};
pub use orgchart_render::RenderOptions;
pub use orgchart_render::layout::layout_chart;
pub use orgchart_render::model::{ChartLayout, LayoutExtent, LayoutLink, LayoutNode, LayoutPoint};
pub use orgchart_render::scene::{RecordingScene, Scene, SceneOp};
pub use orgchart_render::svg::{SvgSnapshotOptions, render_chart_svg};
pub use orgchart_render::text::{DeterministicTextMeasurer, TextMeasurer};
pub use orgchart_render::viewport::{SurfaceSize, ViewportTransform, ZoomDirection};
