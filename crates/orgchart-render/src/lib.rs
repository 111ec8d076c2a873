#![forbid(unsafe_code)]

//! The layout-and-incremental-render engine behind the org chart.
//!
//! Given the visible tree held by `orgchart-core`, this crate computes a
//! tidy-tree layout, diffs it against the previously rendered node set into
//! an enter/update/exit [`reconcile::RenderPlan`], and owns the pan/zoom
//! viewport math. Actual drawing is delegated to the host behind the
//! [`scene::Scene`] instruction seam; a static SVG snapshot writer is
//! provided for headless output.

pub mod animate;
pub mod card;
pub mod layout;
pub mod links;
pub mod model;
pub mod reconcile;
pub mod scene;
pub mod svg;
pub mod text;
pub mod viewport;

use std::sync::Arc;

use crate::text::{DeterministicTextMeasurer, TextMeasurer};

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid chart model: {message}")]
    InvalidModel { message: String },
    #[error(transparent)]
    Core(#[from] orgchart_core::Error),
    #[error("chart JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

/// Shared knobs for the render pipeline that are not part of the chart
/// configuration proper.
#[derive(Clone)]
pub struct RenderOptions {
    pub text_measurer: Arc<dyn TextMeasurer + Send + Sync>,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            text_measurer: Arc::new(DeterministicTextMeasurer::default()),
        }
    }
}
