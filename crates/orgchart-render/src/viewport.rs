//! Pan/zoom viewport state and the transform math behind the zoom controls.

use orgchart_core::{ChartConfig, ScaleExtent};
use serde::{Deserialize, Serialize};

use crate::model::LayoutExtent;

/// The affine transform applied to the whole rendered scene.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewportTransform {
    pub translate_x: f64,
    pub translate_y: f64,
    pub scale: f64,
}

impl ViewportTransform {
    pub fn new(translate_x: f64, translate_y: f64, scale: f64) -> Self {
        Self {
            translate_x,
            translate_y,
            scale,
        }
    }
}

impl Default for ViewportTransform {
    fn default() -> Self {
        Self::new(0.0, 0.0, 1.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SurfaceSize {
    pub width: f64,
    pub height: f64,
}

impl SurfaceSize {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn center(&self) -> (f64, f64) {
        (self.width / 2.0, self.height / 2.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZoomDirection {
    In,
    Out,
}

/// The centering applied on first mount: the root sits horizontally centered
/// given how wide its expanded child row will be, nudged by half the left
/// margin, 20px down from the top.
pub fn initial_transform(
    children_len: usize,
    surface_width: f64,
    node_width: f64,
    margin_left: f64,
) -> ViewportTransform {
    let children_width = (children_len as f64 * node_width / 2.0).trunc();
    let translate_x =
        (children_width + (surface_width - children_width * 2.0) / 2.0 - margin_left / 2.0).trunc();
    ViewportTransform::new(translate_x, 20.0, 1.0)
}

/// Owns the transform and the zoom scale limits for one chart instance.
/// Every transform change, from buttons or gestures, funnels through here.
#[derive(Debug, Clone)]
pub struct Viewport {
    pub transform: ViewportTransform,
    pub extent: ScaleExtent,
    pub size: SurfaceSize,
}

impl Viewport {
    pub fn new(size: SurfaceSize, extent: ScaleExtent) -> Self {
        Self {
            transform: ViewportTransform::default(),
            extent,
            size,
        }
    }

    /// Applies a transform coming from the host's gesture recognizer. The
    /// host clamps the scale to [`ScaleExtent`] before reporting, so no
    /// re-clamping happens here.
    pub fn set_transform(&mut self, transform: ViewportTransform) {
        self.transform = transform;
    }

    /// Surface resize: only the pixel box changes, the transform stays.
    pub fn resize(&mut self, size: SurfaceSize) {
        self.size = size;
    }

    /// One zoom-button step: scale by `1 ± 0.2` while keeping the viewport
    /// center fixed. Returns `None` when the target scale leaves the allowed
    /// range, in which case the press has no effect.
    pub fn step_zoom(&self, direction: ZoomDirection) -> Option<ViewportTransform> {
        self.step_zoom_about(direction, self.size.center())
    }

    pub fn step_zoom_about(
        &self,
        direction: ZoomDirection,
        center: (f64, f64),
    ) -> Option<ViewportTransform> {
        let factor = 0.2;
        let sign = match direction {
            ZoomDirection::In => 1.0,
            ZoomDirection::Out => -1.0,
        };
        let current = self.transform;
        let target_scale = current.scale * (1.0 + factor * sign);
        if !self.extent.contains(target_scale) {
            return None;
        }

        // Unproject the center through the old transform, reproject through
        // the new scale, and shift the translate by the difference.
        let (cx, cy) = center;
        let ux = (cx - current.translate_x) / current.scale;
        let uy = (cy - current.translate_y) / current.scale;
        let px = ux * target_scale + current.translate_x;
        let py = uy * target_scale + current.translate_y;

        Some(ViewportTransform::new(
            current.translate_x + cx - px,
            current.translate_y + cy - py,
            target_scale,
        ))
    }

    /// Computes the transform that fits the whole tree into the viewport.
    ///
    /// The content box is taken from the layout extent plus two card heights
    /// and a 48px allowance below the deepest row; both candidate scales are
    /// trimmed slightly so cards clear the viewport edges. If the content
    /// already fits, scale stays 1 and the tree is centered horizontally.
    pub fn fit_transform(&self, extent: &LayoutExtent, config: &ChartConfig) -> ViewportTransform {
        let content_width = extent.node_left_x + extent.node_right_x;
        let content_height = extent.node_y + config.node_height * 2.0 + 48.0;

        let scale_x = self.size.width / content_width - 0.03;
        let scale_y = self.size.height / content_height - 0.06;
        let overflows = content_width > self.size.width || content_height > self.size.height;

        let scale = if overflows { scale_x.min(scale_y) } else { 1.0 };
        let translate_x = if overflows && scale_x < scale_y {
            // Width-bound: push the leftmost card just inside the margin.
            extent.node_left_x * scale + config.margin.left / 2.0
        } else {
            self.size.width / 2.0 - config.margin.left / 2.0
        };

        ViewportTransform::new(translate_x, 48.0, scale)
    }
}
