//! The drawing-surface seam.
//!
//! The engine expresses one render cycle as a sequence of [`SceneOp`]
//! instructions; hosts translate them onto whatever retained scene graph
//! they own (an SVG DOM, a canvas display list, a test recorder). The
//! engine never holds element handles itself.

use orgchart_core::NodeId;

use crate::card::CardLayout;
use crate::model::LayoutPoint;
use crate::viewport::ViewportTransform;

#[derive(Debug, Clone, PartialEq)]
pub enum SceneOp {
    /// Drop everything previously drawn at the mount point.
    ClearSurface,
    SetSurfaceSize {
        width: f64,
        height: f64,
    },
    /// Re-transform the root group. `animate_ms` carries the tween duration
    /// for button-driven changes; gesture updates snap with `None`.
    SetRootTransform {
        transform: ViewportTransform,
        animate_ms: Option<f64>,
    },
    CreateNode {
        id: NodeId,
        at: LayoutPoint,
        card: Box<CardLayout>,
    },
    TransitionNode {
        id: NodeId,
        from: LayoutPoint,
        to: LayoutPoint,
        duration_ms: f64,
    },
    /// Animate to `to`, then remove the element from the scene graph.
    RemoveNodeAfter {
        id: NodeId,
        to: LayoutPoint,
        duration_ms: f64,
    },
    CreateLink {
        id: NodeId,
        points: Vec<LayoutPoint>,
    },
    TransitionLink {
        id: NodeId,
        from: Vec<LayoutPoint>,
        to: Vec<LayoutPoint>,
        duration_ms: f64,
    },
    RemoveLinkAfter {
        id: NodeId,
        to: Vec<LayoutPoint>,
        duration_ms: f64,
    },
}

pub trait Scene {
    fn apply(&mut self, op: SceneOp);
}

impl<T: Scene + ?Sized> Scene for &mut T {
    fn apply(&mut self, op: SceneOp) {
        (**self).apply(op);
    }
}

/// Test/CLI scene that just records what it was told to do.
#[derive(Debug, Default)]
pub struct RecordingScene {
    pub ops: Vec<SceneOp>,
}

impl RecordingScene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn created_node_ids(&self) -> Vec<&NodeId> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                SceneOp::CreateNode { id, .. } => Some(id),
                _ => None,
            })
            .collect()
    }

    pub fn removed_node_ids(&self) -> Vec<&NodeId> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                SceneOp::RemoveNodeAfter { id, .. } => Some(id),
                _ => None,
            })
            .collect()
    }

    pub fn last_root_transform(&self) -> Option<&ViewportTransform> {
        self.ops.iter().rev().find_map(|op| match op {
            SceneOp::SetRootTransform { transform, .. } => Some(transform),
            _ => None,
        })
    }

    pub fn clear(&mut self) {
        self.ops.clear();
    }
}

impl Scene for RecordingScene {
    fn apply(&mut self, op: SceneOp) {
        self.ops.push(op);
    }
}
