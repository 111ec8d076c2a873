//! Enter/update/exit planning between two render cycles.
//!
//! The previous rendered set and the freshly laid-out set are both ordered,
//! id-keyed maps; the plan is computed by direct set difference over the two
//! key sets, independent of any retained scene graph. Links partition the
//! same way, keyed by their target node id.

use indexmap::IndexMap;
use orgchart_core::NodeId;

use crate::model::{ChartLayout, LayoutPoint};

/// Snapshot of what is currently on screen: node anchors and link paths at
/// the end of the last completed render cycle, in document order.
#[derive(Debug, Clone, Default)]
pub struct RenderedSet {
    nodes: IndexMap<NodeId, LayoutPoint>,
    links: IndexMap<NodeId, Vec<LayoutPoint>>,
}

impl RenderedSet {
    pub fn from_layout(layout: &ChartLayout) -> Self {
        let mut nodes = IndexMap::with_capacity(layout.nodes.len());
        for n in &layout.nodes {
            nodes.insert(n.id.clone(), LayoutPoint::new(n.x, n.y));
        }
        let mut links = IndexMap::with_capacity(layout.links.len());
        for l in &layout.links {
            links.insert(l.id.clone(), l.points.clone());
        }
        Self { nodes, links }
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn contains(&self, id: &NodeId) -> bool {
        self.nodes.contains_key(id)
    }

    pub fn position(&self, id: &NodeId) -> Option<LayoutPoint> {
        self.nodes.get(id).copied()
    }
}

/// The node whose toggle triggered this render. Entering nodes spawn at its
/// previous position; exiting nodes retreat to its new one.
#[derive(Debug, Clone)]
pub struct Anchor {
    pub id: NodeId,
    pub previous: LayoutPoint,
    pub current: LayoutPoint,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NodeTransition {
    pub id: NodeId,
    pub from: LayoutPoint,
    pub to: LayoutPoint,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LinkTransition {
    pub id: NodeId,
    pub source: Option<NodeId>,
    pub from: Vec<LayoutPoint>,
    pub to: Vec<LayoutPoint>,
}

/// One render cycle's worth of scene instructions, as data. The three node
/// vectors partition `old ∪ new` exactly: `enter` is new∖old, `exit` is
/// old∖new, `update` is the intersection.
#[derive(Debug, Clone)]
pub struct RenderPlan {
    pub anchor: NodeId,
    pub enter: Vec<NodeTransition>,
    pub update: Vec<NodeTransition>,
    pub exit: Vec<NodeTransition>,
    pub link_enter: Vec<LinkTransition>,
    pub link_update: Vec<LinkTransition>,
    pub link_exit: Vec<LinkTransition>,
}

impl RenderPlan {
    /// True when the plan moves nothing: every node updates in place.
    pub fn is_settled(&self) -> bool {
        self.enter.is_empty()
            && self.exit.is_empty()
            && self.update.iter().all(|t| t.from == t.to)
    }
}

/// Classifies every node and link of the new layout against the previously
/// rendered set.
pub fn diff(previous: &RenderedSet, layout: &ChartLayout, anchor: &Anchor) -> RenderPlan {
    let mut enter = Vec::new();
    let mut update = Vec::new();
    for n in &layout.nodes {
        let to = LayoutPoint::new(n.x, n.y);
        match previous.position(&n.id) {
            Some(from) => update.push(NodeTransition {
                id: n.id.clone(),
                from,
                to,
            }),
            None => enter.push(NodeTransition {
                id: n.id.clone(),
                from: anchor.previous,
                to,
            }),
        }
    }

    let mut exit = Vec::new();
    for (id, from) in &previous.nodes {
        if layout.node(id).is_none() {
            exit.push(NodeTransition {
                id: id.clone(),
                from: *from,
                to: anchor.current,
            });
        }
    }

    let mut link_enter = Vec::new();
    let mut link_update = Vec::new();
    let mut new_link_ids: IndexMap<&NodeId, ()> = IndexMap::with_capacity(layout.links.len());
    for l in &layout.links {
        new_link_ids.insert(&l.id, ());
        match previous.links.get(&l.id) {
            Some(from) => link_update.push(LinkTransition {
                id: l.id.clone(),
                source: Some(l.source.clone()),
                from: from.clone(),
                to: l.points.clone(),
            }),
            None => link_enter.push(LinkTransition {
                id: l.id.clone(),
                source: Some(l.source.clone()),
                // Spawn collapsed on the anchor's previous position.
                from: vec![anchor.previous; l.points.len().max(2)],
                to: l.points.clone(),
            }),
        }
    }

    let mut link_exit = Vec::new();
    for (id, from) in &previous.links {
        if !new_link_ids.contains_key(id) {
            link_exit.push(LinkTransition {
                id: id.clone(),
                source: None,
                from: from.clone(),
                to: vec![anchor.current; from.len().max(2)],
            });
        }
    }

    RenderPlan {
        anchor: anchor.id.clone(),
        enter,
        update,
        exit,
        link_enter,
        link_update,
        link_exit,
    }
}
