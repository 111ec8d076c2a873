use crate::error::{Error, Result};
use crate::person::{Person, PersonNode};
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable node identity. The reconciler matches nodes across render cycles by
/// this key, so it must not change while a node is alive.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(String);

impl NodeId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for NodeId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// Outcome of a click on a node card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Toggle {
    /// The node's children were moved out of the visible set.
    Collapsed,
    /// The node's hidden children were restored to the visible set.
    Expanded,
    /// The node has no children in either slot; nothing changed.
    Leaf,
}

/// A tree node wrapping one [`Person`].
///
/// A node's child list lives in exactly one of `children` (visible) or
/// `hidden_children` (collapsed) at any time; collapse and expand move the
/// whole list between the two slots in place. Nodes are never copied or
/// reconstructed after the tree is built.
///
/// `x`/`y`/`depth` are assigned by the layout pass. `x0`/`y0` hold the
/// position at the end of the previous render cycle and are the animation
/// origins for the next one.
#[derive(Debug, Clone)]
pub struct OrgNode {
    pub id: NodeId,
    pub person: Person,
    pub children: Vec<OrgNode>,
    pub hidden_children: Vec<OrgNode>,
    pub depth: usize,
    pub x: f64,
    pub y: f64,
    pub x0: f64,
    pub y0: f64,
}

impl OrgNode {
    fn from_data(data: PersonNode) -> Self {
        Self {
            id: NodeId::new(data.id),
            person: data.person,
            children: data.children.into_iter().map(Self::from_data).collect(),
            hidden_children: Vec::new(),
            depth: 0,
            x: 0.0,
            y: 0.0,
            x0: 0.0,
            y0: 0.0,
        }
    }

    /// True when the node's children are parked in the hidden slot.
    pub fn is_collapsed(&self) -> bool {
        !self.hidden_children.is_empty()
    }

    /// True when the node has no children in either slot.
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty() && self.hidden_children.is_empty()
    }

    fn find(&self, id: &NodeId) -> Option<&OrgNode> {
        if self.id == *id {
            return Some(self);
        }
        self.children
            .iter()
            .chain(self.hidden_children.iter())
            .find_map(|c| c.find(id))
    }

    fn find_mut(&mut self, id: &NodeId) -> Option<&mut OrgNode> {
        if self.id == *id {
            return Some(self);
        }
        self.children
            .iter_mut()
            .chain(self.hidden_children.iter_mut())
            .find_map(|c| c.find_mut(id))
    }

    fn collapse_subtree(&mut self) {
        for child in &mut self.children {
            child.collapse_subtree();
        }
        if !self.children.is_empty() {
            self.hidden_children = std::mem::take(&mut self.children);
        }
    }

    fn expand_subtree(&mut self) {
        if !self.hidden_children.is_empty() {
            self.children = std::mem::take(&mut self.hidden_children);
        }
        for child in &mut self.children {
            child.expand_subtree();
        }
    }

    fn collect_ids<'a>(&'a self, seen: &mut FxHashSet<&'a str>) -> Result<()> {
        if !seen.insert(self.id.as_str()) {
            return Err(Error::DuplicateNodeId {
                id: self.id.as_str().to_string(),
            });
        }
        for child in self.children.iter().chain(self.hidden_children.iter()) {
            child.collect_ids(seen)?;
        }
        Ok(())
    }

    fn for_each_visible<'a>(&'a self, depth: usize, f: &mut impl FnMut(&'a OrgNode, usize)) {
        f(self, depth);
        for child in &self.children {
            child.for_each_visible(depth + 1, f);
        }
    }

    fn for_each_visible_mut(&mut self, depth: usize, f: &mut impl FnMut(&mut OrgNode, usize)) {
        f(self, depth);
        for child in &mut self.children {
            child.for_each_visible_mut(depth + 1, f);
        }
    }
}

/// The chart's tree of people with per-node collapse state.
///
/// A node is visible iff it is reachable from the root via `children` links
/// only. Collapsed subtrees keep their data; nothing is destroyed until the
/// tree itself is dropped.
#[derive(Debug, Clone)]
pub struct OrgTree {
    root: OrgNode,
}

impl OrgTree {
    /// Builds the tree from caller-supplied data, rejecting duplicate ids.
    pub fn from_node(data: PersonNode) -> Result<Self> {
        let root = OrgNode::from_data(data);
        let mut seen = FxHashSet::default();
        root.collect_ids(&mut seen)?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &OrgNode {
        &self.root
    }

    pub fn root_mut(&mut self) -> &mut OrgNode {
        &mut self.root
    }

    pub fn find(&self, id: &NodeId) -> Option<&OrgNode> {
        self.root.find(id)
    }

    /// Initial collapse state: every node below the root starts collapsed,
    /// the root itself stays expanded. The root's direct reports are visible
    /// as cards, their own subtrees hidden.
    pub fn collapse_all_below_root(&mut self) {
        for child in &mut self.root.children {
            child.collapse_subtree();
        }
    }

    /// Restores every hidden child list, making the whole tree visible.
    pub fn expand_all(&mut self) {
        self.root.expand_subtree();
    }

    /// Collapses every node whose depth is `depth` or greater, leaving
    /// shallower levels visible. `collapse_below(1)` is the initial state.
    pub fn collapse_below(&mut self, depth: usize) {
        fn walk(node: &mut OrgNode, level: usize, cutoff: usize) {
            for child in &mut node.children {
                walk(child, level + 1, cutoff);
            }
            if level >= cutoff {
                node.collapse_subtree();
            }
        }
        if depth == 0 {
            // The root is always expanded; depth 0 behaves like depth 1.
            self.collapse_all_below_root();
            return;
        }
        for child in &mut self.root.children {
            walk(child, 1, depth);
        }
    }

    /// The collapse/expand state machine, driven by a card click.
    ///
    /// `Expanded -> Collapsed` moves `children` into `hidden_children`;
    /// `Collapsed -> Expanded` moves them back. Clicking a node with no
    /// children in either slot reports [`Toggle::Leaf`] and changes nothing.
    pub fn toggle(&mut self, id: &NodeId) -> Result<Toggle> {
        let node = self.root.find_mut(id).ok_or_else(|| Error::UnknownNode {
            id: id.as_str().to_string(),
        })?;
        if !node.children.is_empty() {
            node.hidden_children = std::mem::take(&mut node.children);
            Ok(Toggle::Collapsed)
        } else if !node.hidden_children.is_empty() {
            node.children = std::mem::take(&mut node.hidden_children);
            Ok(Toggle::Expanded)
        } else {
            Ok(Toggle::Leaf)
        }
    }

    /// Collapses one node. Already-collapsed nodes and leaves are no-ops.
    pub fn collapse(&mut self, id: &NodeId) -> Result<()> {
        let node = self.root.find_mut(id).ok_or_else(|| Error::UnknownNode {
            id: id.as_str().to_string(),
        })?;
        if !node.children.is_empty() {
            node.hidden_children = std::mem::take(&mut node.children);
        }
        Ok(())
    }

    /// Expands one node. Already-expanded nodes and leaves are no-ops.
    pub fn expand(&mut self, id: &NodeId) -> Result<()> {
        let node = self.root.find_mut(id).ok_or_else(|| Error::UnknownNode {
            id: id.as_str().to_string(),
        })?;
        if !node.hidden_children.is_empty() {
            node.children = std::mem::take(&mut node.hidden_children);
        }
        Ok(())
    }

    pub fn is_collapsed(&self, id: &NodeId) -> Option<bool> {
        self.find(id).map(OrgNode::is_collapsed)
    }

    /// Visible nodes in depth-first document order, paired with their depth.
    pub fn visible_nodes(&self) -> Vec<(&OrgNode, usize)> {
        let mut out = Vec::new();
        self.root.for_each_visible(0, &mut |node, depth| {
            out.push((node, depth));
        });
        out
    }

    pub fn visible_count(&self) -> usize {
        let mut count = 0;
        self.root.for_each_visible(0, &mut |_, _| count += 1);
        count
    }

    /// Preorder walk over the visible set with mutable access. The layout
    /// pass uses this to write positions back into the tree.
    pub fn for_each_visible_mut(&mut self, f: &mut impl FnMut(&mut OrgNode, usize)) {
        self.root.for_each_visible_mut(0, f);
    }

    /// Checkpoints `x0 = x`, `y0 = y` on every visible node. Called once all
    /// transitions for a render pass have been issued; the stashed values are
    /// the animation origins of the next cycle.
    pub fn stash_positions(&mut self) {
        self.root.for_each_visible_mut(0, &mut |node, _| {
            node.x0 = node.x;
            node.y0 = node.y;
        });
    }
}
