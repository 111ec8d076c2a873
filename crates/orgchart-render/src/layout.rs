//! Tidy-tree layout over the visible node set.
//!
//! The x pass is the Buchheim/Walker linear-time tidy-tree algorithm: a
//! post-order first walk assigns preliminary positions and subtree
//! modifiers, resolving sibling-subtree conflicts through threaded contour
//! scans, and a pre-order second walk sums the modifiers. Positions are
//! computed in sibling units and scaled by `node_width + node_spacing`, so
//! adjacent siblings sit exactly one card-plus-gap apart and subtrees never
//! overlap. The y pass normalizes every node to `depth * line_depth_y`.

use orgchart_core::{ChartConfig, NodeId, OrgTree};

use crate::links::{card_bottom_offset, link_points};
use crate::model::{Bounds, ChartLayout, LayoutExtent, LayoutLink, LayoutNode, LayoutPoint};

struct WalkNode {
    id: NodeId,
    parent: Option<usize>,
    children: Vec<usize>,
    /// Index among siblings, root 0.
    number: usize,
    depth: usize,
    prelim: f64,
    modifier: f64,
    change: f64,
    shift: f64,
    thread: Option<usize>,
    ancestor: usize,
    default_ancestor: Option<usize>,
    x: f64,
}

fn flatten_visible(tree: &OrgTree) -> Vec<WalkNode> {
    let mut nodes: Vec<WalkNode> = Vec::with_capacity(tree.visible_count());

    fn walk(
        node: &orgchart_core::OrgNode,
        parent: Option<usize>,
        number: usize,
        depth: usize,
        nodes: &mut Vec<WalkNode>,
    ) -> usize {
        let idx = nodes.len();
        nodes.push(WalkNode {
            id: node.id.clone(),
            parent,
            children: Vec::with_capacity(node.children.len()),
            number,
            depth,
            prelim: 0.0,
            modifier: 0.0,
            change: 0.0,
            shift: 0.0,
            thread: None,
            ancestor: idx,
            default_ancestor: None,
            x: 0.0,
        });
        for (i, child) in node.children.iter().enumerate() {
            let child_idx = walk(child, Some(idx), i, depth + 1, nodes);
            nodes[idx].children.push(child_idx);
        }
        idx
    }

    walk(tree.root(), None, 0, 0, &mut nodes);
    nodes
}

/// Sibling subtrees one unit apart, unrelated neighbours two.
fn separation(nodes: &[WalkNode], a: usize, b: usize) -> f64 {
    if nodes[a].parent == nodes[b].parent {
        1.0
    } else {
        2.0
    }
}

fn next_left(nodes: &[WalkNode], v: usize) -> Option<usize> {
    nodes[v].children.first().copied().or(nodes[v].thread)
}

fn next_right(nodes: &[WalkNode], v: usize) -> Option<usize> {
    nodes[v].children.last().copied().or(nodes[v].thread)
}

fn next_ancestor(nodes: &[WalkNode], vim: usize, v: usize, default_ancestor: usize) -> usize {
    let a = nodes[vim].ancestor;
    if nodes[a].parent == nodes[v].parent {
        a
    } else {
        default_ancestor
    }
}

fn move_subtree(nodes: &mut [WalkNode], wm: usize, wp: usize, shift: f64) {
    let subtrees = (nodes[wp].number - nodes[wm].number) as f64;
    let change = shift / subtrees;
    nodes[wp].change -= change;
    nodes[wp].shift += shift;
    nodes[wm].change += change;
    nodes[wp].prelim += shift;
    nodes[wp].modifier += shift;
}

fn execute_shifts(nodes: &mut [WalkNode], v: usize) {
    let mut shift = 0.0;
    let mut change = 0.0;
    let children = nodes[v].children.clone();
    for &w in children.iter().rev() {
        nodes[w].prelim += shift;
        nodes[w].modifier += shift;
        change += nodes[w].change;
        shift += nodes[w].shift + change;
    }
}

fn apportion(
    nodes: &mut [WalkNode],
    v: usize,
    left_sibling: Option<usize>,
    mut default_ancestor: usize,
) -> usize {
    let Some(w) = left_sibling else {
        return default_ancestor;
    };
    let Some(parent) = nodes[v].parent else {
        return default_ancestor;
    };

    let mut vip = v;
    let mut vop = v;
    let mut vim = w;
    let mut vom = nodes[parent].children[0];
    let mut sip = nodes[vip].modifier;
    let mut sop = nodes[vop].modifier;
    let mut sim = nodes[vim].modifier;
    let mut som = nodes[vom].modifier;

    let mut vim_next = next_right(nodes, vim);
    let mut vip_next = next_left(nodes, vip);
    while let (Some(im), Some(ip)) = (vim_next, vip_next) {
        vim = im;
        vip = ip;
        if let Some(n) = next_left(nodes, vom) {
            vom = n;
        }
        if let Some(n) = next_right(nodes, vop) {
            vop = n;
        }
        nodes[vop].ancestor = v;
        let shift =
            nodes[vim].prelim + sim - (nodes[vip].prelim + sip) + separation(nodes, vim, vip);
        if shift > 0.0 {
            let a = next_ancestor(nodes, vim, v, default_ancestor);
            move_subtree(nodes, a, v, shift);
            sip += shift;
            sop += shift;
        }
        sim += nodes[vim].modifier;
        sip += nodes[vip].modifier;
        som += nodes[vom].modifier;
        sop += nodes[vop].modifier;
        vim_next = next_right(nodes, vim);
        vip_next = next_left(nodes, vip);
    }

    if let Some(im) = vim_next {
        if next_right(nodes, vop).is_none() {
            nodes[vop].thread = Some(im);
            nodes[vop].modifier += sim - sop;
        }
    }
    if let Some(ip) = vip_next {
        if next_left(nodes, vom).is_none() {
            nodes[vom].thread = Some(ip);
            nodes[vom].modifier += sip - som;
            default_ancestor = v;
        }
    }
    default_ancestor
}

fn first_walk(nodes: &mut [WalkNode], v: usize) {
    let left_sibling = match (nodes[v].parent, nodes[v].number) {
        (Some(p), n) if n > 0 => Some(nodes[p].children[n - 1]),
        _ => None,
    };

    if !nodes[v].children.is_empty() {
        execute_shifts(nodes, v);
        let first = nodes[v].children[0];
        let last = *nodes[v]
            .children
            .last()
            .unwrap_or(&first);
        let midpoint = (nodes[first].prelim + nodes[last].prelim) / 2.0;
        match left_sibling {
            Some(w) => {
                nodes[v].prelim = nodes[w].prelim + separation(nodes, v, w);
                nodes[v].modifier = nodes[v].prelim - midpoint;
            }
            None => nodes[v].prelim = midpoint,
        }
    } else if let Some(w) = left_sibling {
        nodes[v].prelim = nodes[w].prelim + separation(nodes, v, w);
    }

    if let Some(parent) = nodes[v].parent {
        let default_ancestor = nodes[parent]
            .default_ancestor
            .unwrap_or(nodes[parent].children[0]);
        let next = apportion(nodes, v, left_sibling, default_ancestor);
        nodes[parent].default_ancestor = Some(next);
    }
}

fn second_walk(nodes: &mut [WalkNode], root: usize) {
    // (index, accumulated parent modifier); the virtual parent of the root
    // carries -prelim(root) so the root lands on x = 0.
    let mut stack = vec![(root, -nodes[root].prelim)];
    while let Some((v, acc)) = stack.pop() {
        nodes[v].x = nodes[v].prelim + acc;
        let child_acc = acc + nodes[v].modifier;
        for &c in nodes[v].children.iter().rev() {
            stack.push((c, child_acc));
        }
    }
}

fn post_order(nodes: &[WalkNode], root: usize) -> Vec<usize> {
    let mut stack = vec![root];
    let mut order = Vec::with_capacity(nodes.len());
    while let Some(v) = stack.pop() {
        order.push(v);
        stack.extend(nodes[v].children.iter().copied());
    }
    order.reverse();
    order
}

/// Lays out the currently visible tree: writes `x`, `y` and `depth` back
/// into the tree nodes and returns the flat layout consumed by the
/// reconciler, the viewport and the SVG snapshot writer.
///
/// Deterministic: the same tree shape and sibling order always produce the
/// same positions.
pub fn layout_chart(tree: &mut OrgTree, config: &ChartConfig) -> ChartLayout {
    let mut arena = flatten_visible(tree);
    let root = 0usize;

    for v in post_order(&arena, root) {
        first_walk(&mut arena, v);
    }
    second_walk(&mut arena, root);

    let node_size_x = config.node_size_x();
    let line_depth_y = config.line_depth_y();
    for node in &mut arena {
        node.x *= node_size_x;
    }

    // Write positions back in the same preorder the arena was built in.
    let mut cursor = 0usize;
    tree.for_each_visible_mut(&mut |node, depth| {
        node.x = arena[cursor].x;
        node.y = depth as f64 * line_depth_y;
        node.depth = depth;
        cursor += 1;
    });

    let nodes: Vec<LayoutNode> = arena
        .iter()
        .map(|w| LayoutNode {
            id: w.id.clone(),
            x: w.x,
            y: w.depth as f64 * line_depth_y,
            depth: w.depth,
        })
        .collect();

    let mut links: Vec<LayoutLink> = Vec::with_capacity(nodes.len().saturating_sub(1));
    for (idx, w) in arena.iter().enumerate() {
        let Some(parent) = w.parent else { continue };
        let source = LayoutPoint::new(arena[parent].x, nodes[parent].y);
        let target = LayoutPoint::new(w.x, nodes[idx].y);
        links.push(LayoutLink {
            id: w.id.clone(),
            source: arena[parent].id.clone(),
            target: w.id.clone(),
            points: link_points(source, target, config),
        });
    }

    let card_height = card_bottom_offset(config);
    let bounds = Bounds::from_points(nodes.iter().flat_map(|n| {
        [
            (n.x, n.y),
            (n.x + config.node_width, n.y + card_height),
        ]
    }));

    let mut extent = LayoutExtent::default();
    for n in &nodes {
        extent.node_left_x = extent.node_left_x.max(-n.x);
        extent.node_right_x = extent.node_right_x.max(n.x);
        extent.node_y = extent.node_y.max(n.y);
    }

    ChartLayout {
        nodes,
        links,
        bounds,
        extent,
    }
}
