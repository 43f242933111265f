//! Occupancy statistics over the current tree shape.

use std::collections::HashMap;

use crate::node::NodeRef;

/// Aggregate statistics for one node width class.
#[derive(Debug, Default)]
pub struct NodeStats {
    pub width: usize,
    pub total_nodes: usize,
    pub total_children: usize,
    /// Children held relative to the slots allocated for this width.
    pub density: f64,
}

/// A snapshot of the tree's structure, keyed by node width (4/16/48/256).
#[derive(Debug, Default)]
pub struct TreeStats {
    pub node_stats: HashMap<usize, NodeStats>,
    pub num_leaves: usize,
    pub num_inner_nodes: usize,
    pub total_density: f64,
    pub max_height: usize,
}

impl TreeStats {
    pub(crate) fn collect<V>(root: Option<&NodeRef<V>>) -> TreeStats {
        let mut stats = TreeStats::default();
        if let Some(root) = root {
            collect_recurse(root, &mut stats, 1);
        }

        let mut total_children = 0;
        let mut total_width = 0;
        for ns in stats.node_stats.values_mut() {
            total_children += ns.total_children;
            total_width += ns.width * ns.total_nodes;
            ns.density = ns.total_children as f64 / (ns.width * ns.total_nodes) as f64;
        }
        if total_width > 0 {
            stats.total_density = total_children as f64 / total_width as f64;
        }
        stats
    }
}

fn collect_recurse<V>(node: &NodeRef<V>, stats: &mut TreeStats, height: usize) {
    if height > stats.max_height {
        stats.max_height = height;
    }
    if node.is_leaf() {
        stats.num_leaves += 1;
        return;
    }

    stats.num_inner_nodes += 1;
    stats
        .node_stats
        .entry(node.capacity())
        .and_modify(|e| {
            e.total_nodes += 1;
            e.total_children += node.num_children();
        })
        .or_insert(NodeStats {
            width: node.capacity(),
            total_nodes: 1,
            total_children: node.num_children(),
            density: 0.0,
        });

    for child in node.children() {
        collect_recurse(child, stats, height + 1);
    }
}
