//! Node representation: leaves plus the four size-adaptive inner variants.
//!
//! A child slot holds an `Option<NodeRef>`; the `NodeRef` sum type carries
//! the leaf/inner discrimination and each variant owns its allocation, so a
//! node's footprint tracks its occupancy class. Inner variants embed the
//! compressed-prefix header alongside their child mapping.

use std::cmp::min;

use crate::mapping::{
    DirectChildren, IndexedChildren, NodeMapping, SortedKeyedChildren,
    indexed::INDEXED_WIDTH,
};
use crate::prefix::{MAX_PREFIX_LEN, Prefix};

/// A leaf: the stored value plus an owned copy of the full key.
pub(crate) struct Leaf<V> {
    pub(crate) value: V,
    key: Box<[u8]>,
}

impl<V> Leaf<V> {
    pub(crate) fn new(key: &[u8], value: V) -> Self {
        Self {
            value,
            key: key.into(),
        }
    }

    #[inline]
    pub(crate) fn key(&self) -> &[u8] {
        &self.key
    }

    /// Whole-key equality: length and bytes.
    #[inline]
    pub(crate) fn key_matches(&self, key: &[u8]) -> bool {
        *self.key == *key
    }
}

pub(crate) struct Node4<V> {
    pub(crate) prefix: Prefix,
    pub(crate) children: SortedKeyedChildren<NodeRef<V>, 4>,
}

pub(crate) struct Node16<V> {
    pub(crate) prefix: Prefix,
    pub(crate) children: SortedKeyedChildren<NodeRef<V>, 16>,
}

pub(crate) struct Node48<V> {
    pub(crate) prefix: Prefix,
    pub(crate) children: IndexedChildren<NodeRef<V>>,
}

pub(crate) struct Node256<V> {
    pub(crate) prefix: Prefix,
    pub(crate) children: DirectChildren<NodeRef<V>>,
}

impl<V> Node4<V> {
    pub(crate) fn new(prefix: Prefix) -> Self {
        Self {
            prefix,
            children: SortedKeyedChildren::new(),
        }
    }
}

/// A reference to one node, leaf or inner. Each variant is its own boxed
/// allocation sized to its occupancy class.
pub(crate) enum NodeRef<V> {
    Leaf(Box<Leaf<V>>),
    Node4(Box<Node4<V>>),
    Node16(Box<Node16<V>>),
    Node48(Box<Node48<V>>),
    Node256(Box<Node256<V>>),
}

impl<V> NodeRef<V> {
    pub(crate) fn new_leaf(key: &[u8], value: V) -> Self {
        NodeRef::Leaf(Box::new(Leaf::new(key, value)))
    }

    #[inline]
    pub(crate) fn is_leaf(&self) -> bool {
        matches!(self, NodeRef::Leaf(_))
    }

    /// The compressed-prefix header. Inner nodes only.
    pub(crate) fn prefix(&self) -> &Prefix {
        match self {
            NodeRef::Node4(n) => &n.prefix,
            NodeRef::Node16(n) => &n.prefix,
            NodeRef::Node48(n) => &n.prefix,
            NodeRef::Node256(n) => &n.prefix,
            NodeRef::Leaf(_) => unreachable!("leaf nodes carry no prefix"),
        }
    }

    pub(crate) fn prefix_mut(&mut self) -> &mut Prefix {
        match self {
            NodeRef::Node4(n) => &mut n.prefix,
            NodeRef::Node16(n) => &mut n.prefix,
            NodeRef::Node48(n) => &mut n.prefix,
            NodeRef::Node256(n) => &mut n.prefix,
            NodeRef::Leaf(_) => unreachable!("leaf nodes carry no prefix"),
        }
    }

    pub(crate) fn num_children(&self) -> usize {
        match self {
            NodeRef::Node4(n) => n.children.num_children(),
            NodeRef::Node16(n) => n.children.num_children(),
            NodeRef::Node48(n) => n.children.num_children(),
            NodeRef::Node256(n) => n.children.num_children(),
            NodeRef::Leaf(_) => 0,
        }
    }

    /// Child capacity of the current variant; zero for a leaf.
    pub(crate) fn capacity(&self) -> usize {
        match self {
            NodeRef::Node4(_) => 4,
            NodeRef::Node16(_) => 16,
            NodeRef::Node48(_) => INDEXED_WIDTH,
            NodeRef::Node256(_) => 256,
            NodeRef::Leaf(_) => 0,
        }
    }

    pub(crate) fn is_full(&self) -> bool {
        match self {
            NodeRef::Node4(n) => n.children.num_children() >= 4,
            NodeRef::Node16(n) => n.children.num_children() >= 16,
            NodeRef::Node48(n) => n.children.num_children() >= INDEXED_WIDTH,
            NodeRef::Node256(n) => n.children.num_children() >= 256,
            NodeRef::Leaf(_) => unreachable!("leaf nodes hold no children"),
        }
    }

    pub(crate) fn find_child(&self, key: u8) -> Option<&NodeRef<V>> {
        match self {
            NodeRef::Node4(n) => n.children.seek_child(key),
            NodeRef::Node16(n) => n.children.seek_child(key),
            NodeRef::Node48(n) => n.children.seek_child(key),
            NodeRef::Node256(n) => n.children.seek_child(key),
            NodeRef::Leaf(_) => None,
        }
    }

    pub(crate) fn find_child_mut(&mut self, key: u8) -> Option<&mut NodeRef<V>> {
        match self {
            NodeRef::Node4(n) => n.children.seek_child_mut(key),
            NodeRef::Node16(n) => n.children.seek_child_mut(key),
            NodeRef::Node48(n) => n.children.seek_child_mut(key),
            NodeRef::Node256(n) => n.children.seek_child_mut(key),
            NodeRef::Leaf(_) => None,
        }
    }

    /// The child slot for `key`, mutable, so restructuring can swap the
    /// child wholesale.
    pub(crate) fn find_child_slot_mut(&mut self, key: u8) -> Option<&mut Option<NodeRef<V>>> {
        match self {
            NodeRef::Node4(n) => n.children.seek_child_slot_mut(key),
            NodeRef::Node16(n) => n.children.seek_child_slot_mut(key),
            NodeRef::Node48(n) => n.children.seek_child_slot_mut(key),
            NodeRef::Node256(n) => n.children.seek_child_slot_mut(key),
            NodeRef::Leaf(_) => None,
        }
    }

    /// Add a child under `key`. The caller has already grown the node if it
    /// was at capacity.
    pub(crate) fn add_child(&mut self, key: u8, child: NodeRef<V>) {
        match self {
            NodeRef::Node4(n) => n.children.add_child(key, child),
            NodeRef::Node16(n) => n.children.add_child(key, child),
            NodeRef::Node48(n) => n.children.add_child(key, child),
            NodeRef::Node256(n) => n.children.add_child(key, child),
            NodeRef::Leaf(_) => unreachable!("cannot add a child to a leaf"),
        }
    }

    /// Remove and return the child under `key`. Shrinking is the caller's
    /// job (it owns the slot this node lives in).
    pub(crate) fn remove_child(&mut self, key: u8) -> Option<NodeRef<V>> {
        match self {
            NodeRef::Node4(n) => n.children.delete_child(key),
            NodeRef::Node16(n) => n.children.delete_child(key),
            NodeRef::Node48(n) => n.children.delete_child(key),
            NodeRef::Node256(n) => n.children.delete_child(key),
            NodeRef::Leaf(_) => None,
        }
    }

    /// Rebuild as the next wider variant, preserving prefix and children.
    pub(crate) fn grow(self) -> Self {
        match self {
            NodeRef::Node4(n) => {
                let n = *n;
                NodeRef::Node16(Box::new(Node16 {
                    prefix: n.prefix,
                    children: SortedKeyedChildren::from_resized_grow(n.children),
                }))
            }
            NodeRef::Node16(n) => {
                let n = *n;
                NodeRef::Node48(Box::new(Node48 {
                    prefix: n.prefix,
                    children: IndexedChildren::from_keyed(n.children),
                }))
            }
            NodeRef::Node48(n) => {
                let n = *n;
                NodeRef::Node256(Box::new(Node256 {
                    prefix: n.prefix,
                    children: DirectChildren::from_indexed(n.children),
                }))
            }
            NodeRef::Node256(_) | NodeRef::Leaf(_) => {
                unreachable!("no wider representation to grow into")
            }
        }
    }

    /// The least leaf in this subtree. Always defined: an inner node holds
    /// at least one child.
    pub(crate) fn minimum(&self) -> &Leaf<V> {
        match self {
            NodeRef::Leaf(l) => l,
            NodeRef::Node4(n) => n.children.children[0]
                .as_ref()
                .expect("first child of a live node4")
                .minimum(),
            NodeRef::Node16(n) => n.children.children[0]
                .as_ref()
                .expect("first child of a live node16")
                .minimum(),
            NodeRef::Node48(n) => {
                for c in 0..256usize {
                    let pos = n.children.keys[c];
                    if pos != 0 {
                        return n.children.children[pos as usize - 1]
                            .as_ref()
                            .expect("indexed slot occupied")
                            .minimum();
                    }
                }
                unreachable!("empty node48")
            }
            NodeRef::Node256(n) => n
                .children
                .children
                .iter()
                .flatten()
                .next()
                .expect("empty node256")
                .minimum(),
        }
    }

    /// The greatest leaf in this subtree.
    pub(crate) fn maximum(&self) -> &Leaf<V> {
        match self {
            NodeRef::Leaf(l) => l,
            NodeRef::Node4(n) => {
                let last = n.children.num_children() - 1;
                n.children.children[last]
                    .as_ref()
                    .expect("last child of a live node4")
                    .maximum()
            }
            NodeRef::Node16(n) => {
                let last = n.children.num_children() - 1;
                n.children.children[last]
                    .as_ref()
                    .expect("last child of a live node16")
                    .maximum()
            }
            NodeRef::Node48(n) => {
                for c in (0..256usize).rev() {
                    let pos = n.children.keys[c];
                    if pos != 0 {
                        return n.children.children[pos as usize - 1]
                            .as_ref()
                            .expect("indexed slot occupied")
                            .maximum();
                    }
                }
                unreachable!("empty node48")
            }
            NodeRef::Node256(n) => n
                .children
                .children
                .iter()
                .rev()
                .flatten()
                .next()
                .expect("empty node256")
                .maximum(),
        }
    }

    /// Children in ascending edge-byte order; empty for a leaf.
    pub(crate) fn children(&self) -> Box<dyn Iterator<Item = &NodeRef<V>> + '_> {
        match self {
            NodeRef::Leaf(_) => Box::new(std::iter::empty()),
            NodeRef::Node4(n) => Box::new(n.children.iter().map(|(_, c)| c)),
            NodeRef::Node16(n) => Box::new(n.children.iter().map(|(_, c)| c)),
            NodeRef::Node48(n) => Box::new(n.children.iter().map(|(_, c)| c)),
            NodeRef::Node256(n) => Box::new(n.children.iter().map(|(_, c)| c)),
        }
    }

    /// Structural footprint of this subtree: each node contributes the size
    /// of its variant record. Heap-owned key bytes and value payloads are
    /// deliberately excluded; this measures index overhead, not data.
    pub(crate) fn size_in_bytes(&self) -> usize {
        let own = match self {
            NodeRef::Leaf(_) => std::mem::size_of::<Leaf<V>>(),
            NodeRef::Node4(_) => std::mem::size_of::<Node4<V>>(),
            NodeRef::Node16(_) => std::mem::size_of::<Node16<V>>(),
            NodeRef::Node48(_) => std::mem::size_of::<Node48<V>>(),
            NodeRef::Node256(_) => std::mem::size_of::<Node256<V>>(),
        };
        own + self.children().map(NodeRef::size_in_bytes).sum::<usize>()
    }
}

/// Shrink the node in `slot` if the last removal brought it to its
/// hysteresis threshold. Thresholds sit well below capacity so a node
/// oscillating around a growth boundary does not thrash.
///
/// A node4 left with a single child collapses: the node is replaced by that
/// child, folding the node's prefix and the connecting edge byte into the
/// child's prefix (bounded by the inline cache; the authoritative length
/// grows by `parent_len + 1` regardless).
pub(crate) fn shrink_after_remove<V>(slot: &mut Option<NodeRef<V>>) {
    let shrink = match slot.as_ref() {
        Some(NodeRef::Node4(n)) => n.children.num_children() == 1,
        Some(NodeRef::Node16(n)) => n.children.num_children() == 3,
        Some(NodeRef::Node48(n)) => n.children.num_children() == 12,
        Some(NodeRef::Node256(n)) => n.children.num_children() == 37,
        _ => false,
    };
    if !shrink {
        return;
    }

    let node = slot.take().expect("slot occupied");
    *slot = Some(match node {
        NodeRef::Node4(n) => {
            let mut n = *n;
            let (edge, mut child) = n.children.take_only_child();
            if !child.is_leaf() {
                // Concatenate: parent prefix, edge byte, then the child's own
                // prefix, as far as the inline cache reaches.
                let mut combined = n.prefix;
                let mut len = combined.cached_len();
                if len < MAX_PREFIX_LEN {
                    combined.cached[len] = edge;
                    len += 1;
                }
                if len < MAX_PREFIX_LEN {
                    let child_prefix = child.prefix();
                    let sub = min(child_prefix.cached_len(), MAX_PREFIX_LEN - len);
                    combined.cached[len..len + sub]
                        .copy_from_slice(&child_prefix.cached[..sub]);
                    len += sub;
                }

                let cp = child.prefix_mut();
                cp.cached[..len].copy_from_slice(&combined.cached[..len]);
                cp.len += n.prefix.len + 1;
            }
            child
        }
        NodeRef::Node16(n) => {
            let n = *n;
            NodeRef::Node4(Box::new(Node4 {
                prefix: n.prefix,
                children: SortedKeyedChildren::from_resized_shrink(n.children),
            }))
        }
        NodeRef::Node48(n) => {
            let n = *n;
            NodeRef::Node16(Box::new(Node16 {
                prefix: n.prefix,
                children: SortedKeyedChildren::from_indexed(n.children),
            }))
        }
        NodeRef::Node256(n) => {
            let n = *n;
            NodeRef::Node48(Box::new(Node48 {
                prefix: n.prefix,
                children: IndexedChildren::from_direct(n.children),
            }))
        }
        NodeRef::Leaf(_) => unreachable!("leaves do not shrink"),
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leaf(key: &[u8]) -> NodeRef<u32> {
        NodeRef::new_leaf(key, key.first().copied().unwrap_or(0) as u32)
    }

    #[test]
    fn grow_chain_keeps_children_reachable() {
        let mut node = NodeRef::Node4(Box::new(Node4::new(Prefix::default())));
        for c in 0..=255u8 {
            if node.is_full() {
                node = node.grow();
            }
            node.add_child(c, leaf(&[c]));
        }
        assert!(matches!(node, NodeRef::Node256(_)));
        assert_eq!(node.num_children(), 256);
        for c in 0..=255u8 {
            assert!(node.find_child(c).is_some());
        }
    }

    #[test]
    fn minimum_and_maximum_descend_each_variant() {
        let mut node = NodeRef::Node4(Box::new(Node4::new(Prefix::default())));
        for c in [7u8, 200, 3, 90] {
            node.add_child(c, leaf(&[c]));
        }
        assert_eq!(node.minimum().key(), &[3]);
        assert_eq!(node.maximum().key(), &[200]);

        let node = node.grow().grow(); // node48
        assert!(matches!(node, NodeRef::Node48(_)));
        assert_eq!(node.minimum().key(), &[3]);
        assert_eq!(node.maximum().key(), &[200]);

        let node = node.grow(); // node256
        assert_eq!(node.minimum().key(), &[3]);
        assert_eq!(node.maximum().key(), &[200]);
    }

    #[test]
    fn shrink_collapses_node4_into_leaf_child() {
        let mut n4 = Node4::new(Prefix::from_key(b"ab", 0, 2));
        n4.children.add_child(b'x', leaf(b"abx"));
        let mut slot = Some(NodeRef::Node4(Box::new(n4)));
        shrink_after_remove(&mut slot);
        match slot {
            Some(NodeRef::Leaf(l)) => assert_eq!(l.key(), b"abx"),
            _ => panic!("node4 with one leaf child should collapse to the leaf"),
        }
    }

    #[test]
    fn shrink_concatenates_prefix_into_inner_child() {
        // parent: prefix "ab", edge 'c', child: prefix "de" with two leaves.
        let mut child = Node4::new(Prefix::from_key(b"de", 0, 2));
        child.children.add_child(b'1', leaf(b"abcde1"));
        child.children.add_child(b'2', leaf(b"abcde2"));

        let mut parent = Node4::new(Prefix::from_key(b"ab", 0, 2));
        parent
            .children
            .add_child(b'c', NodeRef::Node4(Box::new(child)));

        let mut slot = Some(NodeRef::Node4(Box::new(parent)));
        shrink_after_remove(&mut slot);

        let node = slot.expect("slot still occupied");
        assert!(matches!(node, NodeRef::Node4(_)));
        let p = node.prefix();
        assert_eq!(p.len, 5);
        assert_eq!(&p.cached[..5], b"abcde");
    }
}
