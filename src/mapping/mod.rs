//! Child-mapping strategies for the inner node variants.
//!
//! Each mapping stores up to `WIDTH` children keyed by a single edge byte,
//! with a layout tuned to its occupancy class: a sorted parallel-array form
//! for 4 and 16 children, a 256-entry byte index over a dense child array
//! for 48, and a directly indexed array for 256.

pub(crate) mod direct;
pub(crate) mod indexed;
pub(crate) mod sorted_keyed;

pub(crate) use direct::DirectChildren;
pub(crate) use indexed::IndexedChildren;
pub(crate) use sorted_keyed::SortedKeyedChildren;

/// Operations every child mapping supports. `N` is the child node type.
pub(crate) trait NodeMapping<N, const WIDTH: usize> {
    /// Add a child under `key`. The caller guarantees `key` is absent and the
    /// mapping is below capacity.
    fn add_child(&mut self, key: u8, node: N);
    fn seek_child(&self, key: u8) -> Option<&N>;
    fn seek_child_mut(&mut self, key: u8) -> Option<&mut N>;
    fn delete_child(&mut self, key: u8) -> Option<N>;
    fn num_children(&self) -> usize;
}
