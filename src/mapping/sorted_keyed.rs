//! Sorted parallel-array child mapping, used by the 4- and 16-wide node
//! variants. Keys are kept strictly ascending so in-order traversal can walk
//! the child array directly; lookups on the 16-wide form use a SIMD equality
//! scan where available.

use crate::mapping::NodeMapping;
use crate::mapping::indexed::IndexedChildren;
use crate::utils::u8_keys::{
    u8_keys_find_insert_position_sorted, u8_keys_find_key_position_sorted,
};

pub(crate) struct SortedKeyedChildren<N, const WIDTH: usize> {
    pub(crate) keys: [u8; WIDTH],
    pub(crate) children: [Option<N>; WIDTH],
    pub(crate) num_children: u8,
}

impl<N, const WIDTH: usize> Default for SortedKeyedChildren<N, WIDTH> {
    fn default() -> Self {
        Self::new()
    }
}

impl<N, const WIDTH: usize> SortedKeyedChildren<N, WIDTH> {
    #[inline]
    pub(crate) fn new() -> Self {
        Self {
            keys: [0; WIDTH],
            children: [const { None }; WIDTH],
            num_children: 0,
        }
    }

    /// Widen into this mapping from a smaller sorted one, preserving order.
    pub(crate) fn from_resized_grow<const OLD_WIDTH: usize>(
        mut km: SortedKeyedChildren<N, OLD_WIDTH>,
    ) -> Self {
        debug_assert!(WIDTH > OLD_WIDTH);
        let mut new = Self::new();
        for i in 0..km.num_children as usize {
            new.keys[i] = km.keys[i];
            new.children[i] = km.children[i].take();
        }
        new.num_children = km.num_children;
        new
    }

    /// Narrow into this mapping from a larger sorted one. The caller
    /// guarantees the occupancy fits.
    pub(crate) fn from_resized_shrink<const OLD_WIDTH: usize>(
        mut km: SortedKeyedChildren<N, OLD_WIDTH>,
    ) -> Self {
        debug_assert!(km.num_children as usize <= WIDTH);
        let mut new = Self::new();
        for i in 0..km.num_children as usize {
            new.keys[i] = km.keys[i];
            new.children[i] = km.children[i].take();
        }
        new.num_children = km.num_children;
        new
    }

    /// Narrow from an underfull indexed mapping. Walking the 256-entry index
    /// ascending lands the children here already sorted.
    pub(crate) fn from_indexed(mut im: IndexedChildren<N>) -> Self {
        let mut new = Self::new();
        let mut cnt = 0;
        for c in 0..256usize {
            let pos = im.keys[c];
            if pos == 0 {
                continue;
            }
            new.keys[cnt] = c as u8;
            new.children[cnt] = im.children[pos as usize - 1].take();
            cnt += 1;
        }
        new.num_children = cnt as u8;
        new
    }

    /// Mutable access to the slot holding the child for `key`, so callers
    /// can replace the child wholesale during restructuring.
    pub(crate) fn seek_child_slot_mut(&mut self, key: u8) -> Option<&mut Option<N>> {
        let idx = u8_keys_find_key_position_sorted::<WIDTH>(
            key,
            &self.keys,
            self.num_children as usize,
        )?;
        Some(&mut self.children[idx])
    }

    /// Remove and return the sole remaining child with its edge byte.
    pub(crate) fn take_only_child(&mut self) -> (u8, N) {
        debug_assert_eq!(self.num_children, 1);
        let key = self.keys[0];
        let child = self.children[0].take().expect("sole child slot occupied");
        self.keys[0] = 0;
        self.num_children = 0;
        (key, child)
    }

    /// Children with their edge bytes, ascending.
    pub(crate) fn iter(&self) -> impl Iterator<Item = (u8, &N)> {
        (0..self.num_children as usize).map(|i| {
            (
                self.keys[i],
                self.children[i].as_ref().expect("live slot occupied"),
            )
        })
    }
}

impl<N, const WIDTH: usize> NodeMapping<N, WIDTH> for SortedKeyedChildren<N, WIDTH> {
    fn add_child(&mut self, key: u8, node: N) {
        let num = self.num_children as usize;
        debug_assert!(num < WIDTH);
        let idx = u8_keys_find_insert_position_sorted::<WIDTH>(key, &self.keys, num);

        // Shift everything at and after the insert position one slot right.
        for i in (idx..num).rev() {
            self.keys[i + 1] = self.keys[i];
            self.children[i + 1] = self.children[i].take();
        }
        self.keys[idx] = key;
        self.children[idx] = Some(node);
        self.num_children += 1;
    }

    fn seek_child(&self, key: u8) -> Option<&N> {
        let idx = u8_keys_find_key_position_sorted::<WIDTH>(
            key,
            &self.keys,
            self.num_children as usize,
        )?;
        self.children[idx].as_ref()
    }

    fn seek_child_mut(&mut self, key: u8) -> Option<&mut N> {
        let idx = u8_keys_find_key_position_sorted::<WIDTH>(
            key,
            &self.keys,
            self.num_children as usize,
        )?;
        self.children[idx].as_mut()
    }

    fn delete_child(&mut self, key: u8) -> Option<N> {
        let num = self.num_children as usize;
        let idx = u8_keys_find_key_position_sorted::<WIDTH>(key, &self.keys, num)?;
        let node = self.children[idx].take();

        // Shift the tail left to close the gap and keep the order.
        for i in idx..num - 1 {
            self.keys[i] = self.keys[i + 1];
            self.children[i] = self.children[i + 1].take();
        }
        self.keys[num - 1] = 0;
        self.num_children -= 1;
        node
    }

    #[inline(always)]
    fn num_children(&self) -> usize {
        self.num_children as usize
    }
}
