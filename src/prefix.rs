//! Compressed-prefix header shared by every inner node.
//!
//! A node stores up to [`MAX_PREFIX_LEN`] bytes of the prefix common to all
//! of its descendants inline. The authoritative length lives in `len` and may
//! exceed the inline cache; callers that need prefix bytes past the cache
//! must reconstruct them from a descendant leaf (conventionally the subtree
//! minimum, which always carries a full key copy).

use std::cmp::min;

/// Inline capacity of the compressed-prefix cache, in bytes.
pub(crate) const MAX_PREFIX_LEN: usize = 10;

/// The compressed prefix of an inner node: the true length plus up to
/// [`MAX_PREFIX_LEN`] cached bytes. When `len > MAX_PREFIX_LEN` only the
/// first ten bytes are cached and the rest are a hint at best.
#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct Prefix {
    pub(crate) len: u32,
    pub(crate) cached: [u8; MAX_PREFIX_LEN],
}

impl Prefix {
    /// Build a prefix of true length `len` from `key[depth..]`, caching at
    /// most [`MAX_PREFIX_LEN`] bytes. Positions past the end of `key` read as
    /// the implicit zero terminator.
    pub(crate) fn from_key(key: &[u8], depth: usize, len: usize) -> Self {
        let mut cached = [0u8; MAX_PREFIX_LEN];
        for (i, slot) in cached.iter_mut().take(min(len, MAX_PREFIX_LEN)).enumerate() {
            *slot = byte_at(key, depth + i);
        }
        Self {
            len: len as u32,
            cached,
        }
    }

    /// Number of cached bytes that are valid: `min(len, MAX_PREFIX_LEN)`.
    #[inline]
    pub(crate) fn cached_len(&self) -> usize {
        min(self.len as usize, MAX_PREFIX_LEN)
    }

    /// Compare the cached prefix bytes against `key[depth..]` and return the
    /// number of matching bytes. Only the cached portion is consulted; a full
    /// match here means "matches as far as the cache can tell".
    pub(crate) fn check(&self, key: &[u8], depth: usize) -> usize {
        let max_cmp = self.cached_len();
        let mut idx = 0;
        while idx < max_cmp {
            if self.cached[idx] != byte_at(key, depth + idx) {
                return idx;
            }
            idx += 1;
        }
        idx
    }

    /// Drop the first `n` bytes of the prefix, shifting the cache left.
    /// Valid only while `len <= MAX_PREFIX_LEN`, i.e. the cache is whole;
    /// callers with a longer (stale) cache repopulate from a leaf instead.
    pub(crate) fn shift_left(&mut self, n: usize) {
        debug_assert!(self.len as usize <= MAX_PREFIX_LEN);
        debug_assert!(n <= self.len as usize);
        let new_len = self.len as usize - n;
        self.cached.copy_within(n..n + new_len, 0);
        self.len = new_len as u32;
    }
}

/// Key byte at `pos`, with the implicit zero terminator: positions at or
/// past the end of the key read as 0x00. This is what lets a key that is a
/// strict prefix of another occupy the zero edge of the divergence node.
#[inline]
pub(crate) fn byte_at(key: &[u8], pos: usize) -> u8 {
    key.get(pos).copied().unwrap_or(0)
}

/// Longest common prefix of two whole keys starting at `depth`, counting the
/// implicit terminator position, so two keys where one extends the other
/// diverge one byte past the shorter key's end.
pub(crate) fn longest_common_prefix(a: &[u8], b: &[u8], depth: usize) -> usize {
    let limit = (min(a.len(), b.len()) + 1).saturating_sub(depth);
    let mut idx = 0;
    while idx < limit {
        if byte_at(a, depth + idx) != byte_at(b, depth + idx) {
            return idx;
        }
        idx += 1;
    }
    idx
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_key_caps_cache_at_max() {
        let p = Prefix::from_key(b"0123456789abcdef", 0, 14);
        assert_eq!(p.len, 14);
        assert_eq!(&p.cached, b"0123456789");
        assert_eq!(p.cached_len(), MAX_PREFIX_LEN);
    }

    #[test]
    fn check_stops_at_first_mismatch() {
        let p = Prefix::from_key(b"apple", 0, 5);
        assert_eq!(p.check(b"apply", 0), 4);
        assert_eq!(p.check(b"apple", 0), 5);
        assert_eq!(p.check(b"xapple", 1), 5);
        assert_eq!(p.check(b"banana", 0), 0);
    }

    #[test]
    fn check_sees_terminator_on_short_keys() {
        let p = Prefix::from_key(b"appl", 0, 4);
        // "app" exhausts before the prefix does; the terminator mismatches 'l'.
        assert_eq!(p.check(b"app", 0), 3);
    }

    #[test]
    fn shift_left_keeps_tail() {
        let mut p = Prefix::from_key(b"abcdef", 0, 6);
        p.shift_left(3);
        assert_eq!(p.len, 3);
        assert_eq!(&p.cached[..3], b"def");
    }

    #[test]
    fn lcp_diverges_past_shorter_key() {
        assert_eq!(longest_common_prefix(b"car", b"care", 0), 3);
        assert_eq!(longest_common_prefix(b"car", b"car\0x", 0), 4);
        assert_eq!(longest_common_prefix(b"apple", b"apply", 0), 4);
        assert_eq!(longest_common_prefix(b"abc", b"abd", 2), 0);
    }
}
