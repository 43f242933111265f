//! Key-position search over the sorted `u8` key arrays of the keyed node
//! variants. The 16-wide form is SIMD-accelerated where the platform allows
//! (SSE2 on x86_64, NEON on aarch64) with a scalar fallback everywhere else.

#[cfg(all(target_arch = "x86_64", target_feature = "sse2"))]
#[inline]
fn x86_64_sse_find_key_16(key: u8, keys: &[u8], num_children: usize) -> Option<usize> {
    use std::arch::x86_64::{
        __m128i, _mm_cmpeq_epi8, _mm_loadu_si128, _mm_movemask_epi8, _mm_set1_epi8,
    };

    let bitfield = unsafe {
        let key_vec = _mm_set1_epi8(key as i8);
        let results = _mm_cmpeq_epi8(key_vec, _mm_loadu_si128(keys.as_ptr() as *const __m128i));
        // Mask off lanes past the live children.
        let mask = (1i32 << num_children) - 1;
        _mm_movemask_epi8(results) & mask
    };
    if bitfield != 0 {
        return Some(bitfield.trailing_zeros() as usize);
    }
    None
}

#[cfg(all(target_arch = "x86_64", target_feature = "sse2"))]
#[inline]
fn x86_64_sse_seek_insert_pos_16(key: u8, keys: &[u8], num_children: usize) -> Option<usize> {
    use std::arch::x86_64::{
        __m128i, _mm_cmplt_epi8, _mm_loadu_si128, _mm_movemask_epi8, _mm_set1_epi8, _mm_xor_si128,
    };

    let bitfield = unsafe {
        // cmplt is a signed compare; bias both sides by 0x80 so it orders
        // the full unsigned byte range.
        let bias = _mm_set1_epi8(-128);
        let key_vec = _mm_xor_si128(_mm_set1_epi8(key as i8), bias);
        let keys_vec = _mm_xor_si128(_mm_loadu_si128(keys.as_ptr() as *const __m128i), bias);
        let cmp = _mm_cmplt_epi8(key_vec, keys_vec);
        let mask = (1i32 << num_children) - 1;
        _mm_movemask_epi8(cmp) & mask
    };
    if bitfield != 0 {
        return Some(bitfield.trailing_zeros() as usize);
    }
    None
}

#[cfg(all(target_arch = "aarch64", target_feature = "neon"))]
#[inline]
fn aarch64_neon_find_key_16(key: u8, keys: &[u8], num_children: usize) -> Option<usize> {
    use std::arch::aarch64::*;
    unsafe {
        let key_vec = vdupq_n_u8(key);
        let node_keys_vec = vld1q_u8(keys.as_ptr());
        let cmp_vec = vceqq_u8(key_vec, node_keys_vec);

        // NEON has no movemask; narrow each 8-bit lane to 4 bits and pull the
        // result out as one 64-bit field, 4 bits per lane.
        let eq_mask = vreinterpretq_u16_u8(cmp_vec);
        let res = vshrn_n_u16::<4>(eq_mask);
        let matches = vget_lane_u64::<0>(vreinterpret_u64_u8(res));

        if matches != 0 {
            let idx = (matches.trailing_zeros() >> 2) as usize;
            if idx < num_children {
                return Some(idx);
            }
        }
        None
    }
}

#[cfg(all(target_arch = "aarch64", target_feature = "neon"))]
#[inline]
fn aarch64_neon_seek_insert_pos_16(key: u8, keys: &[u8], num_children: usize) -> Option<usize> {
    use std::arch::aarch64::*;
    unsafe {
        let key_vec = vdupq_n_u8(key);
        let node_keys_vec = vld1q_u8(keys.as_ptr());
        let cmp_vec = vcltq_u8(key_vec, node_keys_vec);

        let eq_mask = vreinterpretq_u16_u8(cmp_vec);
        let res = vshrn_n_u16::<4>(eq_mask);
        let matches = vget_lane_u64::<0>(vreinterpret_u64_u8(res));

        if matches != 0 {
            let idx = (matches.trailing_zeros() >> 2) as usize;
            if idx < num_children {
                return Some(idx);
            }
        }
        None
    }
}

fn binary_find_key(key: u8, keys: &[u8], num_children: usize) -> Option<usize> {
    let mut left = 0;
    let mut right = num_children;
    while left < right {
        let mid = (left + right) / 2;
        match keys[mid].cmp(&key) {
            std::cmp::Ordering::Less => left = mid + 1,
            std::cmp::Ordering::Equal => return Some(mid),
            std::cmp::Ordering::Greater => right = mid,
        }
    }
    None
}

/// Position of `key` within the first `num_children` entries of a sorted key
/// array, or `None` if absent.
#[allow(unreachable_code)]
pub(crate) fn u8_keys_find_key_position_sorted<const WIDTH: usize>(
    key: u8,
    keys: &[u8],
    num_children: usize,
) -> Option<usize> {
    // Width 4 and under: linear scan beats everything.
    if WIDTH <= 4 {
        return (0..num_children).find(|&i| keys[i] == key);
    }

    if WIDTH == 16 {
        #[cfg(all(target_arch = "x86_64", target_feature = "sse2"))]
        {
            return x86_64_sse_find_key_16(key, keys, num_children);
        }

        #[cfg(all(target_arch = "aarch64", target_feature = "neon"))]
        {
            return aarch64_neon_find_key_16(key, keys, num_children);
        }
    }

    binary_find_key(key, keys, num_children)
}

/// Position at which `key` should be inserted to keep the first
/// `num_children` entries of the key array sorted ascending.
#[allow(unreachable_code)]
pub(crate) fn u8_keys_find_insert_position_sorted<const WIDTH: usize>(
    key: u8,
    keys: &[u8],
    num_children: usize,
) -> usize {
    if WIDTH == 16 {
        #[cfg(all(target_arch = "x86_64", target_feature = "sse2"))]
        {
            return x86_64_sse_seek_insert_pos_16(key, keys, num_children)
                .unwrap_or(num_children);
        }

        #[cfg(all(target_arch = "aarch64", target_feature = "neon"))]
        {
            return aarch64_neon_seek_insert_pos_16(key, keys, num_children)
                .unwrap_or(num_children);
        }
    }

    (0..num_children)
        .find(|&i| key < keys[i])
        .unwrap_or(num_children)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn find_in_sorted_16() {
        let mut keys = [0u8; 16];
        let present = [3u8, 9, 17, 64, 127, 128, 200, 255];
        for (i, k) in present.iter().enumerate() {
            keys[i] = *k;
        }
        for (i, k) in present.iter().enumerate() {
            assert_eq!(
                u8_keys_find_key_position_sorted::<16>(*k, &keys, present.len()),
                Some(i)
            );
        }
        assert_eq!(u8_keys_find_key_position_sorted::<16>(4, &keys, present.len()), None);
        assert_eq!(u8_keys_find_key_position_sorted::<16>(3, &keys, 0), None);
    }

    #[test]
    fn insert_position_orders_high_bytes_unsigned() {
        let mut keys = [0u8; 16];
        keys[0] = 10;
        keys[1] = 127;
        keys[2] = 130;
        keys[3] = 250;
        assert_eq!(u8_keys_find_insert_position_sorted::<16>(5, &keys, 4), 0);
        assert_eq!(u8_keys_find_insert_position_sorted::<16>(128, &keys, 4), 2);
        assert_eq!(u8_keys_find_insert_position_sorted::<16>(200, &keys, 4), 3);
        assert_eq!(u8_keys_find_insert_position_sorted::<16>(255, &keys, 4), 4);
    }

    #[test]
    fn insert_position_width_4_is_linear() {
        let keys = [b'b', b'd', 0, 0];
        assert_eq!(u8_keys_find_insert_position_sorted::<4>(b'a', &keys, 2), 0);
        assert_eq!(u8_keys_find_insert_position_sorted::<4>(b'c', &keys, 2), 1);
        assert_eq!(u8_keys_find_insert_position_sorted::<4>(b'e', &keys, 2), 2);
    }
}
