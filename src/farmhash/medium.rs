//! 33 to 96 bytes: closed forms over overlapping 32-byte windows.

use super::{mix::hash_len_16, K1, K2};
use crate::bits::{fetch64, shift_mix};

/// Hashes the 32-byte window of `s` starting at `offset`, optionally chained
/// on the outputs of earlier windows through `seed0`/`seed1`.
#[inline(always)]
fn h32(s: &[u8], offset: usize, mul: u64, seed0: u64, seed1: u64) -> u64 {
    let a = fetch64(s, offset).wrapping_mul(K1);
    let b = fetch64(s, offset + 8);
    let c = fetch64(s, offset + 24).wrapping_mul(mul);
    let d = fetch64(s, offset + 16).wrapping_mul(K2);
    let u = a
        .wrapping_add(b)
        .rotate_right(43)
        .wrapping_add(c.rotate_right(30))
        .wrapping_add(d)
        .wrapping_add(seed0);
    let v = a
        .wrapping_add(b.wrapping_add(K2).rotate_right(18))
        .wrapping_add(c)
        .wrapping_add(seed1);
    let a = shift_mix((u ^ v).wrapping_mul(mul));
    shift_mix((v ^ a).wrapping_mul(mul))
}

/// 33 to 64 bytes: the first and last 32-byte windows, which overlap below 64.
pub(crate) fn hash_len_33_to_64(s: &[u8]) -> u64 {
    let len = s.len();
    let mul0 = K2.wrapping_sub(30);
    let mul1 = K2.wrapping_sub(30).wrapping_add(2 * len as u64);
    let h0 = h32(s, 0, mul0, 0, 0);
    let h1 = h32(s, len - 32, mul1, 0, 0);
    h1.wrapping_mul(mul1).wrapping_add(h0).wrapping_mul(mul1)
}

/// 65 to 96 bytes: three windows, the last one seeded with the first two.
pub(crate) fn hash_len_65_to_96(s: &[u8]) -> u64 {
    let len = s.len();
    let mul0 = K2.wrapping_sub(114);
    let mul1 = K2.wrapping_sub(114).wrapping_add(2 * len as u64);
    let h0 = h32(s, 0, mul0, 0, 0);
    let h1 = h32(s, 32, mul1, 0, 0);
    let h2 = h32(s, len - 32, mul1, h0, h1);
    h2.wrapping_mul(9)
        .wrapping_add(h0 >> 17)
        .wrapping_add(h1 >> 21)
        .wrapping_mul(mul1)
}

/// The older 33 to 64 byte closed form.  Only the seeded entry points reach
/// it, through `na_hash64`.
pub(crate) fn na_hash_len_33_to_64(s: &[u8]) -> u64 {
    let len = s.len();
    let mul = K2.wrapping_add(len as u64 * 2);
    let a = fetch64(s, 0).wrapping_mul(K2);
    let b = fetch64(s, 8);
    let c = fetch64(s, len - 8).wrapping_mul(mul);
    let d = fetch64(s, len - 16).wrapping_mul(K2);
    let y = a
        .wrapping_add(b)
        .rotate_right(43)
        .wrapping_add(c.rotate_right(30))
        .wrapping_add(d);
    let z = hash_len_16(
        y,
        a.wrapping_add(b.wrapping_add(K2).rotate_right(18))
            .wrapping_add(c),
        mul,
    );
    let e = fetch64(s, 16).wrapping_mul(mul);
    let f = fetch64(s, 24);
    let g = y.wrapping_add(fetch64(s, len - 32)).wrapping_mul(mul);
    let h = z.wrapping_add(fetch64(s, len - 24)).wrapping_mul(mul);
    hash_len_16(
        e.wrapping_add(f)
            .rotate_right(43)
            .wrapping_add(g.rotate_right(30))
            .wrapping_add(h),
        e.wrapping_add(f.wrapping_add(a).rotate_right(18))
            .wrapping_add(g),
        mul,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ramp(len: usize) -> Vec<u8> {
        (0..len).map(|i| (i * 131 + 17) as u8).collect()
    }

    #[test]
    fn windows_overlap_at_33() {
        // At 33 bytes the two windows share bytes 1..32, so only byte 0 is
        // exclusive to the first window and byte 32 to the last.
        let s = ramp(33);
        let base = hash_len_33_to_64(&s);
        for i in [0, 1, 16, 31, 32] {
            let mut t = s.clone();
            t[i] ^= 1;
            assert_ne!(hash_len_33_to_64(&t), base, "byte {}", i);
        }
    }

    #[test]
    fn closed_forms_disagree() {
        for len in [33, 40, 48, 63, 64] {
            let s = ramp(len);
            assert_ne!(hash_len_33_to_64(&s), na_hash_len_33_to_64(&s));
        }
    }

    #[test]
    fn middle_window_matters_at_96() {
        // At 96 bytes the three windows are disjoint.
        let s = ramp(96);
        let base = hash_len_65_to_96(&s);
        for i in [0, 31, 32, 63, 64, 95] {
            let mut t = s.clone();
            t[i] ^= 0x40;
            assert_ne!(hash_len_65_to_96(&t), base, "byte {}", i);
        }
    }

    #[test]
    fn h32_seeds_are_not_symmetric() {
        let s = ramp(32);
        let mul = K2.wrapping_sub(114);
        assert_ne!(h32(&s, 0, mul, 1, 2), h32(&s, 0, mul, 2, 1));
        assert_ne!(h32(&s, 0, mul, 0, 0), h32(&s, 0, mul, 1, 0));
    }
}
