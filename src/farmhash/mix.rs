//! The combiners every FarmHash path shares.

use super::KMUL;
use crate::bits::fetch64;

/// Murmur-inspired two-word combiner.
#[inline(always)]
pub(crate) fn hash_len_16(u: u64, v: u64, mul: u64) -> u64 {
    let mut a = (u ^ v).wrapping_mul(mul);
    a ^= a >> 47;
    let mut b = (v ^ a).wrapping_mul(mul);
    b ^= b >> 47;
    b.wrapping_mul(mul)
}

/// `hash_len_16` with the fixed multiplier the reference once spelled
/// `Hash128to64`.  Stored hashes depend on this exact form.
#[inline(always)]
pub(crate) fn hash_len_16_kmul(u: u64, v: u64) -> u64 {
    hash_len_16(u, v, KMUL)
}

/// Like `hash_len_16`, but the second product is rotated by `r` before the
/// final multiply instead of shift-mixed.
#[inline(always)]
pub(crate) fn h(x: u64, y: u64, mul: u64, r: u32) -> u64 {
    let mut a = (x ^ y).wrapping_mul(mul);
    a ^= a >> 47;
    let b = (y ^ a).wrapping_mul(mul);
    b.rotate_right(r).wrapping_mul(mul)
}

/// Folds four words into the seed pair `(a, b)`.  The two outputs are
/// correlated, hence "weak".
#[inline(always)]
pub(crate) fn weak_hash_len_32_with_seeds(
    w: u64,
    x: u64,
    y: u64,
    z: u64,
    mut a: u64,
    mut b: u64,
) -> (u64, u64) {
    a = a.wrapping_add(w);
    b = b.wrapping_add(a).wrapping_add(z).rotate_right(21);
    let c = a;
    a = a.wrapping_add(x);
    a = a.wrapping_add(y);
    b = b.wrapping_add(a.rotate_right(44));
    (a.wrapping_add(z), b.wrapping_add(c))
}

/// `weak_hash_len_32_with_seeds` over the 32 bytes of `s` at `offset`.
#[inline(always)]
pub(crate) fn weak_hash_32_at(s: &[u8], offset: usize, a: u64, b: u64) -> (u64, u64) {
    weak_hash_len_32_with_seeds(
        fetch64(s, offset),
        fetch64(s, offset + 8),
        fetch64(s, offset + 16),
        fetch64(s, offset + 24),
        a,
        b,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_len_16_of_zero_is_zero() {
        // Every step is a product or xor of zero.
        assert_eq!(hash_len_16(0, 0, 0x9ae16a3b2f90404f), 0);
    }

    #[test]
    fn hash_len_16_kmul_is_hash_len_16() {
        let (u, v) = (0x0123456789abcdef, 0xfedcba9876543210);
        assert_eq!(hash_len_16_kmul(u, v), hash_len_16(u, v, 0x9ddfea08eb382d69));
        assert_ne!(hash_len_16_kmul(u, v), hash_len_16_kmul(v, u));
    }

    #[test]
    fn h_rotation_only_touches_the_last_step() {
        let (x, y, mul) = (17u64, 4242u64, 0xb492b66fbe98f273u64);
        let mut a = (x ^ y).wrapping_mul(mul);
        a ^= a >> 47;
        let b = (y ^ a).wrapping_mul(mul);
        assert_eq!(h(x, y, mul, 0), b.wrapping_mul(mul));
        assert_eq!(h(x, y, mul, 30), b.rotate_right(30).wrapping_mul(mul));
    }

    #[test]
    fn weak_hash_with_zero_words() {
        // a' = a, b' = rotr(a + b, 21) + rotr(a, 44) + a.
        let (a, b) = (3u64, 5u64);
        let expected_b = (a + b)
            .rotate_right(21)
            .wrapping_add(a.rotate_right(44))
            .wrapping_add(a);
        assert_eq!(weak_hash_len_32_with_seeds(0, 0, 0, 0, a, b), (a, expected_b));
    }

    #[test]
    fn weak_hash_reads_words_in_order() {
        let mut s = [0u8; 40];
        for (i, byte) in s.iter_mut().enumerate() {
            *byte = i as u8;
        }
        let words = (fetch64(&s, 8), fetch64(&s, 16), fetch64(&s, 24), fetch64(&s, 32));
        assert_eq!(
            weak_hash_32_at(&s, 8, 1, 2),
            weak_hash_len_32_with_seeds(words.0, words.1, words.2, words.3, 1, 2)
        );
    }
}
