//! Word reads and small bit tricks shared by every hash family.
//!
//! Rotations use `u64::rotate_right`/`rotate_left` directly, which already
//! reduce the amount modulo 64.

/// Reads the little-endian 64-bit word at byte offset `i`.
///
/// The caller's length dispatch guarantees `i + 8 <= s.len()`.
#[inline(always)]
pub(crate) fn fetch64(s: &[u8], i: usize) -> u64 {
    let mut word = [0u8; 8];
    word.copy_from_slice(&s[i..(i + 8)]);
    u64::from_le_bytes(word)
}

/// Reads the little-endian 32-bit word at byte offset `i`, widened to 64 bits.
#[inline(always)]
pub(crate) fn fetch32(s: &[u8], i: usize) -> u64 {
    let mut word = [0u8; 4];
    word.copy_from_slice(&s[i..(i + 4)]);
    u32::from_le_bytes(word) as u64
}

#[inline(always)]
pub(crate) const fn shift_mix(v: u64) -> u64 {
    v ^ (v >> 47)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fetch_is_little_endian() {
        let s = [1u8, 2, 3, 4, 5, 6, 7, 8, 9];
        assert_eq!(fetch64(&s, 0), 0x0807060504030201);
        assert_eq!(fetch64(&s, 1), 0x0908070605040302);
        assert_eq!(fetch32(&s, 0), 0x04030201);
        assert_eq!(fetch32(&s, 5), 0x09080706);
    }

    #[test]
    fn fetch_at_exact_end() {
        let s = [0xffu8; 8];
        assert_eq!(fetch64(&s, 0), u64::MAX);
        assert_eq!(fetch32(&s, 4), u32::MAX as u64);
    }

    #[test]
    #[should_panic]
    fn fetch_past_end_panics() {
        let s = [0u8; 7];
        fetch64(&s, 0);
    }

    #[test]
    fn rotation_amounts_wrap() {
        let x = 0x0123456789abcdefu64;
        assert_eq!(x.rotate_right(0), x);
        assert_eq!(x.rotate_right(64), x);
        assert_eq!(x.rotate_right(65), x.rotate_right(1));
        assert_eq!(x.rotate_left(37), x.rotate_right(27));
    }

    #[test]
    fn shift_mix_folds_high_bits() {
        assert_eq!(shift_mix(0), 0);
        assert_eq!(shift_mix(1 << 47), (1 << 47) | 1);
        assert_eq!(shift_mix(u64::MAX), u64::MAX ^ (u64::MAX >> 47));
    }
}
