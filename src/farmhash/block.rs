//! The 64-byte block loops used above 64 bytes.
//!
//! Both loops consume whole blocks until 1 to 64 bytes remain, then run a
//! final round over the *last* 64 bytes of the input.  That final block
//! usually overlaps bytes the loop already consumed.

use super::{
    mix::{h, hash_len_16, weak_hash_32_at},
    K0, K1, K2, SEED,
};
use crate::bits::{fetch64, shift_mix};

pub(crate) const BLOCK_LEN: usize = 64;

/// Splits `s` (at least 65 bytes) into the looped prefix and the final block.
fn split_blocks(s: &[u8]) -> (&[u8], &[u8]) {
    let len = s.len();
    let end = (len - 1) / BLOCK_LEN * BLOCK_LEN;
    (&s[..end], &s[(len - BLOCK_LEN)..])
}

/// Registers of the single-seed loop: 56 bytes of state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct NaState {
    x: u64,
    y: u64,
    z: u64,
    v: (u64, u64),
    w: (u64, u64),
}

impl NaState {
    fn new(first_word: u64) -> Self {
        let y = SEED.wrapping_mul(K1).wrapping_add(113);
        Self {
            x: SEED.wrapping_mul(K2).wrapping_add(first_word),
            y,
            z: shift_mix(y.wrapping_mul(K2).wrapping_add(113)).wrapping_mul(K2),
            v: (0, 0),
            w: (0, 0),
        }
    }

    fn step(self, block: &[u8]) -> Self {
        let Self { x, y, z, v, w } = self;

        let mut x = x
            .wrapping_add(y)
            .wrapping_add(v.0)
            .wrapping_add(fetch64(block, 8))
            .rotate_right(37)
            .wrapping_mul(K1);
        let mut y = y
            .wrapping_add(v.1)
            .wrapping_add(fetch64(block, 48))
            .rotate_right(42)
            .wrapping_mul(K1);
        x ^= w.1;
        y = y.wrapping_add(v.0).wrapping_add(fetch64(block, 40));
        let z = z.wrapping_add(w.0).rotate_right(33).wrapping_mul(K1);
        let v = weak_hash_32_at(block, 0, v.1.wrapping_mul(K1), x.wrapping_add(w.0));
        let w = weak_hash_32_at(
            block,
            32,
            z.wrapping_add(w.1),
            y.wrapping_add(fetch64(block, 16)),
        );

        // x and z trade places between blocks.
        Self { x: z, y, z: x, v, w }
    }

    fn finish(self, tail: &[u8], len: usize) -> u64 {
        let Self { x, y, z, mut v, mut w } = self;
        let mul = K1.wrapping_add((z & 0xff) << 1);

        w.0 = w.0.wrapping_add(((len - 1) & 63) as u64);
        v.0 = v.0.wrapping_add(w.0);
        w.0 = w.0.wrapping_add(v.0);

        let mut x = x
            .wrapping_add(y)
            .wrapping_add(v.0)
            .wrapping_add(fetch64(tail, 8))
            .rotate_right(37)
            .wrapping_mul(mul);
        let mut y = y
            .wrapping_add(v.1)
            .wrapping_add(fetch64(tail, 48))
            .rotate_right(42)
            .wrapping_mul(mul);
        x ^= w.1.wrapping_mul(9);
        y = y
            .wrapping_add(v.0.wrapping_mul(9))
            .wrapping_add(fetch64(tail, 40));
        let z = z.wrapping_add(w.0).rotate_right(33).wrapping_mul(mul);
        let v = weak_hash_32_at(tail, 0, v.1.wrapping_mul(mul), x.wrapping_add(w.0));
        let w = weak_hash_32_at(
            tail,
            32,
            z.wrapping_add(w.1),
            y.wrapping_add(fetch64(tail, 16)),
        );
        let (x, z) = (z, x);

        hash_len_16(
            hash_len_16(v.0, w.0, mul)
                .wrapping_add(shift_mix(y).wrapping_mul(K0))
                .wrapping_add(z),
            hash_len_16(v.1, w.1, mul).wrapping_add(x),
            mul,
        )
    }
}

/// The single-seed loop.  `s` must be longer than 64 bytes.
pub(crate) fn hash_len_65_plus(s: &[u8]) -> u64 {
    let (body, tail) = split_blocks(s);
    body.chunks_exact(BLOCK_LEN)
        .fold(NaState::new(fetch64(s, 0)), NaState::step)
        .finish(tail, s.len())
}

/// Registers of the two-seed loop: 64 bytes of state plus the multiplier
/// derived from the seeds.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct SeededState {
    u: u64,
    x: u64,
    y: u64,
    z: u64,
    v: (u64, u64),
    w: (u64, u64),
    mul: u64,
}

impl SeededState {
    fn new(seed0: u64, seed1: u64) -> Self {
        let y = seed1.wrapping_mul(K2).wrapping_add(113);
        let z = shift_mix(y.wrapping_mul(K2)).wrapping_mul(K2);
        let u = seed0.wrapping_sub(z);
        Self {
            u,
            x: seed0.wrapping_mul(K2),
            y,
            z,
            v: (seed0, seed1),
            w: (0, 0),
            mul: K2.wrapping_add(u & 0x82),
        }
    }

    fn step(self, block: &[u8]) -> Self {
        let Self {
            mut u,
            mut x,
            mut y,
            mut z,
            mut v,
            mut w,
            mul,
        } = self;
        let a0 = fetch64(block, 0);
        let a1 = fetch64(block, 8);
        let a2 = fetch64(block, 16);
        let a3 = fetch64(block, 24);
        let a4 = fetch64(block, 32);
        let a5 = fetch64(block, 40);
        let a6 = fetch64(block, 48);
        let a7 = fetch64(block, 56);

        x = x.wrapping_add(a0).wrapping_add(a1);
        y = y.wrapping_add(a2);
        z = z.wrapping_add(a3);
        v.0 = v.0.wrapping_add(a4);
        v.1 = v.1.wrapping_add(a5).wrapping_add(a1);
        w.0 = w.0.wrapping_add(a6);
        w.1 = w.1.wrapping_add(a7);

        x = x.rotate_right(26).wrapping_mul(9);
        y = y.rotate_right(29);
        z = z.wrapping_mul(mul);
        v.0 = v.0.rotate_right(33);
        v.1 = v.1.rotate_right(30);
        w.0 = (w.0 ^ x).wrapping_mul(9);
        z = z.rotate_right(32).wrapping_add(w.1);
        w.1 = w.1.wrapping_add(z);
        z = z.wrapping_mul(9);
        core::mem::swap(&mut u, &mut y);

        z = z.wrapping_add(a0).wrapping_add(a6);
        v.0 = v.0.wrapping_add(a2);
        v.1 = v.1.wrapping_add(a3);
        w.0 = w.0.wrapping_add(a4);
        w.1 = w.1.wrapping_add(a5).wrapping_add(a6);
        x = x.wrapping_add(a1);
        y = y.wrapping_add(a7);

        y = y.wrapping_add(v.0);
        v.0 = v.0.wrapping_add(x.wrapping_sub(y));
        v.1 = v.1.wrapping_add(w.0);
        w.0 = w.0.wrapping_add(v.1);
        w.1 = w.1.wrapping_add(x.wrapping_sub(y));
        x = x.wrapping_add(w.1);
        w.1 = w.1.rotate_right(34);
        core::mem::swap(&mut u, &mut z);

        Self {
            u,
            x,
            y,
            z,
            v,
            w,
            mul,
        }
    }

    fn finish(self, tail: &[u8], len: usize) -> u64 {
        let Self {
            mut u,
            x,
            mut y,
            z,
            mut v,
            mut w,
            mul,
        } = self;

        u = u.wrapping_mul(9);
        v.1 = v.1.rotate_right(28);
        v.0 = v.0.rotate_right(20);
        w.0 = w.0.wrapping_add(((len - 1) & 63) as u64);
        u = u.wrapping_add(y);
        y = y.wrapping_add(u);

        let mut x = y
            .wrapping_sub(x)
            .wrapping_add(v.0)
            .wrapping_add(fetch64(tail, 8))
            .rotate_right(37)
            .wrapping_mul(mul);
        let mut y = (y ^ v.1 ^ fetch64(tail, 48))
            .rotate_right(42)
            .wrapping_mul(mul);
        x ^= w.1.wrapping_mul(9);
        y = y.wrapping_add(v.0).wrapping_add(fetch64(tail, 40));
        let z = z.wrapping_add(w.0).rotate_right(33).wrapping_mul(mul);
        let v = weak_hash_32_at(tail, 0, v.1.wrapping_mul(mul), x.wrapping_add(w.0));
        let w = weak_hash_32_at(
            tail,
            32,
            z.wrapping_add(w.1),
            y.wrapping_add(fetch64(tail, 16)),
        );

        h(
            hash_len_16(v.0.wrapping_add(x), w.0 ^ y, mul)
                .wrapping_add(z)
                .wrapping_sub(u),
            h(v.1.wrapping_add(y), w.1.wrapping_add(z), K2, 30) ^ x,
            K2,
            31,
        )
    }
}

/// The two-seed loop.  `s` must be longer than 64 bytes.
pub(crate) fn hash_len_65_plus_with_seeds(s: &[u8], seed0: u64, seed1: u64) -> u64 {
    let (body, tail) = split_blocks(s);
    body.chunks_exact(BLOCK_LEN)
        .fold(SeededState::new(seed0, seed1), SeededState::step)
        .finish(tail, s.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ramp(len: usize) -> Vec<u8> {
        (0..len).map(|i| (i * 131 + 17) as u8).collect()
    }

    #[test]
    fn split_leaves_one_to_sixty_four_bytes() {
        for len in 65..=300usize {
            let s = vec![0u8; len];
            let (body, tail) = split_blocks(&s);
            assert_eq!(tail.len(), BLOCK_LEN);
            assert_eq!(body.len() % BLOCK_LEN, 0);
            assert!(body.len() >= BLOCK_LEN);
            let remaining = len - body.len();
            assert!((1..=BLOCK_LEN).contains(&remaining), "len {}", len);
        }
    }

    #[test]
    fn exact_multiple_keeps_last_block_for_finish() {
        let s = vec![0u8; 128];
        let (body, tail) = split_blocks(&s);
        assert_eq!(body.len(), 64);
        assert_eq!(tail.as_ptr(), s[64..].as_ptr());
    }

    #[test]
    fn na_step_swaps_x_and_z() {
        let block = ramp(64);
        let state = NaState::new(fetch64(&block, 0));
        let next = state.step(&block);

        let x = state
            .x
            .wrapping_add(state.y)
            .wrapping_add(fetch64(&block, 8))
            .rotate_right(37)
            .wrapping_mul(K1);
        let z = state.z.rotate_right(33).wrapping_mul(K1);
        assert_eq!(next.z, x);
        assert_eq!(next.x, z);
    }

    #[test]
    fn na_step_is_pure() {
        let block = ramp(64);
        let state = NaState::new(7);
        assert_eq!(state.step(&block), state.step(&block));
        assert_ne!(state.step(&block), state);
    }

    #[test]
    fn seeded_state_from_seeds() {
        let state = SeededState::new(81, 0);
        assert_eq!(state.v, (81, 0));
        assert_eq!(state.w, (0, 0));
        assert_eq!(state.y, 113);
        assert_eq!(state.x, 81u64.wrapping_mul(K2));
        assert_eq!(state.u, 81u64.wrapping_sub(state.z));
        assert_eq!(state.mul, K2 + (state.u & 0x82));
    }

    #[test]
    fn seeded_step_keeps_multiplier() {
        let block = ramp(64);
        let state = SeededState::new(1, 2);
        let next = state.step(&block);
        assert_eq!(next.mul, state.mul);
        assert_ne!(next, state);
    }

    #[test]
    fn every_block_reaches_the_result() {
        let s = ramp(320);
        let base = hash_len_65_plus_with_seeds(&s, 81, 0);
        let base_na = hash_len_65_plus(&s);
        for i in (0..320).step_by(37) {
            let mut t = s.clone();
            t[i] ^= 0x10;
            assert_ne!(hash_len_65_plus_with_seeds(&t, 81, 0), base, "byte {}", i);
            assert_ne!(hash_len_65_plus(&t), base_na, "byte {}", i);
        }
    }
}
