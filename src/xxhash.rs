//! XXH64.

use crate::bits::{fetch32, fetch64};

pub const PRIME64_1: u64 = 0x9E3779B185EBCA87;
pub const PRIME64_2: u64 = 0xC2B2AE3D27D4EB4F;
pub const PRIME64_3: u64 = 0x165667B19E3779F9;
pub const PRIME64_4: u64 = 0x85EBCA77C2B2AE63;
pub const PRIME64_5: u64 = 0x27D4EB2F165667C5;

/// Bytes consumed per iteration of the four-lane loop.
const STRIPE_LEN: usize = 32;

#[inline(always)]
const fn round(acc: u64, lane: u64) -> u64 {
    acc.wrapping_add(lane.wrapping_mul(PRIME64_2))
        .rotate_left(31)
        .wrapping_mul(PRIME64_1)
}

#[inline(always)]
const fn merge_round(acc: u64, lane: u64) -> u64 {
    (acc ^ round(0, lane))
        .wrapping_mul(PRIME64_1)
        .wrapping_add(PRIME64_4)
}

/// Final scramble applied to every XXH64 output.
#[inline(always)]
pub const fn avalanche(mut h: u64) -> u64 {
    h ^= h >> 33;
    h = h.wrapping_mul(PRIME64_2);
    h ^= h >> 29;
    h = h.wrapping_mul(PRIME64_3);
    h ^= h >> 32;
    h
}

/// Hashes `s` with XXH64 under `seed`.
pub fn xxhash64(s: &[u8], seed: u64) -> u64 {
    let len = s.len();
    let mut offset = 0;

    let mut h = if len >= STRIPE_LEN {
        let mut lanes = [
            seed.wrapping_add(PRIME64_1).wrapping_add(PRIME64_2),
            seed.wrapping_add(PRIME64_2),
            seed,
            seed.wrapping_sub(PRIME64_1),
        ];
        while offset + STRIPE_LEN <= len {
            for (i, lane) in lanes.iter_mut().enumerate() {
                *lane = round(*lane, fetch64(s, offset + i * 8));
            }
            offset += STRIPE_LEN;
        }

        let [v1, v2, v3, v4] = lanes;
        let h = v1
            .rotate_left(1)
            .wrapping_add(v2.rotate_left(7))
            .wrapping_add(v3.rotate_left(12))
            .wrapping_add(v4.rotate_left(18));
        lanes.iter().fold(h, |h, &lane| merge_round(h, lane))
    } else {
        seed.wrapping_add(PRIME64_5)
    };

    h = h.wrapping_add(len as u64);

    while offset + 8 <= len {
        h ^= round(0, fetch64(s, offset));
        h = h.rotate_left(27).wrapping_mul(PRIME64_1).wrapping_add(PRIME64_4);
        offset += 8;
    }

    if offset + 4 <= len {
        h ^= fetch32(s, offset).wrapping_mul(PRIME64_1);
        h = h.rotate_left(23).wrapping_mul(PRIME64_2).wrapping_add(PRIME64_3);
        offset += 4;
    }

    for &byte in &s[offset..] {
        h ^= (byte as u64).wrapping_mul(PRIME64_5);
        h = h.rotate_left(11).wrapping_mul(PRIME64_1);
    }

    avalanche(h)
}

/// Hashes a single 64-bit key, equal to `xxhash64(&key.to_le_bytes(), seed)`
/// without touching memory.
#[inline]
pub const fn xxhash64_index(key: u64, seed: u64) -> u64 {
    let mut h = seed.wrapping_add(PRIME64_5).wrapping_add(8);
    h ^= round(0, key);
    h = h.rotate_left(27).wrapping_mul(PRIME64_1).wrapping_add(PRIME64_4);
    avalanche(h)
}
