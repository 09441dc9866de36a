//! FarmHash64, bit-compatible with Google's `farmhashxo::Hash64` and the
//! `farmhashuo` seeded variants.
//!
//! Short inputs go through closed-form mixers specialized per length range,
//! longer ones through a 64-byte block loop.  The length ranges and the path
//! each one takes are fixed by the reference and must not be merged:
//!
//! | length  | path                                         |
//! |---------|----------------------------------------------|
//! | 0–16    | byte/word closed forms                       |
//! | 17–32   | first and last 16 bytes                      |
//! | 33–64   | two 32-byte windows                          |
//! | 65–96   | three 32-byte windows, the last chained      |
//! | 97–256  | single-seed block loop                       |
//! | 257+    | two-seed block loop, seeds `(81, 0)`         |

mod block;
mod medium;
mod mix;
mod short;

// Primes between 2^63 and 2^64.
pub const K0: u64 = 0xc3a5c85c97cb3127;
pub const K1: u64 = 0xb492b66fbe98f273;
pub const K2: u64 = 0x9ae16a3b2f90404f;

/// Multiplier of the seeded short-input combiner.
pub const KMUL: u64 = 0x9ddfea08eb382d69;

/// Seed used by the unseeded entry point.
pub const SEED: u64 = 81;

/// Hashes `s` with FarmHash64.
///
/// `farmhash64(&[]) == K2`.
pub fn farmhash64(s: &[u8]) -> u64 {
    match s.len() {
        0..=16 => short::hash_len_0_to_16(s),
        17..=32 => short::hash_len_17_to_32(s),
        33..=64 => medium::hash_len_33_to_64(s),
        65..=96 => medium::hash_len_65_to_96(s),
        97..=256 => block::hash_len_65_plus(s),
        _ => block::hash_len_65_plus_with_seeds(s, SEED, 0),
    }
}

/// Hashes `s` with FarmHash64 under two seeds.
///
/// Inputs of up to 64 bytes are hashed unseeded and the seeds folded in
/// afterwards; longer inputs feed the seeds into the block loop state.
pub fn farmhash64_with_seeds(s: &[u8], seed0: u64, seed1: u64) -> u64 {
    if s.len() <= 64 {
        return mix::hash_len_16_kmul(na_hash64(s).wrapping_sub(seed0), seed1);
    }
    block::hash_len_65_plus_with_seeds(s, seed0, seed1)
}

/// Hashes `s` with FarmHash64 under a single seed.
pub fn farmhash64_with_seed(s: &[u8], seed: u64) -> u64 {
    if s.len() <= 64 {
        farmhash64_with_seeds(s, K2, seed)
    } else {
        farmhash64_with_seeds(s, 0, seed)
    }
}

/// The older unseeded FarmHash64 that the seeded entry points build on.  It
/// only differs from [`farmhash64`] from 33 bytes up.
fn na_hash64(s: &[u8]) -> u64 {
    match s.len() {
        0..=16 => short::hash_len_0_to_16(s),
        17..=32 => short::hash_len_17_to_32(s),
        33..=64 => medium::na_hash_len_33_to_64(s),
        _ => block::hash_len_65_plus(s),
    }
}
