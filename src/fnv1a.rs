/// 64-bit FNV offset basis.
pub const OFFSET_BASIS: u64 = 0xcbf29ce484222325;

/// 64-bit FNV prime.
pub const PRIME: u64 = 0x100000001b3;

/// The FNV1a hash, 64-bit variant.
///
/// Not a block-based hash: every byte is xored in and multiplied through on
/// its own.
pub fn fnv1a64(s: &[u8]) -> u64 {
    s.iter().fold(OFFSET_BASIS, |state, &byte| {
        (state ^ byte as u64).wrapping_mul(PRIME)
    })
}

/// Folds a whole 64-bit key in as a single xor-multiply step.
#[inline]
pub const fn fnv1a64_index(key: u64) -> u64 {
    (OFFSET_BASIS ^ key).wrapping_mul(PRIME)
}
