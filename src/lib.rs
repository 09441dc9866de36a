//! Fast, deterministic, non-cryptographic 64-bit hashes over byte slices.
//!
//! Three independent families, each bit-compatible with its reference:
//!
//! - [`farmhash64`]: FarmHash64, with length-specialized short paths and a
//!   64-byte block loop.  Seeded through [`farmhash64_with_seed`] and
//!   [`farmhash64_with_seeds`].
//! - [`xxhash64`]: XXH64.
//! - [`fnv1a64`]: 64-bit FNV-1a.
//!
//! Every function is a pure one-shot function of its input and seed(s).  None
//! of them is suitable where collision or preimage resistance matters.
//!
//! XXH64 and FNV-1a also have an `_index` variant hashing a single `u64` key
//! without going through memory.

mod bits;
pub mod family;
pub mod farmhash;
pub mod fnv1a;
pub mod input;
pub mod stats;
pub mod xxhash;

pub use farmhash::{farmhash64, farmhash64_with_seed, farmhash64_with_seeds};
pub use fnv1a::{fnv1a64, fnv1a64_index};
pub use input::LengthError;
pub use xxhash::{xxhash64, xxhash64_index};
