use crate::{farmhash, fnv1a, xxhash};

/// One hash algorithm and its entry points.
pub struct Family {
    pub name: &'static str,

    /// The unseeded entry point, using the family's default seed(s).
    pub hash: fn(&[u8]) -> u64,

    /// The seeded entry point, if the family takes a seed.
    pub hash_with_seed: Option<fn(&[u8], u64) -> u64>,
}

impl Family {
    /// Hashes with `seed` when one is given and the family takes it, otherwise
    /// with the defaults.
    pub fn hash_seeded(&self, s: &[u8], seed: Option<u64>) -> u64 {
        match (seed, self.hash_with_seed) {
            (Some(seed), Some(hash_with_seed)) => hash_with_seed(s, seed),
            _ => (self.hash)(s),
        }
    }

    /// Case-insensitive substring match on the name.
    pub fn matches(&self, filter: &str) -> bool {
        self.name.to_lowercase().contains(&filter.to_lowercase())
    }
}

pub const FAMILIES: &[Family] = &[
    Family {
        name: "FarmHash64",
        hash: farmhash::farmhash64,
        hash_with_seed: Some(farmhash::farmhash64_with_seed),
    },
    Family {
        name: "XXH64",
        hash: |s| xxhash::xxhash64(s, 0),
        hash_with_seed: Some(xxhash::xxhash64),
    },
    Family {
        name: "FNV1a (64-bit)",
        hash: fnv1a::fnv1a64,
        hash_with_seed: None,
    },
];
