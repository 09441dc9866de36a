//! Boundary check for callers that carry a buffer and a separate length.
//!
//! The hash functions take `&[u8]` and trust its length.  Code holding a
//! `(buffer, length)` pair validates it here once, then hashes the returned
//! slice.

use thiserror::Error as ThisError;

///
/// LengthError
///

#[derive(Clone, Copy, Debug, Eq, PartialEq, ThisError)]
pub enum LengthError {
    #[error("length {length} exceeds the {available} bytes available")]
    TooLong { length: usize, available: usize },
}

/// Returns the first `length` bytes of `bytes`.
pub fn prefix(bytes: &[u8], length: usize) -> Result<&[u8], LengthError> {
    bytes.get(..length).ok_or(LengthError::TooLong {
        length,
        available: bytes.len(),
    })
}
