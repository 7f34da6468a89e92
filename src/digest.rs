//! Content digests used as the round-trip correctness oracle.
//!
//! The digest is the sole arbiter of whether a decode reproduced the
//! encoder's input: two images are considered identical iff their plane
//! bytes hash to the same value. A truncated BLAKE3 hash is used; the
//! contract only requires collision resistance adequate for round-trip
//! testing, plus stability across encoder/decoder instances.

use std::fmt;

/// Digest length in bytes (128 bits).
pub const DIGEST_LEN: usize = 16;

/// A 128-bit content digest.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Digest([u8; DIGEST_LEN]);

impl Digest {
    /// Wrap raw digest bytes.
    #[must_use]
    pub const fn from_bytes(bytes: [u8; DIGEST_LEN]) -> Self {
        Self(bytes)
    }

    /// Raw digest bytes.
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; DIGEST_LEN] {
        &self.0
    }

    /// Lowercase-hex rendering, used to name persisted codestream files.
    #[must_use]
    pub fn to_hex(&self) -> String {
        self.0.iter().map(|b| format!("{b:02x}")).collect()
    }
}

impl fmt::Display for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl fmt::Debug for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Digest({})", self.to_hex())
    }
}

/// Incremental digest computation over a sequence of byte regions.
pub struct DigestBuilder {
    hasher: blake3::Hasher,
}

impl DigestBuilder {
    /// Start a new digest.
    #[must_use]
    pub fn new() -> Self {
        Self {
            hasher: blake3::Hasher::new(),
        }
    }

    /// Feed a byte region into the digest.
    pub fn update(&mut self, bytes: &[u8]) -> &mut Self {
        self.hasher.update(bytes);
        self
    }

    /// Finish and return the truncated digest.
    #[must_use]
    pub fn finish(&self) -> Digest {
        let full = self.hasher.finalize();
        let mut out = [0u8; DIGEST_LEN];
        out.copy_from_slice(&full.as_bytes()[..DIGEST_LEN]);
        Digest(out)
    }
}

impl Default for DigestBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn digest_bytes(bytes: &[u8]) -> Digest {
        DigestBuilder::new().update(bytes).finish()
    }

    #[test]
    fn digest_is_deterministic() {
        let a = digest_bytes(b"plane bytes");
        let b = digest_bytes(b"plane bytes");
        assert_eq!(a, b);
    }

    #[test]
    fn single_byte_difference_changes_digest() {
        let a = digest_bytes(b"plane bytes");
        let b = digest_bytes(b"plane byteS");
        assert_ne!(a, b);
    }

    #[test]
    fn incremental_matches_contiguous() {
        let whole = digest_bytes(b"plane bytes");
        let split = DigestBuilder::new()
            .update(b"plane ")
            .update(b"bytes")
            .finish();
        assert_eq!(whole, split);
    }

    #[test]
    fn hex_is_lowercase_and_32_chars() {
        let hex = digest_bytes(&[0xAB; 7]).to_hex();
        assert_eq!(hex.len(), DIGEST_LEN * 2);
        assert_eq!(hex, hex.to_lowercase());
    }
}
