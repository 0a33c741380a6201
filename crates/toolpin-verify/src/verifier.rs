use crate::error::{Result, VerificationError};
use crate::hasher::{Hasher, Sha256Hasher};

/// Incremental SHA-256 check against an expected hex digest.
#[derive(Debug, Clone)]
pub struct Verifier<H = Sha256Hasher> {
    expected: String,
    hasher: H,
}

impl Verifier<Sha256Hasher> {
    pub fn new(expected_hex: &str) -> Self {
        Self::with_hasher(expected_hex, Sha256Hasher::new())
    }
}

impl<H: Hasher> Verifier<H> {
    pub fn with_hasher(expected_hex: &str, hasher: H) -> Self {
        Self {
            expected: expected_hex.to_ascii_lowercase(),
            hasher,
        }
    }

    pub fn update(&mut self, chunk: &[u8]) {
        self.hasher.update(chunk);
    }

    /// Lowercase hex digest of everything fed, if it matches.
    pub fn finish(self) -> Result<String> {
        let actual = hex::encode(self.hasher.finalize());
        if actual == self.expected {
            Ok(actual)
        } else {
            Err(VerificationError::Mismatch {
                expected: self.expected,
                actual,
            })
        }
    }
}
