// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Upload integrity — SHA-256 fingerprints for stored document bytes.

use druckhaus_core::error::DruckhausError;
use sha2::{Digest, Sha256};

/// Compute the SHA-256 hash of `data` and return it as a lowercase hex string.
///
/// Recorded when a blob is written so that a later download can be checked
/// against what the customer originally uploaded.
pub fn hash_bytes(data: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hex::encode(hasher.finalize())
}

/// Verify that `data` matches the expected SHA-256 hex digest.
pub fn verify_hash(data: &[u8], expected_hex: &str) -> Result<(), DruckhausError> {
    let actual = hash_bytes(data);
    if actual == expected_hex {
        Ok(())
    } else {
        Err(DruckhausError::IntegrityMismatch {
            expected: expected_hex.to_owned(),
            actual,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// SHA-256 of the empty byte slice (well-known constant).
    const EMPTY_SHA256: &str =
        "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855";

    #[test]
    fn hash_empty_input() {
        assert_eq!(hash_bytes(b""), EMPTY_SHA256);
    }

    #[test]
    fn verify_matching_hash() {
        let data = b"druckhaus order attachment";
        let hex = hash_bytes(data);
        assert!(verify_hash(data, &hex).is_ok());
    }

    #[test]
    fn verify_mismatched_hash() {
        let result = verify_hash(b"a", "0000");
        match result.unwrap_err() {
            DruckhausError::IntegrityMismatch { expected, actual } => {
                assert_eq!(expected, "0000");
                assert_eq!(actual, hash_bytes(b"a"));
            }
            other => panic!("unexpected error variant: {other}"),
        }
    }
}
