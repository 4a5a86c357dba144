//! SHA-256 token hashing with constant-time verification.
//!
//! Raw bearer tokens are never persisted: only `hash_token(raw)` is stored,
//! and `verify_token_hash` compares in constant time so a timing side
//! channel cannot be used to guess a token byte by byte.

use rand::RngCore;
use sha2::{Digest, Sha256};
use subtle::ConstantTimeEq;

/// Generates a fresh raw token: 64 hex characters from 32 CSPRNG bytes.
pub fn generate_raw_token() -> String {
    let mut bytes = [0u8; 32];
    rand::thread_rng().fill_bytes(&mut bytes);
    hex::encode(bytes)
}

/// Hashes a raw token with SHA-256, hex-encoded.
pub fn hash_token(raw: &str) -> String {
    sha256_hex(raw.as_bytes())
}

/// SHA-256 of arbitrary bytes, hex-encoded. Shared by token hashing here
/// and by `masc-audit`'s hash-chained entries.
pub fn sha256_hex(data: &[u8]) -> String {
    hex::encode(Sha256::digest(data))
}

/// Verifies `raw` against a stored `hash_hex`, in constant time.
///
/// Compares the SHA-256 digest bytes directly rather than the hex strings,
/// so an attacker who can observe comparison timing cannot narrow down the
/// token digit by digit. A malformed `hash_hex` (wrong length, not hex)
/// never matches.
pub fn verify_token_hash(raw: &str, hash_hex: &str) -> bool {
    let Ok(expected) = hex::decode(hash_hex) else {
        return false;
    };
    let actual = Sha256::digest(raw.as_bytes());
    actual.as_slice().ct_eq(&expected).into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_token_is_64_hex_chars() {
        let token = generate_raw_token();
        assert_eq!(token.len(), 64);
        assert!(token.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn verify_succeeds_for_exact_token_only() {
        let raw = generate_raw_token();
        let hash = hash_token(&raw);
        assert!(verify_token_hash(&raw, &hash));
        assert!(!verify_token_hash(&raw[..63], &hash));
        assert!(!verify_token_hash(&format!("{raw}x"), &hash));
    }

    #[test]
    fn substring_never_matches() {
        let raw = generate_raw_token();
        let hash = hash_token(&raw);
        assert!(!verify_token_hash(&raw[1..], &hash));
    }

    #[test]
    fn malformed_hash_never_matches() {
        assert!(!verify_token_hash("anything", "not-hex"));
    }
}
