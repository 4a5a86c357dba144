//! Cryptographic error types.

use thiserror::Error;

/// Errors that can occur during envelope encryption or token hashing.
#[derive(Debug, Error)]
pub enum CryptoError {
    /// A key was not exactly 32 bytes.
    #[error("invalid key length: expected {expected}, got {actual}")]
    InvalidKeyLength {
        /// Expected length in bytes (always 32).
        expected: usize,
        /// Actual length in bytes.
        actual: usize,
    },

    /// AEAD decryption failed: tampered ciphertext, wrong key, wrong nonce,
    /// or mismatched associated data. Deliberately does not distinguish
    /// which, to avoid leaking an oracle.
    #[error("decryption failed")]
    DecryptionFailed,

    /// A value claiming to be an envelope did not have the expected shape
    /// or fields.
    #[error("invalid envelope: {0}")]
    InvalidEnvelope(String),

    /// The process RNG could not be used.
    #[error("RNG not initialized")]
    RNGNotInitialized,
}

/// Result type for cryptographic operations.
pub type CryptoResult<T> = Result<T, CryptoError>;
