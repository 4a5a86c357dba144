//! Prelude module - commonly used types for convenient import.
//!
//! ```rust
//! use masc_crypto::prelude::*;
//! ```

pub use crate::{
    CryptoError, CryptoResult, EncryptionStatus, Envelope, decrypt_envelope, encrypt_json,
    generate_key_hex, generate_raw_token, get_status, hash_token, is_encrypted_json,
    verify_token_hash,
};
