//! Cryptographic primitives for masc-mcp: an AES-256-GCM envelope for
//! at-rest values, and SHA-256 token hashing with constant-time
//! verification for bearer credentials.
//!
//! ```rust
//! use masc_crypto::prelude::*;
//! use serde_json::json;
//!
//! let key = [7u8; 32];
//! let env = encrypt_json(&key, "ctx-1", &json!({"tok": "s"})).unwrap();
//! let recovered = decrypt_envelope(&key, &env).unwrap();
//! assert_eq!(recovered, json!({"tok": "s"}));
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]

pub mod envelope;
pub mod error;
pub mod prelude;
pub mod token;

pub use envelope::{
    Envelope, EncryptionStatus, decrypt_envelope, encrypt_json, generate_key_hex, get_status,
    is_encrypted_json,
};
pub use error::{CryptoError, CryptoResult};
pub use token::{generate_raw_token, hash_token, sha256_hex, verify_token_hash};
