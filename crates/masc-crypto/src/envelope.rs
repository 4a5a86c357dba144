//! AEAD envelope encryption for at-rest persisted values.
//!
//! Values are encrypted with AES-256-GCM under a 32-byte key and wrapped in
//! a self-describing [`Envelope`] so a reader can tell an encrypted value
//! from a plain one without consulting a schema.

use aes_gcm::aead::{Aead, KeyInit, Payload};
use aes_gcm::{Aes256Gcm, Key, Nonce};
use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use rand::RngCore;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{CryptoError, CryptoResult};

const KEY_LEN: usize = 32;
const NONCE_LEN: usize = 12;
const ENVELOPE_VERSION: u8 = 1;

/// The on-disk shape of an AEAD-encrypted value.
///
/// Field names and the `_encrypted` marker match the persisted layout: a
/// plain JSON object never happens to carry `_encrypted: true` alongside an
/// integer `v`, so [`is_encrypted_json`] can tell the two apart without a
/// schema.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Envelope {
    /// Always `true`; the detection marker.
    #[serde(rename = "_encrypted")]
    pub encrypted: bool,
    /// Envelope format version. Currently always `1`.
    pub v: u8,
    /// Base64-encoded 12-byte nonce, unique per encryption under `key`.
    pub nonce: String,
    /// Base64-encoded ciphertext, including the GCM authentication tag.
    pub ct: String,
    /// Associated data bound to the ciphertext (e.g. an agent name). Not
    /// secret, but tampering with it fails decryption.
    pub adata: String,
}

fn check_key(key: &[u8]) -> CryptoResult<()> {
    if key.len() != KEY_LEN {
        return Err(CryptoError::InvalidKeyLength {
            expected: KEY_LEN,
            actual: key.len(),
        });
    }
    Ok(())
}

/// Encrypts `json` under `key`, binding `adata` as associated data.
///
/// `key` must be exactly 32 bytes. The nonce is drawn fresh from the
/// process CSPRNG on every call, so two encryptions of identical plaintext
/// under the same key never produce the same nonce or ciphertext.
pub fn encrypt_json(key: &[u8], adata: &str, json: &Value) -> CryptoResult<Envelope> {
    check_key(key)?;
    let cipher = Aes256Gcm::new(Key::<Aes256Gcm>::from_slice(key));

    let mut nonce_bytes = [0u8; NONCE_LEN];
    rand::thread_rng().fill_bytes(&mut nonce_bytes);
    let nonce = Nonce::from_slice(&nonce_bytes);

    let plaintext = serde_json::to_vec(json)
        .map_err(|e| CryptoError::InvalidEnvelope(format!("plaintext not serializable: {e}")))?;

    let ct = cipher
        .encrypt(
            nonce,
            Payload {
                msg: &plaintext,
                aad: adata.as_bytes(),
            },
        )
        .map_err(|_| CryptoError::DecryptionFailed)?;

    Ok(Envelope {
        encrypted: true,
        v: ENVELOPE_VERSION,
        nonce: BASE64.encode(nonce_bytes),
        ct: BASE64.encode(ct),
        adata: adata.to_string(),
    })
}

/// Decrypts an [`Envelope`] produced by [`encrypt_json`].
///
/// Fails with [`CryptoError::DecryptionFailed`] if the ciphertext was
/// tampered with, the wrong key was supplied, or `env.adata` does not match
/// the value bound at encryption time. The error does not distinguish
/// which, since none of those are meaningful to tell apart for a caller.
pub fn decrypt_envelope(key: &[u8], env: &Envelope) -> CryptoResult<Value> {
    check_key(key)?;
    if env.v != ENVELOPE_VERSION {
        return Err(CryptoError::InvalidEnvelope(format!(
            "unsupported envelope version {}",
            env.v
        )));
    }

    let nonce_bytes = BASE64
        .decode(&env.nonce)
        .map_err(|_| CryptoError::InvalidEnvelope("nonce is not valid base64".into()))?;
    if nonce_bytes.len() != NONCE_LEN {
        return Err(CryptoError::InvalidEnvelope(format!(
            "nonce must be {NONCE_LEN} bytes, got {}",
            nonce_bytes.len()
        )));
    }
    let ct_bytes = BASE64
        .decode(&env.ct)
        .map_err(|_| CryptoError::InvalidEnvelope("ct is not valid base64".into()))?;

    let cipher = Aes256Gcm::new(Key::<Aes256Gcm>::from_slice(key));
    let nonce = Nonce::from_slice(&nonce_bytes);

    let plaintext = cipher
        .decrypt(
            nonce,
            Payload {
                msg: &ct_bytes,
                aad: env.adata.as_bytes(),
            },
        )
        .map_err(|_| CryptoError::DecryptionFailed)?;

    serde_json::from_slice(&plaintext)
        .map_err(|e| CryptoError::InvalidEnvelope(format!("plaintext not valid JSON: {e}")))
}

/// Detects the envelope shape by its `_encrypted: true, v: <int>` markers,
/// without requiring a full [`Envelope`] deserialization to succeed.
pub fn is_encrypted_json(j: &Value) -> bool {
    let Some(obj) = j.as_object() else {
        return false;
    };
    matches!(obj.get("_encrypted"), Some(Value::Bool(true))) && obj.get("v").is_some_and(Value::is_i64)
}

/// Generates a fresh 32-byte key, hex-encoded (64 hex characters).
pub fn generate_key_hex() -> String {
    let mut key = [0u8; KEY_LEN];
    rand::thread_rng().fill_bytes(&mut key);
    hex::encode(key)
}

/// Coarse encryption status for diagnostics/admin tooling.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EncryptionStatus {
    /// Whether envelope encryption is enabled for the room.
    pub enabled: bool,
    /// Whether the process RNG is usable (always `true` once this process
    /// has started, since `encrypt_json` would otherwise fail outright).
    pub rng_initialized: bool,
    /// `"present"` if a usable 32-byte key is configured, else `"absent"`.
    pub key_status: String,
}

/// Reports the current encryption configuration state.
pub fn get_status(enabled: bool, key: Option<&[u8]>) -> EncryptionStatus {
    let key_status = match key {
        Some(k) if k.len() == KEY_LEN => "present",
        Some(_) => "invalid_length",
        None => "absent",
    };
    EncryptionStatus {
        enabled,
        rng_initialized: true,
        key_status: key_status.to_string(),
    }
}
