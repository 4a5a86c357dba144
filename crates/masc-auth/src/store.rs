//! Persisted token lifecycle: create, verify, and permission-check against
//! the role/capability matrix.

use std::sync::Arc;

use masc_core::Clock;
use masc_crypto::{generate_raw_token, hash_token, verify_token_hash};
use masc_storage::{Backend, StorageError};

use crate::error::{AuthError, AuthResult};
use crate::matrix::role_has_capability;
use crate::types::{AuthConfig, Capability, Credential, Role};

const KEY_CONFIG: &str = "auth:config";
const NS_CREDENTIALS: &str = "auth:credentials";

fn credential_key(agent: &str) -> String {
    format!("{NS_CREDENTIALS}:{agent}")
}

/// Owns the room's [`AuthConfig`] and agent [`Credential`]s, backed by a
/// [`Backend`].
pub struct AuthStore {
    backend: Arc<dyn Backend>,
    clock: Arc<dyn Clock>,
}

impl AuthStore {
    /// Creates a store over `backend`, using `clock` for issuance and
    /// expiry timestamps.
    pub fn new(backend: Arc<dyn Backend>, clock: Arc<dyn Clock>) -> Self {
        Self { backend, clock }
    }

    /// Loads the room's auth configuration, falling back to
    /// [`AuthConfig::default`] if none has been written yet.
    pub async fn load_config(&self) -> AuthResult<AuthConfig> {
        match self.backend.get(KEY_CONFIG).await {
            Ok(bytes) => serde_json::from_slice(&bytes)
                .map_err(|e| AuthError::Storage(StorageError::IOError(e.to_string()))),
            Err(StorageError::NotFound(_)) => Ok(AuthConfig::default()),
            Err(e) => Err(AuthError::Storage(e)),
        }
    }

    async fn save_config(&self, config: &AuthConfig) -> AuthResult<()> {
        let bytes = serde_json::to_vec(config)
            .map_err(|e| AuthError::Storage(StorageError::IOError(e.to_string())))?;
        self.backend.set(KEY_CONFIG, bytes).await?;
        Ok(())
    }

    /// Enables auth enforcement, optionally requiring a token for every
    /// capability check.
    pub async fn enable_auth(&self, require_token: bool) -> AuthResult<()> {
        let mut config = self.load_config().await?;
        config.enabled = true;
        config.require_token = require_token;
        self.save_config(&config).await
    }

    /// Disables auth enforcement. Existing credentials are left on disk
    /// and are not revoked.
    pub async fn disable_auth(&self) -> AuthResult<()> {
        let mut config = self.load_config().await?;
        config.enabled = false;
        self.save_config(&config).await
    }

    /// Issues a fresh credential for `agent` with `role`.
    ///
    /// Returns the raw token once — it is never stored — alongside the
    /// persisted [`Credential`].
    pub async fn create_token(&self, agent: &str, role: Role) -> AuthResult<(String, Credential)> {
        let config = self.load_config().await?;
        let raw = generate_raw_token();
        let now = self.clock.now_secs();
        let credential = Credential {
            agent_name: agent.to_string(),
            role,
            token_hash: hash_token(&raw),
            created_at: now,
            expires_at: now + config.token_expiry_hours.saturating_mul(3600),
        };
        let bytes = serde_json::to_vec(&credential)
            .map_err(|e| AuthError::Storage(StorageError::IOError(e.to_string())))?;
        self.backend.set(&credential_key(agent), bytes).await?;
        Ok((raw, credential))
    }

    async fn load_credential(&self, agent: &str) -> AuthResult<Credential> {
        match self.backend.get(&credential_key(agent)).await {
            Ok(bytes) => serde_json::from_slice(&bytes)
                .map_err(|e| AuthError::Storage(StorageError::IOError(e.to_string()))),
            Err(StorageError::NotFound(_)) => Err(AuthError::AgentNotFound(agent.to_string())),
            Err(e) => Err(AuthError::Storage(e)),
        }
    }

    /// Verifies `raw` against the credential on file for `agent`.
    ///
    /// Fails with [`AuthError::InvalidToken`] if the hash does not match,
    /// or [`AuthError::ExpiredToken`] if it matched but has expired.
    pub async fn verify_token(&self, agent: &str, raw: &str) -> AuthResult<Credential> {
        let credential = self.load_credential(agent).await?;
        if !verify_token_hash(raw, &credential.token_hash) {
            return Err(AuthError::InvalidToken(agent.to_string()));
        }
        if self.clock.now_secs() >= credential.expires_at {
            return Err(AuthError::ExpiredToken(agent.to_string()));
        }
        Ok(credential)
    }

    /// Checks whether `agent` may perform `capability`.
    ///
    /// Short-circuits to `Ok(())` when auth is disabled. Otherwise requires
    /// a token ([`AuthError::Unauthorized`] if none was supplied) and a
    /// role that grants the capability ([`AuthError::Forbidden`]
    /// otherwise).
    pub async fn check_permission(
        &self,
        agent: &str,
        raw_token: Option<&str>,
        capability: Capability,
    ) -> AuthResult<()> {
        let config = self.load_config().await?;
        if !config.enabled {
            return Ok(());
        }
        let Some(raw) = raw_token else {
            return Err(AuthError::Unauthorized);
        };
        let credential = self.verify_token(agent, raw).await?;
        if role_has_capability(credential.role, capability) {
            Ok(())
        } else {
            Err(AuthError::Forbidden {
                agent: agent.to_string(),
                role: credential.role,
                capability,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use masc_core::SystemClock;
    use masc_storage::MemoryBackend;

    fn store() -> AuthStore {
        AuthStore::new(Arc::new(MemoryBackend::new()), Arc::new(SystemClock))
    }

    #[tokio::test]
    async fn disabled_auth_allows_everything() {
        let store = store();
        assert!(
            store
                .check_permission("anyone", None, Capability::Approve)
                .await
                .is_ok()
        );
    }

    #[tokio::test]
    async fn worker_can_claim_but_not_approve() {
        let store = store();
        store.enable_auth(true).await.unwrap();
        let (raw, _) = store.create_token("w1", Role::Worker).await.unwrap();
        assert!(
            store
                .check_permission("w1", Some(&raw), Capability::ClaimTask)
                .await
                .is_ok()
        );
        assert!(matches!(
            store
                .check_permission("w1", Some(&raw), Capability::Approve)
                .await,
            Err(AuthError::Forbidden { .. })
        ));
    }

    #[tokio::test]
    async fn missing_token_is_unauthorized() {
        let store = store();
        store.enable_auth(true).await.unwrap();
        store.create_token("w1", Role::Worker).await.unwrap();
        assert!(matches!(
            store
                .check_permission("w1", None, Capability::ClaimTask)
                .await,
            Err(AuthError::Unauthorized)
        ));
    }

    #[tokio::test]
    async fn wrong_token_is_invalid() {
        let store = store();
        store.enable_auth(true).await.unwrap();
        store.create_token("w1", Role::Worker).await.unwrap();
        assert!(matches!(
            store.verify_token("w1", "0".repeat(64).as_str()).await,
            Err(AuthError::InvalidToken(_))
        ));
    }

    #[tokio::test]
    async fn disable_auth_keeps_credentials() {
        let store = store();
        store.enable_auth(true).await.unwrap();
        let (raw, _) = store.create_token("w1", Role::Worker).await.unwrap();
        store.disable_auth().await.unwrap();
        assert!(store.verify_token("w1", &raw).await.is_ok());
        assert!(
            store
                .check_permission("w1", None, Capability::Approve)
                .await
                .is_ok()
        );
    }
}
