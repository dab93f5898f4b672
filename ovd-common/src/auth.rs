//! Auth gate over the injectable key-value store
//!
//! Login and signup are stubs: they fabricate an identity and an opaque
//! token without checking anything. What the gate does guarantee is
//! storage discipline: the token and the user record are written and
//! removed as a pair, and the in-memory view is only updated after the
//! store writes succeed, so no partial-write state is ever observable.

use crate::error::{Error, Result};
use crate::identity::{Identity, DEMO_USERNAME};
use crate::store::KvStore;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{info, warn};

/// Store key holding the opaque session token
pub const TOKEN_KEY: &str = "token";
/// Store key holding the serialized [`Identity`]
pub const USER_KEY: &str = "user";

/// Process-wide identity state gating access to the detector page
pub struct AuthGate {
    store: Arc<dyn KvStore>,
    current: RwLock<Option<Identity>>,
}

impl AuthGate {
    pub fn new(store: Arc<dyn KvStore>) -> Self {
        Self {
            store,
            current: RwLock::new(None),
        }
    }

    /// Restore a previously persisted identity, typically at startup.
    ///
    /// A corrupt user record, or one key present without the other, is
    /// discarded: both keys are removed and the viewer is treated as
    /// logged out.
    pub async fn restore(&self) -> Result<Option<Identity>> {
        let token = self.store.get(TOKEN_KEY).await?;
        let user = self.store.get(USER_KEY).await?;

        match (token, user) {
            (Some(_), Some(json)) => match serde_json::from_str::<Identity>(&json) {
                Ok(identity) => {
                    info!("Restored identity for {}", identity.username);
                    *self.current.write().await = Some(identity.clone());
                    Ok(Some(identity))
                }
                Err(e) => {
                    warn!("Discarding corrupt persisted identity: {}", e);
                    self.discard_persisted().await?;
                    Ok(None)
                }
            },
            (None, None) => Ok(None),
            _ => {
                warn!("Persisted identity and token out of step; discarding both");
                self.discard_persisted().await?;
                Ok(None)
            }
        }
    }

    /// Stub login: any credentials succeed and fabricate an identity.
    pub async fn login(&self, email: &str, _password: &str) -> Result<Identity> {
        let identity = Identity::fabricate(DEMO_USERNAME, email);
        self.persist(identity).await
    }

    /// Stub signup: same as login, with the caller's username.
    pub async fn signup(&self, username: &str, email: &str, _password: &str) -> Result<Identity> {
        let identity = Identity::fabricate(username, email);
        self.persist(identity).await
    }

    /// Clear both persisted keys and the in-memory identity.
    pub async fn logout(&self) -> Result<()> {
        self.discard_persisted().await?;
        *self.current.write().await = None;
        info!("Logged out");
        Ok(())
    }

    pub async fn current_identity(&self) -> Option<Identity> {
        self.current.read().await.clone()
    }

    async fn persist(&self, identity: Identity) -> Result<Identity> {
        let token = Identity::fabricate_token();
        let record = serde_json::to_string(&identity)
            .map_err(|e| Error::Internal(format!("identity serialization failed: {}", e)))?;

        // Token first, record second; restore() treats a lone token as
        // corrupt, so an interrupted pair never yields a half-login.
        self.store.set(TOKEN_KEY, &token).await?;
        self.store.set(USER_KEY, &record).await?;

        *self.current.write().await = Some(identity.clone());
        info!("Logged in as {}", identity.username);
        Ok(identity)
    }

    async fn discard_persisted(&self) -> Result<()> {
        self.store.remove(TOKEN_KEY).await?;
        self.store.remove(USER_KEY).await?;
        Ok(())
    }
}
