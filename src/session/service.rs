//! Session establishment.
//!
//! No purchase or lifecycle call happens before this service has produced an
//! identity; everything downstream takes the established [`Identity`] as an
//! explicit argument.

use std::fmt;
use std::sync::Arc;

use jiff::Timestamp;
use tracing::{debug, info, warn};

use crate::gateway::client::BackendApi;

use super::assertion::HostAssertion;
use super::errors::SessionServiceError;
use super::models::{Identity, SessionState};
use super::store::SessionStore;

/// Establishes and ends the per-device session.
pub struct SessionService {
    gateway: Arc<dyn BackendApi>,
    store: SessionStore,
    production: bool,
}

impl fmt::Debug for SessionService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionService")
            .field("store", &self.store)
            .field("production", &self.production)
            .finish_non_exhaustive()
    }
}

impl SessionService {
    /// Creates the service on top of a backend gateway and a durable store.
    #[must_use]
    pub fn new(gateway: Arc<dyn BackendApi>, store: SessionStore, production: bool) -> Self {
        Self {
            gateway,
            store,
            production,
        }
    }

    /// Establishes the session identity.
    ///
    /// A previously stored session is reused as-is. Otherwise the host's
    /// signed payload is exchanged for a verified identity, which is also
    /// persisted. Without anything verifiable, production terminates the
    /// session while other environments fall back to the unsigned claim or a
    /// fixed stand-in.
    ///
    /// # Errors
    ///
    /// Returns an error in production when no assertion is available or the
    /// verification exchange fails.
    pub async fn establish(
        &self,
        assertion: &HostAssertion,
    ) -> Result<SessionState, SessionServiceError> {
        if let Some(state) = self.store.load() {
            debug!(user = state.user.id, "reusing stored session");

            return Ok(state);
        }

        if let Some(init_data) = &assertion.init_data {
            match self.gateway.verify_init_data(init_data.reveal()).await {
                Ok(verified) => {
                    let state = SessionState {
                        user: verified.into_identity(),
                        verified: true,
                        established_at: Timestamp::now(),
                    };

                    info!(user = state.user.id, "identity verified");
                    self.persist(&state);

                    return Ok(state);
                }
                Err(error) if self.production => return Err(error.into()),
                Err(error) => warn!("identity verification failed: {error}"),
            }
        } else if self.production {
            return Err(SessionServiceError::AssertionUnavailable);
        }

        let user = assertion
            .claimed_identity()
            .unwrap_or_else(Identity::stand_in);

        info!(user = user.id, "using unverified stand-in identity");

        Ok(SessionState {
            user,
            verified: false,
            established_at: Timestamp::now(),
        })
    }

    /// Ends the session, clearing the durable store and telling the backend.
    ///
    /// # Errors
    ///
    /// Returns an error when the stored session cannot be removed.
    pub async fn logout(&self, user: &Identity) -> Result<(), SessionServiceError> {
        if let Err(error) = self.gateway.logout(user).await {
            warn!("backend logout failed: {error}");
        }

        self.store.clear()?;

        info!(user = user.id, "session ended");

        Ok(())
    }

    fn persist(&self, state: &SessionState) {
        if let Err(error) = self.store.save(state) {
            warn!("could not persist session: {error}");
        }
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::gateway::GatewayError;
    use crate::gateway::client::MockBackendApi;
    use crate::gateway::models::VerifiedUser;
    use crate::session::assertion::InitData;

    use super::*;

    fn verified_user(id: i64) -> VerifiedUser {
        VerifiedUser {
            id,
            telegram_id: Some("987654321".to_owned()),
            username: Some("ada".to_owned()),
            photo_url: None,
        }
    }

    fn signed_assertion() -> HostAssertion {
        HostAssertion {
            init_data: Some(InitData::new("user=%7B%22id%22%3A987654321%7D&hash=abc")),
            user_claim: None,
        }
    }

    fn store_in(dir: &tempfile::TempDir) -> SessionStore {
        SessionStore::new(dir.path().join("session.json"))
    }

    #[tokio::test]
    async fn a_stored_session_is_reused_without_verification() -> TestResult {
        let dir = tempfile::tempdir()?;
        let store = store_in(&dir);

        store.save(&SessionState {
            user: Identity::stand_in(),
            verified: true,
            established_at: Timestamp::UNIX_EPOCH,
        })?;

        let mut gateway = MockBackendApi::new();
        gateway.expect_verify_init_data().never();

        let service = SessionService::new(Arc::new(gateway), store, true);
        let state = service.establish(&signed_assertion()).await?;

        assert_eq!(state.user.id, 123_456);

        Ok(())
    }

    #[tokio::test]
    async fn verification_success_persists_the_session() -> TestResult {
        let dir = tempfile::tempdir()?;
        let store = store_in(&dir);

        let mut gateway = MockBackendApi::new();
        gateway
            .expect_verify_init_data()
            .times(1)
            .returning(|_| Ok(verified_user(42)));

        let service = SessionService::new(Arc::new(gateway), store.clone(), true);
        let state = service.establish(&signed_assertion()).await?;

        assert!(state.verified);
        assert_eq!(state.user.id, 42);
        assert_eq!(store.load().map(|stored| stored.user.id), Some(42));

        Ok(())
    }

    #[tokio::test]
    async fn production_without_an_assertion_terminates() -> TestResult {
        let dir = tempfile::tempdir()?;
        let gateway = MockBackendApi::new();

        let service = SessionService::new(Arc::new(gateway), store_in(&dir), true);
        let result = service.establish(&HostAssertion::default()).await;

        assert!(
            matches!(result, Err(SessionServiceError::AssertionUnavailable)),
            "expected AssertionUnavailable, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn production_verification_failure_terminates() -> TestResult {
        let dir = tempfile::tempdir()?;

        let mut gateway = MockBackendApi::new();
        gateway
            .expect_verify_init_data()
            .returning(|_| Err(GatewayError::Rejected("Invalid auth data".to_owned())));

        let service = SessionService::new(Arc::new(gateway), store_in(&dir), true);
        let result = service.establish(&signed_assertion()).await;

        assert!(
            matches!(result, Err(SessionServiceError::Gateway(_))),
            "expected Gateway, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn outside_production_a_failed_verification_uses_the_claim() -> TestResult {
        let dir = tempfile::tempdir()?;
        let store = store_in(&dir);

        let mut gateway = MockBackendApi::new();
        gateway
            .expect_verify_init_data()
            .returning(|_| Err(GatewayError::Rejected("Invalid auth data".to_owned())));

        let assertion = HostAssertion {
            init_data: Some(InitData::new("user=%7B%22id%22%3A987%7D&hash=bad")),
            user_claim: Some(r#"{"id": 987, "first_name": "Ada"}"#.to_owned()),
        };

        let service = SessionService::new(Arc::new(gateway), store.clone(), false);
        let state = service.establish(&assertion).await?;

        assert!(!state.verified);
        assert_eq!(state.user.id, 987);

        // only verified sessions are persisted
        assert!(store.load().is_none());

        Ok(())
    }

    #[tokio::test]
    async fn outside_production_nothing_at_all_means_the_stand_in() -> TestResult {
        let dir = tempfile::tempdir()?;
        let gateway = MockBackendApi::new();

        let service = SessionService::new(Arc::new(gateway), store_in(&dir), false);
        let state = service.establish(&HostAssertion::default()).await?;

        assert!(!state.verified);
        assert_eq!(state.user.id, 123_456);
        assert_eq!(state.user.username.as_deref(), Some("test_user"));

        Ok(())
    }

    #[tokio::test]
    async fn logout_clears_the_store_even_when_the_backend_fails() -> TestResult {
        let dir = tempfile::tempdir()?;
        let store = store_in(&dir);

        store.save(&SessionState {
            user: Identity::stand_in(),
            verified: true,
            established_at: Timestamp::UNIX_EPOCH,
        })?;

        let mut gateway = MockBackendApi::new();
        gateway
            .expect_logout()
            .returning(|_| Err(GatewayError::Rejected("nope".to_owned())));

        let service = SessionService::new(Arc::new(gateway), store.clone(), false);
        service.logout(&Identity::stand_in()).await?;

        assert!(store.load().is_none());

        Ok(())
    }
}
