use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tokio::sync::watch;
use uuid::Uuid;

use academy_core::model::UserId;

use crate::error::{AuthError, MIN_PASSWORD_LEN};

//
// ─── SESSION ───────────────────────────────────────────────────────────────────
//

/// Read-only snapshot of the signed-in learner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    user_id: UserId,
    email: String,
    display_name: String,
}

impl Session {
    #[must_use]
    pub fn new(user_id: UserId, email: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            user_id,
            email: email.into(),
            display_name: display_name.into(),
        }
    }

    #[must_use]
    pub fn user_id(&self) -> UserId {
        self.user_id
    }

    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }

    #[must_use]
    pub fn display_name(&self) -> &str {
        &self.display_name
    }
}

//
// ─── PROVIDER CONTRACT ─────────────────────────────────────────────────────────
//

/// Contract for the external identity provider.
///
/// The application never stores credentials itself; it only holds the
/// session snapshot the provider hands back.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Create an account and sign it in.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::EmailTaken` when the email is already registered,
    /// or transport errors.
    async fn sign_up(
        &self,
        email: &str,
        password: &str,
        display_name: &str,
    ) -> Result<Session, AuthError>;

    /// Sign an existing account in.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidCredentials` when the email/password pair
    /// does not match, or transport errors.
    async fn sign_in(&self, email: &str, password: &str) -> Result<Session, AuthError>;

    /// Sign the current account out.
    ///
    /// # Errors
    ///
    /// Returns transport errors.
    async fn sign_out(&self) -> Result<(), AuthError>;

    /// The session the provider currently considers active, if any.
    ///
    /// # Errors
    ///
    /// Returns transport errors.
    async fn current_session(&self) -> Result<Option<Session>, AuthError>;
}

//
// ─── AUTH SERVICE ──────────────────────────────────────────────────────────────
//

/// Owns the session snapshot and fans out change notifications.
///
/// Views read `session()` or follow `subscribe()`; only this service talks
/// to the identity provider, so the snapshot and the provider can never
/// disagree for long.
pub struct AuthService {
    provider: Arc<dyn IdentityProvider>,
    sessions: watch::Sender<Option<Session>>,
}

impl AuthService {
    #[must_use]
    pub fn new(provider: Arc<dyn IdentityProvider>) -> Self {
        let (sessions, _) = watch::channel(None);
        Self { provider, sessions }
    }

    /// Ask the provider for an existing session, e.g. at startup.
    ///
    /// # Errors
    ///
    /// Returns transport errors from the provider.
    pub async fn restore(&self) -> Result<Option<Session>, AuthError> {
        let session = self.provider.current_session().await?;
        self.publish(session.clone());
        Ok(session)
    }

    /// Validate inputs, create the account, and publish the new session.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidEmail` or `AuthError::WeakPassword` before
    /// the provider is contacted, plus any provider error.
    pub async fn sign_up(
        &self,
        email: &str,
        password: &str,
        display_name: &str,
    ) -> Result<Session, AuthError> {
        let email = normalize_email(email)?;
        if password.chars().count() < MIN_PASSWORD_LEN {
            return Err(AuthError::WeakPassword);
        }
        let session = self
            .provider
            .sign_up(&email, password, display_name.trim())
            .await?;
        self.publish(Some(session.clone()));
        Ok(session)
    }

    /// Sign in and publish the new session.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidEmail` for a malformed address, plus any
    /// provider error.
    pub async fn sign_in(&self, email: &str, password: &str) -> Result<Session, AuthError> {
        let email = normalize_email(email)?;
        let session = self.provider.sign_in(&email, password).await?;
        self.publish(Some(session.clone()));
        Ok(session)
    }

    /// Sign out and clear the published session.
    ///
    /// # Errors
    ///
    /// Returns transport errors; the local snapshot is cleared regardless so
    /// the UI is never stuck signed in.
    pub async fn sign_out(&self) -> Result<(), AuthError> {
        let result = self.provider.sign_out().await;
        self.publish(None);
        if let Err(ref err) = result {
            log::warn!("sign-out failed upstream: {err}");
        }
        result
    }

    /// Current session snapshot.
    #[must_use]
    pub fn session(&self) -> Option<Session> {
        self.sessions.borrow().clone()
    }

    #[must_use]
    pub fn is_signed_in(&self) -> bool {
        self.sessions.borrow().is_some()
    }

    /// Change stream for the session snapshot.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Option<Session>> {
        self.sessions.subscribe()
    }

    fn publish(&self, session: Option<Session>) {
        // send_replace never fails; it keeps the value even with no receivers.
        self.sessions.send_replace(session);
    }
}

fn normalize_email(email: &str) -> Result<String, AuthError> {
    let email = email.trim().to_ascii_lowercase();
    let Some((local, domain)) = email.split_once('@') else {
        return Err(AuthError::InvalidEmail);
    };
    if local.is_empty() || domain.is_empty() || !domain.contains('.') {
        return Err(AuthError::InvalidEmail);
    }
    Ok(email)
}

//
// ─── IN-MEMORY PROVIDER ────────────────────────────────────────────────────────
//

struct StoredAccount {
    password: String,
    user_id: UserId,
    display_name: String,
}

/// Local identity provider for offline use, testing, and prototyping.
#[derive(Default)]
pub struct InMemoryIdentityProvider {
    accounts: Mutex<HashMap<String, StoredAccount>>,
    active: Mutex<Option<Session>>,
}

impl InMemoryIdentityProvider {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl IdentityProvider for InMemoryIdentityProvider {
    async fn sign_up(
        &self,
        email: &str,
        password: &str,
        display_name: &str,
    ) -> Result<Session, AuthError> {
        let mut accounts = self
            .accounts
            .lock()
            .map_err(|_| AuthError::InvalidCredentials)?;
        if accounts.contains_key(email) {
            return Err(AuthError::EmailTaken);
        }

        let user_id = UserId::new(Uuid::new_v4());
        accounts.insert(
            email.to_owned(),
            StoredAccount {
                password: password.to_owned(),
                user_id,
                display_name: display_name.to_owned(),
            },
        );

        let session = Session::new(user_id, email, display_name);
        *self.active.lock().map_err(|_| AuthError::NotSignedIn)? = Some(session.clone());
        Ok(session)
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<Session, AuthError> {
        let accounts = self
            .accounts
            .lock()
            .map_err(|_| AuthError::InvalidCredentials)?;
        let account = accounts.get(email).ok_or(AuthError::InvalidCredentials)?;
        if account.password != password {
            return Err(AuthError::InvalidCredentials);
        }

        let session = Session::new(account.user_id, email, account.display_name.clone());
        *self.active.lock().map_err(|_| AuthError::NotSignedIn)? = Some(session.clone());
        Ok(session)
    }

    async fn sign_out(&self) -> Result<(), AuthError> {
        *self.active.lock().map_err(|_| AuthError::NotSignedIn)? = None;
        Ok(())
    }

    async fn current_session(&self) -> Result<Option<Session>, AuthError> {
        Ok(self
            .active
            .lock()
            .map_err(|_| AuthError::NotSignedIn)?
            .clone())
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> AuthService {
        AuthService::new(Arc::new(InMemoryIdentityProvider::new()))
    }

    #[tokio::test]
    async fn sign_up_then_out_then_in() {
        let auth = service();
        assert!(auth.session().is_none());

        let session = auth
            .sign_up("dana@example.com", "longenough", "Dana")
            .await
            .unwrap();
        assert_eq!(session.display_name(), "Dana");
        assert!(auth.is_signed_in());

        auth.sign_out().await.unwrap();
        assert!(auth.session().is_none());

        let again = auth.sign_in("dana@example.com", "longenough").await.unwrap();
        assert_eq!(again.user_id(), session.user_id());
    }

    #[tokio::test]
    async fn sign_up_rejects_bad_inputs() {
        let auth = service();
        assert!(matches!(
            auth.sign_up("not-an-email", "longenough", "Dana").await,
            Err(AuthError::InvalidEmail)
        ));
        assert!(matches!(
            auth.sign_up("dana@example", "longenough", "Dana").await,
            Err(AuthError::InvalidEmail)
        ));
        assert!(matches!(
            auth.sign_up("dana@example.com", "short", "Dana").await,
            Err(AuthError::WeakPassword)
        ));
    }

    #[tokio::test]
    async fn duplicate_email_is_rejected() {
        let auth = service();
        auth.sign_up("dana@example.com", "longenough", "Dana")
            .await
            .unwrap();
        assert!(matches!(
            auth.sign_up("Dana@Example.com", "longenough", "Other").await,
            Err(AuthError::EmailTaken)
        ));
    }

    #[tokio::test]
    async fn wrong_password_is_rejected() {
        let auth = service();
        auth.sign_up("dana@example.com", "longenough", "Dana")
            .await
            .unwrap();
        assert!(matches!(
            auth.sign_in("dana@example.com", "wrong-password").await,
            Err(AuthError::InvalidCredentials)
        ));
    }

    #[tokio::test]
    async fn subscribers_see_session_changes() {
        let auth = service();
        let mut rx = auth.subscribe();
        assert!(rx.borrow().is_none());

        auth.sign_up("dana@example.com", "longenough", "Dana")
            .await
            .unwrap();
        rx.changed().await.unwrap();
        assert!(rx.borrow().is_some());

        auth.sign_out().await.unwrap();
        rx.changed().await.unwrap();
        assert!(rx.borrow().is_none());
    }

    #[tokio::test]
    async fn restore_publishes_the_provider_session() {
        let provider = Arc::new(InMemoryIdentityProvider::new());
        let auth = AuthService::new(provider.clone());
        auth.sign_up("dana@example.com", "longenough", "Dana")
            .await
            .unwrap();

        // A second service over the same provider picks the session up.
        let other = AuthService::new(provider);
        assert!(other.session().is_none());
        let restored = other.restore().await.unwrap();
        assert_eq!(restored.unwrap().email(), "dana@example.com");
        assert!(other.is_signed_in());
    }
}
