use std::env;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use academy_core::model::UserId;

use crate::auth::{IdentityProvider, Session};
use crate::error::AuthError;

/// Configuration for the remote identity provider.
#[derive(Clone, Debug)]
pub struct IdentityConfig {
    pub base_url: String,
    pub api_key: Option<String>,
}

impl IdentityConfig {
    /// Reads `ACADEMY_AUTH_URL` (required) and `ACADEMY_AUTH_KEY` (optional).
    ///
    /// Returns `None` when no URL is configured, in which case the app falls
    /// back to the local provider.
    #[must_use]
    pub fn from_env() -> Option<Self> {
        let base_url = env::var("ACADEMY_AUTH_URL").ok()?;
        if base_url.trim().is_empty() {
            return None;
        }
        let api_key = env::var("ACADEMY_AUTH_KEY")
            .ok()
            .filter(|key| !key.trim().is_empty());
        Some(Self { base_url, api_key })
    }
}

/// Identity provider backed by a remote HTTP service.
pub struct HttpIdentityProvider {
    client: Client,
    config: IdentityConfig,
}

impl HttpIdentityProvider {
    #[must_use]
    pub fn new(config: IdentityConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    /// Builds a provider from environment configuration, if present.
    #[must_use]
    pub fn from_env() -> Option<Self> {
        IdentityConfig::from_env().map(Self::new)
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{path}", self.config.base_url.trim_end_matches('/'))
    }

    fn request(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.config.api_key {
            Some(key) => builder.bearer_auth(key),
            None => builder,
        }
    }
}

#[async_trait]
impl IdentityProvider for HttpIdentityProvider {
    async fn sign_up(
        &self,
        email: &str,
        password: &str,
        display_name: &str,
    ) -> Result<Session, AuthError> {
        let payload = SignUpRequest {
            email,
            password,
            display_name,
        };
        let response = self
            .request(self.client.post(self.url("sign-up")))
            .json(&payload)
            .send()
            .await?;

        match response.status() {
            StatusCode::CONFLICT => Err(AuthError::EmailTaken),
            status if !status.is_success() => Err(AuthError::HttpStatus(status)),
            _ => {
                let body: SessionPayload = response.json().await?;
                Ok(body.into_session())
            }
        }
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<Session, AuthError> {
        let payload = SignInRequest { email, password };
        let response = self
            .request(self.client.post(self.url("sign-in")))
            .json(&payload)
            .send()
            .await?;

        match response.status() {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Err(AuthError::InvalidCredentials),
            status if !status.is_success() => Err(AuthError::HttpStatus(status)),
            _ => {
                let body: SessionPayload = response.json().await?;
                Ok(body.into_session())
            }
        }
    }

    async fn sign_out(&self) -> Result<(), AuthError> {
        let response = self
            .request(self.client.post(self.url("sign-out")))
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(AuthError::HttpStatus(response.status()));
        }
        Ok(())
    }

    async fn current_session(&self) -> Result<Option<Session>, AuthError> {
        let response = self
            .request(self.client.get(self.url("session")))
            .send()
            .await?;

        match response.status() {
            StatusCode::UNAUTHORIZED | StatusCode::NOT_FOUND => Ok(None),
            status if !status.is_success() => Err(AuthError::HttpStatus(status)),
            _ => {
                let body: SessionEnvelope = response.json().await?;
                Ok(body.session.map(SessionPayload::into_session))
            }
        }
    }
}

#[derive(Debug, Serialize)]
struct SignUpRequest<'a> {
    email: &'a str,
    password: &'a str,
    display_name: &'a str,
}

#[derive(Debug, Serialize)]
struct SignInRequest<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Debug, Deserialize)]
struct SessionPayload {
    user_id: Uuid,
    email: String,
    display_name: String,
}

impl SessionPayload {
    fn into_session(self) -> Session {
        Session::new(UserId::new(self.user_id), self.email, self.display_name)
    }
}

#[derive(Debug, Deserialize)]
struct SessionEnvelope {
    session: Option<SessionPayload>,
}
