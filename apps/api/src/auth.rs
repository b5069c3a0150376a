use async_trait::async_trait;
use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts, HeaderMap},
};
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::errors::AppError;
use crate::state::AppState;

/// Resolves a bearer token to the user it was issued for.
#[async_trait]
pub trait IdentityVerifier: Send + Sync {
    /// [`AppError::Unauthorized`] for any token that cannot be verified.
    async fn verify(&self, token: &str) -> Result<Uuid, AppError>;
}

#[derive(Debug, Deserialize)]
struct IdentityUser {
    id: Uuid,
}

/// Asks the identity service's `/auth/v1/user` endpoint who owns the token.
pub struct RemoteIdentityVerifier {
    client: Client,
    user_endpoint: String,
    api_key: String,
}

impl RemoteIdentityVerifier {
    pub fn new(auth_url: &str, api_key: String) -> Result<Self, reqwest::Error> {
        Ok(Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(10))
                .build()?,
            user_endpoint: format!("{}/auth/v1/user", auth_url.trim_end_matches('/')),
            api_key,
        })
    }
}

#[async_trait]
impl IdentityVerifier for RemoteIdentityVerifier {
    async fn verify(&self, token: &str) -> Result<Uuid, AppError> {
        let response = self
            .client
            .get(&self.user_endpoint)
            .bearer_auth(token)
            .header("apikey", &self.api_key)
            .send()
            .await
            .map_err(|e| {
                warn!("Identity service unreachable: {e}");
                AppError::Unauthorized
            })?;

        if !response.status().is_success() {
            debug!(status = %response.status(), "Token rejected by identity service");
            return Err(AppError::Unauthorized);
        }

        let user: IdentityUser = response.json().await.map_err(|e| {
            warn!("Unexpected identity service response: {e}");
            AppError::Unauthorized
        })?;
        Ok(user.id)
    }
}

/// The authenticated caller. Extracting it rejects the request with 401 when
/// the bearer token is missing or invalid.
#[derive(Debug, Clone, Copy)]
pub struct AuthUser {
    pub id: Uuid,
}

#[async_trait]
impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let token = extract_bearer(&parts.headers).ok_or(AppError::Unauthorized)?;
        let id = state.identity.verify(token).await?;
        Ok(AuthUser { id })
    }
}

fn extract_bearer(headers: &HeaderMap) -> Option<&str> {
    let header = headers.get(AUTHORIZATION)?.to_str().ok()?;
    let token = header.strip_prefix("Bearer ")?.trim();
    if token.is_empty() {
        None
    } else {
        Some(token)
    }
}
