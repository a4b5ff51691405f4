//! HTTP implementation of the user service API

use super::UserApi;
use crate::config::ApiConfig;
use crate::error::{UserlinkError, UserlinkResult};
use crate::model::{User, UserEnvelope};
use crate::patch;
use crate::session::AuthToken;
use async_trait::async_trait;
use json_patch::Patch;
use reqwest::header;
use serde::Serialize;
use std::time::Duration;
use tracing::{debug, info};
use uuid::Uuid;

/// Request body for `PATCH /user/{id}`
#[derive(Debug, Serialize)]
struct PatchRequest {
    patch: Patch,
}

/// User service client over HTTP
pub struct HttpUserApi {
    client: reqwest::Client,
    base_url: String,
}

impl HttpUserApi {
    /// Create a client from API configuration
    pub fn new(config: &ApiConfig) -> UserlinkResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| UserlinkError::request("building HTTP client", e))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl UserApi for HttpUserApi {
    async fn patch_user(
        &self,
        token: &AuthToken,
        original: &User,
        candidate: &User,
    ) -> UserlinkResult<User> {
        if token.is_expired() {
            return Err(UserlinkError::CredentialExpired);
        }

        let patch = patch::diff(original, candidate)?;
        if patch.0.is_empty() {
            debug!("no changes between snapshots, skipping request");
            return Ok(candidate.clone());
        }

        // Updates are keyed by the original record's identifier
        let url = format!("{}/user/{}", self.base_url, original.id);
        let request_id = Uuid::new_v4();

        info!("Patching user {} (request_id: {})", original.id, request_id);

        let response = self
            .client
            .patch(&url)
            .header(header::AUTHORIZATION, token.bearer())
            .header("x-request-id", request_id.to_string())
            .json(&PatchRequest { patch })
            .send()
            .await
            .map_err(|e| UserlinkError::request(format!("PATCH {}", url), e))?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            return Err(UserlinkError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let envelope: UserEnvelope = response
            .json()
            .await
            .map_err(|e| UserlinkError::request("decoding user envelope", e))?;

        debug!("user {} updated by server", envelope.user.id);
        Ok(envelope.user)
    }
}
