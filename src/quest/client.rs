//! HTTP client for the remote quest service
//!
//! Issues the two calls the service exposes. No retries, no cancellation:
//! each request runs to a single success or failure.

use crate::config::ServiceConfig;
use crate::quest::protocol::{QuestResponse, TurnRequest};
use crate::{MiniquestError, Result};
use reqwest::header::CONTENT_TYPE;
use tracing::debug;

pub struct QuestClient {
    http: reqwest::Client,
    base_url: String,
}

impl QuestClient {
    pub fn new(config: &ServiceConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Begin a new quest for the player via `POST /start?user=<id>`.
    ///
    /// The service expects a form-encoded content type with the player id
    /// in the query string and no body.
    pub async fn start_quest(&self, user: &str) -> Result<QuestResponse> {
        debug!("Starting quest for user '{}'", user);

        let response = self
            .http
            .post(format!("{}/start", self.base_url))
            .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
            .query(&[("user", user)])
            .send()
            .await
            .map_err(|e| MiniquestError::NetworkError(format!("start request failed: {}", e)))?
            .error_for_status()
            .map_err(|e| MiniquestError::NetworkError(format!("start request rejected: {}", e)))?;

        response
            .json::<QuestResponse>()
            .await
            .map_err(|e| MiniquestError::NetworkError(format!("invalid start response: {}", e)))
    }

    /// Submit the child's input along with the previous step via `POST /turn`.
    pub async fn send_turn(&self, request: &TurnRequest) -> Result<QuestResponse> {
        debug!(
            "Sending turn for user '{}': \"{}\"",
            request.user, request.child_input
        );

        let response = self
            .http
            .post(format!("{}/turn", self.base_url))
            .json(request)
            .send()
            .await
            .map_err(|e| MiniquestError::NetworkError(format!("turn request failed: {}", e)))?
            .error_for_status()
            .map_err(|e| MiniquestError::NetworkError(format!("turn request rejected: {}", e)))?;

        response
            .json::<QuestResponse>()
            .await
            .map_err(|e| MiniquestError::NetworkError(format!("invalid turn response: {}", e)))
    }
}
