//! LINE Messaging API client.
//!
//! Thin reqwest wrapper over the handful of endpoints the bot needs:
//! replying, downloading message content, and looking up display names.

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use crate::error::LineError;
use crate::line::events::EventSource;

/// Default API host for JSON endpoints.
const API_BASE: &str = "https://api.line.me";
/// Default API host for binary message content.
const DATA_BASE: &str = "https://api-data.line.me";

/// Display name used when a profile lookup fails.
pub const ANONYMOUS_NAME: &str = "名無しさん";

/// LINE Messaging API client.
pub struct LineClient {
    access_token: SecretString,
    client: reqwest::Client,
    api_base: String,
    data_base: String,
}

#[derive(Deserialize)]
struct Profile {
    #[serde(rename = "displayName")]
    display_name: String,
}

impl LineClient {
    pub fn new(access_token: SecretString) -> Self {
        Self::with_base_urls(access_token, API_BASE, DATA_BASE)
    }

    /// Client with overridden API hosts (tests point this at a mock server).
    pub fn with_base_urls(
        access_token: SecretString,
        api_base: impl Into<String>,
        data_base: impl Into<String>,
    ) -> Self {
        Self {
            access_token,
            client: reqwest::Client::new(),
            api_base: api_base.into(),
            data_base: data_base.into(),
        }
    }

    fn api_url(&self, path: &str) -> String {
        format!("{}{path}", self.api_base)
    }

    fn data_url(&self, path: &str) -> String {
        format!("{}{path}", self.data_base)
    }

    /// Send a text reply using the event's reply token.
    pub async fn reply_message(&self, reply_token: &str, text: &str) -> Result<(), LineError> {
        let endpoint = "/v2/bot/message/reply";
        let body = serde_json::json!({
            "replyToken": reply_token,
            "messages": [{"type": "text", "text": text}],
        });

        let resp = self
            .client
            .post(self.api_url(endpoint))
            .bearer_auth(self.access_token.expose_secret())
            .json(&body)
            .send()
            .await
            .map_err(|e| LineError::RequestFailed {
                endpoint: endpoint.into(),
                reason: e.to_string(),
            })?;

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let body = resp.text().await.unwrap_or_default();
            return Err(LineError::ApiStatus {
                endpoint: endpoint.into(),
                status,
                body,
            });
        }

        tracing::debug!(reply_token, "Reply sent");
        Ok(())
    }

    /// Download the binary content of a message (image bytes).
    pub async fn get_message_content(&self, message_id: &str) -> Result<Vec<u8>, LineError> {
        let endpoint = format!("/v2/bot/message/{message_id}/content");

        let resp = self
            .client
            .get(self.data_url(&endpoint))
            .bearer_auth(self.access_token.expose_secret())
            .send()
            .await
            .map_err(|e| LineError::RequestFailed {
                endpoint: endpoint.clone(),
                reason: e.to_string(),
            })?;

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let body = resp.text().await.unwrap_or_default();
            return Err(LineError::ApiStatus {
                endpoint,
                status,
                body,
            });
        }

        let bytes = resp.bytes().await.map_err(|e| LineError::RequestFailed {
            endpoint,
            reason: e.to_string(),
        })?;
        Ok(bytes.to_vec())
    }

    /// Look up the sender's display name for any source type.
    ///
    /// Falls back to [`ANONYMOUS_NAME`] when the source carries no user ID
    /// or the profile endpoint errors (users can disallow profile access).
    pub async fn display_name(&self, source: &EventSource) -> String {
        let Some(user_id) = source.user_id() else {
            return ANONYMOUS_NAME.to_string();
        };

        let endpoint = match source {
            EventSource::User { .. } => format!("/v2/bot/profile/{user_id}"),
            EventSource::Group { group_id, .. } => {
                format!("/v2/bot/group/{group_id}/member/{user_id}")
            }
            EventSource::Room { room_id, .. } => {
                format!("/v2/bot/room/{room_id}/member/{user_id}")
            }
        };

        match self.fetch_profile(&endpoint).await {
            Ok(profile) => profile.display_name,
            Err(e) => {
                tracing::warn!(user_id, error = %e, "Profile lookup failed, using fallback name");
                ANONYMOUS_NAME.to_string()
            }
        }
    }

    async fn fetch_profile(&self, endpoint: &str) -> Result<Profile, LineError> {
        let resp = self
            .client
            .get(self.api_url(endpoint))
            .bearer_auth(self.access_token.expose_secret())
            .send()
            .await
            .map_err(|e| LineError::RequestFailed {
                endpoint: endpoint.into(),
                reason: e.to_string(),
            })?;

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let body = resp.text().await.unwrap_or_default();
            return Err(LineError::ApiStatus {
                endpoint: endpoint.into(),
                status,
                body,
            });
        }

        resp.json().await.map_err(|e| LineError::RequestFailed {
            endpoint: endpoint.into(),
            reason: e.to_string(),
        })
    }
}
