//! Discogs collection client
//!
//! Forwards collection-listing requests to Discogs and classifies the upstream answer
//! into a [`ProxyReply`]. Both the `/api/discogs` proxy route and the in-process
//! collection walker go through this classification, so they agree on what counts
//! as a usable page.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use reqwest::Client as HttpClient;
use serde_json::{json, Value};

use crate::{
    config::Config,
    error::{AppError, AppResult},
    models::CollectionPage,
    services::collection::CollectionSource,
};

/// Folder 0 is the "All" folder of every Discogs collection
const ALL_FOLDER: u32 = 0;

/// Raw body Discogs answered with
#[derive(Debug, Clone, PartialEq)]
pub enum UpstreamBody {
    Json(Value),
    Text(String),
}

/// Status and body of one upstream call
#[derive(Debug, Clone, PartialEq)]
pub struct UpstreamReply {
    pub status: StatusCode,
    pub body: UpstreamBody,
}

/// What the proxy sends back to its caller
#[derive(Debug, Clone, PartialEq)]
pub enum ProxyReply {
    MissingUsername,
    /// A pagination parameter that is present but not a positive integer
    InvalidParameter(&'static str),
    /// Successful upstream JSON, relayed as-is
    Relay { status: StatusCode, body: Value },
    NonJson { status: StatusCode, text: String },
    Upstream {
        status: StatusCode,
        message: String,
        details: Value,
    },
    Network(String),
}

impl From<UpstreamReply> for ProxyReply {
    fn from(reply: UpstreamReply) -> Self {
        let status = reply.status;
        match reply.body {
            UpstreamBody::Text(text) => ProxyReply::NonJson { status, text },
            UpstreamBody::Json(body) if status.is_success() => ProxyReply::Relay { status, body },
            UpstreamBody::Json(details) => {
                let message = details
                    .get("message")
                    .and_then(Value::as_str)
                    .filter(|m| !m.is_empty())
                    .unwrap_or("Discogs API error")
                    .to_string();
                ProxyReply::Upstream {
                    status,
                    message,
                    details,
                }
            }
        }
    }
}

impl ProxyReply {
    pub fn status(&self) -> StatusCode {
        match self {
            ProxyReply::MissingUsername | ProxyReply::InvalidParameter(_) => {
                StatusCode::BAD_REQUEST
            }
            ProxyReply::Relay { status, .. }
            | ProxyReply::NonJson { status, .. }
            | ProxyReply::Upstream { status, .. } => *status,
            ProxyReply::Network(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ProxyReply {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match self {
            ProxyReply::MissingUsername => json!({ "error": "Missing username" }),
            ProxyReply::InvalidParameter(name) => json!({ "error": format!("Invalid {}", name) }),
            ProxyReply::Relay { body, .. } => body,
            ProxyReply::NonJson { text, .. } => json!({
                "error": "Non-JSON response from Discogs",
                "text": text
            }),
            ProxyReply::Upstream {
                message, details, ..
            } => json!({
                "error": message,
                "details": details
            }),
            ProxyReply::Network(details) => json!({
                "error": "Failed to fetch from Discogs",
                "details": details
            }),
        };

        (status, Json(body)).into_response()
    }
}

#[derive(Clone)]
pub struct DiscogsClient {
    http_client: HttpClient,
    api_url: String,
    user_agent: String,
    token: Option<String>,
}

impl DiscogsClient {
    pub fn new(api_url: String, user_agent: String, token: Option<String>) -> Self {
        Self {
            http_client: HttpClient::new(),
            api_url: api_url.trim_end_matches('/').to_string(),
            user_agent,
            token,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            config.discogs_api_url.clone(),
            config.discogs_user_agent.clone(),
            config.discogs_token.clone(),
        )
    }

    fn collection_url(&self, username: &str) -> String {
        format!(
            "{}/users/{}/collection/folders/{}/releases",
            self.api_url,
            urlencoding::encode(username),
            ALL_FOLDER
        )
    }

    /// Requests one page of a user's collection and captures status and body
    pub async fn fetch_collection_page(
        &self,
        username: &str,
        per_page: u32,
        page: u32,
    ) -> Result<UpstreamReply, reqwest::Error> {
        let url = self.collection_url(username);
        tracing::info!(url = %url, per_page, page, "Fetching from Discogs");

        let mut request = self
            .http_client
            .get(&url)
            .header(reqwest::header::USER_AGENT, &self.user_agent)
            .query(&[("per_page", per_page), ("page", page)]);
        if let Some(token) = &self.token {
            request = request.query(&[("token", token)]);
        }

        let response = request.send().await?;
        let status = response.status();
        let bytes = response.bytes().await?;

        let body = match serde_json::from_slice::<Value>(&bytes) {
            Ok(json) => {
                match json.get("releases").and_then(Value::as_array) {
                    Some(releases) => tracing::info!(
                        status = %status,
                        releases = releases.len(),
                        "Discogs returned releases"
                    ),
                    None => tracing::info!(status = %status, "Discogs returned no releases array"),
                }
                UpstreamBody::Json(json)
            }
            Err(_) => {
                let text = String::from_utf8_lossy(&bytes).into_owned();
                tracing::warn!(status = %status, text = %text, "Non-JSON response from Discogs");
                UpstreamBody::Text(text)
            }
        };

        Ok(UpstreamReply { status, body })
    }

    /// Runs the full proxy contract for one request
    pub async fn proxy(&self, username: Option<&str>, per_page: u32, page: u32) -> ProxyReply {
        let Some(username) = username.filter(|u| !u.is_empty()) else {
            return ProxyReply::MissingUsername;
        };

        match self.fetch_collection_page(username, per_page, page).await {
            Ok(reply) => ProxyReply::from(reply),
            Err(e) => {
                tracing::error!(error = %e, username = %username, "Failed to fetch from Discogs");
                ProxyReply::Network(e.to_string())
            }
        }
    }
}

#[async_trait::async_trait]
impl CollectionSource for DiscogsClient {
    async fn fetch_page(&self, username: &str, per_page: u32, page: u32) -> AppResult<CollectionPage> {
        match self.proxy(Some(username), per_page, page).await {
            ProxyReply::Relay { body, .. } => serde_json::from_value(body).map_err(|e| {
                AppError::ExternalApi(format!("Unexpected collection page format: {}", e))
            }),
            reply => {
                tracing::warn!(
                    username = %username,
                    page,
                    status = %reply.status(),
                    "Collection page unavailable"
                );
                Err(AppError::NotFoundOrPrivate)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_json_is_relayed() {
        let body = json!({"releases": [], "pagination": {"pages": 1}});
        let reply = ProxyReply::from(UpstreamReply {
            status: StatusCode::OK,
            body: UpstreamBody::Json(body.clone()),
        });
        assert_eq!(
            reply,
            ProxyReply::Relay {
                status: StatusCode::OK,
                body
            }
        );
    }

    #[test]
    fn test_error_json_carries_upstream_message() {
        let details = json!({"message": "User does not exist or may have been deleted."});
        let reply = ProxyReply::from(UpstreamReply {
            status: StatusCode::NOT_FOUND,
            body: UpstreamBody::Json(details.clone()),
        });
        assert_eq!(reply.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            reply,
            ProxyReply::Upstream {
                status: StatusCode::NOT_FOUND,
                message: "User does not exist or may have been deleted.".to_string(),
                details
            }
        );
    }

    #[test]
    fn test_error_json_without_message_gets_generic_error() {
        let reply = ProxyReply::from(UpstreamReply {
            status: StatusCode::FORBIDDEN,
            body: UpstreamBody::Json(json!({})),
        });
        match reply {
            ProxyReply::Upstream { message, .. } => assert_eq!(message, "Discogs API error"),
            other => panic!("unexpected reply: {:?}", other),
        }
    }

    #[test]
    fn test_text_body_keeps_upstream_status() {
        let reply = ProxyReply::from(UpstreamReply {
            status: StatusCode::BAD_GATEWAY,
            body: UpstreamBody::Text("<html>bad gateway</html>".to_string()),
        });
        assert_eq!(reply.status(), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn test_network_and_missing_username_statuses() {
        assert_eq!(ProxyReply::MissingUsername.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            ProxyReply::Network("connection refused".to_string()).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_collection_url_encodes_username() {
        let client = DiscogsClient::new(
            "https://api.discogs.com/".to_string(),
            "test-agent".to_string(),
            None,
        );
        assert_eq!(
            client.collection_url("dj shadow"),
            "https://api.discogs.com/users/dj%20shadow/collection/folders/0/releases"
        );
    }

    #[tokio::test]
    async fn test_proxy_rejects_empty_username() {
        let client = DiscogsClient::new(
            "http://127.0.0.1:9".to_string(),
            "test-agent".to_string(),
            None,
        );
        assert_eq!(client.proxy(None, 100, 1).await, ProxyReply::MissingUsername);
        assert_eq!(client.proxy(Some(""), 100, 1).await, ProxyReply::MissingUsername);
    }
}
