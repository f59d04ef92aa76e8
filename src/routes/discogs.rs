use axum::{
    extract::{Query, State},
    Extension,
};
use serde::Deserialize;
use std::sync::Arc;

use crate::{middleware::request_id::RequestId, routes::AppState, services::ProxyReply};

const DEFAULT_PER_PAGE: u32 = 100;
const DEFAULT_PAGE: u32 = 1;

/// Raw query parameters; pagination values stay strings so empty ones fall back to defaults
#[derive(Debug, Deserialize)]
pub struct CollectionQuery {
    username: Option<String>,
    per_page: Option<String>,
    page: Option<String>,
}

/// Missing or empty means the default; anything else must parse as an integer
fn pagination_param(
    value: Option<&str>,
    default: u32,
    name: &'static str,
) -> Result<u32, ProxyReply> {
    match value.map(str::trim) {
        None | Some("") => Ok(default),
        Some(raw) => raw.parse().map_err(|_| ProxyReply::InvalidParameter(name)),
    }
}

/// Handler for the Discogs collection proxy
pub async fn collection(
    State(state): State<Arc<AppState>>,
    Extension(request_id): Extension<RequestId>,
    Query(params): Query<CollectionQuery>,
) -> ProxyReply {
    let per_page = match pagination_param(params.per_page.as_deref(), DEFAULT_PER_PAGE, "per_page") {
        Ok(per_page) => per_page,
        Err(reply) => return reply,
    };
    let page = match pagination_param(params.page.as_deref(), DEFAULT_PAGE, "page") {
        Ok(page) => page,
        Err(reply) => return reply,
    };

    let reply = state
        .discogs
        .proxy(params.username.as_deref(), per_page, page)
        .await;

    tracing::info!(
        request_id = %request_id,
        username = ?params.username,
        page,
        per_page,
        status = %reply.status(),
        "Proxied collection request"
    );

    reply
}
