use axum::{
    extract::{Query, State},
    response::Html,
    Extension, Json,
};
use serde::Deserialize;
use std::sync::Arc;

use crate::{
    error::AppResult,
    middleware::request_id::RequestId,
    models::Comparison,
    routes::AppState,
    services::compare_collections,
    view::{compare_page, CompareAction, CompareView},
};

#[derive(Debug, Default, Deserialize)]
pub struct CompareQuery {
    #[serde(default)]
    username1: String,
    #[serde(default)]
    username2: String,
}

/// Handler for the JSON comparison endpoint
pub async fn compare_json(
    State(state): State<Arc<AppState>>,
    Extension(request_id): Extension<RequestId>,
    Query(params): Query<CompareQuery>,
) -> AppResult<Json<Comparison>> {
    tracing::info!(
        request_id = %request_id,
        username1 = %params.username1,
        username2 = %params.username2,
        "Processing comparison request"
    );

    let comparison = compare_collections(
        state.collections.clone(),
        &params.username1,
        &params.username2,
        state.page_size,
    )
    .await?;

    Ok(Json(comparison))
}

/// Landing page with an empty form
pub async fn index() -> Html<String> {
    Html(compare_page(&CompareView::default()).into_string())
}

/// Form submission: runs the comparison and renders results or the error inline
pub async fn compare_html(
    State(state): State<Arc<AppState>>,
    Extension(request_id): Extension<RequestId>,
    Query(params): Query<CompareQuery>,
) -> Html<String> {
    let view = CompareView::default().reduce_all([
        CompareAction::EditUsername1(params.username1),
        CompareAction::EditUsername2(params.username2),
        CompareAction::Submit,
    ]);

    let view = if view.loading {
        let result = compare_collections(
            state.collections.clone(),
            &view.username1,
            &view.username2,
            state.page_size,
        )
        .await;

        match result {
            Ok(comparison) => view.reduce(CompareAction::Loaded(comparison)),
            Err(e) => {
                tracing::warn!(request_id = %request_id, error = %e, "Comparison failed");
                view.reduce(CompareAction::Failed(e.to_string()))
            }
        }
    } else {
        view
    };

    Html(compare_page(&view).into_string())
}
