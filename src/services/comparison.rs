use std::sync::Arc;

use crate::{
    error::{AppError, AppResult},
    models::{Comparison, DebugSummary, Release, UserSample},
    services::{
        collection::{fetch_all_releases, CollectionSource},
        matching::{group_by_key, shared_albums},
    },
};

pub const MISSING_USERNAMES: &str = "Please enter both usernames.";

/// Fetches both collections concurrently and reports the albums both users own
pub async fn compare_collections(
    source: Arc<dyn CollectionSource>,
    username1: &str,
    username2: &str,
    per_page: u32,
) -> AppResult<Comparison> {
    let username1 = username1.trim();
    let username2 = username2.trim();
    if username1.is_empty() || username2.is_empty() {
        return Err(AppError::MissingInput(MISSING_USERNAMES.to_string()));
    }

    let first = spawn_fetch(source.clone(), username1.to_string(), per_page);
    let second = spawn_fetch(source, username2.to_string(), per_page);

    let releases1 = join_fetch(first).await;
    let releases2 = join_fetch(second).await;
    let (releases1, releases2) = (releases1?, releases2?);

    let summary = DebugSummary {
        user1: UserSample::from_releases(&releases1),
        user2: UserSample::from_releases(&releases2),
    };
    let (user1_releases, user2_releases) = (summary.user1.count, summary.user2.count);
    tracing::info!(
        user1 = %username1,
        user1_releases,
        user2 = %username2,
        user2_releases,
        "Collections fetched"
    );

    let grouping1 = group_by_key(releases1);
    let grouping2 = group_by_key(releases2);
    tracing::debug!(keys = ?grouping1.keys().collect::<Vec<_>>(), "User 1 keys");
    tracing::debug!(keys = ?grouping2.keys().collect::<Vec<_>>(), "User 2 keys");

    let shared = shared_albums(&grouping1, &grouping2);
    tracing::debug!(
        keys = ?shared.iter().map(|album| &album.key).collect::<Vec<_>>(),
        "Shared keys"
    );
    tracing::info!(shared = shared.len(), "Comparison completed");

    Ok(Comparison {
        shared,
        debug: summary,
    })
}

fn spawn_fetch(
    source: Arc<dyn CollectionSource>,
    username: String,
    per_page: u32,
) -> tokio::task::JoinHandle<AppResult<Vec<Release>>> {
    tokio::spawn(async move { fetch_all_releases(source.as_ref(), &username, per_page).await })
}

async fn join_fetch(
    handle: tokio::task::JoinHandle<AppResult<Vec<Release>>>,
) -> AppResult<Vec<Release>> {
    match handle.await {
        Ok(result) => result,
        Err(e) => {
            tracing::error!(error = %e, "Task join error");
            Err(AppError::Internal(e.to_string()))
        }
    }
}
