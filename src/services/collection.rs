use crate::{error::AppResult, models::{CollectionPage, Release}};

/// Source of collection pages for a username
///
/// Implementations map any unusable page (unknown user, private collection, upstream
/// failure) to [`crate::error::AppError::NotFoundOrPrivate`].
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait CollectionSource: Send + Sync {
    /// Fetch a single 1-based page
    async fn fetch_page(&self, username: &str, per_page: u32, page: u32) -> AppResult<CollectionPage>;
}

/// Walks every page of a user's collection and returns all releases in page order
///
/// The page count comes from the first page's pagination metadata. Any failing page
/// aborts the walk; partial results are discarded.
pub async fn fetch_all_releases(
    source: &dyn CollectionSource,
    username: &str,
    per_page: u32,
) -> AppResult<Vec<Release>> {
    let mut releases = Vec::new();
    let mut total_pages = 1;
    let mut page = 1;

    loop {
        let collection_page = source.fetch_page(username, per_page, page).await?;
        // Only the first page's metadata decides how far to walk
        if page == 1 {
            total_pages = collection_page.total_pages();
        }
        releases.extend(collection_page.releases);

        page += 1;
        if page > total_pages {
            break;
        }
    }

    tracing::debug!(
        username = %username,
        pages = total_pages,
        releases = releases.len(),
        "Collection fetched"
    );

    Ok(releases)
}
