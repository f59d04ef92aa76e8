use serde::{Deserialize, Serialize};
use std::fmt::Display;

use super::Release;

/// Number of titles sampled per user in the debug summary
pub const SAMPLE_SIZE: usize = 10;

/// Key under which pressings of the same work are grouped
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AlbumKey(pub String);

impl Display for AlbumKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An album both users own, with every pressing each of them has
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SharedAlbum {
    pub key: AlbumKey,
    pub user1: Vec<Release>,
    pub user2: Vec<Release>,
    /// Representative pressing used for cover and title
    pub display: Release,
}

/// Fetched count and a handful of titles for one user
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct UserSample {
    pub count: usize,
    pub titles: Vec<String>,
}

impl UserSample {
    pub fn from_releases(releases: &[Release]) -> Self {
        Self {
            count: releases.len(),
            titles: releases
                .iter()
                .take(SAMPLE_SIZE)
                .map(|r| r.title().to_string())
                .collect(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct DebugSummary {
    pub user1: UserSample,
    pub user2: UserSample,
}

/// Result of comparing two collections
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct Comparison {
    pub shared: Vec<SharedAlbum>,
    pub debug: DebugSummary,
}
