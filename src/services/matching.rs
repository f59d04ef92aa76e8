//! Album matching across two collections
//!
//! Pressings are grouped under a key: the Discogs master id when the pressing has one,
//! otherwise a normalized title/artist string. Two users share an album when both of
//! their groupings contain the same key. The title/artist fallback is a heuristic and
//! can merge distinct works with identical names.

use std::collections::HashMap;

use crate::models::{AlbumKey, Release, SharedAlbum};

/// Lowercases and drops everything that is not an ASCII letter or digit
pub fn normalize(value: &str) -> String {
    value
        .chars()
        .flat_map(char::to_lowercase)
        .filter(char::is_ascii_alphanumeric)
        .collect()
}

/// Derives the grouping key for a release
pub fn album_key(release: &Release) -> AlbumKey {
    if let Some(master_id) = release.master_id() {
        return AlbumKey(format!("m_{}", master_id));
    }

    let title = normalize(release.title());
    let artists = normalize(&release.artist_names().collect::<String>());
    AlbumKey(format!("t_{}_a_{}", title, artists))
}

/// One user's releases bucketed by key, remembering the order keys first appeared
#[derive(Debug, Clone, Default)]
pub struct Grouping {
    order: Vec<AlbumKey>,
    groups: HashMap<AlbumKey, Vec<Release>>,
}

impl Grouping {
    pub fn push(&mut self, release: Release) {
        let key = album_key(&release);
        match self.groups.get_mut(&key) {
            Some(group) => group.push(release),
            None => {
                self.order.push(key.clone());
                self.groups.insert(key, vec![release]);
            }
        }
    }

    pub fn get(&self, key: &AlbumKey) -> Option<&[Release]> {
        self.groups.get(key).map(Vec::as_slice)
    }

    pub fn contains(&self, key: &AlbumKey) -> bool {
        self.groups.contains_key(key)
    }

    /// Keys in first-seen order
    pub fn keys(&self) -> impl Iterator<Item = &AlbumKey> {
        self.order.iter()
    }

    /// Number of distinct keys
    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Total number of releases across all keys
    pub fn release_count(&self) -> usize {
        self.groups.values().map(Vec::len).sum()
    }
}

impl FromIterator<Release> for Grouping {
    fn from_iter<I: IntoIterator<Item = Release>>(iter: I) -> Self {
        let mut grouping = Grouping::default();
        for release in iter {
            grouping.push(release);
        }
        grouping
    }
}

/// Groups releases by their album key, preserving insertion order
pub fn group_by_key(releases: impl IntoIterator<Item = Release>) -> Grouping {
    releases.into_iter().collect()
}

/// Keys present in both groupings, in `first`'s order
pub fn shared_keys<'a>(first: &'a Grouping, second: &'a Grouping) -> Vec<&'a AlbumKey> {
    first.keys().filter(|key| second.contains(key)).collect()
}

/// Albums owned by both users, each carrying every pressing either of them has
pub fn shared_albums(user1: &Grouping, user2: &Grouping) -> Vec<SharedAlbum> {
    shared_keys(user1, user2)
        .into_iter()
        .filter_map(|key| {
            let first = user1.get(key)?;
            let second = user2.get(key)?;
            let display = first.first().or_else(|| second.first())?.clone();

            Some(SharedAlbum {
                key: key.clone(),
                user1: first.to_vec(),
                user2: second.to_vec(),
                display,
            })
        })
        .collect()
}
