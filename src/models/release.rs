use serde::{Deserialize, Deserializer, Serialize};

const DISCOGS_WEB_URL: &str = "https://www.discogs.com";

/// Reads an explicit `null` the same as a missing field
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Artist credit attached to a release
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ArtistCredit {
    #[serde(default)]
    pub id: Option<u64>,
    pub name: String,
}

/// Descriptive block Discogs nests under every collection item
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct BasicInformation {
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    /// Release year; Discogs reports 0 when unknown
    #[serde(default, deserialize_with = "null_as_default")]
    pub year: u32,
    /// Master id shared by all pressings of the same work; 0 means none
    #[serde(default)]
    pub master_id: Option<u64>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub artists: Vec<ArtistCredit>,
    #[serde(default)]
    pub cover_image: Option<String>,
    #[serde(default)]
    pub thumb: Option<String>,
}

/// A single pressing in a user's collection
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Release {
    pub id: u64,
    #[serde(default)]
    pub instance_id: Option<u64>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub basic_information: BasicInformation,
}

impl Release {
    pub fn title(&self) -> &str {
        &self.basic_information.title
    }

    pub fn year(&self) -> u32 {
        self.basic_information.year
    }

    /// Master id, if the pressing belongs to one
    pub fn master_id(&self) -> Option<u64> {
        self.basic_information.master_id.filter(|id| *id != 0)
    }

    pub fn artist_names(&self) -> impl Iterator<Item = &str> {
        self.basic_information.artists.iter().map(|a| a.name.as_str())
    }

    /// Artists formatted for display
    pub fn artists_display(&self) -> String {
        self.artist_names().collect::<Vec<_>>().join(", ")
    }

    pub fn cover_image(&self) -> Option<&str> {
        self.basic_information.cover_image.as_deref()
    }

    pub fn release_url(&self) -> String {
        format!("{}/release/{}", DISCOGS_WEB_URL, self.id)
    }

    pub fn master_url(&self) -> Option<String> {
        self.master_id()
            .map(|id| format!("{}/master/{}", DISCOGS_WEB_URL, id))
    }
}

/// Pagination metadata returned alongside each collection page
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Pagination {
    #[serde(default)]
    pub page: Option<u32>,
    #[serde(default)]
    pub pages: Option<u32>,
    #[serde(default)]
    pub per_page: Option<u32>,
    #[serde(default)]
    pub items: Option<u32>,
}

/// One page of `/users/{username}/collection/folders/0/releases`
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct CollectionPage {
    #[serde(default, deserialize_with = "null_as_default")]
    pub releases: Vec<Release>,
    #[serde(default)]
    pub pagination: Option<Pagination>,
}

impl CollectionPage {
    /// Total page count, or a single page when the metadata is absent
    pub fn total_pages(&self) -> u32 {
        self.pagination
            .as_ref()
            .and_then(|p| p.pages)
            .unwrap_or(1)
    }
}
