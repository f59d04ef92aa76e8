mod comparison;
mod release;

pub use comparison::{AlbumKey, Comparison, DebugSummary, SharedAlbum, UserSample, SAMPLE_SIZE};
pub use release::{ArtistCredit, BasicInformation, CollectionPage, Pagination, Release};
