pub mod collection;
pub mod comparison;
pub mod discogs;
pub mod matching;

pub use collection::{fetch_all_releases, CollectionSource};
pub use comparison::compare_collections;
pub use discogs::{DiscogsClient, ProxyReply};
