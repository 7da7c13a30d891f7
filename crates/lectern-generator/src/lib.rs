//! Lectern Generator Library
//!
//! Loads content collections and builds the publication feed.
//!
//! # Modules
//!
//! - [`loader`] - Content providers, including the filesystem glob loader
//! - [`collection`] - Typed collection loading and validation reports
//! - [`feed`] - Feed projection and RSS serialization

pub mod collection;
pub mod feed;
pub mod loader;

pub use collection::{CheckReport, check_collection, get_collection, get_collection_filtered};
pub use feed::{FEED_CONTENT_TYPE, FeedDocument, FeedError, FeedGenerator, FeedItem};
pub use loader::{ContentProvider, GlobLoader, LoadError, MemoryProvider, RawEntry};
