//! Lectern Core Library
//!
//! Raw frontmatter values, normalization rules, the `post`, `note` and
//! `publication` schemas, and site configuration.

pub mod config;
pub mod content;
pub mod date;
pub mod error;
pub mod frontmatter;
pub mod schema;
pub mod tags;
pub mod value;

pub use config::Config;
pub use content::{CollectionKind, Entry, EntryId};
pub use error::{CoreError, FieldIssue, IssueKind, Result, ValidationError};
pub use schema::{CoverImage, ImageRef, Note, Post, Publication, Schema};
pub use value::{RawRecord, RawValue};
