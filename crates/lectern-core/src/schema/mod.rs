//! Collection schemas.
//!
//! Each content kind validates a [`RawRecord`] into a typed record, applying
//! defaults and normalizing dates and tags. Validation is pure: no I/O and no
//! shared state.

mod fields;
mod note;
mod post;
mod publication;

pub use note::Note;
pub use post::{CoverImage, ImageRef, Post};
pub use publication::Publication;

use crate::{content::CollectionKind, error::ValidationError, value::RawRecord};

/// A record type that can be validated from raw frontmatter.
pub trait Schema: Sized + Send {
    /// The collection this schema belongs to.
    const KIND: CollectionKind;

    /// Validate and normalize a raw record.
    ///
    /// All field issues are reported together.
    fn validate(record: &RawRecord) -> Result<Self, ValidationError>;
}
