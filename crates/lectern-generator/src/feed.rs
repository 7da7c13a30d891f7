//! Publication feed.
//!
//! Projects the publication collection into minimal feed items and serializes
//! them as an RSS 2.0 document.

use std::io::Write;

use chrono::{DateTime, Utc};
use lectern_core::{Config, Entry, Publication, config::SiteConfig};
use rss::{ChannelBuilder, GuidBuilder, Item, ItemBuilder, validation::Validate};
use thiserror::Error;
use tracing::debug;

use crate::{
    collection::get_collection,
    loader::{ContentProvider, LoadError},
};

/// Content type the feed document is served with.
pub const FEED_CONTENT_TYPE: &str = "application/xml";

/// Feed generation errors.
#[derive(Debug, Error)]
pub enum FeedError {
    /// The publication collection could not be loaded.
    #[error(transparent)]
    Load(#[from] LoadError),

    /// The assembled channel is not valid RSS.
    #[error("RSS validation failed: {0}")]
    Invalid(String),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for feed operations.
pub type Result<T> = std::result::Result<T, FeedError>;

/// One feed entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedItem {
    pub title: String,
    pub pub_date: DateTime<Utc>,
    /// Site-relative link, `{prefix}{id}/`.
    pub link: String,
}

impl FeedItem {
    /// Project a publication into a feed item.
    pub fn from_publication(entry: &Entry<Publication>, link_prefix: &str) -> Self {
        Self {
            title: entry.data.title.clone(),
            pub_date: entry.data.publish_date,
            link: format!("{link_prefix}{}/", entry.id),
        }
    }
}

/// Project every publication, in collection order, without filtering.
pub fn project_publications(entries: &[Entry<Publication>], link_prefix: &str) -> Vec<FeedItem> {
    entries
        .iter()
        .map(|entry| FeedItem::from_publication(entry, link_prefix))
        .collect()
}

/// Site metadata plus the projected items.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedDocument {
    pub title: String,
    pub description: String,
    /// Canonical site URL; item links are resolved against it.
    pub site: String,
    pub items: Vec<FeedItem>,
}

impl FeedDocument {
    /// Create a document for a site.
    pub fn new(site: &SiteConfig, items: Vec<FeedItem>) -> Self {
        Self {
            title: site.title.clone(),
            description: site.description.clone(),
            site: site.url.clone(),
            items,
        }
    }

    /// Absolute URL of an item link.
    ///
    /// The link is appended to the site URL, so any path in the site URL is
    /// kept whether or not it ends with `/`. WHATWG URL resolution would
    /// instead drop the last segment of `https://x.org/lab`.
    pub fn absolute_link(&self, link: &str) -> String {
        if link.starts_with("http://") || link.starts_with("https://") {
            return link.to_string();
        }
        let base = self.site.trim_end_matches('/');
        let link = link.trim_start_matches('/');
        format!("{base}/{link}")
    }

    fn to_item(&self, item: &FeedItem) -> Item {
        let url = self.absolute_link(&item.link);
        let guid = GuidBuilder::default().value(&url).permalink(true).build();

        ItemBuilder::default()
            .title(Some(item.title.clone()))
            .link(Some(url))
            .guid(Some(guid))
            .pub_date(Some(item.pub_date.to_rfc2822()))
            .build()
    }

    /// Serialize to RSS 2.0 XML.
    pub fn to_xml(&self) -> Result<String> {
        debug!(count = self.items.len(), "generating RSS feed");

        let items: Vec<Item> = self.items.iter().map(|item| self.to_item(item)).collect();

        let channel = ChannelBuilder::default()
            .title(&self.title)
            .link(&self.site)
            .description(&self.description)
            .items(items)
            .build();

        channel
            .validate()
            .map_err(|e| FeedError::Invalid(e.to_string()))?;

        Ok(channel.to_string())
    }

    /// Write the XML document to a writer.
    pub fn write_to<W: Write>(&self, writer: &mut W) -> Result<()> {
        let xml = self.to_xml()?;
        writer.write_all(xml.as_bytes())?;
        Ok(())
    }
}

/// Builds the publication feed from a content provider.
#[derive(Debug, Clone)]
pub struct FeedGenerator {
    config: Config,
}

impl FeedGenerator {
    /// Create a new feed generator.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Load the publications and assemble the document.
    ///
    /// Any load or validation failure fails the whole feed.
    pub fn build<P>(&self, provider: &P) -> Result<FeedDocument>
    where
        P: ContentProvider + ?Sized,
    {
        let publications = get_collection::<Publication, P>(provider)?;
        let items = project_publications(&publications, &self.config.feed.link_prefix);
        Ok(FeedDocument::new(&self.config.site, items))
    }

    /// Load the publications and render the XML document.
    pub fn render<P>(&self, provider: &P) -> Result<String>
    where
        P: ContentProvider + ?Sized,
    {
        self.build(provider)?.to_xml()
    }
}
