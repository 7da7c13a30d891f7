//! Site configuration management.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::{
    content::CollectionKind,
    error::{CoreError, Result},
};

/// Main configuration structure for Lectern.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Site-wide settings.
    pub site: SiteConfig,

    /// Where the collections live.
    #[serde(default)]
    pub content: ContentConfig,

    /// Publication feed settings.
    #[serde(default)]
    pub feed: FeedConfig,
}

/// Site-wide configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteConfig {
    /// Site title.
    pub title: String,

    /// Site description, used as the feed channel description.
    #[serde(default)]
    pub description: String,

    /// Canonical site URL (e.g., "https://example.com").
    pub url: String,
}

/// Collection directories.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentConfig {
    /// Directory holding one subdirectory per collection.
    #[serde(default = "default_content_root")]
    pub root: PathBuf,

    /// Post collection directory, relative to `root`.
    #[serde(default = "default_post_dir")]
    pub post: PathBuf,

    /// Note collection directory, relative to `root`.
    #[serde(default = "default_note_dir")]
    pub note: PathBuf,

    /// Publication collection directory, relative to `root`.
    #[serde(default = "default_publication_dir")]
    pub publication: PathBuf,
}

/// Publication feed configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedConfig {
    /// Route and output path of the feed document.
    #[serde(default = "default_feed_path")]
    pub path: String,

    /// Prefix joined with an entry id to form its link.
    #[serde(default = "default_link_prefix")]
    pub link_prefix: String,
}

// Default value functions
fn default_content_root() -> PathBuf {
    PathBuf::from("src/content")
}

fn default_post_dir() -> PathBuf {
    PathBuf::from("post")
}

fn default_note_dir() -> PathBuf {
    PathBuf::from("note")
}

fn default_publication_dir() -> PathBuf {
    PathBuf::from("publication")
}

fn default_feed_path() -> String {
    "publications/rss.xml".to_string()
}

fn default_link_prefix() -> String {
    "publications/".to_string()
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            root: default_content_root(),
            post: default_post_dir(),
            note: default_note_dir(),
            publication: default_publication_dir(),
        }
    }
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            path: default_feed_path(),
            link_prefix: default_link_prefix(),
        }
    }
}

impl ContentConfig {
    /// Directory of one collection.
    pub fn collection_dir(&self, kind: CollectionKind) -> PathBuf {
        let dir = match kind {
            CollectionKind::Post => &self.post,
            CollectionKind::Note => &self.note,
            CollectionKind::Publication => &self.publication,
        };
        self.root.join(dir)
    }
}

impl Config {
    /// Load configuration from a TOML file.
    ///
    /// A relative content root is resolved against the file's directory.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(CoreError::config(format!(
                "Configuration file not found: {}",
                path.display()
            )));
        }

        let content = std::fs::read_to_string(path)?;
        let mut config: Config = toml::from_str(&content).map_err(|e| {
            CoreError::config_with_source(
                format!("Failed to parse config file: {}", path.display()),
                e,
            )
        })?;

        config.validate()?;
        config.resolve_root(path);
        Ok(config)
    }

    /// Load configuration with `LECTERN__SECTION__KEY` environment overrides.
    pub fn load_with_env(path: &Path) -> Result<Self> {
        Self::load_layered(path, env_overrides())
    }

    fn load_layered(path: &Path, env: config::Environment) -> Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::File::from(path))
            .add_source(env)
            .build()?;

        let mut config: Config = settings.try_deserialize()?;
        config.validate()?;
        config.resolve_root(path);
        Ok(config)
    }

    fn resolve_root(&mut self, config_path: &Path) {
        if self.content.root.is_relative()
            && let Some(base) = config_path.parent()
        {
            self.content.root = base.join(&self.content.root);
        }
    }

    /// Validate the configuration.
    fn validate(&self) -> Result<()> {
        if self.site.title.is_empty() {
            return Err(CoreError::config("site.title cannot be empty"));
        }

        if self.site.url.is_empty() {
            return Err(CoreError::config("site.url cannot be empty"));
        }

        if !self.site.url.starts_with("http://") && !self.site.url.starts_with("https://") {
            return Err(CoreError::config(
                "site.url must start with http:// or https://",
            ));
        }

        if self.feed.path.trim_matches('/').is_empty() {
            return Err(CoreError::config("feed.path cannot be empty"));
        }

        if self.site.description.is_empty() {
            tracing::warn!("site.description is empty; the feed channel will have no description");
        }

        Ok(())
    }

    /// Route of the feed document, with a leading slash.
    pub fn feed_route(&self) -> String {
        format!("/{}", self.feed.path.trim_start_matches('/'))
    }
}

/// `LECTERN__SECTION__KEY` maps to `section.key`.
fn env_overrides() -> config::Environment {
    config::Environment::with_prefix("LECTERN").separator("__")
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    fn create_test_config() -> String {
        r#"
[site]
title = "Test Site"
description = "Papers and notes"
url = "https://example.com"

[content]
root = "content"
publication = "papers"

[feed]
path = "papers/feed.xml"
link_prefix = "papers/"
"#
        .to_string()
    }

    #[test]
    fn test_load_config() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let config_path = dir.path().join("lectern.toml");
        let mut file = std::fs::File::create(&config_path).expect("create file");
        file.write_all(create_test_config().as_bytes())
            .expect("write");

        let config = Config::load(&config_path).expect("load config");

        assert_eq!(config.site.title, "Test Site");
        assert_eq!(config.site.description, "Papers and notes");
        assert_eq!(config.site.url, "https://example.com");
        assert_eq!(config.content.root, dir.path().join("content"));
        assert_eq!(
            config.content.collection_dir(CollectionKind::Publication),
            dir.path().join("content/papers")
        );
        assert_eq!(
            config.content.collection_dir(CollectionKind::Post),
            dir.path().join("content/post")
        );
        assert_eq!(config.feed.path, "papers/feed.xml");
        assert_eq!(config.feed.link_prefix, "papers/");
    }

    #[test]
    fn test_config_defaults() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let config_path = dir.path().join("lectern.toml");
        let minimal_config = r#"
[site]
title = "Minimal Site"
url = "https://example.com"
"#;
        std::fs::write(&config_path, minimal_config).expect("write");

        let config = Config::load(&config_path).expect("load config");

        assert!(config.site.description.is_empty());
        assert_eq!(
            config.content.collection_dir(CollectionKind::Note),
            dir.path().join("src/content/note")
        );
        assert_eq!(config.feed.path, "publications/rss.xml");
        assert_eq!(config.feed.link_prefix, "publications/");
        assert_eq!(config.feed_route(), "/publications/rss.xml");
    }

    #[test]
    fn test_config_validation_empty_title() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let config_path = dir.path().join("lectern.toml");
        let config_content = r#"
[site]
title = ""
url = "https://example.com"
"#;
        std::fs::write(&config_path, config_content).expect("write");

        let result = Config::load(&config_path);
        assert!(result.is_err());
        assert!(
            result
                .unwrap_err()
                .to_string()
                .contains("title cannot be empty")
        );
    }

    #[test]
    fn test_config_validation_bad_url() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let config_path = dir.path().join("lectern.toml");
        std::fs::write(
            &config_path,
            "[site]\ntitle = \"T\"\nurl = \"example.com\"\n",
        )
        .expect("write");

        let err = Config::load(&config_path).expect_err("scheme required");
        assert!(err.to_string().contains("http"));
    }

    #[test]
    fn test_load_with_env_reads_file() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let config_path = dir.path().join("lectern.toml");
        std::fs::write(&config_path, create_test_config()).expect("write");

        let config = Config::load_with_env(&config_path).expect("load config");
        assert_eq!(config.site.title, "Test Site");
        assert_eq!(config.feed.link_prefix, "papers/");
    }

    fn env_vars(pairs: &[(&str, &str)]) -> config::Map<String, String> {
        pairs
            .iter()
            .map(|(key, value)| ((*key).to_string(), (*value).to_string()))
            .collect()
    }

    #[test]
    fn test_env_overrides_file_values() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let config_path = dir.path().join("lectern.toml");
        std::fs::write(&config_path, create_test_config()).expect("write");

        let env = env_overrides().source(Some(env_vars(&[
            ("LECTERN__FEED__LINK_PREFIX", "works/"),
            ("LECTERN__SITE__TITLE", "Staging Site"),
            ("OTHER__SITE__URL", "https://ignored.example.com"),
        ])));
        let config = Config::load_layered(&config_path, env).expect("load config");

        assert_eq!(config.feed.link_prefix, "works/");
        assert_eq!(config.site.title, "Staging Site");
        assert_eq!(config.site.url, "https://example.com");
        assert_eq!(config.feed.path, "papers/feed.xml");
    }

    #[test]
    fn test_env_override_is_validated() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let config_path = dir.path().join("lectern.toml");
        std::fs::write(&config_path, create_test_config()).expect("write");

        let env = env_overrides().source(Some(env_vars(&[(
            "LECTERN__SITE__URL",
            "ftp://example.com",
        )])));
        let err = Config::load_layered(&config_path, env).expect_err("bad url override");
        assert!(err.to_string().contains("site.url"));
    }

    #[test]
    fn test_config_not_found() {
        let result = Config::load(Path::new("/nonexistent/lectern.toml"));
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("not found"));
    }
}
