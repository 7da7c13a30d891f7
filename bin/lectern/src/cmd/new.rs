//! New command - create a content entry with valid frontmatter

use std::{
    fs::{self, OpenOptions},
    io::{ErrorKind, Write},
    path::{Path, PathBuf},
};

use chrono::{SecondsFormat, Utc};
use color_eyre::eyre::{Result, WrapErr, bail};
use lectern_core::{CollectionKind, Config};

/// Run the new command.
///
/// Creates `path` inside the collection directory of `kind`, with frontmatter
/// that passes that collection's schema. Existing files are never overwritten.
pub fn run(config_path: &Path, kind: CollectionKind, path: &Path) -> Result<PathBuf> {
    tracing::info!(?path, %kind, "Creating new content");

    let config = Config::load_with_env(config_path).wrap_err("Failed to load configuration")?;
    let full_path = config.content.collection_dir(kind).join(path);

    let file_path = if full_path.extension().is_some() {
        full_path
    } else {
        full_path.with_extension("md")
    };

    if let Some(parent) = file_path.parent() {
        fs::create_dir_all(parent).wrap_err("Failed to create directories")?;
    }

    let mut file = match OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(&file_path)
    {
        Ok(file) => file,
        Err(e) if e.kind() == ErrorKind::AlreadyExists => {
            bail!("{} already exists", file_path.display());
        }
        Err(e) => return Err(e).wrap_err("Failed to create file"),
    };

    file.write_all(generate_frontmatter(kind, path).as_bytes())
        .wrap_err("Failed to write file")?;

    tracing::info!(?file_path, "Created new content file");
    println!("Created: {}", file_path.display());

    Ok(file_path)
}

fn generate_frontmatter(kind: CollectionKind, path: &Path) -> String {
    let title = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("Untitled")
        .replace('-', " ");
    let title = yaml_quote(&title);

    let now = Utc::now();

    match kind {
        CollectionKind::Post => {
            let date = now.format("%Y-%m-%d");
            format!(
                r#"---
title: {title}
description: ""
publishDate: "{date}"
draft: true
tags: []
---

Write your post here.
"#
            )
        }
        CollectionKind::Note => {
            let date = now.to_rfc3339_opts(SecondsFormat::Secs, true);
            format!(
                r#"---
title: {title}
publishDate: "{date}"
---

Write your note here.
"#
            )
        }
        CollectionKind::Publication => {
            let date = now.format("%Y-%m-%d");
            format!(
                r#"---
title: {title}
publishDate: "{date}"
selectionPriority: 0
authors: ""
pub: ""
---
"#
            )
        }
    }
}

/// Quote a string as a YAML double-quoted scalar.
fn yaml_quote(value: &str) -> String {
    let mut quoted = String::with_capacity(value.len() + 2);
    quoted.push('"');
    for c in value.chars() {
        match c {
            '"' => quoted.push_str("\\\""),
            '\\' => quoted.push_str("\\\\"),
            '\n' => quoted.push_str("\\n"),
            '\t' => quoted.push_str("\\t"),
            c if c.is_control() => quoted.push_str(&format!("\\u{:04x}", c as u32)),
            c => quoted.push(c),
        }
    }
    quoted.push('"');
    quoted
}
