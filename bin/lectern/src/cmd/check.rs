//! Check command - validate configuration and every collection

use std::path::Path;

use color_eyre::eyre::{Result, bail};
use lectern_core::{CollectionKind, Config, Note, Post, Publication, Schema};
use lectern_generator::{CheckReport, ContentProvider, GlobLoader, check_collection};

/// Validation result.
#[derive(Debug, Default)]
struct ValidationResult {
    errors: Vec<String>,
    warnings: Vec<String>,
}

impl ValidationResult {
    fn add_error(&mut self, msg: impl Into<String>) {
        self.errors.push(msg.into());
    }

    fn add_warning(&mut self, msg: impl Into<String>) {
        self.warnings.push(msg.into());
    }

    fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}

/// Run the check command.
///
/// Validates the configuration and every entry of every collection.
pub fn run(config_path: &Path, strict: bool) -> Result<()> {
    tracing::info!(?config_path, strict, "Checking configuration and content");

    let mut result = ValidationResult::default();

    println!("Checking configuration...");
    let config = match Config::load_with_env(config_path) {
        Ok(c) => {
            println!("  ✓ Configuration valid");
            c
        }
        Err(e) => {
            println!("  ✗ Configuration invalid: {e}");
            bail!("Validation failed: {e}");
        }
    };

    let loader = GlobLoader::from_config(&config);
    check_content(&loader, &mut result)?;

    println!();
    println!("Summary:");
    println!("  Errors:   {}", result.errors.len());
    println!("  Warnings: {}", result.warnings.len());

    if result.has_errors() {
        println!();
        println!("Errors:");
        for err in &result.errors {
            println!("  ✗ {err}");
        }
    }

    if result.has_warnings() {
        println!();
        println!("Warnings:");
        for warn in &result.warnings {
            println!("  ⚠ {warn}");
        }
    }

    if result.has_errors() {
        bail!("Validation failed with {} error(s)", result.errors.len());
    }

    if strict && result.has_warnings() {
        bail!(
            "Validation failed with {} warning(s) (strict mode)",
            result.warnings.len()
        );
    }

    println!();
    println!("✓ All checks passed");

    Ok(())
}

/// Check every collection the loader knows about.
fn check_content(loader: &GlobLoader, result: &mut ValidationResult) -> Result<()> {
    for kind in CollectionKind::ALL {
        println!("\nChecking {kind} collection...");

        if !loader.has_collection(kind) {
            let dir = loader
                .collection_dir(kind)
                .map(|d| d.display().to_string())
                .unwrap_or_default();
            result.add_warning(format!("Collection directory missing: {dir}"));
            println!("  ⚠ {dir} missing");
            continue;
        }

        match kind {
            CollectionKind::Post => {
                let report = check_kind::<Post>(loader, result)?;
                check_cover_images(&report, result);
            }
            CollectionKind::Note => {
                check_kind::<Note>(loader, result)?;
            }
            CollectionKind::Publication => {
                check_kind::<Publication>(loader, result)?;
            }
        }
    }

    Ok(())
}

/// Validate one collection and record every failing field.
fn check_kind<T: Schema>(
    loader: &GlobLoader,
    result: &mut ValidationResult,
) -> Result<CheckReport<T>> {
    let report = match check_collection::<T, _>(loader) {
        Ok(report) => report,
        Err(e) => {
            result.add_error(format!("{}: {e}", T::KIND));
            println!("  ✗ {e}");
            return Ok(CheckReport {
                valid: Vec::new(),
                failures: Vec::new(),
            });
        }
    };

    for (path, error) in &report.failures {
        for issue in &error.issues {
            result.add_error(format!("{}: {issue}", path.display()));
        }
    }

    if report.is_valid() {
        println!("  ✓ All {} entries valid", report.checked());
    } else {
        println!(
            "  ✗ {}/{} entries have errors",
            report.failures.len(),
            report.checked()
        );
    }

    Ok(report)
}

/// Warn about relative cover images that do not exist next to their post.
fn check_cover_images(report: &CheckReport<Post>, result: &mut ValidationResult) {
    for entry in &report.valid {
        let Some(cover) = &entry.data.cover_image else {
            continue;
        };
        if cover.src.is_relative() && !cover.src.resolve(&entry.path).exists() {
            result.add_warning(format!(
                "{}: cover image not found: {}",
                entry.path.display(),
                cover.src.as_str()
            ));
        }
    }
}
