use std::fs::{self, File};
use std::sync::LazyLock;

use anyhow::{Context, Result};
use camino::{Utf8Path, Utf8PathBuf};
use chrono::Datelike;
use regex::Regex;
use tracing::{error, info, warn};

use crate::config::Settings;
use crate::metadata::{self, Metadata};

static PERIOD_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\.\s*").expect("period pattern is valid"));
static WHITESPACE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("whitespace pattern is valid"));

fn current_year() -> i32 {
    chrono::Local::now().year()
}

/// Make an author name filename-safe: `"Jane Doe"` -> `jane_doe`, `"A. Smith"` -> `asmith`.
pub fn normalize_author(name: &str) -> String {
    let without_periods = PERIOD_RUN.replace_all(name.trim(), "");
    WHITESPACE_RUN
        .replace_all(without_periods.trim(), "_")
        .to_lowercase()
}

/// `<year>__<lead_author>_et_al__rxiv.pdf`, using the current year when `date` is unusable.
pub fn custom_pdf_filename(metadata: &Metadata) -> String {
    custom_pdf_filename_for_year(metadata, current_year())
}

pub fn custom_pdf_filename_for_year(metadata: &Metadata, fallback_year: i32) -> String {
    let year = metadata::year(metadata, fallback_year);
    let author = normalize_author(metadata::lead_author(metadata));
    format!("{year}__{author}_et_al__rxiv.pdf")
}

pub fn expected_pdf_path(settings: &Settings, output_dir: &Utf8Path) -> Utf8PathBuf {
    output_dir.join(format!("{}.pdf", settings.manuscript_name()))
}

/// Copy the generated PDF into the manuscript folder under its custom name.
///
/// Failures are logged and reported as `None`; they never abort the build.
pub fn copy_pdf_to_manuscript_folder(
    settings: &Settings,
    output_dir: &Utf8Path,
    metadata: &Metadata,
) -> Option<Utf8PathBuf> {
    let output_pdf = expected_pdf_path(settings, output_dir);
    if !output_pdf.exists() {
        warn!("PDF not found at {}", output_pdf);
        return None;
    }

    let destination = settings
        .manuscript_dir()
        .join(custom_pdf_filename(metadata));

    match copy_preserving_mtime(&output_pdf, &destination) {
        Ok(()) => {
            info!("PDF copied to manuscript folder: {}", destination);
            Some(destination)
        }
        Err(err) => {
            error!("Error copying PDF: {err:#}");
            None
        }
    }
}

/// Older name for [`copy_pdf_to_manuscript_folder`].
pub fn copy_pdf_to_base(
    settings: &Settings,
    output_dir: &Utf8Path,
    metadata: &Metadata,
) -> Option<Utf8PathBuf> {
    copy_pdf_to_manuscript_folder(settings, output_dir, metadata)
}

fn copy_preserving_mtime(from: &Utf8Path, to: &Utf8Path) -> Result<()> {
    fs::copy(from, to).with_context(|| format!("copying {} to {}", from, to))?;

    // Best effort.
    let modified = fs::metadata(from).and_then(|meta| meta.modified());
    let applied = modified.and_then(|time| File::options().write(true).open(to)?.set_modified(time));
    if let Err(err) = applied {
        warn!("could not preserve modification time on {}: {}", to, err);
    }
    Ok(())
}
