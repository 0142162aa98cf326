use std::fs;

use anyhow::{Context, Result};
use camino::{Utf8Path, Utf8PathBuf};
use tracing::info;

use crate::config::Settings;
use crate::error::ManuscriptError;
use crate::util::fs::{DirStatus, ensure_dir};

pub const MAIN_FILENAME: &str = "01_MAIN.md";

pub fn create_output_dir(output_dir: &Utf8Path) -> Result<DirStatus> {
    let status = ensure_dir(output_dir.as_std_path())
        .with_context(|| format!("creating output directory {}", output_dir))?;
    match status {
        DirStatus::Created => info!("Created output directory: {}", output_dir),
        DirStatus::Existed => info!("Output directory already exists: {}", output_dir),
    }
    Ok(status)
}

/// Locate `01_MAIN.md` inside the configured manuscript directory.
pub fn find_manuscript_md(settings: &Settings) -> Result<Utf8PathBuf, ManuscriptError> {
    let dir = settings.manuscript_dir();
    let candidate = dir.join(MAIN_FILENAME);
    if candidate.exists() {
        return Ok(candidate);
    }
    Err(ManuscriptError::NotFound {
        file: MAIN_FILENAME,
        dir,
    })
}

pub fn tex_output_path(settings: &Settings, output_dir: &Utf8Path) -> Utf8PathBuf {
    output_dir.join(format!("{}.tex", settings.manuscript_name()))
}

/// Write generated LaTeX to `<output_dir>/<manuscript name>.tex`, replacing any previous file.
pub fn write_manuscript_output(
    settings: &Settings,
    output_dir: &Utf8Path,
    content: &str,
) -> Result<Utf8PathBuf> {
    let output_file = tex_output_path(settings, output_dir);
    fs::write(&output_file, content).with_context(|| format!("writing {}", output_file))?;
    info!("Generated manuscript: {}", output_file);
    Ok(output_file)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::test_support::unique_temp_dir;

    #[test]
    fn create_output_dir_reports_created_then_existing() {
        let root = unique_temp_dir();
        let out = root.join("output");

        assert_eq!(create_output_dir(&out).unwrap(), DirStatus::Created);
        assert!(out.is_dir());
        assert_eq!(create_output_dir(&out).unwrap(), DirStatus::Existed);

        let _ = fs::remove_dir_all(root.as_std_path());
    }

    #[test]
    fn find_manuscript_md_returns_main_file() {
        let root = unique_temp_dir();
        let dir = root.join("MANUSCRIPT");
        fs::create_dir_all(dir.as_std_path()).unwrap();
        fs::write(dir.join(MAIN_FILENAME).as_std_path(), "# Title\n").unwrap();

        let settings = Settings::new(root.clone(), "MANUSCRIPT");
        assert_eq!(find_manuscript_md(&settings).unwrap(), dir.join(MAIN_FILENAME));

        let _ = fs::remove_dir_all(root.as_std_path());
    }

    #[test]
    fn find_manuscript_md_missing_names_configured_path() {
        let root = unique_temp_dir();
        let settings = Settings::new(root.clone(), "papers/DRAFT");

        let err = find_manuscript_md(&settings).unwrap_err();
        let ManuscriptError::NotFound { file, dir } = &err;
        assert_eq!(*file, MAIN_FILENAME);
        assert_eq!(*dir, root.join("papers/DRAFT"));

        let message = err.to_string();
        assert!(message.contains("01_MAIN.md"));
        assert!(message.contains("papers/DRAFT"));
        assert!(message.contains("MANUSCRIPT_PATH"));
    }

    #[test]
    fn write_manuscript_output_uses_last_segment_and_overwrites() {
        let root = unique_temp_dir();
        let out = root.join("output");
        fs::create_dir_all(out.as_std_path()).unwrap();
        let settings = Settings::new(root.clone(), "papers/EXAMPLE");

        let first = write_manuscript_output(&settings, &out, "first draft").unwrap();
        assert_eq!(first, out.join("EXAMPLE.tex"));

        let second = write_manuscript_output(&settings, &out, "final").unwrap();
        assert_eq!(first, second);
        assert_eq!(fs::read_to_string(second.as_std_path()).unwrap(), "final");

        let _ = fs::remove_dir_all(root.as_std_path());
    }
}
