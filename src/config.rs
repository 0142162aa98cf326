use anyhow::{Context, Result};
use camino::{Utf8Component, Utf8Path, Utf8PathBuf};
use tracing::debug;

use crate::envfile::{self, EnvFile};

pub const MANUSCRIPT_PATH_VAR: &str = "MANUSCRIPT_PATH";
pub const DEFAULT_MANUSCRIPT_PATH: &str = "MANUSCRIPT";

/// Where a resolved manuscript path came from.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ManuscriptPathSource {
    Explicit,
    ProcessEnv,
    EnvFile,
    Default,
}

impl ManuscriptPathSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            ManuscriptPathSource::Explicit => "explicit",
            ManuscriptPathSource::ProcessEnv => "process-env",
            ManuscriptPathSource::EnvFile => "env-file",
            ManuscriptPathSource::Default => "default",
        }
    }
}

/// Inputs every operation needs, passed explicitly instead of read from globals.
#[derive(Clone, Debug)]
pub struct Settings {
    pub cwd: Utf8PathBuf,
    pub manuscript_path: Utf8PathBuf,
    pub source: ManuscriptPathSource,
}

impl Settings {
    pub fn new(cwd: impl Into<Utf8PathBuf>, manuscript_path: impl Into<Utf8PathBuf>) -> Self {
        Self {
            cwd: cwd.into(),
            manuscript_path: manuscript_path.into(),
            source: ManuscriptPathSource::Explicit,
        }
    }

    /// Resolve in order: `explicit`, process env, nearest `.env`, default.
    pub fn resolve(cwd: &Utf8Path, explicit: Option<&str>) -> Result<Self> {
        let process_value = std::env::var(MANUSCRIPT_PATH_VAR).ok();
        let env_file = match envfile::locate(cwd) {
            Some(path) => Some(EnvFile::load(&path).with_context(|| format!("loading {}", path))?),
            None => None,
        };
        Ok(Self::resolve_from(
            cwd,
            explicit,
            process_value.as_deref(),
            env_file.as_ref(),
        ))
    }

    fn resolve_from(
        cwd: &Utf8Path,
        explicit: Option<&str>,
        process_value: Option<&str>,
        env_file: Option<&EnvFile>,
    ) -> Self {
        let from_file = env_file.and_then(|file| {
            file.get(MANUSCRIPT_PATH_VAR).map(|value| {
                debug!("using {} from {}", MANUSCRIPT_PATH_VAR, file.path());
                value
            })
        });

        let (value, source) = if let Some(value) = explicit {
            (value, ManuscriptPathSource::Explicit)
        } else if let Some(value) = process_value {
            (value, ManuscriptPathSource::ProcessEnv)
        } else if let Some(value) = from_file {
            (value, ManuscriptPathSource::EnvFile)
        } else {
            (DEFAULT_MANUSCRIPT_PATH, ManuscriptPathSource::Default)
        };

        Self {
            cwd: cwd.to_owned(),
            manuscript_path: Utf8PathBuf::from(value),
            source,
        }
    }

    /// Manuscript directory; an absolute manuscript path ignores `cwd`.
    pub fn manuscript_dir(&self) -> Utf8PathBuf {
        self.cwd.join(&self.manuscript_path)
    }

    /// Last segment of the manuscript path, used to name generated files.
    pub fn manuscript_name(&self) -> &str {
        match self.manuscript_path.components().next_back() {
            Some(Utf8Component::Normal(name)) => name,
            _ => DEFAULT_MANUSCRIPT_PATH,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    use crate::util::test_support::unique_temp_dir;

    #[test]
    fn explicit_beats_env_sources() {
        let settings = Settings::resolve_from(Utf8Path::new("/work"), Some("A"), Some("B"), None);
        assert_eq!(settings.manuscript_path.as_str(), "A");
        assert_eq!(settings.source, ManuscriptPathSource::Explicit);
    }

    #[test]
    fn process_env_beats_env_file() {
        let root = unique_temp_dir();
        fs::create_dir_all(root.as_std_path()).unwrap();
        let path = root.join(".env");
        fs::write(path.as_std_path(), "MANUSCRIPT_PATH=FROM_FILE\n").unwrap();
        let file = EnvFile::load(&path).unwrap();

        let settings = Settings::resolve_from(&root, None, Some("FROM_PROCESS"), Some(&file));
        assert_eq!(settings.manuscript_path.as_str(), "FROM_PROCESS");
        assert_eq!(settings.source, ManuscriptPathSource::ProcessEnv);

        let settings = Settings::resolve_from(&root, None, None, Some(&file));
        assert_eq!(settings.manuscript_path.as_str(), "FROM_FILE");
        assert_eq!(settings.source, ManuscriptPathSource::EnvFile);

        let _ = fs::remove_dir_all(root.as_std_path());
    }

    #[test]
    fn falls_back_to_default() {
        let settings = Settings::resolve_from(Utf8Path::new("/work"), None, None, None);
        assert_eq!(settings.manuscript_path.as_str(), DEFAULT_MANUSCRIPT_PATH);
        assert_eq!(settings.source, ManuscriptPathSource::Default);
        assert_eq!(settings.manuscript_dir(), Utf8PathBuf::from("/work/MANUSCRIPT"));
    }

    #[test]
    fn manuscript_name_is_last_segment() {
        assert_eq!(Settings::new("/w", "papers/EXAMPLE").manuscript_name(), "EXAMPLE");
        assert_eq!(Settings::new("/w", "papers/EXAMPLE/").manuscript_name(), "EXAMPLE");
        assert_eq!(Settings::new("/w", "..").manuscript_name(), "MANUSCRIPT");
    }

    #[test]
    fn absolute_manuscript_path_ignores_cwd() {
        let settings = Settings::new("/work", "/elsewhere/PAPER");
        assert_eq!(settings.manuscript_dir(), Utf8PathBuf::from("/elsewhere/PAPER"));
    }
}
