use std::fs;

use anyhow::{Context, Result, anyhow};
use camino::{Utf8Path, Utf8PathBuf};

const ENV_FILENAME: &str = ".env";

/// Read-only view of a `.env` file. Values never leak into the process environment.
#[derive(Debug)]
pub struct EnvFile {
    path: Utf8PathBuf,
    entries: Vec<(String, String)>,
}

impl EnvFile {
    pub fn load(path: &Utf8Path) -> Result<Self> {
        let contents = fs::read_to_string(path).with_context(|| format!("reading {}", path))?;
        Ok(Self::parse(path, &contents))
    }

    fn parse(path: &Utf8Path, contents: &str) -> Self {
        Self {
            path: path.to_owned(),
            entries: parse_entries(contents),
        }
    }

    pub fn path(&self) -> &Utf8Path {
        &self.path
    }

    pub fn entries(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(key, value)| (key.as_str(), value.as_str()))
    }

    /// Last assignment wins, like a shell sourcing the file.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries()
            .filter(|(existing, _)| *existing == key)
            .map(|(_, value)| value)
            .last()
    }
}

/// Find the nearest `.env` walking up from `start`. The walk stops at the first
/// directory holding `.git`, so files above the repository are never picked up.
pub fn locate(start: &Utf8Path) -> Option<Utf8PathBuf> {
    let mut current: Option<&Utf8Path> = Some(start);
    while let Some(dir) = current {
        let candidate = dir.join(ENV_FILENAME);
        if candidate.is_file() {
            return Some(candidate);
        }
        if dir.join(".git").exists() {
            return None;
        }
        current = dir.parent();
    }
    None
}

fn parse_entries(contents: &str) -> Vec<(String, String)> {
    contents
        .lines()
        .map(|line| line.trim_end_matches(['\r']).trim())
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(|line| {
            let body = line.strip_prefix("export ").unwrap_or(line);
            let (key, value) = body.split_once('=').unwrap_or((body, ""));
            (key.trim().to_owned(), unquote(value.trim()).to_owned())
        })
        .collect()
}

fn unquote(value: &str) -> &str {
    if value.len() >= 2
        && ((value.starts_with('"') && value.ends_with('"'))
            || (value.starts_with('\'') && value.ends_with('\'')))
    {
        &value[1..value.len() - 1]
    } else {
        value
    }
}

pub fn current_working_dir() -> Result<Utf8PathBuf> {
    let cwd = std::env::current_dir().context("determining current directory")?;
    Utf8PathBuf::from_path_buf(cwd).map_err(|_| anyhow!("current directory is not valid UTF-8"))
}
