use camino::Utf8PathBuf;

/// Typed failures callers may want to match on. Everything else is `anyhow`.
#[derive(Debug, thiserror::Error)]
pub enum ManuscriptError {
    #[error(
        "Main manuscript file {file} not found in {dir}/. \
         Make sure MANUSCRIPT_PATH environment variable points to the correct directory."
    )]
    NotFound { file: &'static str, dir: Utf8PathBuf },
}
