/// Shared filesystem helpers.
pub mod fs {
    use std::fs;
    use std::io;
    use std::path::Path;

    /// Outcome of [`ensure_dir`].
    #[derive(Clone, Copy, Debug, Eq, PartialEq)]
    pub enum DirStatus {
        Created,
        Existed,
    }

    /// Ensure a directory exists, creating it recursively if needed.
    pub fn ensure_dir(path: &Path) -> io::Result<DirStatus> {
        if path.exists() {
            return Ok(DirStatus::Existed);
        }
        fs::create_dir_all(path)?;
        Ok(DirStatus::Created)
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::{SystemTime, UNIX_EPOCH};

    use camino::Utf8PathBuf;

    static COUNTER: AtomicUsize = AtomicUsize::new(0);

    pub fn unique_temp_dir() -> Utf8PathBuf {
        let mut dir = std::env::temp_dir();
        let ts = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        let seq = COUNTER.fetch_add(1, Ordering::SeqCst);
        dir.push(format!("rxiv-files-test-{ts}-{seq}"));
        Utf8PathBuf::from_path_buf(dir).unwrap()
    }
}

#[cfg(test)]
mod tests {
    use super::fs::{DirStatus, ensure_dir};
    use super::test_support::unique_temp_dir;

    #[test]
    fn ensure_dir_creates_nested_then_reports_existing() {
        let root = unique_temp_dir();
        let nested = root.join("a").join("b");

        assert_eq!(ensure_dir(nested.as_std_path()).unwrap(), DirStatus::Created);
        assert!(nested.is_dir());
        assert_eq!(ensure_dir(nested.as_std_path()).unwrap(), DirStatus::Existed);

        let _ = std::fs::remove_dir_all(root.as_std_path());
    }
}
