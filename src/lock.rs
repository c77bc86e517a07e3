//! File-based locking for single-writer safety.
//!
//! Cross-platform (fs2) advisory locks on a sibling of the backing file:
//! `<file>.lock`. The engine targets read-only deployment mounts, so lock
//! acquisition is best-effort at the call site: a store that cannot create
//! the lock file still opens (logged, degraded).
//!
//! Lock is released on Drop.

use anyhow::{Context, Result};
use fs2::FileExt;
use std::fs::OpenOptions;
use std::path::{Path, PathBuf};

pub struct LockGuard {
    file: std::fs::File,
    path: PathBuf,
}

impl LockGuard {
    fn new(file: std::fs::File, path: PathBuf) -> Self {
        Self { file, path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for LockGuard {
    fn drop(&mut self) {
        // fs2 unlock errors on drop are ignored deliberately.
        let _ = self.file.unlock();
    }
}

/// Путь lock-файла рядом с backing-файлом: "<file>.lock".
pub fn lock_file_path(backing: &Path) -> PathBuf {
    let mut name = backing
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "satchel".to_string());
    name.push_str(".lock");
    backing.with_file_name(name)
}

fn open_lock_file(backing: &Path) -> Result<std::fs::File> {
    let path = lock_file_path(backing);
    let f = OpenOptions::new()
        .create(true)
        .read(true)
        .write(true)
        .open(&path)
        .with_context(|| format!("open lock file {}", path.display()))?;
    Ok(f)
}

/// Try to acquire an exclusive lock next to the backing file.
/// Returns Err if the lock file cannot be created or is already held.
pub fn try_exclusive_lock(backing: &Path) -> Result<LockGuard> {
    let file = open_lock_file(backing)?;
    file.try_lock_exclusive().with_context(|| {
        format!(
            "try_lock_exclusive failed: {}",
            lock_file_path(backing).display()
        )
    })?;
    Ok(LockGuard::new(file, lock_file_path(backing)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lock_path_is_sibling() {
        let p = lock_file_path(Path::new("/data/content.json"));
        assert_eq!(p, Path::new("/data/content.json.lock"));
    }

    #[test]
    fn exclusive_lock_excludes_second_holder() {
        let root = std::env::temp_dir().join(format!(
            "satchel-lock-{}-{}",
            std::process::id(),
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .unwrap()
                .as_nanos()
        ));
        std::fs::create_dir_all(&root).unwrap();
        let backing = root.join("db.json");

        let g1 = try_exclusive_lock(&backing).unwrap();
        assert!(try_exclusive_lock(&backing).is_err());
        drop(g1);
        assert!(try_exclusive_lock(&backing).is_ok());
    }
}
