//! Scratch directories for tests, shared with downstream crates through the
//! `testing` feature.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

static NEXT_ID: AtomicUsize = AtomicUsize::new(0);

/// Throwaway directory under the system temp dir, removed on drop.
///
/// Names combine `tag`, the process id and a per-process counter, so
/// parallel tests never share a directory.
pub struct ScratchDir {
    path: PathBuf,
}

impl ScratchDir {
    pub fn new(tag: &str) -> Self {
        let id = NEXT_ID.fetch_add(1, Ordering::Relaxed);
        let path = std::env::temp_dir().join(format!(
            "glsl-prep-{tag}-{}-{id}",
            std::process::id()
        ));
        let _ = fs::remove_dir_all(&path);
        fs::create_dir_all(&path).unwrap();
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write `contents` to `relative`, creating parent directories.
    pub fn write(&self, relative: &str, contents: &str) -> PathBuf {
        let path = self.path.join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, contents).unwrap();
        path
    }
}

impl Drop for ScratchDir {
    fn drop(&mut self) {
        let _ = fs::remove_dir_all(&self.path);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_tag_gets_distinct_dirs_removed_on_drop() {
        let a = ScratchDir::new("unique");
        let b = ScratchDir::new("unique");
        assert_ne!(a.path(), b.path());

        let kept = a.write("nested/file.glsl", "float x;");
        assert!(kept.is_file());
        let root = a.path().to_path_buf();
        drop(a);
        assert!(!root.exists());
        assert!(b.path().is_dir());
    }
}
