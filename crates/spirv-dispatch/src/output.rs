//! Output placement for compiled shaders.
//!
//! Several dispatchers may run at once against the same output directory
//! (one per shader, scheduled by the build system). Each writes its own
//! `<basename>.spv`, so the only shared step is creating the directory.

use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::error::DispatchError;

/// `<output_dir>/<basename(source)>.spv`, or `None` when `source` has no
/// file name.
pub fn output_path(source: &Path, output_dir: &Path) -> Option<PathBuf> {
    let mut name = OsString::from(source.file_name()?);
    name.push(".spv");
    Some(output_dir.join(name))
}

/// Create `dir` and its parents.
///
/// Losing a creation race to another dispatcher is not an error; any other
/// failure is [`DispatchError::DirectoryCreation`].
pub fn ensure_output_dir(dir: &Path) -> Result<(), DispatchError> {
    if dir.is_dir() {
        return Ok(());
    }
    match fs::create_dir_all(dir) {
        Ok(()) => {
            debug!(dir = %dir.display(), "created output directory");
            Ok(())
        }
        Err(err) if err.kind() == io::ErrorKind::AlreadyExists && dir.is_dir() => {
            warn!(dir = %dir.display(), "output directory created concurrently");
            Ok(())
        }
        Err(source) => Err(DispatchError::DirectoryCreation {
            dir: dir.to_path_buf(),
            source,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glsl_prep::testing::ScratchDir;

    #[test]
    fn spv_name_keeps_source_extension() {
        let out = output_path(Path::new("shaders/vulkan/demo.vert"), Path::new("gen/spv"));
        assert_eq!(out.as_deref(), Some(Path::new("gen/spv/demo.vert.spv")));
    }

    #[test]
    fn no_file_name_has_no_output() {
        assert_eq!(output_path(Path::new("/"), Path::new("out")), None);
    }

    #[test]
    fn creating_twice_is_fine() {
        let scratch = ScratchDir::new("twice");
        let dir = scratch.path().join("a/b/spv");
        ensure_output_dir(&dir).unwrap();
        ensure_output_dir(&dir).unwrap();
        assert!(dir.is_dir());
    }

    #[test]
    fn file_in_the_way_is_an_error() {
        let scratch = ScratchDir::new("blocked");
        let blocker = scratch.write("blocker", "");

        let err = ensure_output_dir(&blocker.join("spv")).unwrap_err();
        assert!(matches!(err, DispatchError::DirectoryCreation { .. }));

        // The path itself exists, but not as a directory.
        let err = ensure_output_dir(&blocker).unwrap_err();
        assert!(matches!(err, DispatchError::DirectoryCreation { .. }));
    }
}
