use std::error::Error;
use std::ffi::OsString;
use std::fmt;
use std::fmt::{Display, Formatter};
use std::io;
use std::path::PathBuf;
use std::process::ExitStatus;

use glsl_prep::PreprocessError;

#[derive(Debug)]
pub enum DispatchError {
    /// The source path has no file name to derive the output name from.
    InvalidSource { shader: PathBuf },
    /// The output directory could not be created for a reason other than it
    /// already existing.
    DirectoryCreation { dir: PathBuf, source: io::Error },
    /// The compiler process could not be started.
    CompilerLaunch { program: OsString, source: io::Error },
    /// The compiler ran and exited unsuccessfully.
    CompilerFailed { shader: PathBuf, status: ExitStatus },
    /// The flattened GLSL could not be written next to the SPIR-V output.
    WriteSource { path: PathBuf, source: io::Error },
    /// Writing the flattened GLSL would replace the shader it was made from.
    OverwritesSource { path: PathBuf },
    Preprocess(PreprocessError),
}

impl Display for DispatchError {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            DispatchError::InvalidSource { shader } => {
                write!(f, "{}: not a shader file path", shader.display())
            }
            DispatchError::DirectoryCreation { dir, .. } => {
                write!(f, "could not create output directory {}", dir.display())
            }
            DispatchError::CompilerLaunch { program, .. } => write!(
                f,
                "could not run shader compiler {}",
                program.to_string_lossy()
            ),
            DispatchError::CompilerFailed { shader, status } => {
                write!(f, "{}: shader compilation failed ({status})", shader.display())
            }
            DispatchError::WriteSource { path, .. } => {
                write!(f, "could not write {}", path.display())
            }
            DispatchError::OverwritesSource { path } => write!(
                f,
                "{}: flattened output would overwrite the source shader",
                path.display()
            ),
            DispatchError::Preprocess(_) => f.write_str("shader preprocessing failed"),
        }
    }
}

impl Error for DispatchError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            DispatchError::DirectoryCreation { source, .. }
            | DispatchError::CompilerLaunch { source, .. }
            | DispatchError::WriteSource { source, .. } => Some(source),
            DispatchError::Preprocess(err) => Some(err),
            DispatchError::InvalidSource { .. }
            | DispatchError::CompilerFailed { .. }
            | DispatchError::OverwritesSource { .. } => None,
        }
    }
}

impl From<PreprocessError> for DispatchError {
    fn from(err: PreprocessError) -> Self {
        DispatchError::Preprocess(err)
    }
}
