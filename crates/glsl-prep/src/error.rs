use std::error::Error;
use std::fmt;
use std::fmt::{Display, Formatter};
use std::io;
use std::path::{Path, PathBuf};

pub type Result<T> = std::result::Result<T, PreprocessError>;

/// Everything that can abort a preprocessing pass.
///
/// Line numbers are stored as 0-based line indices and printed 1-based.
#[derive(Debug)]
pub enum PreprocessError {
    InvalidShaderKind(String),
    FileNotFound {
        path: PathBuf,
    },
    ReadError {
        path: PathBuf,
        source: io::Error,
    },
    IncludeFileNotFound {
        target: PathBuf,
        file: PathBuf,
        line: usize,
    },
    MalformedIncludeLine {
        file: PathBuf,
        line: usize,
        text: String,
    },
    IncludeCycle {
        target: PathBuf,
        chain: Vec<PathBuf>,
        file: PathBuf,
        line: usize,
    },
    IncludeDepthExceeded {
        file: PathBuf,
        line: usize,
        limit: usize,
    },
    DuplicateUniformBlock {
        file: PathBuf,
        first_line: usize,
        line: usize,
    },
    NestedUniformBlock {
        file: PathBuf,
        line: usize,
    },
    MalformedUniformBlock {
        file: PathBuf,
        line: usize,
        text: String,
    },
    UnterminatedUniformBlock {
        file: PathBuf,
        start_line: usize,
    },
    UnknownUniformType {
        ty: String,
        name: String,
    },
    UnresolvedInclude {
        file: PathBuf,
        line: usize,
    },
}

struct At<'a>(&'a Path, usize);

impl Display for At<'_> {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{}, line {}", self.0.display(), self.1 + 1)
    }
}

impl Display for PreprocessError {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            PreprocessError::InvalidShaderKind(kind) => {
                write!(f, "invalid shader type: {kind:?} (expected vert or frag)")
            }
            PreprocessError::FileNotFound { path } => {
                write!(f, "{}: file not found", path.display())
            }
            PreprocessError::ReadError { path, .. } => {
                write!(f, "{}: could not read file", path.display())
            }
            PreprocessError::IncludeFileNotFound { target, file, line } => write!(
                f,
                "{}: could not include \"{}\": no such file",
                At(file, *line),
                target.display()
            ),
            PreprocessError::MalformedIncludeLine { file, line, text } => write!(
                f,
                "{}: invalid include line (expected //#INCLUDE \"<path>\"): {text}",
                At(file, *line)
            ),
            PreprocessError::IncludeCycle {
                target,
                chain,
                file,
                line,
            } => {
                write!(
                    f,
                    "{}: recursive include of \"{}\" (",
                    At(file, *line),
                    target.display()
                )?;
                for path in chain {
                    write!(f, "{} -> ", path.display())?;
                }
                write!(f, "{})", target.display())
            }
            PreprocessError::IncludeDepthExceeded { file, line, limit } => write!(
                f,
                "{}: includes nested deeper than {limit} levels",
                At(file, *line)
            ),
            PreprocessError::DuplicateUniformBlock {
                file,
                first_line,
                line,
            } => write!(
                f,
                "{}: uniform block already found at line {}",
                At(file, *line),
                first_line + 1
            ),
            PreprocessError::NestedUniformBlock { file, line } => write!(
                f,
                "{}: included files may not declare a uniform block",
                At(file, *line)
            ),
            PreprocessError::MalformedUniformBlock { file, line, text } => write!(
                f,
                "{}: expected \"<type> <name>\" inside uniform block, got: {text}",
                At(file, *line)
            ),
            PreprocessError::UnterminatedUniformBlock { file, start_line } => write!(
                f,
                "{}: uniform block is never closed",
                At(file, *start_line)
            ),
            PreprocessError::UnknownUniformType { ty, name } => {
                write!(f, "uniform \"{name}\" has unsupported type \"{ty}\"")
            }
            PreprocessError::UnresolvedInclude { file, line } => {
                write!(f, "{}: include was never resolved", At(file, *line))
            }
        }
    }
}

impl Error for PreprocessError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            PreprocessError::ReadError { source, .. } => Some(source),
            _ => None,
        }
    }
}
