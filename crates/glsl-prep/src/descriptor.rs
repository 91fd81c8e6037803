//! Which shader to preprocess and where its includes live.

use std::fmt;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::error::PreprocessError;

/// Pipeline stage of a GLSL source file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShaderKind {
    Vertex,
    Fragment,
}

impl ShaderKind {
    /// File extension used for sources of this kind.
    pub fn extension(self) -> &'static str {
        match self {
            ShaderKind::Vertex => "vert",
            ShaderKind::Fragment => "frag",
        }
    }

    /// Look up the kind from a file extension (`vert` / `frag`).
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext {
            "vert" => Some(ShaderKind::Vertex),
            "frag" => Some(ShaderKind::Fragment),
            _ => None,
        }
    }
}

impl FromStr for ShaderKind {
    type Err = PreprocessError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "vert" | "vertex" => Ok(ShaderKind::Vertex),
            "frag" | "fragment" => Ok(ShaderKind::Fragment),
            _ => Err(PreprocessError::InvalidShaderKind(s.to_string())),
        }
    }
}

impl Display for ShaderKind {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// Names one top-level shader: `<base_dir>/<name>.<vert|frag>`.
///
/// The base directory is also the root every include path is resolved
/// against, however deeply nested the include is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShaderDescriptor {
    name: String,
    kind: ShaderKind,
    base_dir: PathBuf,
}

impl ShaderDescriptor {
    pub fn new<N, P>(name: N, kind: ShaderKind, base_dir: P) -> Self
    where
        N: Into<String>,
        P: Into<PathBuf>,
    {
        Self {
            name: name.into(),
            kind,
            base_dir: base_dir.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> ShaderKind {
        self.kind
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// `<name>.<ext>`
    pub fn file_name(&self) -> String {
        format!("{}.{}", self.name, self.kind.extension())
    }

    pub fn source_path(&self) -> PathBuf {
        self.base_dir.join(self.file_name())
    }
}
