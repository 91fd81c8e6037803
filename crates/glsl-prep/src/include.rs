//! Recursive expansion of `//#INCLUDE "<path>"` directives.
//!
//! Include paths are always joined onto the base directory of the top-level
//! shader, never onto the directory of the file that contains the directive.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::assemble::assemble;
use crate::error::{PreprocessError, Result};
use crate::lines::SourceFile;
use crate::scanner::{scan, IncludeDirective, INCLUDE_TOKEN};

pub const DEFAULT_MAX_INCLUDE_DEPTH: usize = 32;

/// Return the path of a well-formed include line.
///
/// The line has to split on single spaces into exactly `//#INCLUDE` and a
/// double-quoted, non-empty path.
pub fn parse_include_line(text: &str) -> Option<&str> {
    let tokens: Vec<&str> = text.split(' ').collect();
    match tokens.as_slice() {
        [INCLUDE_TOKEN, quoted] => {
            let quoted: &str = *quoted;
            quoted
                .strip_prefix('"')
                .and_then(|rest| rest.strip_suffix('"'))
                .filter(|path| !path.is_empty())
        }
        _ => None,
    }
}

/// Canonical form of a file already opened, falling back to the path as given
/// for sources that only exist in memory.
fn identity(path: &Path) -> PathBuf {
    fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf())
}

/// Resolution context for one top-level shader.
///
/// `stack` holds the canonical path of every file currently being expanded,
/// outermost first. A target already on the stack is a cycle.
#[derive(Debug)]
pub struct IncludeResolver {
    base_dir: PathBuf,
    stack: Vec<PathBuf>,
    max_depth: usize,
}

impl IncludeResolver {
    pub fn new<P: Into<PathBuf>>(base_dir: P) -> Self {
        Self {
            base_dir: base_dir.into(),
            stack: Vec::new(),
            max_depth: DEFAULT_MAX_INCLUDE_DEPTH,
        }
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Resolve every directive found in `file`.
    pub fn resolve_all(
        &mut self,
        file: &SourceFile,
        includes: &mut [IncludeDirective],
    ) -> Result<()> {
        self.resolve_within(identity(file.path()), file, includes)
    }

    fn resolve_within(
        &mut self,
        canonical: PathBuf,
        file: &SourceFile,
        includes: &mut [IncludeDirective],
    ) -> Result<()> {
        self.stack.push(canonical);
        let result = includes
            .iter_mut()
            .try_for_each(|directive| self.resolve(file, directive));
        self.stack.pop();
        result
    }

    /// Parse one directive of `file` and store its fully expanded text.
    pub fn resolve(&mut self, file: &SourceFile, directive: &mut IncludeDirective) -> Result<()> {
        let line = directive.line_index;
        let text = file.line(line).map(|l| l.text.as_str()).unwrap_or_default();
        let target =
            parse_include_line(text).ok_or_else(|| PreprocessError::MalformedIncludeLine {
                file: file.path().to_path_buf(),
                line,
                text: text.to_string(),
            })?;

        directive.target = Some(target.to_string());
        directive.resolved = Some(self.expand(Path::new(target), file, line)?);
        Ok(())
    }

    fn expand(&mut self, target: &Path, from: &SourceFile, line: usize) -> Result<String> {
        if self.stack.len() > self.max_depth {
            return Err(PreprocessError::IncludeDepthExceeded {
                file: from.path().to_path_buf(),
                line,
                limit: self.max_depth,
            });
        }

        let path = self.base_dir.join(target);
        let canonical = fs::canonicalize(&path).map_err(|source| match source.kind() {
            io::ErrorKind::NotFound => PreprocessError::IncludeFileNotFound {
                target: path.clone(),
                file: from.path().to_path_buf(),
                line,
            },
            _ => PreprocessError::ReadError {
                path: path.clone(),
                source,
            },
        })?;
        if self.stack.contains(&canonical) {
            return Err(PreprocessError::IncludeCycle {
                target: canonical,
                chain: self.stack.clone(),
                file: from.path().to_path_buf(),
                line,
            });
        }

        let included = SourceFile::load(&path)?;
        let directives = scan(&included)?;
        if let Some(marker) = directives.block_marker {
            return Err(PreprocessError::NestedUniformBlock {
                file: included.path().to_path_buf(),
                line: marker,
            });
        }

        let mut includes = directives.includes;
        self.resolve_within(canonical, &included, &mut includes)?;
        let expanded = assemble(&included, &includes)?;
        debug!(
            include = %path.display(),
            depth = self.stack.len(),
            lines = included.len(),
            "resolved include"
        );
        Ok(expanded)
    }
}
