//! Loading shader text as an indexed sequence of stripped lines.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::trace;

use crate::error::{PreprocessError, Result};

/// Characters removed from both ends of every physical line.
const STRIPPED: &[char] = &['\n', '\r', '\t', ' '];

fn split_lines(text: &str) -> impl Iterator<Item = &str> {
    let mut rest = text;
    std::iter::from_fn(move || {
        if rest.is_empty() {
            return None;
        }
        let Some(end) = rest.find(['\n', '\r']) else {
            return Some(std::mem::take(&mut rest));
        };
        let line = &rest[..end];
        let skip = if rest[end..].starts_with("\r\n") { 2 } else { 1 };
        rest = &rest[end + skip..];
        Some(line)
    })
}

/// A single source line. `index` is 0-based and stable for one pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    pub index: usize,
    pub text: String,
}

/// The lines of one shader or include file, in source order.
#[derive(Debug, Clone)]
pub struct SourceFile {
    path: PathBuf,
    lines: Vec<Line>,
}

impl SourceFile {
    /// Read and split the file at `path`.
    ///
    /// A missing file is [`PreprocessError::FileNotFound`]; any other I/O
    /// failure (including invalid UTF-8) is [`PreprocessError::ReadError`].
    pub fn load<P: Into<PathBuf>>(path: P) -> Result<Self> {
        let path = path.into();
        let text = fs::read_to_string(&path).map_err(|source| match source.kind() {
            io::ErrorKind::NotFound => PreprocessError::FileNotFound { path: path.clone() },
            _ => PreprocessError::ReadError {
                path: path.clone(),
                source,
            },
        })?;
        let file = Self::from_text(path, &text);
        trace!(path = %file.path.display(), lines = file.lines.len(), "loaded shader source");
        Ok(file)
    }

    /// Split in-memory `text` as if it had been read from `path`.
    ///
    /// `\n`, `\r\n` and a lone `\r` all end a line.
    pub fn from_text<P: Into<PathBuf>>(path: P, text: &str) -> Self {
        let lines = split_lines(text)
            .enumerate()
            .map(|(index, line)| Line {
                index,
                text: line.trim_matches(STRIPPED).to_string(),
            })
            .collect();
        Self {
            path: path.into(),
            lines,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    pub fn line(&self, index: usize) -> Option<&Line> {
        self.lines.get(index)
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_both_ends_only() {
        let file = SourceFile::from_text("a.vert", "  \tvec3  a;\r\n\t\n  b  c \n");
        let texts: Vec<_> = file.lines().iter().map(|l| l.text.as_str()).collect();
        assert_eq!(texts, ["vec3  a;", "", "b  c"]);
    }

    #[test]
    fn indices_follow_source_order() {
        let file = SourceFile::from_text("a.vert", "x\ny\nz");
        let indices: Vec<_> = file.lines().iter().map(|l| l.index).collect();
        assert_eq!(indices, [0, 1, 2]);
        assert_eq!(file.line(1).map(|l| l.text.as_str()), Some("y"));
    }

    #[test]
    fn every_line_ending_splits() {
        let file = SourceFile::from_text("mac.frag", "a\rb\r\nc\nd\r");
        let texts: Vec<_> = file.lines().iter().map(|l| l.text.as_str()).collect();
        assert_eq!(texts, ["a", "b", "c", "d"]);

        let file = SourceFile::from_text("blank.frag", "a\r\rb");
        let texts: Vec<_> = file.lines().iter().map(|l| l.text.as_str()).collect();
        assert_eq!(texts, ["a", "", "b"]);
    }

    #[test]
    fn empty_text_has_no_lines() {
        let file = SourceFile::from_text("empty.frag", "");
        assert!(file.is_empty());
    }

    #[test]
    fn missing_file_is_file_not_found() {
        let path = std::env::temp_dir().join("glsl-prep-definitely-missing.vert");
        let err = SourceFile::load(&path).unwrap_err();
        assert!(matches!(err, PreprocessError::FileNotFound { path: p } if p == path));
    }
}
