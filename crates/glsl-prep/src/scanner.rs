//! Single pass over a [`SourceFile`] locating include directives and the
//! uniform block marker.

use tracing::trace;

use crate::error::{PreprocessError, Result};
use crate::lines::SourceFile;

/// Prefix of an include directive line.
pub const INCLUDE_TOKEN: &str = "//#INCLUDE";
/// Prefix of the line opening a uniform block.
pub const BLOCK_MARKER: &str = "UNIFORM_BLOCK";

/// One `//#INCLUDE` line.
///
/// `target` and `resolved` stay empty until the include resolver has
/// processed the directive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IncludeDirective {
    pub line_index: usize,
    pub target: Option<String>,
    pub resolved: Option<String>,
}

impl IncludeDirective {
    pub fn new(line_index: usize) -> Self {
        Self {
            line_index,
            target: None,
            resolved: None,
        }
    }
}

/// What [`scan`] found, in source order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Directives {
    pub includes: Vec<IncludeDirective>,
    pub block_marker: Option<usize>,
}

/// Find every include directive and at most one uniform block marker.
///
/// A second marker fails immediately with
/// [`PreprocessError::DuplicateUniformBlock`].
pub fn scan(file: &SourceFile) -> Result<Directives> {
    let mut includes = Vec::new();
    let mut block_marker: Option<usize> = None;

    for line in file.lines() {
        if line.text.starts_with(INCLUDE_TOKEN) {
            trace!(line = line.index, "include directive");
            includes.push(IncludeDirective::new(line.index));
        } else if line.text.starts_with(BLOCK_MARKER) {
            if let Some(first_line) = block_marker {
                return Err(PreprocessError::DuplicateUniformBlock {
                    file: file.path().to_path_buf(),
                    first_line,
                    line: line.index,
                });
            }
            trace!(line = line.index, "uniform block marker");
            block_marker = Some(line.index);
        }
    }

    Ok(Directives {
        includes,
        block_marker,
    })
}
