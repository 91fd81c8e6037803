//! Rebuilding the final text from lines and resolved includes.

use std::collections::HashMap;

use crate::error::{PreprocessError, Result};
use crate::lines::SourceFile;
use crate::scanner::IncludeDirective;

/// Join the lines of `file`, replacing every include line by its expansion.
///
/// All other lines, uniform block lines included, are copied verbatim. An
/// empty expansion is still one segment, so it leaves a blank line. The
/// result has no trailing newline.
pub fn assemble(file: &SourceFile, includes: &[IncludeDirective]) -> Result<String> {
    let mut expansions: HashMap<usize, &str> = HashMap::with_capacity(includes.len());
    for directive in includes {
        let resolved = directive.resolved.as_deref().ok_or_else(|| {
            PreprocessError::UnresolvedInclude {
                file: file.path().to_path_buf(),
                line: directive.line_index,
            }
        })?;
        expansions.insert(directive.line_index, resolved);
    }

    let mut segments: Vec<&str> = Vec::with_capacity(file.len());
    for line in file.lines() {
        match expansions.get(&line.index) {
            Some(expansion) => segments.push(expansion),
            None => segments.push(&line.text),
        }
    }
    Ok(segments.join("\n"))
}
