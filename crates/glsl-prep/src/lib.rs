//! Text-level preprocessing of GLSL shader sources.
//!
//! This crate flattens `//#INCLUDE "<path>"` directives and reads the single
//! optional `UNIFORM_BLOCK` section of a shader. It does not look at GLSL
//! semantics; the output is meant for a GL driver or an offline compiler.
//!
//! # Overview
//!
//! - [`SourceFile`] loads a file as stripped, indexed lines.
//! - [`scan`] finds include directives and the uniform block marker.
//! - [`IncludeResolver`] expands includes recursively against the base
//!   directory, with cycle detection.
//! - [`parse_block`] reads the uniform block fields; [`UniformBlock::layout`]
//!   computes their std140 offsets.
//! - [`assemble`] splices the expansions back in source order.
//! - [`preprocess`] runs the whole pass for a [`ShaderDescriptor`].
//!
//! ```rust,ignore
//! use glsl_prep::{preprocess, ShaderDescriptor, ShaderKind};
//!
//! let desc = ShaderDescriptor::new("simple", ShaderKind::Vertex, "assets/shaders/opengl");
//! let out = preprocess(&desc)?;
//! println!("{}", out.source);
//! ```

use std::path::Path;

use tracing::debug;

pub mod assemble;
pub mod descriptor;
pub mod error;
pub mod include;
pub mod lines;
pub mod scanner;
pub mod uniform_block;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use assemble::assemble;
pub use descriptor::{ShaderDescriptor, ShaderKind};
pub use error::{PreprocessError, Result};
pub use include::{parse_include_line, IncludeResolver, DEFAULT_MAX_INCLUDE_DEPTH};
pub use lines::{Line, SourceFile};
pub use scanner::{scan, Directives, IncludeDirective};
pub use uniform_block::{
    parse_block, FieldLayout, UniformBlock, UniformField, UniformLayout, UniformType,
};

/// Tunables for one preprocessing pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreprocessOptions {
    /// Deepest include nesting accepted below the top-level shader.
    pub max_include_depth: usize,
}

impl Default for PreprocessOptions {
    fn default() -> Self {
        Self {
            max_include_depth: DEFAULT_MAX_INCLUDE_DEPTH,
        }
    }
}

/// Result of a successful pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Preprocessed {
    /// Flattened source, lines joined with `\n`.
    pub source: String,
    pub uniform_block: Option<UniformBlock>,
}

/// Preprocess the shader named by `descriptor` with default options.
pub fn preprocess(descriptor: &ShaderDescriptor) -> Result<Preprocessed> {
    preprocess_with(descriptor, &PreprocessOptions::default())
}

pub fn preprocess_with(
    descriptor: &ShaderDescriptor,
    options: &PreprocessOptions,
) -> Result<Preprocessed> {
    debug!(
        shader = descriptor.name(),
        kind = %descriptor.kind(),
        base_dir = %descriptor.base_dir().display(),
        "preprocessing shader"
    );
    let file = SourceFile::load(descriptor.source_path())?;
    preprocess_source(&file, descriptor.base_dir(), options)
}

/// Preprocess an already loaded top-level file.
///
/// Any error aborts the pass; nothing is returned for a partially processed
/// shader.
pub fn preprocess_source(
    file: &SourceFile,
    base_dir: &Path,
    options: &PreprocessOptions,
) -> Result<Preprocessed> {
    let Directives {
        mut includes,
        block_marker,
    } = scan(file)?;

    let uniform_block = block_marker
        .map(|start_line| parse_block(file, start_line))
        .transpose()?;

    IncludeResolver::new(base_dir)
        .with_max_depth(options.max_include_depth)
        .resolve_all(file, &mut includes)?;

    let source = assemble(file, &includes)?;
    Ok(Preprocessed {
        source,
        uniform_block,
    })
}
