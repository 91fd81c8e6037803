//! Shader compilation helpers for consumer `build.rs` scripts.
//!
//! These functions flatten and compile GLSL shaders at build time and emit
//! the appropriate `cargo:rerun-if-changed` directives.
//!
//! # Usage
//!
//! ```rust,ignore
//! use spirv_dispatch::build_support::{compile_glsl_shaders, GlslEntry};
//! use glsl_prep::ShaderKind;
//!
//! fn main() {
//!     compile_glsl_shaders(
//!         std::path::Path::new("shaders"),
//!         &[
//!             GlslEntry { name: "demo", kind: ShaderKind::Vertex },
//!             GlslEntry { name: "demo", kind: ShaderKind::Fragment },
//!         ],
//!     );
//! }
//! ```
//!
//! Then in your Rust source, load the results:
//!
//! ```rust,ignore
//! let spv = spirv_dispatch::include_spirv!("demo.vert");
//! let glsl = spirv_dispatch::include_glsl!("demo.frag");
//! ```

use std::error::Error;
use std::fs;
use std::path::{Path, PathBuf};

use glsl_prep::{ShaderDescriptor, ShaderKind};

use crate::compiler::CompilerConfig;
use crate::dispatch::compile_preprocessed;
use crate::error::DispatchError;

/// A shader to compile: `<shader_dir>/<name>.<vert|frag>`.
#[derive(Debug, Clone, Copy)]
pub struct GlslEntry {
    pub name: &'static str,
    pub kind: ShaderKind,
}

/// Preprocess and compile every entry into `out_dir`.
///
/// Writes `<name>.<ext>` (flattened GLSL) and `<name>.<ext>.spv` for each
/// entry and returns the SPIR-V paths in entry order. Stops at the first
/// failure.
pub fn try_compile_glsl_shaders(
    shader_dir: &Path,
    out_dir: &Path,
    entries: &[GlslEntry],
    config: &CompilerConfig,
) -> Result<Vec<PathBuf>, DispatchError> {
    entries
        .iter()
        .map(|entry| {
            let descriptor = ShaderDescriptor::new(entry.name, entry.kind, shader_dir);
            compile_preprocessed(&descriptor, out_dir, config)
        })
        .collect()
}

/// Compile GLSL shaders into `OUT_DIR` with the compiler from
/// [`CompilerConfig::global`].
///
/// Panics on any failure, which is how a build script reports errors.
/// Emits `cargo:rerun-if-changed` for every shader source under
/// `shader_dir`, includes in subdirectories too, and for the compiler
/// override variable.
pub fn compile_glsl_shaders(shader_dir: &Path, entries: &[GlslEntry]) {
    let out_dir = std::env::var_os("OUT_DIR").expect("OUT_DIR is only set for build scripts");

    if let Err(e) = try_compile_glsl_shaders(
        shader_dir,
        Path::new(&out_dir),
        entries,
        CompilerConfig::global(),
    ) {
        panic!("GLSL shader compilation failed: {}", error_chain(&e));
    }

    for path in shader_sources(shader_dir) {
        println!("cargo:rerun-if-changed={}", path.display());
    }
    println!("cargo:rerun-if-env-changed={}", crate::compiler::COMPILER_ENV);
}

/// `outer: cause: root cause`, as `anyhow` prints with `{:#}`.
fn error_chain(err: &dyn Error) -> String {
    let mut message = err.to_string();
    let mut cause = err.source();
    while let Some(inner) = cause {
        message.push_str(": ");
        message.push_str(&inner.to_string());
        cause = inner.source();
    }
    message
}

/// Every `.vert`, `.frag` and `.glsl` file below `dir`, sorted.
pub fn shader_sources(dir: &Path) -> Vec<PathBuf> {
    let mut found = Vec::new();
    let mut pending = vec![dir.to_path_buf()];
    while let Some(current) = pending.pop() {
        let Ok(dir_entries) = fs::read_dir(&current) else {
            continue;
        };
        for dir_entry in dir_entries.flatten() {
            let path = dir_entry.path();
            if path.is_dir() {
                pending.push(path);
            } else if path
                .extension()
                .is_some_and(|ext| ext == "vert" || ext == "frag" || ext == "glsl")
            {
                found.push(path);
            }
        }
    }
    found.sort();
    found
}

/// Load an embedded SPIR-V module compiled by [`compile_glsl_shaders`].
///
/// The `$file` argument is the shader file name, e.g. `"demo.vert"`.
///
/// Expands to `include_bytes!(concat!(env!("OUT_DIR"), "/", $file, ".spv"))`.
#[macro_export]
macro_rules! include_spirv {
    ($file:literal) => {
        include_bytes!(concat!(env!("OUT_DIR"), "/", $file, ".spv"))
    };
}

/// Load the flattened GLSL source written by [`compile_glsl_shaders`], for
/// the text-based backend.
///
/// Expands to `include_str!(concat!(env!("OUT_DIR"), "/", $file))`.
#[macro_export]
macro_rules! include_glsl {
    ($file:literal) => {
        include_str!(concat!(env!("OUT_DIR"), "/", $file))
    };
}
