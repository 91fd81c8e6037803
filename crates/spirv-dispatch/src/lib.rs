//! SPIR-V build dispatch for GLSL shaders.
//!
//! This crate hands shader sources to an external compiler
//! (`glslangValidator` by default) and places the results.
//!
//! # Overview
//!
//! - [`dispatch`] compiles one file into `<out>/<basename>.spv` and returns
//!   the compiler's exit status; [`compile`] turns a failed status into an
//!   error.
//! - [`compile_preprocessed`] flattens a shader with [`glsl_prep`] first.
//! - [`ensure_output_dir`] creates the output directory, tolerating other
//!   dispatchers doing the same concurrently.
//! - [`CompilerConfig`] selects the compiler.
//! - [`build_support`] provides helpers for `build.rs`, with
//!   [`include_spirv!`] and [`include_glsl!`] to load the results.

pub mod build_support;
pub mod compiler;
pub mod dispatch;
pub mod error;
pub mod output;

pub use compiler::CompilerConfig;
pub use dispatch::{compile, compile_preprocessed, dispatch};
pub use error::DispatchError;
pub use output::{ensure_output_dir, output_path};
