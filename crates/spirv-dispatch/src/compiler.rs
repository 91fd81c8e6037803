//! External compiler selection.
//!
//! The compiler is `glslangValidator` from `PATH` unless the
//! `GLSLANG_VALIDATOR` environment variable names another executable.

use std::ffi::OsString;

use once_cell::sync::Lazy;

pub const DEFAULT_PROGRAM: &str = "glslangValidator";

/// Environment variable overriding [`DEFAULT_PROGRAM`].
pub const COMPILER_ENV: &str = "GLSLANG_VALIDATOR";

/// `-V`: validate and emit Vulkan SPIR-V.
const VALIDATE_AND_COMPILE: &str = "-V";

static FROM_ENV: Lazy<CompilerConfig> = Lazy::new(CompilerConfig::from_env);

/// Program plus the arguments placed before `<source> -o <output>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompilerConfig {
    pub program: OsString,
    pub args: Vec<OsString>,
}

impl Default for CompilerConfig {
    fn default() -> Self {
        Self::new(DEFAULT_PROGRAM)
    }
}

impl CompilerConfig {
    pub fn new<P: Into<OsString>>(program: P) -> Self {
        Self {
            program: program.into(),
            args: vec![OsString::from(VALIDATE_AND_COMPILE)],
        }
    }

    /// Use `GLSLANG_VALIDATOR` when set and non-empty, the default otherwise.
    pub fn from_env() -> Self {
        match std::env::var_os(COMPILER_ENV) {
            Some(program) if !program.is_empty() => Self::new(program),
            _ => Self::default(),
        }
    }

    /// Process-wide configuration, read from the environment once.
    pub fn global() -> &'static CompilerConfig {
        &FROM_ENV
    }
}
