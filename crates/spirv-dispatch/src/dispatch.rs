//! Running the external compiler on one shader.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus};

use glsl_prep::ShaderDescriptor;
use tracing::debug;

use crate::compiler::CompilerConfig;
use crate::error::DispatchError;
use crate::output::{ensure_output_dir, output_path};

/// Compile `source` into `<output_dir>/<basename>.spv`.
///
/// Runs `<program> <args..> <source> -o <output>` and blocks until it exits.
/// The compiler's own output goes straight to the inherited stdout/stderr;
/// its exit status is returned as-is.
pub fn dispatch(
    source: &Path,
    output_dir: &Path,
    config: &CompilerConfig,
) -> Result<ExitStatus, DispatchError> {
    let output = output_path(source, output_dir).ok_or_else(|| DispatchError::InvalidSource {
        shader: source.to_path_buf(),
    })?;
    ensure_output_dir(output_dir)?;

    let mut cmd = Command::new(&config.program);
    cmd.args(&config.args).arg(source).arg("-o").arg(&output);
    debug!(?cmd, "running shader compiler");

    let status = cmd.status().map_err(|err| DispatchError::CompilerLaunch {
        program: config.program.clone(),
        source: err,
    })?;
    debug!(%status, output = %output.display(), "shader compiler exited");
    Ok(status)
}

/// Like [`dispatch`], but a non-zero exit is [`DispatchError::CompilerFailed`].
///
/// Returns the path of the written SPIR-V module.
pub fn compile(
    source: &Path,
    output_dir: &Path,
    config: &CompilerConfig,
) -> Result<PathBuf, DispatchError> {
    let status = dispatch(source, output_dir, config)?;
    if !status.success() {
        return Err(DispatchError::CompilerFailed {
            shader: source.to_path_buf(),
            status,
        });
    }
    output_path(source, output_dir).ok_or_else(|| DispatchError::InvalidSource {
        shader: source.to_path_buf(),
    })
}

/// Whether `a` and `b` name the same existing file.
fn same_file(a: &Path, b: &Path) -> bool {
    match (fs::canonicalize(a), fs::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

/// Flatten a shader's includes, write the result to
/// `<output_dir>/<name>.<ext>` and compile that file.
///
/// Returns the path of the SPIR-V module, `<output_dir>/<name>.<ext>.spv`.
/// When `output_dir` holds the shader itself (usually `output_dir` equal to
/// the base directory) nothing is written and
/// [`DispatchError::OverwritesSource`] is returned.
pub fn compile_preprocessed(
    descriptor: &ShaderDescriptor,
    output_dir: &Path,
    config: &CompilerConfig,
) -> Result<PathBuf, DispatchError> {
    let preprocessed = glsl_prep::preprocess(descriptor)?;

    ensure_output_dir(output_dir)?;
    let flattened = output_dir.join(descriptor.file_name());
    if same_file(&flattened, &descriptor.source_path()) {
        return Err(DispatchError::OverwritesSource { path: flattened });
    }
    fs::write(&flattened, preprocessed.source).map_err(|source| DispatchError::WriteSource {
        path: flattened.clone(),
        source,
    })?;
    debug!(shader = %flattened.display(), "wrote flattened source");

    compile(&flattened, output_dir, config)
}
