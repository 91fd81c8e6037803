//! `shader-tool`: flatten GLSL shaders, inspect their uniform block and
//! compile them to SPIR-V.

mod cli;

use std::ffi::OsString;
use std::io::Write;
use std::process::ExitCode;

use anyhow::{Context, Result};
use glsl_prep::ShaderDescriptor;
use spirv_dispatch::CompilerConfig;
use tracing::{debug, error};
use tracing_subscriber::EnvFilter;

use crate::cli::Command;

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn print_source(descriptor: &ShaderDescriptor) -> Result<ExitCode> {
    let preprocessed = glsl_prep::preprocess(descriptor)
        .with_context(|| format!("failed to preprocess {}", descriptor.source_path().display()))?;
    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "{}", preprocessed.source)?;
    Ok(ExitCode::SUCCESS)
}

fn print_uniforms(descriptor: &ShaderDescriptor) -> Result<ExitCode> {
    let preprocessed = glsl_prep::preprocess(descriptor)
        .with_context(|| format!("failed to preprocess {}", descriptor.source_path().display()))?;
    let Some(block) = preprocessed.uniform_block else {
        anyhow::bail!("{} has no uniform block", descriptor.file_name());
    };
    let layout = block.layout().context("failed to lay out uniform block")?;

    let mut stdout = std::io::stdout().lock();
    if let Some(name) = &block.name {
        writeln!(stdout, "block {name}")?;
    }
    for (field, placed) in block.fields.iter().zip(&layout.fields) {
        writeln!(
            stdout,
            "{:>5} {:>4} {:<6} {}",
            placed.offset, placed.size, field.ty, placed.name
        )?;
    }
    writeln!(stdout, "size {}", layout.size)?;
    Ok(ExitCode::SUCCESS)
}

fn run(command: Command) -> Result<ExitCode> {
    debug!(?command, "running");
    match command {
        Command::Preprocess(descriptor) => print_source(&descriptor),
        Command::Uniforms(descriptor) => print_uniforms(&descriptor),
        Command::Compile { source, output_dir } => {
            let status = spirv_dispatch::dispatch(&source, &output_dir, CompilerConfig::global())
                .with_context(|| format!("failed to compile {}", source.display()))?;
            if status.success() {
                return Ok(ExitCode::SUCCESS);
            }
            error!(shader = %source.display(), %status, "shader compiler failed");
            // Killed by a signal: no code to mirror.
            let code = status.code().unwrap_or(1);
            Ok(ExitCode::from(u8::try_from(code).unwrap_or(1)))
        }
    }
}

fn main() -> ExitCode {
    init_logging();

    let args: Vec<OsString> = std::env::args_os().skip(1).collect();
    match cli::parse(&args).and_then(run) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}
