//! Argument handling.
//!
//! Arguments stay `OsString` so paths need not be UTF-8. Only the command,
//! the shader kind and the shader name, which becomes part of a file name
//! built with `format!`, have to be valid UTF-8.

use std::ffi::{OsStr, OsString};
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use glsl_prep::{ShaderDescriptor, ShaderKind};

pub const USAGE: &str = "\
usage:
  shader-tool preprocess <name> <base_dir> [vert|frag]
  shader-tool uniforms <name> <base_dir> [vert|frag]
  shader-tool compile <source> <output_dir>";

#[derive(Debug, PartialEq, Eq)]
pub enum Command {
    /// Print the flattened source.
    Preprocess(ShaderDescriptor),
    /// Print the std140 layout of the uniform block.
    Uniforms(ShaderDescriptor),
    /// Compile a source file to SPIR-V.
    Compile {
        source: PathBuf,
        output_dir: PathBuf,
    },
}

fn utf8<'a>(arg: &'a OsStr, what: &str) -> Result<&'a str> {
    arg.to_str()
        .with_context(|| format!("{what} is not valid UTF-8: {}", arg.to_string_lossy()))
}

fn descriptor(args: &[OsString]) -> Result<ShaderDescriptor> {
    let (name, base_dir, kind) = match args {
        [name, base_dir] => (name, base_dir, ShaderKind::Vertex),
        [name, base_dir, kind] => {
            let kind = utf8(kind, "shader kind")?;
            (
                name,
                base_dir,
                kind.parse::<ShaderKind>()
                    .with_context(|| format!("bad shader kind argument {kind:?}"))?,
            )
        }
        _ => bail!("expected <name> <base_dir> [vert|frag]\n{USAGE}"),
    };
    Ok(ShaderDescriptor::new(
        utf8(name, "shader name")?,
        kind,
        base_dir,
    ))
}

/// Parse the arguments following the program name.
pub fn parse(args: &[OsString]) -> Result<Command> {
    let Some((command, rest)) = args.split_first() else {
        bail!("missing command\n{USAGE}");
    };
    match utf8(command, "command")? {
        "preprocess" => Ok(Command::Preprocess(descriptor(rest)?)),
        "uniforms" => Ok(Command::Uniforms(descriptor(rest)?)),
        "compile" => match rest {
            [source, output_dir] => Ok(Command::Compile {
                source: PathBuf::from(source),
                output_dir: PathBuf::from(output_dir),
            }),
            _ => bail!("expected <source> <output_dir>\n{USAGE}"),
        },
        other => bail!("unknown command {other:?}\n{USAGE}"),
    }
}
