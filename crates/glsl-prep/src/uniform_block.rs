//! Extraction of the `UNIFORM_BLOCK` ... `END_UNIFORM_BLOCK` section and its
//! std140 layout.
//!
//! ```text
//! UNIFORM_BLOCK FragUniforms
//! float intensity
//! vec3 color;
//! END_UNIFORM_BLOCK
//! ```
//!
//! Extraction only reads the lines; the assembled source keeps them as-is.

use std::str::FromStr;

use crate::error::{PreprocessError, Result};
use crate::lines::SourceFile;

/// Line closing a uniform block.
pub const BLOCK_TERMINATOR: &str = "END_UNIFORM_BLOCK";

/// A `<type> <name>` declaration inside the block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UniformField {
    pub ty: String,
    pub name: String,
}

impl UniformField {
    pub fn new<T: Into<String>, N: Into<String>>(ty: T, name: N) -> Self {
        Self {
            ty: ty.into(),
            name: name.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UniformBlock {
    /// Optional name following the marker, e.g. `UNIFORM_BLOCK FragUniforms`.
    pub name: Option<String>,
    pub start_line: usize,
    pub end_line: usize,
    /// Declaration order.
    pub fields: Vec<UniformField>,
}

/// Parse the block whose marker sits at `start_line`.
pub fn parse_block(file: &SourceFile, start_line: usize) -> Result<UniformBlock> {
    let name = file
        .line(start_line)
        .and_then(|line| line.text.split_whitespace().nth(1))
        .map(str::to_string);

    let mut fields = Vec::new();
    for line in file.lines().iter().skip(start_line + 1) {
        let text = line.text.as_str();
        if text.split_whitespace().next() == Some(BLOCK_TERMINATOR) {
            return Ok(UniformBlock {
                name,
                start_line,
                end_line: line.index,
                fields,
            });
        }
        if text.is_empty() || text.starts_with("//") {
            continue;
        }

        let malformed = || PreprocessError::MalformedUniformBlock {
            file: file.path().to_path_buf(),
            line: line.index,
            text: text.to_string(),
        };
        let mut tokens = text.split_whitespace();
        let (ty, field_name) = match (tokens.next(), tokens.next(), tokens.next()) {
            (Some(ty), Some(name), None) => (ty, name.strip_suffix(';').unwrap_or(name)),
            _ => return Err(malformed()),
        };
        if field_name.is_empty() {
            return Err(malformed());
        }
        fields.push(UniformField::new(ty, field_name));
    }

    Err(PreprocessError::UnterminatedUniformBlock {
        file: file.path().to_path_buf(),
        start_line,
    })
}

/// GLSL types allowed inside a uniform block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UniformType {
    Bool,
    Int,
    Uint,
    Float,
    Vec2,
    Vec3,
    Vec4,
    Mat3,
    Mat4,
}

impl UniformType {
    /// Size in bytes under std140.
    pub fn size(self) -> u32 {
        match self {
            UniformType::Bool | UniformType::Int | UniformType::Uint | UniformType::Float => 4,
            UniformType::Vec2 => 8,
            UniformType::Vec3 => 12,
            UniformType::Vec4 => 16,
            // Three columns, each padded to a vec4.
            UniformType::Mat3 => 48,
            UniformType::Mat4 => 64,
        }
    }

    /// Base alignment in bytes under std140.
    pub fn alignment(self) -> u32 {
        match self {
            UniformType::Bool | UniformType::Int | UniformType::Uint | UniformType::Float => 4,
            UniformType::Vec2 => 8,
            UniformType::Vec3 | UniformType::Vec4 | UniformType::Mat3 | UniformType::Mat4 => 16,
        }
    }
}

impl FromStr for UniformType {
    type Err = ();

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(match s {
            "bool" => UniformType::Bool,
            "int" => UniformType::Int,
            "uint" => UniformType::Uint,
            "float" => UniformType::Float,
            "vec2" => UniformType::Vec2,
            "vec3" => UniformType::Vec3,
            "vec4" => UniformType::Vec4,
            "mat3" => UniformType::Mat3,
            "mat4" => UniformType::Mat4,
            _ => return Err(()),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldLayout {
    pub ty: UniformType,
    pub name: String,
    pub offset: u32,
    pub size: u32,
    pub alignment: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UniformLayout {
    pub fields: Vec<FieldLayout>,
    /// Total buffer size, rounded up to a multiple of 16.
    pub size: u32,
}

fn align_up(value: u32, alignment: u32) -> u32 {
    value.div_ceil(alignment) * alignment
}

impl UniformBlock {
    /// Assign std140 offsets to the fields in declaration order.
    pub fn layout(&self) -> Result<UniformLayout> {
        let mut offset = 0;
        let mut fields = Vec::with_capacity(self.fields.len());
        for field in &self.fields {
            let ty: UniformType = field.ty.parse().map_err(|_| PreprocessError::UnknownUniformType {
                ty: field.ty.clone(),
                name: field.name.clone(),
            })?;
            let alignment = ty.alignment();
            let field_offset = align_up(offset, alignment);
            offset = field_offset + ty.size();
            fields.push(FieldLayout {
                ty,
                name: field.name.clone(),
                offset: field_offset,
                size: ty.size(),
                alignment,
            });
        }
        Ok(UniformLayout {
            fields,
            size: align_up(offset, 16),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_text(text: &str) -> Result<UniformBlock> {
        let file = SourceFile::from_text("block.frag", text);
        parse_block(&file, 0)
    }

    #[test]
    fn fields_in_declaration_order() {
        let block =
            parse_text("UNIFORM_BLOCK\nfloat intensity\nvec3 color\nEND_UNIFORM_BLOCK").unwrap();
        assert_eq!(
            block.fields,
            [
                UniformField::new("float", "intensity"),
                UniformField::new("vec3", "color"),
            ]
        );
        assert_eq!((block.start_line, block.end_line), (0, 3));
        assert_eq!(block.name, None);
    }

    #[test]
    fn blank_and_comment_lines_are_skipped() {
        let block = parse_text(
            "UNIFORM_BLOCK FragUniforms\n\n// tint\nvec4 tint;\n\nEND_UNIFORM_BLOCK\nvoid main() {}",
        )
        .unwrap();
        assert_eq!(block.name.as_deref(), Some("FragUniforms"));
        assert_eq!(block.fields, [UniformField::new("vec4", "tint")]);
    }

    #[test]
    fn three_tokens_is_malformed() {
        let err = parse_text("UNIFORM_BLOCK\nhighp float t\nEND_UNIFORM_BLOCK").unwrap_err();
        assert!(matches!(err, PreprocessError::MalformedUniformBlock { line: 1, .. }));
    }

    #[test]
    fn lone_type_is_malformed() {
        let err = parse_text("UNIFORM_BLOCK\nfloat\nEND_UNIFORM_BLOCK").unwrap_err();
        assert!(matches!(err, PreprocessError::MalformedUniformBlock { .. }));
    }

    #[test]
    fn missing_terminator() {
        let err = parse_text("UNIFORM_BLOCK\nfloat t\nvec2 uv").unwrap_err();
        assert!(matches!(
            err,
            PreprocessError::UnterminatedUniformBlock { start_line: 0, .. }
        ));
    }

    #[test]
    fn std140_layout_offsets() {
        let types = [
            "float", "vec3", "mat4", "vec2", "vec3", "vec4", "bool", "bool", "mat4", "int",
        ];
        let block = UniformBlock {
            name: None,
            start_line: 0,
            end_line: types.len() + 1,
            fields: types
                .iter()
                .enumerate()
                .map(|(i, ty)| UniformField::new(*ty, format!("u{i}")))
                .collect(),
        };
        let layout = block.layout().unwrap();

        let offsets: Vec<_> = layout.fields.iter().map(|f| f.offset).collect();
        assert_eq!(offsets, [0, 16, 32, 96, 112, 128, 144, 148, 160, 224]);
        let alignments: Vec<_> = layout.fields.iter().map(|f| f.alignment).collect();
        assert_eq!(alignments, [4, 16, 16, 8, 16, 16, 4, 4, 16, 4]);
        assert_eq!(layout.size, 240);
    }

    #[test]
    fn unknown_type_has_no_layout() {
        let block = UniformBlock {
            name: None,
            start_line: 0,
            end_line: 2,
            fields: vec![UniformField::new("sampler2D", "tex")],
        };
        let err = block.layout().unwrap_err();
        assert!(matches!(err, PreprocessError::UnknownUniformType { ty, .. } if ty == "sampler2D"));
    }
}
