mod common;

use common::ScratchDir;
use glsl_prep::{
    preprocess, preprocess_with, PreprocessError, PreprocessOptions, ShaderDescriptor,
    ShaderKind, UniformField,
};

#[test]
fn plain_shader_round_trips() {
    let dir = ScratchDir::new("round-trip");
    dir.write(
        "plain.vert",
        "#version 330 core\n\nlayout (location = 0) in vec3 pos;\n\nvoid main() {\n    gl_Position = vec4(pos, 1.0);\n}\n",
    );

    let out = preprocess(&ShaderDescriptor::new("plain", ShaderKind::Vertex, dir.path())).unwrap();
    assert_eq!(
        out.source,
        "#version 330 core\n\nlayout (location = 0) in vec3 pos;\n\nvoid main() {\ngl_Position = vec4(pos, 1.0);\n}"
    );
    assert!(out.uniform_block.is_none());
}

#[test]
fn include_keeps_surrounding_order() {
    let dir = ScratchDir::new("order");
    dir.write("x.glsl", "C\nD\n");
    dir.write("main.vert", "A\n//#INCLUDE \"x.glsl\"\nB\n");

    let out = preprocess(&ShaderDescriptor::new("main", ShaderKind::Vertex, dir.path())).unwrap();
    assert_eq!(out.source.lines().collect::<Vec<_>>(), ["A", "C", "D", "B"]);
}

#[test]
fn nested_includes_flatten_completely() {
    let dir = ScratchDir::new("flatten");
    dir.write("main.frag", "top\n//#INCLUDE \"inc/x.glsl\"\nbottom");
    // Nested paths stay relative to the shader directory.
    dir.write("inc/x.glsl", "x-begin\n//#INCLUDE \"inc/y.glsl\"\nx-end");
    dir.write("inc/y.glsl", "y");

    let out = preprocess(&ShaderDescriptor::new("main", ShaderKind::Fragment, dir.path())).unwrap();
    assert_eq!(out.source, "top\nx-begin\ny\nx-end\nbottom");
    assert!(!out.source.contains("//#INCLUDE"));
}

#[test]
fn self_include_is_a_cycle() {
    let dir = ScratchDir::new("self-cycle");
    dir.write("loop.vert", "void a();\n//#INCLUDE \"helper.glsl\"");
    dir.write("helper.glsl", "//#INCLUDE \"loop.vert\"");

    let err = preprocess(&ShaderDescriptor::new("loop", ShaderKind::Vertex, dir.path())).unwrap_err();
    assert!(matches!(err, PreprocessError::IncludeCycle { .. }), "{err}");
}

#[test]
fn two_blocks_fail_and_none_succeeds() {
    let dir = ScratchDir::new("blocks");
    dir.write(
        "twice.frag",
        "UNIFORM_BLOCK\nfloat a\nEND_UNIFORM_BLOCK\nUNIFORM_BLOCK\nfloat b\nEND_UNIFORM_BLOCK",
    );
    dir.write("none.frag", "void main() {}");

    let err = preprocess(&ShaderDescriptor::new("twice", ShaderKind::Fragment, dir.path()))
        .unwrap_err();
    assert!(matches!(err, PreprocessError::DuplicateUniformBlock { .. }));

    let out = preprocess(&ShaderDescriptor::new("none", ShaderKind::Fragment, dir.path())).unwrap();
    assert_eq!(out.uniform_block, None);
}

#[test]
fn block_fields_are_ordered() {
    let dir = ScratchDir::new("fields");
    dir.write(
        "lit.frag",
        "UNIFORM_BLOCK\nfloat intensity\nvec3 color\nEND_UNIFORM_BLOCK\nvoid main() {}",
    );

    let out = preprocess(&ShaderDescriptor::new("lit", ShaderKind::Fragment, dir.path())).unwrap();
    let block = out.uniform_block.unwrap();
    assert_eq!(
        block.fields,
        [
            UniformField::new("float", "intensity"),
            UniformField::new("vec3", "color"),
        ]
    );
    let layout = block.layout().unwrap();
    assert_eq!(layout.fields[1].offset, 16);
    assert_eq!(layout.size, 32);
}

#[test]
fn three_token_include_is_malformed() {
    let dir = ScratchDir::new("malformed");
    dir.write("x", "");
    dir.write("y", "");
    dir.write("bad.vert", "//#INCLUDE \"x\" \"y\"");

    let err = preprocess(&ShaderDescriptor::new("bad", ShaderKind::Vertex, dir.path())).unwrap_err();
    assert!(matches!(
        err,
        PreprocessError::MalformedIncludeLine { line: 0, .. }
    ));
}

#[test]
fn missing_shader_is_file_not_found() {
    let dir = ScratchDir::new("missing");
    let err = preprocess(&ShaderDescriptor::new("ghost", ShaderKind::Vertex, dir.path())).unwrap_err();
    assert!(matches!(err, PreprocessError::FileNotFound { .. }));
}

#[test]
fn empty_include_becomes_a_blank_line() {
    let dir = ScratchDir::new("empty-include");
    dir.write("empty.glsl", "");
    dir.write("main.vert", "A\n//#INCLUDE \"empty.glsl\"\nB");

    let out = preprocess(&ShaderDescriptor::new("main", ShaderKind::Vertex, dir.path())).unwrap();
    assert_eq!(out.source, "A\n\nB");
}

#[test]
fn depth_limit_is_configurable() {
    let dir = ScratchDir::new("depth-option");
    dir.write("a.glsl", "//#INCLUDE \"b.glsl\"");
    dir.write("b.glsl", "float b;");
    dir.write("main.vert", "//#INCLUDE \"a.glsl\"");
    let desc = ShaderDescriptor::new("main", ShaderKind::Vertex, dir.path());

    let shallow = PreprocessOptions {
        max_include_depth: 1,
    };
    let err = preprocess_with(&desc, &shallow).unwrap_err();
    assert!(matches!(
        err,
        PreprocessError::IncludeDepthExceeded { limit: 1, .. }
    ));
    assert_eq!(preprocess(&desc).unwrap().source, "float b;");
}
