use web_sys::{WebGl2RenderingContext as GL, WebGlProgram, WebGlShader};

use crate::core::{EngineError, Result};

pub const VERTEX_SRC: &str = r#"#version 300 es
in vec2 a_position;

void main() {
    gl_Position = vec4(a_position, 0.0, 1.0);
}
"#;

// Cells and grid in a single pass. `pixel` is measured from the top-left
// corner, matching the layout used by the 2D backend: every `u_gridSize`
// pixels the first `u_gridWidth` pixels are gutter.
pub const FRAGMENT_SRC: &str = r#"#version 300 es
precision highp float;

uniform sampler2D u_texture;
uniform vec2 u_resolution;
uniform float u_gridSize;
uniform float u_gridWidth;
uniform bool u_showGrid;
uniform vec3 u_aliveColor;
uniform vec3 u_deadColor;
uniform vec3 u_gridColor;

out vec4 outColor;

void main() {
    vec2 pixel = vec2(gl_FragCoord.x, u_resolution.y - gl_FragCoord.y);
    vec2 phase = mod(floor(pixel), u_gridSize);

    if (u_showGrid && (phase.x < u_gridWidth || phase.y < u_gridWidth)) {
        outColor = vec4(u_gridColor, 1.0);
        return;
    }

    ivec2 size = textureSize(u_texture, 0);
    ivec2 cell = clamp(ivec2(floor(pixel / u_gridSize)), ivec2(0), size - 1);
    // Rows were flipped on upload.
    float alive = texelFetch(u_texture, ivec2(cell.x, size.y - 1 - cell.y), 0).r;
    outColor = vec4(mix(u_deadColor, u_aliveColor, alive), 1.0);
}
"#;

pub fn compile_shader(gl: &GL, shader_type: u32, src: &str) -> Result<WebGlShader> {
    let shader = gl
        .create_shader(shader_type)
        .ok_or(EngineError::Resource("shader"))?;
    gl.shader_source(&shader, src);
    gl.compile_shader(&shader);

    if gl
        .get_shader_parameter(&shader, GL::COMPILE_STATUS)
        .as_bool()
        .unwrap_or(false)
    {
        Ok(shader)
    } else {
        let log = gl.get_shader_info_log(&shader).unwrap_or_default();
        gl.delete_shader(Some(&shader));
        Err(EngineError::Shader(log))
    }
}

/// Compile both stages and link them. The shader objects are released once
/// linked; only the program is kept.
pub fn link_program(gl: &GL, vert_src: &str, frag_src: &str) -> Result<WebGlProgram> {
    let vert = compile_shader(gl, GL::VERTEX_SHADER, vert_src)?;
    let frag = match compile_shader(gl, GL::FRAGMENT_SHADER, frag_src) {
        Ok(frag) => frag,
        Err(e) => {
            gl.delete_shader(Some(&vert));
            return Err(e);
        }
    };

    let program = gl.create_program().ok_or(EngineError::Resource("program"))?;
    gl.attach_shader(&program, &vert);
    gl.attach_shader(&program, &frag);
    gl.link_program(&program);

    gl.detach_shader(&program, &vert);
    gl.detach_shader(&program, &frag);
    gl.delete_shader(Some(&vert));
    gl.delete_shader(Some(&frag));

    if gl
        .get_program_parameter(&program, GL::LINK_STATUS)
        .as_bool()
        .unwrap_or(false)
    {
        Ok(program)
    } else {
        let log = gl.get_program_info_log(&program).unwrap_or_default();
        gl.delete_program(Some(&program));
        Err(EngineError::ProgramLink(log))
    }
}
