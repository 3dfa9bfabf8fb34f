//! WebGL2 backend
//!
//! The packed grid is expanded to RGBA, flipped, uploaded into a single
//! texture and drawn with one fullscreen quad. Grid lines come from the
//! fragment shader, so `draw_grid` has nothing to do here.
//!
//! GPU objects (program, VAO, quad buffer, texture) are created once per
//! backend and released in `Drop`.

use js_sys::Float32Array;
use web_sys::{
    HtmlCanvasElement, WebGl2RenderingContext as GL, WebGlBuffer, WebGlProgram, WebGlTexture,
    WebGlUniformLocation, WebGlVertexArrayObject,
};

use super::{acquire_context, Palette, RenderBackend, SurfaceLayout};
use crate::core::{CellView, ContextKind, EngineError, Result};

pub mod shaders;
pub mod texture;

pub use texture::{expand_rgba, flip_rows};

/// Fullscreen quad as a triangle strip
const QUAD: [f32; 8] = [-1.0, -1.0, -1.0, 1.0, 1.0, -1.0, 1.0, 1.0];

/// Grid lines are one pixel wide
pub const GRID_LINE_WIDTH: f32 = 1.0;

/// Values fed to the fragment shader on every draw
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GridUniforms {
    pub resolution: [f32; 2],
    pub grid_size: f32,
    pub grid_width: f32,
    pub show_grid: bool,
}

impl GridUniforms {
    pub fn new(layout: &SurfaceLayout, show_grid: bool) -> Self {
        Self {
            resolution: [layout.canvas_width() as f32, layout.canvas_height() as f32],
            grid_size: layout.pitch() as f32,
            grid_width: GRID_LINE_WIDTH,
            show_grid,
        }
    }
}

struct UniformLocations {
    texture: Option<WebGlUniformLocation>,
    resolution: Option<WebGlUniformLocation>,
    grid_size: Option<WebGlUniformLocation>,
    grid_width: Option<WebGlUniformLocation>,
    show_grid: Option<WebGlUniformLocation>,
    alive_color: Option<WebGlUniformLocation>,
    dead_color: Option<WebGlUniformLocation>,
    grid_color: Option<WebGlUniformLocation>,
}

impl UniformLocations {
    fn lookup(gl: &GL, program: &WebGlProgram) -> Self {
        Self {
            texture: gl.get_uniform_location(program, "u_texture"),
            resolution: gl.get_uniform_location(program, "u_resolution"),
            grid_size: gl.get_uniform_location(program, "u_gridSize"),
            grid_width: gl.get_uniform_location(program, "u_gridWidth"),
            show_grid: gl.get_uniform_location(program, "u_showGrid"),
            alive_color: gl.get_uniform_location(program, "u_aliveColor"),
            dead_color: gl.get_uniform_location(program, "u_deadColor"),
            grid_color: gl.get_uniform_location(program, "u_gridColor"),
        }
    }
}

pub struct WebGlBackend {
    gl: GL,
    program: WebGlProgram,
    vao: WebGlVertexArrayObject,
    quad: WebGlBuffer,
    texture: WebGlTexture,
    uniforms: UniformLocations,
    layout: SurfaceLayout,
    alive_rgb: [f32; 3],
    dead_rgb: [f32; 3],
    grid_rgb: [f32; 3],
    draw_grid_flag: bool,
    pixels: Vec<u8>,
}

impl WebGlBackend {
    pub fn new(canvas: &HtmlCanvasElement, layout: SurfaceLayout, palette: &Palette, show_grid: bool) -> Result<Self> {
        let gl: GL = acquire_context(canvas, ContextKind::WebGl2)?;

        let program = shaders::link_program(&gl, shaders::VERTEX_SRC, shaders::FRAGMENT_SRC)?;
        let uniforms = UniformLocations::lookup(&gl, &program);

        let vao = gl
            .create_vertex_array()
            .ok_or(EngineError::Resource("vertex array"))?;
        gl.bind_vertex_array(Some(&vao));

        let quad = gl.create_buffer().ok_or(EngineError::Resource("quad buffer"))?;
        gl.bind_buffer(GL::ARRAY_BUFFER, Some(&quad));
        gl.buffer_data_with_array_buffer_view(GL::ARRAY_BUFFER, &Float32Array::from(&QUAD[..]), GL::STATIC_DRAW);

        let position = gl.get_attrib_location(&program, "a_position");
        if position < 0 {
            return Err(EngineError::Resource("a_position attribute"));
        }
        gl.vertex_attrib_pointer_with_i32(position as u32, 2, GL::FLOAT, false, 0, 0);
        gl.enable_vertex_attrib_array(position as u32);
        gl.bind_vertex_array(None);

        let texture = gl.create_texture().ok_or(EngineError::Resource("texture"))?;
        gl.bind_texture(GL::TEXTURE_2D, Some(&texture));
        gl.tex_parameteri(GL::TEXTURE_2D, GL::TEXTURE_MIN_FILTER, GL::NEAREST as i32);
        gl.tex_parameteri(GL::TEXTURE_2D, GL::TEXTURE_MAG_FILTER, GL::NEAREST as i32);
        gl.tex_parameteri(GL::TEXTURE_2D, GL::TEXTURE_WRAP_S, GL::CLAMP_TO_EDGE as i32);
        gl.tex_parameteri(GL::TEXTURE_2D, GL::TEXTURE_WRAP_T, GL::CLAMP_TO_EDGE as i32);

        Ok(Self {
            gl,
            program,
            vao,
            quad,
            texture,
            uniforms,
            layout,
            alive_rgb: palette.alive_rgb(),
            dead_rgb: palette.dead_rgb(),
            grid_rgb: palette.grid_rgb(),
            draw_grid_flag: show_grid,
            pixels: Vec::new(),
        })
    }

    fn upload(&mut self, cells: &CellView<'_>) -> Result<()> {
        expand_rgba(cells, &mut self.pixels);
        flip_rows(&mut self.pixels, cells.width(), cells.height());

        let gl = &self.gl;
        gl.active_texture(GL::TEXTURE0);
        gl.bind_texture(GL::TEXTURE_2D, Some(&self.texture));
        gl.tex_image_2d_with_i32_and_i32_and_i32_and_format_and_type_and_opt_u8_array(
            GL::TEXTURE_2D,
            0,
            GL::RGBA as i32,
            cells.width() as i32,
            cells.height() as i32,
            0,
            GL::RGBA,
            GL::UNSIGNED_BYTE,
            Some(self.pixels.as_slice()),
        )
        .map_err(EngineError::from_js)
    }

    fn draw_scene(&self) {
        let gl = &self.gl;
        let u = &self.uniforms;
        let values = GridUniforms::new(&self.layout, self.draw_grid_flag);

        gl.use_program(Some(&self.program));
        gl.uniform1i(u.texture.as_ref(), 0);
        gl.uniform2f(u.resolution.as_ref(), values.resolution[0], values.resolution[1]);
        gl.uniform1f(u.grid_size.as_ref(), values.grid_size);
        gl.uniform1f(u.grid_width.as_ref(), values.grid_width);
        gl.uniform1i(u.show_grid.as_ref(), values.show_grid as i32);

        let [r, g, b] = self.alive_rgb;
        gl.uniform3f(u.alive_color.as_ref(), r, g, b);
        let [r, g, b] = self.dead_rgb;
        gl.uniform3f(u.dead_color.as_ref(), r, g, b);
        let [r, g, b] = self.grid_rgb;
        gl.uniform3f(u.grid_color.as_ref(), r, g, b);

        gl.viewport(0, 0, values.resolution[0] as i32, values.resolution[1] as i32);
        gl.bind_vertex_array(Some(&self.vao));
        gl.draw_arrays(GL::TRIANGLE_STRIP, 0, 4);
        gl.bind_vertex_array(None);
    }
}

impl RenderBackend for WebGlBackend {
    fn clear(&mut self) {
        let [r, g, b] = self.dead_rgb;
        self.gl.clear_color(r, g, b, 1.0);
        self.gl.clear(GL::COLOR_BUFFER_BIT);
    }

    fn draw_grid(&mut self) {
        // Drawn by the fragment shader together with the cells.
    }

    fn draw_cells(&mut self, cells: &CellView<'_>) -> Result<()> {
        self.upload(cells)?;
        self.draw_scene();
        Ok(())
    }

    fn set_draw_grid_flag(&mut self, flag: bool) {
        self.draw_grid_flag = flag;
    }

    fn draw_grid_flag(&self) -> bool {
        self.draw_grid_flag
    }
}

impl Drop for WebGlBackend {
    fn drop(&mut self) {
        let gl = &self.gl;
        gl.bind_texture(GL::TEXTURE_2D, None);
        gl.bind_buffer(GL::ARRAY_BUFFER, None);
        gl.use_program(None);
        gl.delete_texture(Some(&self.texture));
        gl.delete_buffer(Some(&self.quad));
        gl.delete_vertex_array(Some(&self.vao));
        gl.delete_program(Some(&self.program));
        log::debug!("webgl backend released");
    }
}
