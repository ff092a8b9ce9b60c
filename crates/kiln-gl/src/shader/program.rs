use std::fmt;
use std::rc::Rc;

use bytemuck::Pod;

use crate::buffer::{OrphaningVertexBuffer, StreamConfig, VertexAttrib};
use crate::driver::Driver;
use crate::error::{GlError, Result};
use crate::handle::Owned;

use super::compile::{clean_info_log, Shader, ShaderStage};
use super::sources::ProgramSources;
use super::uniform::UniformCache;

/// Primitive topology for [`ShaderProgram::draw_arrays`].
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Primitive {
    Points,
    Lines,
    LineStrip,
    LineLoop,
    Triangles,
    TriangleStrip,
    TriangleFan,
}

impl Primitive {
    pub fn gl_enum(self) -> u32 {
        match self {
            Primitive::Points => glow::POINTS,
            Primitive::Lines => glow::LINES,
            Primitive::LineStrip => glow::LINE_STRIP,
            Primitive::LineLoop => glow::LINE_LOOP,
            Primitive::Triangles => glow::TRIANGLES,
            Primitive::TriangleStrip => glow::TRIANGLE_STRIP,
            Primitive::TriangleFan => glow::TRIANGLE_FAN,
        }
    }
}

/// A linked vertex + fragment program with its own streaming vertex buffer.
///
/// Owns both shader objects, the buffer and a lazily filled uniform cache.
/// Everything is released on drop.
pub struct ShaderProgram<D: Driver, V: Pod> {
    // Declaration order is drop order; the program handle goes last.
    uniforms: UniformCache<D>,
    vbo: OrphaningVertexBuffer<D, V>,
    fragment: Shader<D>,
    vertex: Shader<D>,
    id: Owned<D, D::Program>,
}

impl<D: Driver, V: Pod> ShaderProgram<D, V> {
    /// Compiles both stages, sets up the vertex buffer with the default
    /// [`StreamConfig`] and links.
    pub fn new(
        driver: &Rc<D>,
        vertex_src: &str,
        fragment_src: &str,
        attribs: Vec<VertexAttrib<V>>,
    ) -> Result<Self> {
        Self::with_config(driver, vertex_src, fragment_src, attribs, StreamConfig::default())
    }

    pub fn with_config(
        driver: &Rc<D>,
        vertex_src: &str,
        fragment_src: &str,
        attribs: Vec<VertexAttrib<V>>,
        config: StreamConfig,
    ) -> Result<Self> {
        let raw = driver
            .create_program()
            .map_err(|msg| GlError::allocation("program", msg))?;
        let id = Owned::new(Rc::clone(driver), raw, D::delete_program);

        let vertex = Shader::compile(driver, ShaderStage::Vertex, vertex_src)?;
        let fragment = Shader::compile(driver, ShaderStage::Fragment, fragment_src)?;

        // Binds attribute names to indices; must precede the link.
        let vbo = OrphaningVertexBuffer::new(driver, raw, attribs, config)?;

        driver.attach_shader(raw, vertex.raw());
        driver.attach_shader(raw, fragment.raw());
        driver.link_program(raw);

        let log = clean_info_log(driver.program_info_log(raw));
        if !driver.program_link_status(raw) {
            return Err(GlError::Link { log });
        }
        if !log.is_empty() {
            log::warn!("program {raw:?} linked with diagnostics: {log}");
        }

        log::debug!("linked program {raw:?}");
        Ok(Self {
            uniforms: UniformCache::new(),
            vbo,
            fragment,
            vertex,
            id,
        })
    }

    /// Builds a program from sources loaded with [`ProgramSources`].
    pub fn from_sources(
        driver: &Rc<D>,
        sources: &ProgramSources,
        attribs: Vec<VertexAttrib<V>>,
    ) -> Result<Self> {
        Self::new(driver, &sources.vertex, &sources.fragment, attribs)
    }

    /// Makes this the current program.
    pub fn use_program(&self) {
        self.driver().use_program(Some(self.id.raw()));
    }

    /// Clears the current program binding.
    pub fn unuse(&self) {
        self.driver().use_program(None);
    }

    /// Streams `vertices` into the program's buffer; returns the first index.
    pub fn add_vertices(&mut self, vertices: &[V]) -> Result<usize> {
        self.vbo.add_vertices(vertices)
    }

    pub fn add_vertex_data<I>(&mut self, vertices: I) -> Result<usize>
    where
        I: IntoIterator,
        I::Item: Into<V>,
    {
        self.vbo.add_vertex_data(vertices)
    }

    /// Binds the vertex array and draws `count` vertices starting at `first`.
    pub fn draw_arrays(&self, mode: Primitive, first: usize, count: usize) {
        self.vbo.buffer().bind_vertex_array();
        self.driver().draw_arrays(mode.gl_enum(), first, count);
    }

    pub fn set_uniform_mat4(&mut self, name: &str, matrix: &glam::Mat4) -> Result<()> {
        let columns = matrix.to_cols_array();
        self.with_uniform(name, |gl, loc| gl.uniform_matrix_4_f32(loc, false, &columns))
    }

    pub fn set_uniform_1i(&mut self, name: &str, value: i32) -> Result<()> {
        self.with_uniform(name, |gl, loc| gl.uniform_1_i32(loc, value))
    }

    pub fn set_uniform_1f(&mut self, name: &str, value: f32) -> Result<()> {
        self.with_uniform(name, |gl, loc| gl.uniform_1_f32(loc, value))
    }

    pub fn set_uniform_4f(&mut self, name: &str, f0: f32, f1: f32, f2: f32, f3: f32) -> Result<()> {
        self.with_uniform(name, |gl, loc| gl.uniform_4_f32(loc, f0, f1, f2, f3))
    }

    fn with_uniform(&mut self, name: &str, set: impl FnOnce(&D, &D::UniformLocation)) -> Result<()> {
        let driver: &D = self.id.driver();
        let loc = self.uniforms.location(driver, self.id.raw(), name)?;
        set(driver, loc);
        Ok(())
    }

    pub fn raw(&self) -> D::Program {
        self.id.raw()
    }

    pub fn vertex_shader(&self) -> &Shader<D> {
        &self.vertex
    }

    pub fn fragment_shader(&self) -> &Shader<D> {
        &self.fragment
    }

    pub fn vertex_buffer(&self) -> &OrphaningVertexBuffer<D, V> {
        &self.vbo
    }

    pub fn vertex_buffer_mut(&mut self) -> &mut OrphaningVertexBuffer<D, V> {
        &mut self.vbo
    }

    pub fn uniform_cache(&self) -> &UniformCache<D> {
        &self.uniforms
    }

    fn driver(&self) -> &D {
        self.id.driver()
    }
}

impl<D: Driver, V: Pod> fmt::Debug for ShaderProgram<D, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ShaderProgram")
            .field("id", &self.id.raw())
            .field("vertex", &self.vertex)
            .field("fragment", &self.fragment)
            .field("cached_uniforms", &self.uniforms.len())
            .finish_non_exhaustive()
    }
}
