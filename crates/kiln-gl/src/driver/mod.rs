//! Graphics driver call surface.
//!
//! Every wrapper in this crate talks to the driver through [`Driver`]. The
//! trait is deliberately narrow: one method per GL entry point the wrappers
//! use, with enums passed as raw `u32` GL constants the way `glow` does.
//!
//! [`glow::Context`] implements it (see `gl.rs`). Tests use a recording fake.

mod gl;

use std::fmt::Debug;

/// The subset of OpenGL used by the wrappers.
///
/// Implementations must only be used on the thread where the context is
/// current. Handles are plain copyable values; ownership is expressed by
/// [`crate::handle::Owned`].
pub trait Driver {
    type Shader: Copy + Debug;
    type Program: Copy + Debug;
    type Buffer: Copy + Debug;
    type VertexArray: Copy + Debug;
    type UniformLocation: Clone + Debug;

    // ── shaders ───────────────────────────────────────────────────────────

    fn create_shader(&self, shader_type: u32) -> Result<Self::Shader, String>;
    fn delete_shader(&self, shader: Self::Shader);
    fn shader_source(&self, shader: Self::Shader, source: &str);
    fn compile_shader(&self, shader: Self::Shader);
    fn shader_compile_status(&self, shader: Self::Shader) -> bool;
    fn shader_info_log(&self, shader: Self::Shader) -> String;

    // ── programs ──────────────────────────────────────────────────────────

    fn create_program(&self) -> Result<Self::Program, String>;
    fn delete_program(&self, program: Self::Program);
    fn attach_shader(&self, program: Self::Program, shader: Self::Shader);
    fn bind_attrib_location(&self, program: Self::Program, index: u32, name: &str);
    fn link_program(&self, program: Self::Program);
    fn program_link_status(&self, program: Self::Program) -> bool;
    fn program_info_log(&self, program: Self::Program) -> String;
    fn use_program(&self, program: Option<Self::Program>);
    fn uniform_location(&self, program: Self::Program, name: &str)
    -> Option<Self::UniformLocation>;

    // ── buffers ───────────────────────────────────────────────────────────

    fn create_vertex_array(&self) -> Result<Self::VertexArray, String>;
    fn delete_vertex_array(&self, vao: Self::VertexArray);
    fn bind_vertex_array(&self, vao: Option<Self::VertexArray>);

    fn create_buffer(&self) -> Result<Self::Buffer, String>;
    fn delete_buffer(&self, buffer: Self::Buffer);
    fn bind_buffer(&self, target: u32, buffer: Option<Self::Buffer>);

    /// Allocates `size` bytes of undefined contents for the bound buffer.
    fn buffer_data_size(&self, target: u32, size: usize, usage: u32);
    /// Allocates `size` bytes for the bound buffer and uploads `data` to its
    /// front. `data.len() <= size`.
    fn buffer_data(&self, target: u32, size: usize, data: &[u8], usage: u32);
    fn buffer_sub_data(&self, target: u32, offset: usize, data: &[u8]);

    /// Maps `[offset, offset + data.len())` of the bound buffer with `access`,
    /// copies `data` into it and unmaps. Returns `false` if the map failed.
    fn write_mapped_range(&self, target: u32, offset: usize, data: &[u8], access: u32) -> bool;

    // ── attributes ────────────────────────────────────────────────────────

    fn enable_vertex_attrib_array(&self, index: u32);
    fn vertex_attrib_pointer(
        &self,
        index: u32,
        size: i32,
        data_type: u32,
        normalized: bool,
        stride: usize,
        offset: usize,
    );

    // ── uniforms ──────────────────────────────────────────────────────────

    fn uniform_1_i32(&self, location: &Self::UniformLocation, x: i32);
    fn uniform_1_f32(&self, location: &Self::UniformLocation, x: f32);
    fn uniform_4_f32(&self, location: &Self::UniformLocation, x: f32, y: f32, z: f32, w: f32);
    fn uniform_matrix_4_f32(&self, location: &Self::UniformLocation, transpose: bool, v: &[f32; 16]);

    // ── drawing ───────────────────────────────────────────────────────────

    fn draw_arrays(&self, mode: u32, first: usize, count: usize);
}
