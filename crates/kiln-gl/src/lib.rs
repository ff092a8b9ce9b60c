//! Kiln GL crate.
//!
//! RAII wrappers over an OpenGL 3.3 / GLES 3 context: shader objects, linked
//! programs with a uniform-location cache, and vertex buffers including a
//! streaming buffer that uses orphaning instead of CPU/GPU synchronization.
//!
//! Every GPU object is deleted when its owning value is dropped. Wrappers
//! share the context as `Rc<D>` where `D: Driver`; `glow::Context` is the
//! production driver.
//!
//! # Structure
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`driver`] | `Driver` trait, `glow::Context` implementation |
//! | [`handle`] | `Owned` move-only handle holder |
//! | [`shader`] | `Shader`, `ShaderProgram`, `UniformCache`, `ProgramSources` |
//! | [`buffer`] | `VertexAttrib`, `VertexBuffer`, `OrphaningVertexBuffer` |
//! | [`error`] | `GlError` |
//! | [`logging`] | `env_logger` setup |
//!
//! # Usage
//!
//! ```no_run
//! use std::rc::Rc;
//! use kiln_gl::{vertex_attrib, AttribType, Primitive, ShaderProgram};
//!
//! #[repr(C)]
//! #[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
//! struct Vertex {
//!     pos: [f32; 2],
//! }
//!
//! # fn context() -> glow::Context { unimplemented!() }
//! # fn main() -> Result<(), kiln_gl::GlError> {
//! let gl = Rc::new(context());
//! let mut program = ShaderProgram::new(
//!     &gl,
//!     include_str!("../shaders/flat.vert"),
//!     include_str!("../shaders/flat.frag"),
//!     vec![vertex_attrib!(Vertex, pos, 2, AttribType::Float, "in_pos")],
//! )?;
//!
//! program.use_program();
//! program.set_uniform_4f("u_color", 1.0, 0.5, 0.0, 1.0)?;
//! let tri = [Vertex { pos: [0.0, 0.5] }, Vertex { pos: [-0.5, -0.5] }, Vertex { pos: [0.5, -0.5] }];
//! let first = program.add_vertices(&tri)?;
//! program.draw_arrays(Primitive::Triangles, first, tri.len());
//! # Ok(())
//! # }
//! ```

pub mod buffer;
pub mod driver;
pub mod error;
pub mod handle;
pub mod logging;
pub mod shader;

#[cfg(test)]
mod testing;

pub use buffer::{
    AttribType, BufferUsage, OrphaningVertexBuffer, StreamConfig, VertexAttrib, VertexBuffer,
};
pub use driver::Driver;
pub use error::{GlError, Result};
pub use shader::{Primitive, ProgramSources, Shader, ShaderProgram, ShaderStage, UniformCache};
