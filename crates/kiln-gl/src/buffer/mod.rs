//! Vertex buffers.
//!
//! Convention:
//! - vertex types are `#[repr(C)]` and `bytemuck::Pod`
//! - attribute `i` of a layout is bound to index `i` in the program
//! - wrapper APIs count in vertices; byte offsets only appear at the driver seam

mod layout;
mod orphaning;
mod vertex;

pub use layout::{validate_layout, AttribType, VertexAttrib, MAX_VERTEX_ATTRIBS};
pub use orphaning::{OrphaningVertexBuffer, StreamConfig};
pub use vertex::{BufferUsage, VertexBuffer, MAX_BUFFER_BYTES};
