use std::marker::PhantomData;
use std::rc::Rc;

use bytemuck::Pod;

use crate::driver::Driver;
use crate::error::{GlError, Result};
use crate::handle::Owned;

use super::layout::{validate_layout, VertexAttrib};

/// Largest buffer store, in bytes, that fits a `GLsizeiptr` on every target.
pub const MAX_BUFFER_BYTES: usize = i32::MAX as usize;

/// Buffer usage hint passed to `glBufferData`.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Default)]
pub enum BufferUsage {
    /// Rewritten every frame and drawn a few times.
    #[default]
    StreamDraw,
    DynamicDraw,
    StaticDraw,
}

impl BufferUsage {
    pub fn gl_enum(self) -> u32 {
        match self {
            BufferUsage::StreamDraw => glow::STREAM_DRAW,
            BufferUsage::DynamicDraw => glow::DYNAMIC_DRAW,
            BufferUsage::StaticDraw => glow::STATIC_DRAW,
        }
    }
}

/// A vertex array object plus its array buffer, laid out for vertices of type `V`.
///
/// Both objects are deleted on drop. The attribute pointers are recorded in
/// the VAO at construction, so drawing only needs [`bind_vertex_array`].
///
/// [`bind_vertex_array`]: VertexBuffer::bind_vertex_array
pub struct VertexBuffer<D: Driver, V: Pod> {
    // Field order is drop order: the VAO goes before the buffer it references.
    vao: Owned<D, D::VertexArray>,
    vbo: Owned<D, D::Buffer>,
    vertex_count: usize,
    usage: BufferUsage,
    attribs: Vec<VertexAttrib<V>>,
    _vertex: PhantomData<V>,
}

impl<D: Driver, V: Pod> VertexBuffer<D, V> {
    /// Creates the VAO and buffer, allocates room for `vertex_count` vertices
    /// and records the attribute layout.
    ///
    /// Attribute `i` is enabled, pointed at its field and bound to its name on
    /// `program`. The name binding only applies at the program's next link.
    ///
    /// `initial_data`, when given, is uploaded to the front of the buffer and
    /// must not be longer than `vertex_count`. The store may not exceed
    /// [`MAX_BUFFER_BYTES`].
    pub fn new(
        driver: &Rc<D>,
        program: D::Program,
        attribs: Vec<VertexAttrib<V>>,
        vertex_count: usize,
        usage: BufferUsage,
        initial_data: Option<&[V]>,
    ) -> Result<Self> {
        validate_layout(&attribs)?;
        if let Some(data) = initial_data {
            if data.len() > vertex_count {
                return Err(GlError::OutOfBounds {
                    offset: 0,
                    count: data.len(),
                    capacity: vertex_count,
                });
            }
        }
        let size = Self::byte_size(vertex_count).ok_or_else(|| {
            GlError::InvalidConfig(format!(
                "{vertex_count} vertices of {} bytes exceed the {MAX_BUFFER_BYTES}-byte buffer limit",
                Self::stride()
            ))
        })?;

        let vao = driver
            .create_vertex_array()
            .map_err(|msg| GlError::allocation("vertex array", msg))?;
        let vao = Owned::new(Rc::clone(driver), vao, D::delete_vertex_array);
        let vbo = driver
            .create_buffer()
            .map_err(|msg| GlError::allocation("buffer", msg))?;
        let vbo = Owned::new(Rc::clone(driver), vbo, D::delete_buffer);

        driver.bind_vertex_array(Some(vao.raw()));
        driver.bind_buffer(glow::ARRAY_BUFFER, Some(vbo.raw()));

        match initial_data {
            Some(data) => {
                driver.buffer_data(glow::ARRAY_BUFFER, size, bytemuck::cast_slice(data), usage.gl_enum())
            }
            None => driver.buffer_data_size(glow::ARRAY_BUFFER, size, usage.gl_enum()),
        }

        for (index, attrib) in attribs.iter().enumerate() {
            let index = index as u32;
            driver.enable_vertex_attrib_array(index);
            driver.vertex_attrib_pointer(
                index,
                attrib.size,
                attrib.ty.gl_enum(),
                attrib.normalized,
                Self::stride(),
                attrib.offset,
            );
            driver.bind_attrib_location(program, index, &attrib.name);
        }

        log::debug!(
            "vertex buffer {:?}: {vertex_count} x {} bytes, {} attribs, {usage:?}",
            vbo.raw(),
            Self::stride(),
            attribs.len()
        );

        Ok(Self {
            vao,
            vbo,
            vertex_count,
            usage,
            attribs,
            _vertex: PhantomData,
        })
    }

    /// Size of one vertex in bytes.
    #[inline]
    pub fn stride() -> usize {
        std::mem::size_of::<V>()
    }

    /// Bytes needed for `vertex_count` vertices, if that fits in one store.
    pub fn byte_size(vertex_count: usize) -> Option<usize> {
        vertex_count
            .checked_mul(Self::stride())
            .filter(|&bytes| bytes <= MAX_BUFFER_BYTES)
    }

    /// Overwrites `vertices.len()` vertices starting at `vertex_offset`.
    pub fn update_data(&mut self, vertex_offset: usize, vertices: &[V]) -> Result<()> {
        if vertices.is_empty() {
            return Ok(());
        }
        let end = vertex_offset.checked_add(vertices.len());
        if end.is_none_or(|end| end > self.vertex_count) {
            return Err(GlError::OutOfBounds {
                offset: vertex_offset,
                count: vertices.len(),
                capacity: self.vertex_count,
            });
        }

        // In range, so the byte offset is below `byte_size(vertex_count)`.
        self.bind();
        self.driver().buffer_sub_data(
            glow::ARRAY_BUFFER,
            vertex_offset * Self::stride(),
            bytemuck::cast_slice(vertices),
        );
        Ok(())
    }

    /// Binds the array buffer to `GL_ARRAY_BUFFER`.
    pub fn bind(&self) {
        self.driver().bind_buffer(glow::ARRAY_BUFFER, Some(self.vbo.raw()));
    }

    pub fn bind_vertex_array(&self) {
        self.driver().bind_vertex_array(Some(self.vao.raw()));
    }

    pub fn vertex_count(&self) -> usize {
        self.vertex_count
    }

    pub fn usage(&self) -> BufferUsage {
        self.usage
    }

    pub fn attribs(&self) -> &[VertexAttrib<V>] {
        &self.attribs
    }

    pub fn raw_buffer(&self) -> D::Buffer {
        self.vbo.raw()
    }

    pub fn raw_vertex_array(&self) -> D::VertexArray {
        self.vao.raw()
    }

    pub(crate) fn driver(&self) -> &D {
        self.vbo.driver()
    }
}
