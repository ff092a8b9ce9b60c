use std::rc::Rc;

use bytemuck::Pod;

use crate::driver::Driver;
use crate::error::{GlError, Result};

use super::layout::VertexAttrib;
use super::vertex::{BufferUsage, VertexBuffer};

/// Sizing for a streaming vertex buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StreamConfig {
    /// Capacity of the ring region, in vertices.
    pub capacity: usize,

    /// Usage hint for the backing store.
    pub usage: BufferUsage,
}

impl StreamConfig {
    pub const DEFAULT_CAPACITY: usize = 1 << 16;

    pub fn with_capacity(capacity: usize) -> Self {
        Self { capacity, ..Self::default() }
    }
}

impl Default for StreamConfig {
    fn default() -> Self {
        Self {
            capacity: Self::DEFAULT_CAPACITY,
            usage: BufferUsage::StreamDraw,
        }
    }
}

/// Streaming vertex buffer using buffer orphaning.
///
/// Vertices are appended at a write cursor. When a batch would reach the end
/// of the store, the whole store is re-specified with no contents and the
/// cursor restarts at zero. The driver hands out fresh memory while draws
/// still reading the old store finish, so writes never wait on the GPU.
///
/// Writes are mapped with `GL_MAP_UNSYNCHRONIZED_BIT`; the region written is
/// always past anything issued since the last orphan.
pub struct OrphaningVertexBuffer<D: Driver, V: Pod> {
    buffer: VertexBuffer<D, V>,
    config: StreamConfig,
    next_vertex: usize,
    orphan_count: u64,
    scratch: Vec<V>,
}

impl<D: Driver, V: Pod> OrphaningVertexBuffer<D, V> {
    pub fn new(
        driver: &Rc<D>,
        program: D::Program,
        attribs: Vec<VertexAttrib<V>>,
        config: StreamConfig,
    ) -> Result<Self> {
        if config.capacity == 0 {
            return Err(GlError::InvalidConfig("stream capacity must be non-zero".into()));
        }

        let buffer = VertexBuffer::new(driver, program, attribs, config.capacity, config.usage, None)?;
        Ok(Self {
            buffer,
            config,
            next_vertex: 0,
            orphan_count: 0,
            scratch: Vec::new(),
        })
    }

    /// Appends `vertices` and returns the index of the first one.
    ///
    /// The returned index is the `first` argument for the matching draw call.
    /// A batch larger than the whole capacity is rejected.
    pub fn add_vertices(&mut self, vertices: &[V]) -> Result<usize> {
        let count = vertices.len();
        if count == 0 {
            return Ok(self.next_vertex);
        }
        if count > self.config.capacity {
            return Err(GlError::OutOfBounds {
                offset: 0,
                count,
                capacity: self.config.capacity,
            });
        }

        self.buffer.bind();

        let end = self.next_vertex.checked_add(count);
        if end.is_none_or(|end| end >= self.config.capacity) {
            self.orphan();
        }

        // `start < capacity`, and `VertexBuffer::new` bounded the store's byte size.
        let start = self.next_vertex;
        let offset = start * VertexBuffer::<D, V>::stride();
        let bytes: &[u8] = bytemuck::cast_slice(vertices);
        let mapped = self.buffer.driver().write_mapped_range(
            glow::ARRAY_BUFFER,
            offset,
            bytes,
            glow::MAP_WRITE_BIT | glow::MAP_UNSYNCHRONIZED_BIT,
        );
        if !mapped {
            return Err(GlError::MapFailed { offset, len: bytes.len() });
        }

        self.next_vertex += count;
        Ok(start)
    }

    /// Like [`add_vertices`](Self::add_vertices) for any sequence convertible to `V`.
    pub fn add_vertex_data<I>(&mut self, vertices: I) -> Result<usize>
    where
        I: IntoIterator,
        I::Item: Into<V>,
    {
        let mut scratch = std::mem::take(&mut self.scratch);
        scratch.clear();
        scratch.extend(vertices.into_iter().map(Into::into));
        let result = self.add_vertices(&scratch);
        self.scratch = scratch;
        result
    }

    fn orphan(&mut self) {
        let size = self.config.capacity * VertexBuffer::<D, V>::stride();
        self.buffer
            .driver()
            .buffer_data_size(glow::ARRAY_BUFFER, size, self.config.usage.gl_enum());
        self.next_vertex = 0;
        self.orphan_count += 1;
        log::trace!(
            "orphaned stream buffer {:?} ({} so far)",
            self.buffer.raw_buffer(),
            self.orphan_count
        );
    }

    /// Overwrites vertices in place; see [`VertexBuffer::update_data`].
    pub fn update_data(&mut self, vertex_offset: usize, vertices: &[V]) -> Result<()> {
        self.buffer.update_data(vertex_offset, vertices)
    }

    /// Index the next write would start at, absent an orphan.
    pub fn cursor(&self) -> usize {
        self.next_vertex
    }

    pub fn capacity(&self) -> usize {
        self.config.capacity
    }

    /// Number of times the backing store has been re-specified.
    pub fn orphan_count(&self) -> u64 {
        self.orphan_count
    }

    pub fn config(&self) -> StreamConfig {
        self.config
    }

    pub fn buffer(&self) -> &VertexBuffer<D, V> {
        &self.buffer
    }
}
