use std::collections::HashSet;
use std::fmt;
use std::marker::PhantomData;

use crate::error::{GlError, Result};

/// Upper bound on attributes per layout (the GL 3.3 guaranteed minimum).
pub const MAX_VERTEX_ATTRIBS: usize = 16;

/// Component type of a vertex attribute.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum AttribType {
    Byte,
    UnsignedByte,
    Short,
    UnsignedShort,
    Int,
    UnsignedInt,
    HalfFloat,
    Float,
}

impl AttribType {
    pub fn gl_enum(self) -> u32 {
        match self {
            AttribType::Byte => glow::BYTE,
            AttribType::UnsignedByte => glow::UNSIGNED_BYTE,
            AttribType::Short => glow::SHORT,
            AttribType::UnsignedShort => glow::UNSIGNED_SHORT,
            AttribType::Int => glow::INT,
            AttribType::UnsignedInt => glow::UNSIGNED_INT,
            AttribType::HalfFloat => glow::HALF_FLOAT,
            AttribType::Float => glow::FLOAT,
        }
    }

    /// Size of one component in bytes.
    pub fn byte_size(self) -> usize {
        match self {
            AttribType::Byte | AttribType::UnsignedByte => 1,
            AttribType::Short | AttribType::UnsignedShort | AttribType::HalfFloat => 2,
            AttribType::Int | AttribType::UnsignedInt | AttribType::Float => 4,
        }
    }
}

/// One attribute of vertex type `V`.
///
/// `offset` is the byte offset of the field inside `V`; build it with
/// [`vertex_attrib!`](crate::vertex_attrib) so it always matches the struct.
/// The attribute index is its position in the layout, and `name` is bound to
/// that index before the program is linked.
pub struct VertexAttrib<V> {
    pub size: i32,
    pub ty: AttribType,
    pub normalized: bool,
    pub offset: usize,
    pub name: String,
    _vertex: PhantomData<fn() -> V>,
}

impl<V> VertexAttrib<V> {
    pub fn new(
        size: i32,
        ty: AttribType,
        normalized: bool,
        offset: usize,
        name: impl Into<String>,
    ) -> Self {
        Self { size, ty, normalized, offset, name: name.into(), _vertex: PhantomData }
    }

    /// Bytes this attribute occupies within a vertex.
    pub fn byte_len(&self) -> usize {
        self.size.max(0) as usize * self.ty.byte_size()
    }
}

impl<V> fmt::Debug for VertexAttrib<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VertexAttrib")
            .field("name", &self.name)
            .field("size", &self.size)
            .field("ty", &self.ty)
            .field("normalized", &self.normalized)
            .field("offset", &self.offset)
            .finish()
    }
}

impl<V> Clone for VertexAttrib<V> {
    fn clone(&self) -> Self {
        Self::new(self.size, self.ty, self.normalized, self.offset, self.name.clone())
    }
}

impl<V> PartialEq for VertexAttrib<V> {
    fn eq(&self, other: &Self) -> bool {
        self.size == other.size
            && self.ty == other.ty
            && self.normalized == other.normalized
            && self.offset == other.offset
            && self.name == other.name
    }
}

/// Builds a [`VertexAttrib`] for a field of a `#[repr(C)]` vertex struct.
///
/// ```
/// use kiln_gl::{vertex_attrib, AttribType};
///
/// #[repr(C)]
/// #[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
/// struct Vertex {
///     pos: [f32; 3],
///     color: [u8; 4],
/// }
///
/// let color = vertex_attrib!(Vertex, color, 4, AttribType::UnsignedByte, normalized, "in_color");
/// assert_eq!(color.offset, 12);
/// assert!(color.normalized);
/// ```
#[macro_export]
macro_rules! vertex_attrib {
    ($vertex:ty, $field:ident, $size:expr, $ty:expr, normalized, $name:expr) => {
        $crate::VertexAttrib::<$vertex>::new(
            $size,
            $ty,
            true,
            ::core::mem::offset_of!($vertex, $field),
            $name,
        )
    };
    ($vertex:ty, $field:ident, $size:expr, $ty:expr, $name:expr) => {
        $crate::VertexAttrib::<$vertex>::new(
            $size,
            $ty,
            false,
            ::core::mem::offset_of!($vertex, $field),
            $name,
        )
    };
}

/// Checks that `attribs` describe a drawable layout for `V`.
pub fn validate_layout<V>(attribs: &[VertexAttrib<V>]) -> Result<()> {
    let stride = std::mem::size_of::<V>();

    if attribs.len() > MAX_VERTEX_ATTRIBS {
        return Err(GlError::InvalidLayout(format!(
            "{} attributes exceed the limit of {MAX_VERTEX_ATTRIBS}",
            attribs.len()
        )));
    }

    let mut names = HashSet::with_capacity(attribs.len());
    for attrib in attribs {
        if attrib.name.is_empty() {
            return Err(GlError::InvalidLayout("attribute with empty name".into()));
        }
        if !names.insert(attrib.name.as_str()) {
            return Err(GlError::InvalidLayout(format!(
                "attribute {} declared twice",
                attrib.name
            )));
        }
        if !(1..=4).contains(&attrib.size) {
            return Err(GlError::InvalidLayout(format!(
                "attribute {} has {} components (expected 1..=4)",
                attrib.name, attrib.size
            )));
        }
        if attrib.offset.checked_add(attrib.byte_len()).is_none_or(|end| end > stride) {
            return Err(GlError::InvalidLayout(format!(
                "attribute {} ({} bytes at offset {}) overruns the {stride}-byte vertex",
                attrib.name,
                attrib.byte_len(),
                attrib.offset
            )));
        }
    }

    Ok(())
}
