use std::fmt;

use crate::shader::ShaderStage;

/// Errors raised by the GL wrappers.
///
/// Driver diagnostics (compile and link logs) are carried verbatim so callers
/// can surface them to the user. None of these are retried internally.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GlError {
    /// The driver refused to create an object (zero handle).
    Allocation {
        object: &'static str,
        message: String,
    },
    /// Shader compilation failed.
    Compile { stage: ShaderStage, log: String },
    /// Program linking failed.
    Link { log: String },
    /// The uniform does not exist in the linked program or was optimized out.
    UniformNotFound { name: String },
    /// A vertex layout is malformed.
    InvalidLayout(String),
    /// A configuration value is out of range.
    InvalidConfig(String),
    /// A write would land outside the buffer's vertex range.
    OutOfBounds {
        offset: usize,
        count: usize,
        capacity: usize,
    },
    /// `glMapBufferRange` returned null.
    MapFailed { offset: usize, len: usize },
}

impl GlError {
    pub(crate) fn allocation(object: &'static str, message: impl Into<String>) -> Self {
        Self::Allocation { object, message: message.into() }
    }
}

impl fmt::Display for GlError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GlError::Allocation { object, message } if message.is_empty() => {
                write!(f, "failed to create GL {object}")
            }
            GlError::Allocation { object, message } => {
                write!(f, "failed to create GL {object}: {message}")
            }
            GlError::Compile { stage, log } => write!(f, "{stage} shader compile error: {log}"),
            GlError::Link { log } => write!(f, "program link error: {log}"),
            GlError::UniformNotFound { name } => {
                write!(f, "uniform {name} nonexistent or inactive")
            }
            GlError::InvalidLayout(msg) => write!(f, "invalid vertex layout: {msg}"),
            GlError::InvalidConfig(msg) => write!(f, "invalid configuration: {msg}"),
            GlError::OutOfBounds { offset, count, capacity } => write!(
                f,
                "vertex range {offset}..{} exceeds buffer capacity {capacity}",
                offset.saturating_add(*count)
            ),
            GlError::MapFailed { offset, len } => {
                write!(f, "failed to map {len} bytes at offset {offset}")
            }
        }
    }
}

impl std::error::Error for GlError {}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, GlError>;
