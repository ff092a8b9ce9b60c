use std::path::Path;

use anyhow::{Context, Result};

/// GLSL source text for a vertex + fragment program.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgramSources {
    pub vertex: String,
    pub fragment: String,
}

impl ProgramSources {
    pub fn new(vertex: impl Into<String>, fragment: impl Into<String>) -> Self {
        Self { vertex: vertex.into(), fragment: fragment.into() }
    }

    /// Reads both stages from disk.
    pub fn from_files(vertex: impl AsRef<Path>, fragment: impl AsRef<Path>) -> Result<Self> {
        let vertex = vertex.as_ref();
        let fragment = fragment.as_ref();

        let vertex_src = std::fs::read_to_string(vertex)
            .with_context(|| format!("failed to read vertex shader {}", vertex.display()))?;
        let fragment_src = std::fs::read_to_string(fragment)
            .with_context(|| format!("failed to read fragment shader {}", fragment.display()))?;

        anyhow::ensure!(!vertex_src.trim().is_empty(), "vertex shader {} is empty", vertex.display());
        anyhow::ensure!(
            !fragment_src.trim().is_empty(),
            "fragment shader {} is empty",
            fragment.display()
        );

        log::debug!("loaded shader sources {} + {}", vertex.display(), fragment.display());
        Ok(Self { vertex: vertex_src, fragment: fragment_src })
    }
}
