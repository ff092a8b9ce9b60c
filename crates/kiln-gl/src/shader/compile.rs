use std::fmt;
use std::rc::Rc;

use crate::driver::Driver;
use crate::error::{GlError, Result};
use crate::handle::Owned;

/// Pipeline stage of a shader object.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

impl ShaderStage {
    /// GL enum passed to `glCreateShader`.
    pub fn gl_enum(self) -> u32 {
        match self {
            ShaderStage::Vertex => glow::VERTEX_SHADER,
            ShaderStage::Fragment => glow::FRAGMENT_SHADER,
        }
    }
}

impl fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ShaderStage::Vertex => "vertex",
            ShaderStage::Fragment => "fragment",
        })
    }
}

/// One compiled shader object.
///
/// The object is deleted when the `Shader` is dropped. Deleting a shader that
/// is still attached to a program only flags it; the driver frees it once the
/// program is gone.
pub struct Shader<D: Driver> {
    stage: ShaderStage,
    id: Owned<D, D::Shader>,
}

impl<D: Driver> Shader<D> {
    /// Creates and compiles a shader from GLSL source.
    ///
    /// On failure the driver's info log is returned in [`GlError::Compile`].
    pub fn compile(driver: &Rc<D>, stage: ShaderStage, source: &str) -> Result<Self> {
        let raw = driver
            .create_shader(stage.gl_enum())
            .map_err(|msg| GlError::allocation("shader", msg))?;
        let id = Owned::new(Rc::clone(driver), raw, D::delete_shader);

        driver.shader_source(raw, source);
        driver.compile_shader(raw);

        let log = clean_info_log(driver.shader_info_log(raw));
        if !driver.shader_compile_status(raw) {
            return Err(GlError::Compile { stage, log });
        }
        if !log.is_empty() {
            log::warn!("{stage} shader compiled with diagnostics: {log}");
        }

        log::debug!("compiled {stage} shader {raw:?}");
        Ok(Self { stage, id })
    }

    pub fn stage(&self) -> ShaderStage {
        self.stage
    }

    pub fn raw(&self) -> D::Shader {
        self.id.raw()
    }
}

impl<D: Driver> fmt::Debug for Shader<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Shader")
            .field("stage", &self.stage)
            .field("id", &self.id.raw())
            .finish()
    }
}

/// Strips the trailing NUL and whitespace some drivers include in info logs.
pub(crate) fn clean_info_log(mut log: String) -> String {
    let len = log.trim_end_matches(|c: char| c == '\0' || c.is_whitespace()).len();
    log.truncate(len);
    log
}
