//! Shader objects, linked programs and uniform lookup.
//!
//! A [`ShaderProgram`] owns everything needed to draw with it: both compiled
//! stages, a streaming vertex buffer whose attribute names are bound before
//! linking, and a uniform-location cache.

mod compile;
mod program;
mod sources;
mod uniform;

pub use compile::{Shader, ShaderStage};
pub use program::{Primitive, ShaderProgram};
pub use sources::ProgramSources;
pub use uniform::UniformCache;
