//! OpenGL rendering infrastructure.
//!
//! This module is only available when the `render` feature is enabled.
//! It covers the two GPU-facing startup paths (shading-program lifecycle
//! and lookup-texture upload) plus the per-frame uniform synchronization.
//!
//! # Module overview
//!
//! - [`context`] -- GL context wrapper with a startup capability probe.
//! - [`shader`] -- Source loading, compilation, linking, and the memoized
//!   uniform-location table.
//! - [`texture`] -- Texture configuration and creation.
//! - [`textures`] -- Startup upload of the lookup tables and diffuse image.
//! - [`units`] -- The texture-unit allocation table shared by the upload
//!   path and the frame renderer.
//! - [`frame`] -- Per-frame program activation and uniform writes.

pub mod context;
pub mod frame;
pub mod shader;
pub mod texture;
pub mod textures;
pub mod units;

// Re-export key types at the render module level for convenience.
pub use context::{ContextError, GpuContext};
pub use frame::FrameRenderer;
pub use shader::{
    compile_shader, format_shader_error, link_program, load_source, ShaderError, ShaderProgram,
};
pub use texture::{create_texture, TextureConfig};
pub use textures::{NoiseTextures, TextureError};
pub use units::TextureUnits;
