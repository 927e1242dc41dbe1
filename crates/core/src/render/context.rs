//! GL context wrapper with a startup capability probe.
//!
//! `GpuContext` wraps a `glow::Context` and verifies once, before any
//! rendering, that the driver can run this program: a modern-enough GL
//! version and enough texture units for the allocation table. Probing up
//! front replaces the older pattern of binding entry points lazily and
//! discovering missing capabilities mid-frame.

use thiserror::Error;

use super::units::TextureUnits;

/// Minimum GL version (major, minor) the shading program requires.
const MIN_VERSION: (u32, u32) = (3, 3);

/// Errors from the startup capability probe.
#[derive(Debug, Clone, Error)]
pub enum ContextError {
    /// The driver's GL version is too old for the shading program.
    #[error("OpenGL {got_major}.{got_minor} reported; 3.3 or newer is required")]
    UnsupportedVersion {
        /// Reported major version.
        got_major: u32,
        /// Reported minor version.
        got_minor: u32,
    },
    /// The driver exposes fewer texture units than the allocation table needs.
    #[error("driver exposes {got} combined texture units; at least {required} are required")]
    InsufficientTextureUnits {
        /// Units the allocation table claims.
        required: u32,
        /// Units the driver reports.
        got: u32,
    },
}

/// Whether a reported GL version satisfies the minimum.
pub fn version_supported(major: u32, minor: u32) -> bool {
    (major, minor) >= MIN_VERSION
}

/// Wraps a `glow::Context` whose capabilities have been verified.
pub struct GpuContext {
    gl: glow::Context,
}

impl GpuContext {
    /// Probes the driver and wraps the context.
    ///
    /// # Errors
    ///
    /// Returns `ContextError::UnsupportedVersion` if the GL version is
    /// below 3.3, or `ContextError::InsufficientTextureUnits` if the
    /// driver cannot host the three resident textures.
    #[allow(unsafe_code)]
    pub fn new(gl: glow::Context) -> Result<Self, ContextError> {
        use glow::HasContext;

        let version = gl.version();
        if !version_supported(version.major, version.minor) {
            return Err(ContextError::UnsupportedVersion {
                got_major: version.major,
                got_minor: version.minor,
            });
        }

        // SAFETY: glow wraps raw GL calls as unsafe; this is a plain
        // integer state query.
        let unit_count =
            unsafe { gl.get_parameter_i32(glow::MAX_COMBINED_TEXTURE_IMAGE_UNITS) }.max(0) as u32;
        if unit_count < TextureUnits::COUNT {
            return Err(ContextError::InsufficientTextureUnits {
                required: TextureUnits::COUNT,
                got: unit_count,
            });
        }

        Ok(Self { gl })
    }

    /// The verified GL context.
    pub fn gl(&self) -> &glow::Context {
        &self.gl
    }

    /// Consumes the wrapper and returns the underlying context.
    pub fn into_gl(self) -> glow::Context {
        self.gl
    }
}
