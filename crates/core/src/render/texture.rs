//! Texture configuration and creation.
//!
//! Two kinds of texture exist in this program: integer-encoded lookup
//! tables (RGBA8, nearest-neighbor, repeat wrap) and the diffuse colour
//! ramp (RGB8, linear, edge clamp). Both are uploaded once at startup and
//! never written again.

/// Configuration for creating a GPU texture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextureConfig {
    /// Texture width in pixels.
    pub width: u32,
    /// Texture height in pixels.
    pub height: u32,
    /// GL internal format (e.g. `glow::RGBA8`).
    pub internal_format: u32,
    /// GL pixel format of the uploaded data (e.g. `glow::RGBA`).
    pub format: u32,
    /// GL filter mode for both min and mag.
    pub filter: u32,
    /// GL wrap mode for both axes.
    pub wrap: u32,
}

impl TextureConfig {
    /// Config for an integer-encoded lookup table.
    ///
    /// NEAREST filtering: interpolating the encoded gradient/index bytes
    /// would corrupt the hash lookup. REPEAT wrap: the noise shader
    /// addresses the table with unbounded coordinates.
    pub fn lookup_rgba8(side: u32) -> Self {
        Self {
            width: side,
            height: side,
            internal_format: glow::RGBA8,
            format: glow::RGBA,
            filter: glow::NEAREST,
            wrap: glow::REPEAT,
        }
    }

    /// Config for the diffuse colour ramp: linear filtering, edge clamp.
    pub fn diffuse_rgb8(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            internal_format: glow::RGB8,
            format: glow::RGB,
            filter: glow::LINEAR,
            wrap: glow::CLAMP_TO_EDGE,
        }
    }

    /// Bytes per pixel implied by the upload format.
    pub fn bytes_per_pixel(&self) -> usize {
        if self.format == glow::RGB {
            3
        } else {
            4
        }
    }

    /// Byte length an upload buffer must have for this config.
    pub fn byte_len(&self) -> usize {
        self.width as usize * self.height as usize * self.bytes_per_pixel()
    }
}

/// Creates a GPU texture and uploads `data` into it.
///
/// Applies the config's wrap mode to both axes and its filter to both min
/// and mag. The new texture is left bound to the currently active texture
/// unit; callers that bind textures to fixed units rely on this.
///
/// # Errors
///
/// Returns an error string if the GL context fails to create the texture.
#[allow(unsafe_code)]
pub fn create_texture(
    gl: &glow::Context,
    config: &TextureConfig,
    data: Option<&[u8]>,
) -> Result<glow::Texture, String> {
    use glow::HasContext;

    // SAFETY: glow wraps raw GL calls as unsafe. We create, configure,
    // and fill a texture using parameters derived from TextureConfig; the
    // data slice length is validated by callers against byte_len().
    let texture = unsafe { gl.create_texture()? };

    unsafe {
        gl.bind_texture(glow::TEXTURE_2D, Some(texture));

        gl.tex_image_2d(
            glow::TEXTURE_2D,
            0,
            config.internal_format as i32,
            config.width as i32,
            config.height as i32,
            0,
            config.format,
            glow::UNSIGNED_BYTE,
            glow::PixelUnpackData::Slice(data),
        );

        gl.tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_WRAP_S, config.wrap as i32);
        gl.tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_WRAP_T, config.wrap as i32);
        gl.tex_parameter_i32(
            glow::TEXTURE_2D,
            glow::TEXTURE_MIN_FILTER,
            config.filter as i32,
        );
        gl.tex_parameter_i32(
            glow::TEXTURE_2D,
            glow::TEXTURE_MAG_FILTER,
            config.filter as i32,
        );
    }

    Ok(texture)
}
