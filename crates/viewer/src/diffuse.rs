//! Embedded diffuse colour ramp.
//!
//! 256x256 pixels, 3 bytes per pixel (RGB, no alpha), row-major, no
//! header. Compiled into the binary so the viewer needs no image files at
//! runtime; the shading program samples it as a colour ramp indexed by
//! the noise value.

/// Raw image bytes (RGB8, row-major).
pub static DIFFUSE_RGB: &[u8] = include_bytes!("../assets/diffuse.rgb");

#[cfg(test)]
mod tests {
    use super::*;
    use noisebed_core::tables::TABLE_SIZE;

    #[test]
    fn embedded_image_has_exact_rgb_length() {
        assert_eq!(DIFFUSE_RGB.len(), TABLE_SIZE * TABLE_SIZE * 3);
    }

    #[test]
    fn embedded_image_passes_upload_validation() {
        use noisebed_core::render::{textures, TextureUnits};
        assert!(textures::validate(&TextureUnits::default(), DIFFUSE_RGB.len()).is_ok());
    }
}
