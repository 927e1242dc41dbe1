//! Startup upload of the lookup tables and the diffuse image.
//!
//! All three textures are created exactly once, bound to the fixed units
//! from the injected [`TextureUnits`] table, and stay resident for the
//! process lifetime. After the uploads the active unit is restored to
//! unit 0 so later unit-relative GL calls are unaffected.

use thiserror::Error;

use super::texture::{create_texture, TextureConfig};
use super::units::TextureUnits;
use crate::lut;
use crate::tables::TABLE_SIZE;

/// Errors from the startup texture uploads.
#[derive(Debug, Clone, Error)]
pub enum TextureError {
    /// The GL driver failed to create or allocate a texture.
    #[error("texture creation failed ({name}): {message}")]
    Create {
        /// Which texture failed ("perm_grad", "grad4", or "diffuse").
        name: &'static str,
        /// The driver's error text.
        message: String,
    },
    /// The diffuse image byte buffer does not match the expected size.
    #[error("diffuse image is {got} bytes, expected {expected}")]
    DiffuseSize {
        /// Bytes required for a 256x256 RGB image.
        expected: usize,
        /// Bytes actually supplied.
        got: usize,
    },
    /// The unit table assigns two textures to the same unit.
    #[error("texture unit table is not disjoint: {0:?}")]
    UnitCollision(TextureUnits),
}

/// Validates the inputs to [`NoiseTextures::new`] without touching GL.
pub fn validate(units: &TextureUnits, diffuse_len: usize) -> Result<(), TextureError> {
    if !units.is_disjoint() {
        return Err(TextureError::UnitCollision(*units));
    }
    let expected = TextureConfig::diffuse_rgb8(TABLE_SIZE as u32, TABLE_SIZE as u32).byte_len();
    if diffuse_len != expected {
        return Err(TextureError::DiffuseSize {
            expected,
            got: diffuse_len,
        });
    }
    Ok(())
}

/// The three GPU-resident textures the shading program samples.
pub struct NoiseTextures {
    perm_grad: glow::Texture,
    grad4: glow::Texture,
    diffuse: glow::Texture,
}

impl NoiseTextures {
    /// Builds both lookup tables, uploads them and the diffuse image, and
    /// binds each texture to its unit from the allocation table.
    ///
    /// # Errors
    ///
    /// Returns `TextureError::UnitCollision` or `TextureError::DiffuseSize`
    /// before any GL call, or `TextureError::Create` if the driver rejects
    /// a texture.
    #[allow(unsafe_code)]
    pub fn new(
        gl: &glow::Context,
        units: &TextureUnits,
        diffuse_rgb: &[u8],
    ) -> Result<Self, TextureError> {
        use glow::HasContext;

        validate(units, diffuse_rgb.len())?;

        let side = TABLE_SIZE as u32;
        let lookup = TextureConfig::lookup_rgba8(side);
        let perm_pixels = lut::perm_grad_pixels();
        let grad_pixels = lut::grad4_pixels();

        // SAFETY: glow wraps raw GL calls as unsafe. Each create_texture
        // call leaves its texture bound to the unit made active just
        // before it, which is exactly the binding we want to persist.
        let perm_grad = unsafe {
            gl.active_texture(TextureUnits::gl_unit(units.perm));
            create_texture(gl, &lookup, Some(&perm_pixels)).map_err(|message| {
                TextureError::Create {
                    name: "perm_grad",
                    message,
                }
            })?
        };

        let grad4 = unsafe {
            gl.active_texture(TextureUnits::gl_unit(units.grad));
            match create_texture(gl, &lookup, Some(&grad_pixels)) {
                Ok(t) => t,
                Err(message) => {
                    gl.delete_texture(perm_grad);
                    return Err(TextureError::Create {
                        name: "grad4",
                        message,
                    });
                }
            }
        };

        let diffuse = unsafe {
            gl.active_texture(TextureUnits::gl_unit(units.diffuse));
            let config = TextureConfig::diffuse_rgb8(side, side);
            match create_texture(gl, &config, Some(diffuse_rgb)) {
                Ok(t) => t,
                Err(message) => {
                    gl.delete_texture(perm_grad);
                    gl.delete_texture(grad4);
                    return Err(TextureError::Create {
                        name: "diffuse",
                        message,
                    });
                }
            }
        };

        // Leave unit 0 active so unit-relative calls elsewhere see the
        // state they expect.
        unsafe { gl.active_texture(glow::TEXTURE0) };

        Ok(Self {
            perm_grad,
            grad4,
            diffuse,
        })
    }

    /// Handle of the permutation-gradient table.
    pub fn perm_grad(&self) -> glow::Texture {
        self.perm_grad
    }

    /// Handle of the 4D gradient table.
    pub fn grad4(&self) -> glow::Texture {
        self.grad4
    }

    /// Handle of the diffuse colour ramp.
    pub fn diffuse(&self) -> glow::Texture {
        self.diffuse
    }

    /// Deletes all three textures, releasing the GPU objects.
    #[allow(unsafe_code)]
    pub fn destroy(&self, gl: &glow::Context) {
        use glow::HasContext;
        // SAFETY: all three handles are valid textures from new().
        unsafe {
            gl.delete_texture(self.perm_grad);
            gl.delete_texture(self.grad4);
            gl.delete_texture(self.diffuse);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DIFFUSE_LEN: usize = TABLE_SIZE * TABLE_SIZE * 3;

    #[test]
    fn validate_accepts_the_default_table_and_exact_size() {
        assert!(validate(&TextureUnits::default(), DIFFUSE_LEN).is_ok());
    }

    #[test]
    fn validate_rejects_colliding_units() {
        let units = TextureUnits {
            perm: 1,
            grad: 1,
            diffuse: 2,
        };
        match validate(&units, DIFFUSE_LEN) {
            Err(TextureError::UnitCollision(got)) => assert_eq!(got, units),
            other => panic!("expected UnitCollision, got {other:?}"),
        }
    }

    #[test]
    fn validate_rejects_wrong_diffuse_size() {
        match validate(&TextureUnits::default(), DIFFUSE_LEN - 1) {
            Err(TextureError::DiffuseSize { expected, got }) => {
                assert_eq!(expected, DIFFUSE_LEN);
                assert_eq!(got, DIFFUSE_LEN - 1);
            }
            other => panic!("expected DiffuseSize, got {other:?}"),
        }
    }

    #[test]
    fn diffuse_size_error_display_names_both_sizes() {
        let err = TextureError::DiffuseSize {
            expected: 196_608,
            got: 12,
        };
        let msg = format!("{err}");
        assert!(msg.contains("196608"), "missing expected size in: {msg}");
        assert!(msg.contains("12"), "missing actual size in: {msg}");
    }

    #[test]
    #[ignore = "requires GL context"]
    fn new_binds_each_texture_to_its_unit() {
        // Would test: after new(), querying TEXTURE_BINDING_2D per unit
        // returns the matching handle and the active unit is TEXTURE0.
    }
}
