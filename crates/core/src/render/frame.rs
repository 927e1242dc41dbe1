//! Per-frame program activation and uniform synchronization.
//!
//! Every frame follows the same bracket: bind the program, write the
//! uniforms the program actually declares, hand control to the scene
//! drawing closure, unbind. Uniform writes happen strictly after the bind
//! and strictly before the draw. A uniform the program does not declare
//! (or that the compiler optimized out) resolves to the absent sentinel
//! and is skipped without a GL call, an error, or a log line.

use glam::Vec3;

use super::shader::ShaderProgram;
use super::units::TextureUnits;
use crate::params::RenderParameters;

/// Sampler uniform for the permutation-gradient table.
pub const UNIFORM_PERM_TEXTURE: &str = "permTexture";
/// Sampler uniform for the 4D gradient table.
pub const UNIFORM_GRAD_TEXTURE: &str = "gradTexture";
/// Sampler uniform for the diffuse colour ramp.
pub const UNIFORM_DIFFUSE: &str = "diffuse";
/// Elapsed wall-clock time in seconds.
pub const UNIFORM_TIME: &str = "time";
/// Number of fBm octaves the fragment shader sums.
pub const UNIFORM_OCTAVES: &str = "octavesIn";
/// Per-axis frequency multipliers for the fBm sum.
pub const UNIFORM_FREQUENCY: &str = "frequency";

/// Fixed frequency vector pushed when the program declares `frequency`.
pub const FREQUENCY: Vec3 = Vec3::new(0.5, 1.0, 2.0);

/// Synchronizes host state into the shading program once per frame.
pub struct FrameRenderer {
    units: TextureUnits,
    frequency: Vec3,
}

impl FrameRenderer {
    /// Creates a renderer bound to the given texture-unit allocation.
    pub fn new(units: TextureUnits) -> Self {
        Self {
            units,
            frequency: FREQUENCY,
        }
    }

    /// The unit allocation this renderer writes into sampler uniforms.
    pub fn units(&self) -> &TextureUnits {
        &self.units
    }

    /// Renders one frame.
    ///
    /// Binds `program`, pushes the current uniform values (skipping any
    /// uniform the program does not declare), invokes `draw` for the
    /// actual scene, and unbinds the program.
    ///
    /// The `time` uniform is only written while `params.update_time` is
    /// set, which freezes the shader animation without stopping the frame
    /// loop.
    #[allow(unsafe_code)]
    pub fn render<F>(
        &self,
        gl: &glow::Context,
        program: &mut ShaderProgram,
        params: &RenderParameters,
        time: f64,
        draw: F,
    ) where
        F: FnOnce(&glow::Context, &mut ShaderProgram),
    {
        use glow::HasContext;

        program.bind(gl);

        // SAFETY: glow wraps raw GL calls as unsafe. Every location passed
        // below came from this program's own uniform table.
        if params.update_time {
            if let Some(loc) = program.uniform(gl, UNIFORM_TIME) {
                unsafe { gl.uniform_1_f32(Some(&loc), time as f32) };
            }
        }

        if let Some(loc) = program.uniform(gl, UNIFORM_PERM_TEXTURE) {
            unsafe { gl.uniform_1_i32(Some(&loc), self.units.perm as i32) };
        }
        if let Some(loc) = program.uniform(gl, UNIFORM_GRAD_TEXTURE) {
            unsafe { gl.uniform_1_i32(Some(&loc), self.units.grad as i32) };
        }
        if let Some(loc) = program.uniform(gl, UNIFORM_DIFFUSE) {
            unsafe { gl.uniform_1_i32(Some(&loc), self.units.diffuse as i32) };
        }

        if let Some(loc) = program.uniform(gl, UNIFORM_OCTAVES) {
            unsafe { gl.uniform_1_i32(Some(&loc), params.octaves as i32) };
        }
        if let Some(loc) = program.uniform(gl, UNIFORM_FREQUENCY) {
            unsafe {
                gl.uniform_3_f32(
                    Some(&loc),
                    self.frequency.x,
                    self.frequency.y,
                    self.frequency.z,
                )
            };
        }

        draw(gl, program);

        ShaderProgram::unbind(gl);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frequency_vector_matches_the_shading_contract() {
        assert_eq!(FREQUENCY, Vec3::new(0.5, 1.0, 2.0));
    }

    #[test]
    fn renderer_carries_the_injected_unit_table() {
        let units = TextureUnits {
            perm: 4,
            grad: 5,
            diffuse: 6,
        };
        let renderer = FrameRenderer::new(units);
        assert_eq!(*renderer.units(), units);
    }

    #[test]
    fn uniform_names_match_the_shader_interface() {
        // These names are the contract with the GLSL sources; renaming
        // either side silently disables the corresponding uniform.
        assert_eq!(UNIFORM_PERM_TEXTURE, "permTexture");
        assert_eq!(UNIFORM_GRAD_TEXTURE, "gradTexture");
        assert_eq!(UNIFORM_DIFFUSE, "diffuse");
        assert_eq!(UNIFORM_TIME, "time");
        assert_eq!(UNIFORM_OCTAVES, "octavesIn");
        assert_eq!(UNIFORM_FREQUENCY, "frequency");
    }

    #[test]
    #[ignore = "requires GL context"]
    fn absent_uniforms_produce_zero_writes() {
        // Would test: with a program declaring none of the uniforms,
        // render() issues no uniform calls and still invokes draw once.
    }

    #[test]
    #[ignore = "requires GL context"]
    fn time_is_skipped_while_update_time_is_off() {
        // Would test: params.update_time = false leaves the time uniform
        // at its previous value across frames.
    }
}
