//! Camera, transforms, and scene-owned uniforms for the spinning sphere.
//!
//! The camera sits at (0, -4, 0) looking at the origin with +Z up, the
//! whole view is tilted 30 degrees about X, the sphere spins 45 degrees
//! per second about Z, and a point light orbits the origin at radius 5,
//! 30 degrees per second. The matrices and the light position are the
//! scene's own uniforms, resolved through the same memoized uniform table
//! as the noise uniforms.

use glam::{Mat4, Vec3};
use noisebed_core::render::ShaderProgram;

use crate::mesh::SphereMesh;

/// Model-view-projection matrix uniform.
pub const UNIFORM_MVP: &str = "mvp";
/// Model matrix uniform (for world-space normals and positions).
pub const UNIFORM_MODEL: &str = "model";
/// World-space point light position uniform.
pub const UNIFORM_LIGHT: &str = "lightPosition";

/// Per-frame transforms, pure function of time and framebuffer size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SceneTransforms {
    pub mvp: Mat4,
    pub model: Mat4,
    pub light_position: Vec3,
}

/// Computes the frame's transforms.
///
/// `t` is the scene animation time in seconds; it freezes (stops
/// advancing) while animation is toggled off, independently of the shader
/// `time` uniform. A non-positive framebuffer height is treated as 1 to
/// survive iconified windows.
pub fn transforms(t: f32, width: i32, height: i32) -> SceneTransforms {
    let aspect = width.max(1) as f32 / height.max(1) as f32;
    let projection = Mat4::perspective_rh_gl(45f32.to_radians(), aspect, 1.0, 100.0);
    let view = Mat4::look_at_rh(Vec3::new(0.0, -4.0, 0.0), Vec3::ZERO, Vec3::Z)
        * Mat4::from_rotation_x(30f32.to_radians());
    let model = Mat4::from_rotation_z((45.0 * t).to_radians());

    let light_angle = (30.0 * t).to_radians();
    let light_position = Vec3::new(5.0 * light_angle.cos(), 5.0 * light_angle.sin(), 0.0);

    SceneTransforms {
        mvp: projection * view * model,
        model,
        light_position,
    }
}

/// The display object plus its draw routine.
pub struct Scene {
    mesh: SphereMesh,
}

impl Scene {
    /// Uploads the sphere mesh (radius 1, 20 segments).
    ///
    /// # Errors
    ///
    /// Returns the driver's error string if the mesh upload fails.
    pub fn new(gl: &glow::Context) -> Result<Self, String> {
        Ok(Self {
            mesh: SphereMesh::new(gl, 1.0, 20)?,
        })
    }

    /// Writes the scene uniforms and draws the sphere.
    ///
    /// Runs inside the frame renderer's draw closure, so the program is
    /// already bound; like every other uniform, absent names are skipped.
    #[allow(unsafe_code)]
    pub fn draw(
        &self,
        gl: &glow::Context,
        program: &mut ShaderProgram,
        t: f32,
        width: i32,
        height: i32,
    ) {
        use glow::HasContext;

        let tf = transforms(t, width, height);

        // SAFETY: glow wraps raw GL calls as unsafe. Locations come from
        // the bound program's own uniform table.
        if let Some(loc) = program.uniform(gl, UNIFORM_MVP) {
            unsafe { gl.uniform_matrix_4_f32_slice(Some(&loc), false, &tf.mvp.to_cols_array()) };
        }
        if let Some(loc) = program.uniform(gl, UNIFORM_MODEL) {
            unsafe { gl.uniform_matrix_4_f32_slice(Some(&loc), false, &tf.model.to_cols_array()) };
        }
        if let Some(loc) = program.uniform(gl, UNIFORM_LIGHT) {
            unsafe {
                gl.uniform_3_f32(
                    Some(&loc),
                    tf.light_position.x,
                    tf.light_position.y,
                    tf.light_position.z,
                )
            };
        }

        self.mesh.draw(gl);
    }

    /// Releases the mesh's GPU objects.
    pub fn destroy(&self, gl: &glow::Context) {
        self.mesh.destroy(gl);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn model_is_identity_at_time_zero() {
        let tf = transforms(0.0, 640, 480);
        assert!(tf.model.abs_diff_eq(Mat4::IDENTITY, 1e-6));
    }

    #[test]
    fn model_completes_a_revolution_in_eight_seconds() {
        // 45 degrees per second: t = 8 is a full turn.
        let tf = transforms(8.0, 640, 480);
        assert!(
            tf.model.abs_diff_eq(Mat4::IDENTITY, 1e-4),
            "model at t=8 is {:?}",
            tf.model
        );
    }

    #[test]
    fn light_orbits_at_radius_five() {
        for t in [0.0, 1.0, 3.7, 12.0] {
            let tf = transforms(t, 640, 480);
            let r = tf.light_position.length();
            assert!((r - 5.0).abs() < 1e-4, "light radius {r} at t={t}");
            assert_eq!(tf.light_position.z, 0.0, "light left the orbit plane");
        }
    }

    #[test]
    fn light_starts_on_the_positive_x_axis() {
        let tf = transforms(0.0, 640, 480);
        assert!((tf.light_position - Vec3::new(5.0, 0.0, 0.0)).length() < 1e-5);
    }

    #[test]
    fn degenerate_framebuffer_sizes_do_not_break_the_projection() {
        // Iconified windows report zero height; the aspect must stay finite.
        let tf = transforms(1.0, 640, 0);
        assert!(tf.mvp.to_cols_array().iter().all(|v| v.is_finite()));
        let tf = transforms(1.0, 0, 0);
        assert!(tf.mvp.to_cols_array().iter().all(|v| v.is_finite()));
    }

    #[test]
    fn transforms_are_deterministic() {
        assert_eq!(transforms(2.5, 800, 600), transforms(2.5, 800, 600));
    }
}
