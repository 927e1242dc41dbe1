//! Indexed UV-sphere mesh for the display object.
//!
//! Latitude-longitude tessellation with per-vertex normals and texture
//! coordinates, generated once at startup and uploaded as an interleaved
//! vertex buffer. The polar singularities share the classic (u,v) mapping
//! quirk of this parametrization; the noise shading hides it.

use std::f32::consts::{PI, TAU};

/// Floats per vertex: position (3), normal (3), texcoord (2).
pub const VERTEX_STRIDE: usize = 8;

/// CPU-side sphere tessellation.
pub struct SphereGeometry {
    /// Interleaved vertex attributes, [`VERTEX_STRIDE`] floats each.
    pub vertices: Vec<f32>,
    /// Triangle indices into `vertices`.
    pub indices: Vec<u32>,
}

/// Tessellates a sphere of the given radius.
///
/// `segments` counts latitude bands; 2x that many slices run around the
/// equator. Vertices along the seam are duplicated so texture coordinates
/// stay monotonic.
pub fn sphere_geometry(radius: f32, segments: u32) -> SphereGeometry {
    let rings = segments.max(2);
    let slices = rings * 2;

    let mut vertices = Vec::with_capacity(((rings + 1) * (slices + 1)) as usize * VERTEX_STRIDE);
    for ring in 0..=rings {
        let theta = ring as f32 * PI / rings as f32;
        let z = theta.cos();
        let ring_radius = theta.sin();
        for slice in 0..=slices {
            let phi = slice as f32 * TAU / slices as f32;
            let x = ring_radius * phi.cos();
            let y = ring_radius * phi.sin();

            vertices.extend_from_slice(&[radius * x, radius * y, radius * z]);
            vertices.extend_from_slice(&[x, y, z]);
            vertices.extend_from_slice(&[
                slice as f32 / slices as f32,
                1.0 - ring as f32 / rings as f32,
            ]);
        }
    }

    let mut indices = Vec::with_capacity((rings * slices * 6) as usize);
    for ring in 0..rings {
        for slice in 0..slices {
            let a = ring * (slices + 1) + slice;
            let b = a + slices + 1;
            indices.extend_from_slice(&[a, b, a + 1]);
            indices.extend_from_slice(&[a + 1, b, b + 1]);
        }
    }

    SphereGeometry { vertices, indices }
}

/// The sphere uploaded as a VAO with interleaved attributes.
pub struct SphereMesh {
    vao: glow::VertexArray,
    vbo: glow::Buffer,
    ebo: glow::Buffer,
    index_count: i32,
}

impl SphereMesh {
    /// Tessellates and uploads the sphere.
    ///
    /// Attribute layout: location 0 = position, 1 = normal, 2 = texcoord.
    ///
    /// # Errors
    ///
    /// Returns the driver's error string if buffer or VAO creation fails.
    #[allow(unsafe_code)]
    pub fn new(gl: &glow::Context, radius: f32, segments: u32) -> Result<Self, String> {
        use glow::HasContext;

        let geometry = sphere_geometry(radius, segments);
        let vertex_bytes: Vec<u8> = geometry
            .vertices
            .iter()
            .flat_map(|v| v.to_ne_bytes())
            .collect();
        let index_bytes: Vec<u8> = geometry
            .indices
            .iter()
            .flat_map(|i| i.to_ne_bytes())
            .collect();

        // SAFETY: glow wraps raw GL calls as unsafe. Attribute offsets and
        // strides below match the interleaved layout built above.
        let vao = unsafe { gl.create_vertex_array()? };
        let vbo = unsafe { gl.create_buffer()? };
        let ebo = unsafe { gl.create_buffer()? };

        let stride = (VERTEX_STRIDE * std::mem::size_of::<f32>()) as i32;
        unsafe {
            gl.bind_vertex_array(Some(vao));

            gl.bind_buffer(glow::ARRAY_BUFFER, Some(vbo));
            gl.buffer_data_u8_slice(glow::ARRAY_BUFFER, &vertex_bytes, glow::STATIC_DRAW);

            gl.bind_buffer(glow::ELEMENT_ARRAY_BUFFER, Some(ebo));
            gl.buffer_data_u8_slice(glow::ELEMENT_ARRAY_BUFFER, &index_bytes, glow::STATIC_DRAW);

            gl.enable_vertex_attrib_array(0);
            gl.vertex_attrib_pointer_f32(0, 3, glow::FLOAT, false, stride, 0);
            gl.enable_vertex_attrib_array(1);
            gl.vertex_attrib_pointer_f32(1, 3, glow::FLOAT, false, stride, 12);
            gl.enable_vertex_attrib_array(2);
            gl.vertex_attrib_pointer_f32(2, 2, glow::FLOAT, false, stride, 24);

            gl.bind_vertex_array(None);
        }

        Ok(Self {
            vao,
            vbo,
            ebo,
            index_count: geometry.indices.len() as i32,
        })
    }

    /// Draws the sphere with the currently bound program.
    #[allow(unsafe_code)]
    pub fn draw(&self, gl: &glow::Context) {
        use glow::HasContext;
        // SAFETY: vao and index_count come from a successful new().
        unsafe {
            gl.bind_vertex_array(Some(self.vao));
            gl.draw_elements(glow::TRIANGLES, self.index_count, glow::UNSIGNED_INT, 0);
            gl.bind_vertex_array(None);
        }
    }

    /// Deletes the VAO and both buffers.
    #[allow(unsafe_code)]
    pub fn destroy(&self, gl: &glow::Context) {
        use glow::HasContext;
        // SAFETY: all handles are valid objects from new().
        unsafe {
            gl.delete_vertex_array(self.vao);
            gl.delete_buffer(self.vbo);
            gl.delete_buffer(self.ebo);
        }
    }
}
