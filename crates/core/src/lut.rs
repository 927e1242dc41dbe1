//! CPU-side builders for the noise lookup textures.
//!
//! Each builder returns a row-major RGBA byte buffer in which every pixel
//! is a pure function of its (row, column) coordinates and the fixed
//! tables in [`crate::tables`]. A pixel packs a hashed gradient vector in
//! the color channels and, for the 3D table, the hashed index itself in
//! alpha, so per-fragment noise evaluation on the GPU reduces to two
//! texture fetches instead of a recomputed hash chain.
//!
//! The resulting textures must be sampled with nearest-neighbor filtering;
//! interpolating the integer-encoded channels would corrupt the hash values.

use crate::tables::{hash, GRAD3, GRAD4, TABLE_SIZE};

/// Byte length of one lookup texture (256x256 RGBA).
pub const LUT_BYTES: usize = TABLE_SIZE * TABLE_SIZE * 4;

/// Encodes a gradient component in {-1, 0, 1} as the byte {0, 64, 128}.
fn encode(g: i8) -> u8 {
    (i16::from(g) * 64 + 64) as u8
}

/// Builds the combined permutation-and-gradient table for 2D/3D noise.
///
/// Pixel (i, j) holds the 3D gradient selected by the low 4 bits of
/// `hash(i, j)` in RGB and the hash value itself in alpha.
pub fn perm_grad_pixels() -> Vec<u8> {
    let mut pixels = Vec::with_capacity(LUT_BYTES);
    for i in 0..TABLE_SIZE {
        for j in 0..TABLE_SIZE {
            let idx = hash(i, j);
            let g = GRAD3[(idx & 0x0F) as usize];
            pixels.push(encode(g[0]));
            pixels.push(encode(g[1]));
            pixels.push(encode(g[2]));
            pixels.push(idx);
        }
    }
    pixels
}

/// Builds the 4D gradient table used by 4D noise.
///
/// Pixel (i, j) holds the 4D gradient selected by the low 5 bits of
/// `hash(i, j)`, all four components encoded the same way as the 3D table.
pub fn grad4_pixels() -> Vec<u8> {
    let mut pixels = Vec::with_capacity(LUT_BYTES);
    for i in 0..TABLE_SIZE {
        for j in 0..TABLE_SIZE {
            let idx = hash(i, j);
            let g = GRAD4[(idx & 0x1F) as usize];
            for c in g {
                pixels.push(encode(c));
            }
        }
    }
    pixels
}
