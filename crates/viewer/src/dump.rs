//! Headless PNG snapshots of the lookup tables.
//!
//! `--dump-lut <dir>` writes both tables as PNGs so their encoding can be
//! inspected (or diffed across builds) without opening a window or
//! creating a GL context.

use std::path::{Path, PathBuf};

use noisebed_core::lut;
use noisebed_core::tables::TABLE_SIZE;

use crate::error::CliError;

/// File name of the permutation-gradient table snapshot.
pub const PERM_GRAD_FILE: &str = "perm_grad.png";
/// File name of the 4D gradient table snapshot.
pub const GRAD4_FILE: &str = "grad4.png";

/// Writes both lookup tables into `dir`, creating it if needed.
///
/// # Errors
///
/// Returns `CliError::Io` if the directory cannot be created or a PNG
/// cannot be written.
pub fn write_luts(dir: &Path) -> Result<(), CliError> {
    std::fs::create_dir_all(dir)
        .map_err(|e| CliError::Io(format!("cannot create {}: {e}", dir.display())))?;
    write_table(dir.join(PERM_GRAD_FILE), lut::perm_grad_pixels())?;
    write_table(dir.join(GRAD4_FILE), lut::grad4_pixels())?;
    Ok(())
}

fn write_table(path: PathBuf, pixels: Vec<u8>) -> Result<(), CliError> {
    let side = TABLE_SIZE as u32;
    let img = image::RgbaImage::from_raw(side, side, pixels)
        .ok_or_else(|| CliError::Io("RGBA buffer size mismatch".into()))?;
    img.save(&path)
        .map_err(|e| CliError::Io(format!("cannot write {}: {e}", path.display())))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn write_luts_round_trips_both_tables() {
        let dir = tempfile::tempdir().unwrap();
        write_luts(dir.path()).unwrap();

        let perm_grad = image::open(dir.path().join(PERM_GRAD_FILE))
            .unwrap()
            .to_rgba8();
        assert_eq!(perm_grad.width(), TABLE_SIZE as u32);
        assert_eq!(perm_grad.height(), TABLE_SIZE as u32);

        // Pixel (0, 0) must match the first four bytes of the builder.
        let expected = lut::perm_grad_pixels();
        assert_eq!(&perm_grad.get_pixel(0, 0).0[..], &expected[..4]);

        let grad4 = image::open(dir.path().join(GRAD4_FILE)).unwrap().to_rgba8();
        assert_eq!(grad4.width(), TABLE_SIZE as u32);
        assert_eq!(grad4.height(), TABLE_SIZE as u32);
    }

    #[test]
    fn write_luts_creates_missing_directories() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a/b");
        write_luts(&nested).unwrap();
        assert!(nested.join(PERM_GRAD_FILE).exists());
        assert!(nested.join(GRAD4_FILE).exists());
    }
}
