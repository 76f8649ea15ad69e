//! PNG output for rendered patterns.

use std::path::Path;

use image::RgbaImage;

use crate::error::{BeadError, Result};

/// Write a rendered image to a PNG file.
pub fn write_png(img: &RgbaImage, path: &Path) -> Result<()> {
    img.save_with_format(path, image::ImageFormat::Png)
        .map_err(|e| BeadError::Io {
            path: path.to_path_buf(),
            message: format!("Failed to write PNG: {}", e),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;
    use tempfile::tempdir;

    #[test]
    fn test_write_png_roundtrip() {
        let mut img = RgbaImage::new(2, 1);
        img.put_pixel(0, 0, Rgba([0, 0, 0, 255]));
        img.put_pixel(1, 0, Rgba([255, 255, 255, 255]));

        let dir = tempdir().unwrap();
        let path = dir.path().join("pattern.png");
        write_png(&img, &path).unwrap();

        let read = image::open(&path).unwrap().to_rgba8();
        assert_eq!(read.dimensions(), (2, 1));
        assert_eq!(read.get_pixel(1, 0).0, [255, 255, 255, 255]);
    }

    #[test]
    fn test_write_png_missing_directory() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("missing").join("pattern.png");

        let result = write_png(&RgbaImage::new(1, 1), &path);
        assert!(matches!(result, Err(BeadError::Io { .. })));
    }
}
