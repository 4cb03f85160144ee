use image::{ImageBuffer, Rgba};
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

/// File name for a screenshot taken now, inside `dir`
pub fn screenshot_path(dir: &Path) -> PathBuf {
    let secs = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or_default();
    dir.join(format!("shading-{}.png", secs))
}

/// Flip RGBA rows vertically (OpenGL origin is bottom-left)
pub fn flip_rows(pixels: &[u8], width: usize, height: usize) -> Vec<u8> {
    let row_size = width * 4;
    let mut flipped = vec![0u8; pixels.len()];
    for y in 0..height {
        let src = &pixels[y * row_size..(y + 1) * row_size];
        let dst = &mut flipped[(height - 1 - y) * row_size..][..row_size];
        dst.copy_from_slice(src);
    }
    flipped
}

/// Save top-down RGBA pixel data as a PNG
pub fn save_png(pixels: &[u8], width: u32, height: u32, path: &Path) -> Result<(), String> {
    let img: ImageBuffer<Rgba<u8>, _> = ImageBuffer::from_raw(width, height, pixels.to_vec())
        .ok_or("Failed to create image buffer from pixel data")?;

    img.save_with_format(path, image::ImageFormat::Png)
        .map_err(|e| format!("Failed to save PNG {}: {}", path.display(), e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flip_swaps_top_and_bottom_rows() {
        // 1x3 image: red, green, blue from bottom to top
        let pixels = [255, 0, 0, 255, 0, 255, 0, 255, 0, 0, 255, 255];
        let flipped = flip_rows(&pixels, 1, 3);
        assert_eq!(&flipped[0..4], &[0, 0, 255, 255]);
        assert_eq!(&flipped[4..8], &[0, 255, 0, 255]);
        assert_eq!(&flipped[8..12], &[255, 0, 0, 255]);
    }

    #[test]
    fn screenshot_lands_in_directory() {
        let path = screenshot_path(Path::new("/tmp/shots"));
        assert_eq!(path.parent(), Some(Path::new("/tmp/shots")));
        let name = path.file_name().unwrap().to_string_lossy().into_owned();
        assert!(name.starts_with("shading-") && name.ends_with(".png"), "{name}");
    }

    #[test]
    fn saves_readable_png() {
        let path = std::env::temp_dir()
            .join(format!("shading-export-test-{}.png", std::process::id()));
        let pixels: Vec<u8> = (0..2 * 2 * 4).map(|i| i as u8 * 10).collect();
        save_png(&pixels, 2, 2, &path).unwrap();

        let img = image::open(&path).unwrap().to_rgba8();
        assert_eq!(img.dimensions(), (2, 2));
        assert_eq!(img.get_pixel(1, 0).0, [40, 50, 60, 70]);
        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn short_buffer_is_rejected() {
        let path = std::env::temp_dir().join("shading-never-written.png");
        assert!(save_png(&[0; 4], 2, 2, &path).is_err());
    }
}
