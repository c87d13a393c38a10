#![allow(dead_code)]

use image::{DynamicImage, ImageFormat, Rgb, RgbImage};
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub const SVG_LOGO: &[u8] =
    b"<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"10\" height=\"10\"><rect width=\"10\" height=\"10\"/></svg>";

/// Uncompressed BMP with a smooth gradient, so its WebP encode is always smaller
pub fn write_gradient_bmp(path: &Path, width: u32, height: u32) {
    let img = DynamicImage::ImageRgb8(RgbImage::from_fn(width, height, |x, y| {
        Rgb([(x * 3) as u8, (y * 5) as u8, 120])
    }));
    img.save_with_format(path, ImageFormat::Bmp).unwrap();
}

/// Small lossless WebP, as an earlier upload would have left behind
pub fn write_solid_webp(path: &Path, width: u32, height: u32) {
    let img = DynamicImage::ImageRgb8(RgbImage::from_pixel(width, height, Rgb([200, 160, 40])));
    img.save_with_format(path, ImageFormat::WebP).unwrap();
}

pub fn write_bytes(path: &Path, bytes: &[u8]) {
    File::create(path).unwrap().write_all(bytes).unwrap();
}

/// A GIF header followed by two graphic control extension markers
pub fn animated_gif_bytes() -> Vec<u8> {
    let mut data = b"GIF89a".to_vec();
    data.extend_from_slice(&[0x0A, 0x00, 0x0A, 0x00, 0x00, 0x00, 0x00]);
    data.extend_from_slice(&[0x00, 0x21, 0xF9, 0x04, 0x00, 0x0A, 0x00, 0x00]);
    data.extend_from_slice(&[0x00, 0x21, 0xF9, 0x04, 0x00, 0x0A, 0x00, 0x00]);
    data.push(0x3B);
    data
}

/// One valid image, one SVG, one corrupt JPEG and one unrelated text file
pub fn create_mixed_input_directory(temp_dir: &Path) -> PathBuf {
    let input_dir = temp_dir.join("input");
    std::fs::create_dir(&input_dir).unwrap();

    write_gradient_bmp(&input_dir.join("savanna.bmp"), 64, 48);
    write_bytes(&input_dir.join("logo.svg"), SVG_LOGO);
    write_bytes(&input_dir.join("broken.jpg"), b"definitely not a jpeg");
    write_bytes(&input_dir.join("notes.txt"), b"not an image");

    input_dir
}

pub fn create_nested_directory_structure(input_dir: &Path) -> PathBuf {
    let subdir = input_dir.join("subdir");
    std::fs::create_dir(&subdir).unwrap();
    write_gradient_bmp(&subdir.join("nested.bmp"), 48, 48);
    subdir
}

pub fn create_temp_directory() -> TempDir {
    TempDir::new().unwrap()
}

pub fn create_test_output_directory(temp_dir: &Path) -> PathBuf {
    let output_dir = temp_dir.join("output");
    std::fs::create_dir(&output_dir).unwrap();
    output_dir
}
