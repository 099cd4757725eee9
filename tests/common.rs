#![allow(dead_code)]

use image::{DynamicImage, ImageFormat, Rgb, RgbImage, Rgba, RgbaImage};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Noisy gradient so encoders have real work to do.
pub fn test_image(width: u32, height: u32) -> DynamicImage {
    DynamicImage::ImageRgb8(RgbImage::from_fn(width, height, |x, y| {
        let noise = (x.wrapping_mul(7919) ^ y.wrapping_mul(104_729)) % 32;
        Rgb([
            ((x * 255 / width.max(1)) as u8).wrapping_add(noise as u8),
            ((y * 255 / height.max(1)) as u8).wrapping_add(noise as u8),
            (((x + y) % 256) as u8).wrapping_add(noise as u8),
        ])
    }))
}

pub fn transparent_image(width: u32, height: u32) -> DynamicImage {
    DynamicImage::ImageRgba8(RgbaImage::from_fn(width, height, |x, _| {
        Rgba([200, 40, 40, if x % 2 == 0 { 0 } else { 255 }])
    }))
}

pub fn write_image(dir: &Path, name: &str, img: &DynamicImage, format: ImageFormat) -> PathBuf {
    let path = dir.join(name);
    img.save_with_format(&path, format).unwrap();
    path
}

pub fn create_fake_image(dir: &Path, name: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, b"fake image data").unwrap();
    path
}

pub fn create_nested_directory_structure(root: &Path) -> PathBuf {
    let subdir = root.join("subdir");
    fs::create_dir(&subdir).unwrap();
    write_image(&subdir, "nested.png", &test_image(64, 48), ImageFormat::Png);
    fs::write(subdir.join("nested.txt"), b"nested text").unwrap();
    subdir
}

pub fn create_temp_directory() -> TempDir {
    TempDir::new().unwrap()
}

/// Sorted file names directly inside `dir`.
pub fn file_names(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}
