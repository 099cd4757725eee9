use image::Rgb;

pub const DEFAULT_MAX_WIDTH: u32 = 1920;
pub const DEFAULT_MAX_HEIGHT: u32 = 1080;

pub const DEFAULT_QUALITY: u8 = 80;
pub const MIN_QUALITY: u8 = 0;
pub const MAX_QUALITY: u8 = 100;

/// Extensions picked up by the directory walker, compared lowercase.
pub const SUPPORTED_IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "webp"];

/// oxipng preset used for every PNG; 6 is the slowest, smallest preset.
pub const PNG_OPTIMIZATION_PRESET: u8 = 6;

/// Background that alpha is composited onto before JPEG encoding.
pub const JPEG_FLATTEN_BACKGROUND: Rgb<u8> = Rgb([255, 255, 255]);

pub const TEMP_FILE_PREFIX: &str = ".img-optimize-";

pub const BYTES_PER_KB: f64 = 1024.0;
