use crate::constants::{
    DEFAULT_MAX_HEIGHT, DEFAULT_MAX_WIDTH, DEFAULT_QUALITY, JPEG_FLATTEN_BACKGROUND, MAX_QUALITY,
    MIN_QUALITY,
};
use crate::error::{OptimizeError, Result};
use crate::formats::{EncodePlan, JpegOptions, PngOptions, SourceFormat, WebPOptions};
use crate::replace::replace_atomically;
use crate::utils::calculate_reduction_percent;
use image::imageops::FilterType;
use image::{ColorType, DynamicImage, GenericImageView, ImageError, ImageFormat, Rgb, RgbImage};
use mozjpeg::{ColorSpace, Compress};
use std::fs;
use std::io::{Cursor, Write};
use std::path::Path;
use std::time::Instant;
use tracing::debug;

/// Resize and quality settings shared by every file in a run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OptimizeOptions {
    pub max_width: u32,
    pub max_height: u32,
    pub quality: u8,
}

impl OptimizeOptions {
    pub fn new(
        max_width: Option<u32>,
        max_height: Option<u32>,
        quality: Option<u8>,
    ) -> Result<Self> {
        let max_width = max_width.unwrap_or(DEFAULT_MAX_WIDTH);
        let max_height = max_height.unwrap_or(DEFAULT_MAX_HEIGHT);
        if max_width == 0 || max_height == 0 {
            return Err(OptimizeError::InvalidDimensions(max_width, max_height));
        }

        let quality = quality.unwrap_or(DEFAULT_QUALITY);
        if !(MIN_QUALITY..=MAX_QUALITY).contains(&quality) {
            return Err(OptimizeError::InvalidQuality(quality));
        }

        Ok(Self {
            max_width,
            max_height,
            quality,
        })
    }
}

impl Default for OptimizeOptions {
    fn default() -> Self {
        Self {
            max_width: DEFAULT_MAX_WIDTH,
            max_height: DEFAULT_MAX_HEIGHT,
            quality: DEFAULT_QUALITY,
        }
    }
}

/// What happened to a file that was decoded successfully
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Outcome {
    /// Re-encoded and swapped into place
    Saved { new_size: u64 },
    /// Neither resized nor re-encoded; the file is untouched
    Skipped,
}

/// Per-file result of [`optimize_image`]
#[derive(Debug, Clone, PartialEq)]
pub struct Optimization {
    pub format: SourceFormat,
    pub original_size: u64,
    pub original_dimensions: (u32, u32),
    pub resized_to: Option<(u32, u32)>,
    pub alpha_flattened: bool,
    pub outcome: Outcome,
}

impl Optimization {
    pub fn is_skipped(&self) -> bool {
        matches!(self.outcome, Outcome::Skipped)
    }

    /// Size of the file at the original path after processing.
    pub fn new_size(&self) -> u64 {
        match self.outcome {
            Outcome::Saved { new_size } => new_size,
            Outcome::Skipped => self.original_size,
        }
    }

    pub fn reduction_percent(&self) -> f64 {
        calculate_reduction_percent(self.original_size, self.new_size())
    }
}

/// A decoded image together with what was learned while reading it
pub struct LoadedImage {
    pub image: DynamicImage,
    pub format: SourceFormat,
    pub original_size: u64,
}

/// Reads and decodes an image, sniffing the format from its content.
///
/// # Returns
/// * `Err(OptimizeError::UnreadableImage)` - The bytes are not an image the
///   codec library recognises
/// * `Err(OptimizeError::ProcessingError)` - Reading failed, or the data is a
///   recognised format but corrupt
pub fn load_image(path: &Path) -> Result<LoadedImage> {
    let bytes = fs::read(path)?;
    let original_size = fs::metadata(path)?.len();

    let format = image::guess_format(&bytes)
        .map_err(|_| OptimizeError::UnreadableImage("unrecognised image format".to_string()))?;

    let image = image::load_from_memory_with_format(&bytes, format).map_err(|e| match e {
        ImageError::Unsupported(_) => OptimizeError::UnreadableImage(e.to_string()),
        other => OptimizeError::ProcessingError(other.to_string()),
    })?;

    Ok(LoadedImage {
        image,
        format: SourceFormat::from_image_format(format),
        original_size,
    })
}

/// Dimensions that fit `width`x`height` inside the bounding box while keeping
/// the aspect ratio, or `None` if the image already fits.
///
/// The result never exceeds the input in either direction and is at least
/// one pixel on each side.
pub fn fit_within(width: u32, height: u32, max_width: u32, max_height: u32) -> Option<(u32, u32)> {
    let max_width = max_width.max(1);
    let max_height = max_height.max(1);
    if width <= max_width && height <= max_height {
        return None;
    }

    let scale = f64::min(
        max_width as f64 / width as f64,
        max_height as f64 / height as f64,
    );
    let new_width = ((width as f64 * scale).round() as u32).clamp(1, max_width);
    let new_height = ((height as f64 * scale).round() as u32).clamp(1, max_height);

    Some((new_width, new_height))
}

/// Downscales `img` in place when it exceeds the configured bounds.
///
/// # Returns
/// * `Some((width, height))` - The new dimensions if a resize happened
pub fn resize_to_fit(img: &mut DynamicImage, options: &OptimizeOptions) -> Option<(u32, u32)> {
    let (width, height) = img.dimensions();
    let (new_width, new_height) = fit_within(width, height, options.max_width, options.max_height)?;

    *img = img.resize_exact(new_width, new_height, FilterType::Lanczos3);
    Some((new_width, new_height))
}

/// Composites every pixel onto an opaque `background`, dropping the alpha
/// channel.
pub fn flatten_alpha(img: &DynamicImage, background: Rgb<u8>) -> RgbImage {
    let rgba = img.to_rgba8();
    let mut flattened = RgbImage::new(rgba.width(), rgba.height());

    for (src, dst) in rgba.pixels().zip(flattened.pixels_mut()) {
        let alpha = src[3] as u32;
        for channel in 0..3 {
            let fg = src[channel] as u32 * alpha;
            let bg = background[channel] as u32 * (255 - alpha);
            dst[channel] = ((fg + bg + 127) / 255) as u8;
        }
    }

    flattened
}

fn save_failed(err: impl std::fmt::Display) -> OptimizeError {
    OptimizeError::SaveFailed(err.to_string())
}

/// Single-channel sources stay single-channel in the output.
fn is_grayscale(color: ColorType) -> bool {
    matches!(color, ColorType::L8 | ColorType::La8 | ColorType::L16 | ColorType::La16)
}

fn encode_jpeg(
    pixels: &[u8],
    (width, height): (u32, u32),
    color_space: ColorSpace,
    options: &JpegOptions,
) -> Result<Vec<u8>> {
    // libjpeg reports fatal errors by unwinding.
    let encoded = std::panic::catch_unwind(|| -> std::io::Result<Vec<u8>> {
        let mut comp = Compress::new(color_space);
        comp.set_size(width as usize, height as usize);
        comp.set_quality(options.quality as f32);
        if options.progressive {
            comp.set_progressive_mode();
        }
        comp.set_optimize_coding(options.optimize_coding);

        let mut started = comp.start_compress(Vec::new())?;
        started.write_scanlines(pixels)?;
        started.finish()
    })
    .map_err(|_| OptimizeError::SaveFailed("JPEG encoder aborted".to_string()))?;

    encoded.map_err(save_failed)
}

fn encode_png(img: &DynamicImage, options: &PngOptions) -> Result<Vec<u8>> {
    let mut raw = Vec::new();
    img.write_to(&mut Cursor::new(&mut raw), ImageFormat::Png)
        .map_err(save_failed)?;

    let oxipng_options = oxipng::Options::from_preset(options.preset);
    oxipng::optimize_from_memory(&raw, &oxipng_options).map_err(save_failed)
}

fn encode_webp(img: &DynamicImage, options: &WebPOptions) -> Result<Vec<u8>> {
    let (width, height) = img.dimensions();
    let quality = options.quality as f32;

    let memory = if img.color().has_alpha() {
        let rgba = img.to_rgba8();
        webp::Encoder::from_rgba(rgba.as_raw(), width, height).encode_simple(false, quality)
    } else {
        let rgb = img.to_rgb8();
        webp::Encoder::from_rgb(rgb.as_raw(), width, height).encode_simple(false, quality)
    }
    .map_err(|e| OptimizeError::SaveFailed(format!("WebP encoding failed: {:?}", e)))?;

    Ok(memory.to_vec())
}

fn encode_native(img: &DynamicImage, format: ImageFormat) -> Result<Vec<u8>> {
    let mut encoded = Vec::new();
    img.write_to(&mut Cursor::new(&mut encoded), format)
        .map_err(save_failed)?;
    Ok(encoded)
}

/// Encodes `img` according to `plan`.
///
/// JPEG input with an alpha channel is flattened onto
/// [`JPEG_FLATTEN_BACKGROUND`] first. Grayscale input is written as a
/// one-component JPEG.
pub fn encode_image(img: &DynamicImage, plan: &EncodePlan) -> Result<Vec<u8>> {
    match plan {
        EncodePlan::Jpeg(options) => {
            let color = img.color();
            let flattened = color
                .has_alpha()
                .then(|| DynamicImage::ImageRgb8(flatten_alpha(img, JPEG_FLATTEN_BACKGROUND)));
            let source = flattened.as_ref().unwrap_or(img);

            if is_grayscale(color) {
                let luma = source.to_luma8();
                encode_jpeg(luma.as_raw(), luma.dimensions(), ColorSpace::JCS_GRAYSCALE, options)
            } else {
                let rgb = source.to_rgb8();
                encode_jpeg(rgb.as_raw(), rgb.dimensions(), ColorSpace::JCS_RGB, options)
            }
        }
        EncodePlan::Png(options) => encode_png(img, options),
        EncodePlan::WebP(options) => encode_webp(img, options),
        EncodePlan::Native(format) => encode_native(img, *format),
        EncodePlan::Skip => Err(OptimizeError::SaveFailed(
            "no encoder for a skipped image".to_string(),
        )),
    }
}

/// Optimizes one image in place: decode, shrink to fit, re-encode with the
/// format's policy and swap the result over the original.
///
/// The original is only modified by the final rename. Every failure leaves it
/// byte-for-byte intact with no temporary file left behind.
pub fn optimize_image(path: &Path, options: &OptimizeOptions) -> Result<Optimization> {
    let start = Instant::now();
    let LoadedImage {
        mut image,
        format,
        original_size,
    } = load_image(path)?;
    let original_dimensions = image.dimensions();

    let resized_to = resize_to_fit(&mut image, options);
    let plan = EncodePlan::for_format(format, options.quality, resized_to.is_some());
    debug!(path = %path.display(), %format, ?original_dimensions, ?resized_to, ?plan, "decoded");

    let mut result = Optimization {
        format,
        original_size,
        original_dimensions,
        resized_to,
        alpha_flattened: false,
        outcome: Outcome::Skipped,
    };
    if plan.is_skip() {
        return Ok(result);
    }

    result.alpha_flattened = matches!(plan, EncodePlan::Jpeg(_)) && image.color().has_alpha();
    let new_size = replace_atomically(path, |file| {
        let encoded = encode_image(&image, &plan)?;
        file.write_all(&encoded).map_err(save_failed)
    })?;
    result.outcome = Outcome::Saved { new_size };

    debug!(
        path = %path.display(),
        original_size,
        new_size,
        elapsed_ms = start.elapsed().as_millis() as u64,
        "optimized"
    );
    Ok(result)
}
