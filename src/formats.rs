//! Source format detection and the per-format encode policy
//!
//! The format of a file is decided by sniffing its content, never by its
//! extension. Each format maps to an [`EncodePlan`] variant that carries the
//! options its encoder needs.

use crate::constants::PNG_OPTIMIZATION_PRESET;
use image::ImageFormat;
use std::fmt;

/// Format of a decoded source file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    Jpeg,
    Png,
    WebP,
    /// Recognised by the codec library but without a tuned encode policy
    Other(ImageFormat),
}

impl SourceFormat {
    pub fn from_image_format(format: ImageFormat) -> Self {
        match format {
            ImageFormat::Jpeg => SourceFormat::Jpeg,
            ImageFormat::Png => SourceFormat::Png,
            ImageFormat::WebP => SourceFormat::WebP,
            other => SourceFormat::Other(other),
        }
    }
}

impl fmt::Display for SourceFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceFormat::Jpeg => write!(f, "JPEG"),
            SourceFormat::Png => write!(f, "PNG"),
            SourceFormat::WebP => write!(f, "WEBP"),
            SourceFormat::Other(other) => {
                write!(f, "{}", format!("{:?}", other).to_uppercase())
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JpegOptions {
    pub quality: u8,
    pub optimize_coding: bool,
    pub progressive: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PngOptions {
    /// oxipng preset, 0 (fast) to 6 (smallest)
    pub preset: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WebPOptions {
    pub quality: u8,
}

/// How a decoded image gets written back
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EncodePlan {
    Jpeg(JpegOptions),
    Png(PngOptions),
    WebP(WebPOptions),
    /// Re-encode in the source format with codec defaults. Only chosen for
    /// untuned formats that had to be resized.
    Native(ImageFormat),
    /// Leave the file alone
    Skip,
}

impl EncodePlan {
    /// Picks the encode plan for a file of `format`. JPEG, PNG and WebP are
    /// always re-encoded; anything else only when it was resized.
    pub fn for_format(format: SourceFormat, quality: u8, resized: bool) -> Self {
        match format {
            SourceFormat::Jpeg => EncodePlan::Jpeg(JpegOptions {
                quality,
                optimize_coding: true,
                progressive: true,
            }),
            SourceFormat::Png => EncodePlan::Png(PngOptions {
                preset: PNG_OPTIMIZATION_PRESET,
            }),
            SourceFormat::WebP => EncodePlan::WebP(WebPOptions { quality }),
            SourceFormat::Other(other) if resized => EncodePlan::Native(other),
            SourceFormat::Other(_) => EncodePlan::Skip,
        }
    }

    pub fn is_skip(&self) -> bool {
        matches!(self, EncodePlan::Skip)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_format_from_image_format() {
        assert_eq!(SourceFormat::from_image_format(ImageFormat::Jpeg), SourceFormat::Jpeg);
        assert_eq!(SourceFormat::from_image_format(ImageFormat::Png), SourceFormat::Png);
        assert_eq!(SourceFormat::from_image_format(ImageFormat::WebP), SourceFormat::WebP);
        assert_eq!(
            SourceFormat::from_image_format(ImageFormat::Gif),
            SourceFormat::Other(ImageFormat::Gif)
        );
    }

    #[test]
    fn test_source_format_display() {
        assert_eq!(SourceFormat::Jpeg.to_string(), "JPEG");
        assert_eq!(SourceFormat::Png.to_string(), "PNG");
        assert_eq!(SourceFormat::WebP.to_string(), "WEBP");
        assert_eq!(SourceFormat::Other(ImageFormat::Bmp).to_string(), "BMP");
    }

    #[test]
    fn test_jpeg_plan_uses_quality_and_flags() {
        let plan = EncodePlan::for_format(SourceFormat::Jpeg, 72, false);
        assert_eq!(
            plan,
            EncodePlan::Jpeg(JpegOptions {
                quality: 72,
                optimize_coding: true,
                progressive: true,
            })
        );
    }

    #[test]
    fn test_tuned_formats_never_skip() {
        for format in [SourceFormat::Jpeg, SourceFormat::Png, SourceFormat::WebP] {
            assert!(!EncodePlan::for_format(format, 80, false).is_skip());
            assert!(!EncodePlan::for_format(format, 80, true).is_skip());
        }
    }

    #[test]
    fn test_png_plan_ignores_quality() {
        assert_eq!(
            EncodePlan::for_format(SourceFormat::Png, 10, false),
            EncodePlan::for_format(SourceFormat::Png, 95, false)
        );
    }

    #[test]
    fn test_other_format_skips_unless_resized() {
        let gif = SourceFormat::Other(ImageFormat::Gif);
        assert_eq!(EncodePlan::for_format(gif, 80, false), EncodePlan::Skip);
        assert_eq!(
            EncodePlan::for_format(gif, 80, true),
            EncodePlan::Native(ImageFormat::Gif)
        );
    }
}
