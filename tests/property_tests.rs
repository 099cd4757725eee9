use image::{DynamicImage, GenericImageView, ImageFormat};
use img_optimize::formats::{EncodePlan, SourceFormat};
use img_optimize::{
    calculate_reduction_percent, fit_within, is_image_file, resize_to_fit, OptimizeOptions,
};
use proptest::prelude::*;
use std::path::Path;

proptest! {
    #[test]
    fn fit_within_never_enlarges_and_fits(
        width in 1u32..=10_000u32,
        height in 1u32..=10_000u32,
        max_width in 1u32..=4000u32,
        max_height in 1u32..=4000u32
    ) {
        match fit_within(width, height, max_width, max_height) {
            None => {
                prop_assert!(width <= max_width && height <= max_height);
            }
            Some((new_width, new_height)) => {
                prop_assert!(width > max_width || height > max_height);
                prop_assert!(new_width >= 1 && new_height >= 1);
                prop_assert!(new_width <= width && new_height <= height);
                prop_assert!(new_width <= max_width && new_height <= max_height);
            }
        }
    }

    #[test]
    fn fit_within_preserves_aspect_ratio(
        width in 1u32..=10_000u32,
        height in 1u32..=10_000u32,
        max_width in 1u32..=4000u32,
        max_height in 1u32..=4000u32
    ) {
        if let Some((new_width, new_height)) = fit_within(width, height, max_width, max_height) {
            let scale = f64::min(
                max_width as f64 / width as f64,
                max_height as f64 / height as f64,
            );
            // Rounding moves each side by at most half a pixel; the one-pixel
            // floor can add up to one more.
            prop_assert!((new_width as f64 - width as f64 * scale).abs() <= 1.0);
            prop_assert!((new_height as f64 - height as f64 * scale).abs() <= 1.0);
        }
    }

    #[test]
    fn resize_to_fit_matches_fit_within(
        width in 1u32..=200u32,
        height in 1u32..=200u32,
        max_width in 1u32..=150u32,
        max_height in 1u32..=150u32
    ) {
        let mut img = DynamicImage::new_rgb8(width, height);
        let options = OptimizeOptions::new(Some(max_width), Some(max_height), None).unwrap();

        let resized = resize_to_fit(&mut img, &options);

        prop_assert_eq!(resized, fit_within(width, height, max_width, max_height));
        prop_assert_eq!(img.dimensions(), resized.unwrap_or((width, height)));
    }

    #[test]
    fn reduction_percent_formula(
        original in 0u64..=u32::MAX as u64,
        new in 0u64..=u32::MAX as u64,
    ) {
        let percent = calculate_reduction_percent(original, new);
        if original == 0 {
            prop_assert_eq!(percent, 0.0);
        } else {
            let expected = (original as f64 - new as f64) / original as f64 * 100.0;
            prop_assert!((percent - expected).abs() < 1e-9);
        }
    }

    #[test]
    fn tuned_formats_are_never_skipped(quality in 0u8..=100u8, resized in any::<bool>()) {
        for format in [SourceFormat::Jpeg, SourceFormat::Png, SourceFormat::WebP] {
            prop_assert!(!EncodePlan::for_format(format, quality, resized).is_skip());
        }
        let other = EncodePlan::for_format(SourceFormat::Other(ImageFormat::Gif), quality, resized);
        prop_assert_eq!(other.is_skip(), !resized);
    }

    #[test]
    fn is_image_file_recognizes_extensions(
        extension in prop::sample::select(&[
            "jpg", "JPG", "jpeg", "Jpeg", "png", "PNG", "webp", "WebP", "gif", "bmp", "tiff", "txt",
        ])
    ) {
        let filename = format!("test.{}", extension);
        let expected = matches!(extension.to_lowercase().as_str(), "jpg" | "jpeg" | "png" | "webp");
        prop_assert_eq!(is_image_file(Path::new(&filename)), expected);
    }
}
