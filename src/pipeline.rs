use std::path::Path;

use image::{DynamicImage, GrayImage, RgbImage, imageops::FilterType};
use imageproc::contours::{Contour, find_contours};
use log::debug;

use crate::color::{TargetColor, binarize, color_mask};
use crate::config::DetectorConfig;
use crate::error::DetectError;
use crate::render::apply_mask;
use crate::report::{Report, rank_and_measure, retain_large, retain_outer};

/// Gray level above which a mask pixel counts as foreground.
const MASK_THRESHOLD: u8 = 70;

/// One detection run with every intermediate stage output preserved,
/// so callers can inspect or save the in-between images.
#[derive(Debug, Clone)]
pub struct Detection {
    /// The input scaled to the configured working width.
    pub resized: RgbImage,
    /// The input with everything outside the colour mask blanked.
    pub masked: RgbImage,
    /// The thresholded binary mask the contours were traced from.
    pub binary: GrayImage,
    /// Outer contours that survived the perimeter filter.
    pub contours: Vec<Contour<i32>>,
    /// Ranked and classified results.
    pub report: Report,
}

/// Runs the full detection pipeline on an image file.
///
/// Decodes and resizes the input, then hands the buffer to
/// [`process_buffer`]. Fails only if the image cannot be opened or
/// decoded.
pub fn process_image(
    path: &Path,
    color: TargetColor,
    config: &DetectorConfig,
) -> Result<Detection, DetectError> {
    let image = image::open(path)?;
    debug!(
        "loaded {} ({}x{})",
        path.display(),
        image.width(),
        image.height()
    );
    let resized = resize_to_width(&image, config.resize_width).to_rgb8();
    Ok(process_buffer(&resized, color, config))
}

/// Runs the pipeline stages on an already decoded and resized buffer.
pub fn process_buffer(rgb: &RgbImage, color: TargetColor, config: &DetectorConfig) -> Detection {
    let mask = color_mask(rgb, color, config);
    let binary = binarize(&mask, MASK_THRESHOLD);
    let masked = apply_mask(rgb, &mask);

    let mut contours = find_contours::<i32>(&binary);
    debug!("traced {} raw contours", contours.len());
    retain_outer(&mut contours);
    retain_large(&mut contours, config.min_contour_perimeter);

    // The perimeter filter already ran, so skip `analyze` and rank the
    // retained set directly.
    let report = rank_and_measure(contours.clone(), config);

    Detection {
        resized: rgb.clone(),
        masked,
        binary,
        contours,
        report,
    }
}

/// Scales an image to the given width, keeping its aspect ratio.
pub fn resize_to_width(image: &DynamicImage, width: u32) -> DynamicImage {
    if image.width() == 0 || image.width() == width || width == 0 {
        return image.clone();
    }
    let scale = f64::from(width) / f64::from(image.width());
    let height = (f64::from(image.height()) * scale).round().max(1.0) as u32;
    image.resize_exact(width, height, FilterType::Triangle)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shape::Shape;
    use image::Rgb;

    /// 64x64 black frame with a solid green square at (10, 10)..(30, 30).
    fn green_square_image() -> RgbImage {
        let mut image = RgbImage::new(64, 64);
        for y in 10..30 {
            for x in 10..30 {
                image.put_pixel(x, y, Rgb([0, 220, 0]));
            }
        }
        image
    }

    #[test]
    fn finds_a_green_square() {
        let config = DetectorConfig::default();
        let detection = process_buffer(&green_square_image(), TargetColor::Green, &config);

        assert_eq!(detection.report.total_found, 1);
        // Every retained contour is accounted for in the report.
        assert_eq!(detection.contours.len(), detection.report.total_found);
        let object = &detection.report.objects[0];
        assert_eq!(object.shape, Shape::Square);
        assert_eq!(object.bounds.x, 10);
        assert_eq!(object.bounds.y, 10);
        // The square covers pixel columns 10..=29.
        assert_eq!(object.bounds.width, 20);
        assert_eq!(object.bounds.height, 20);
        assert_eq!(object.aspect_ratio, Some(1.0));
    }

    #[test]
    fn wrong_color_finds_nothing() {
        let config = DetectorConfig::default();
        let detection = process_buffer(&green_square_image(), TargetColor::Blue, &config);

        assert!(detection.report.is_empty());
        assert!(detection.contours.is_empty());
        // The mask is empty, so the masked image is fully black.
        assert!(detection.masked.pixels().all(|p| *p == Rgb([0, 0, 0])));
    }

    #[test]
    fn small_speckles_are_filtered_out() {
        let mut image = RgbImage::new(64, 64);
        // 2x2 green speckle: perimeter well under the minimum.
        for y in 5..7 {
            for x in 5..7 {
                image.put_pixel(x, y, Rgb([0, 220, 0]));
            }
        }
        let config = DetectorConfig::default();
        let detection = process_buffer(&image, TargetColor::Green, &config);
        assert!(detection.report.is_empty());
    }

    #[test]
    fn resize_preserves_aspect_ratio() {
        let image = DynamicImage::new_rgb8(1000, 400);
        let resized = resize_to_width(&image, 500);
        assert_eq!(resized.width(), 500);
        assert_eq!(resized.height(), 200);
    }

    #[test]
    fn resize_to_own_width_is_identity() {
        let image = DynamicImage::new_rgb8(500, 300);
        let resized = resize_to_width(&image, 500);
        assert_eq!((resized.width(), resized.height()), (500, 300));
    }
}
