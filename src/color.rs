use std::fmt;
use std::str::FromStr;

use image::{GrayImage, Luma, RgbImage};
use palette::{FromColor, Hsv, Srgb};

use crate::config::DetectorConfig;
use crate::error::DetectError;

/// Minimum HSV saturation for a pixel to count towards a colour mask.
/// Keeps washed-out greys and near-whites out of every hue window.
const MIN_MASK_SATURATION: f32 = 100.0 / 255.0;

/// A colour the detector knows how to isolate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetColor {
    Red,
    Green,
    Blue,
}

impl TargetColor {
    /// The inclusive `(low, high)` hue windows for this colour, in
    /// degrees on the 0–360 hue circle.
    ///
    /// Red sits on the hue wrap and is expressed as the union of two
    /// windows on either side of 0°; green and blue are single windows
    /// centred on 120° and 240°.
    pub fn hue_windows(self, config: &DetectorConfig) -> Vec<(f32, f32)> {
        match self {
            TargetColor::Red => {
                let half = config.red_hue_width / 2.0;
                vec![(0.0, half), (360.0 - half, 360.0)]
            }
            TargetColor::Green => centered_window(120.0, config.green_hue_width),
            TargetColor::Blue => centered_window(240.0, config.blue_hue_width),
        }
    }
}

fn centered_window(center: f32, width: f32) -> Vec<(f32, f32)> {
    vec![(center - width / 2.0, center + width / 2.0)]
}

impl FromStr for TargetColor {
    type Err = DetectError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "red" => Ok(TargetColor::Red),
            "green" => Ok(TargetColor::Green),
            "blue" => Ok(TargetColor::Blue),
            other => Err(DetectError::UnsupportedColor(other.to_string())),
        }
    }
}

impl fmt::Display for TargetColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TargetColor::Red => "red",
            TargetColor::Green => "green",
            TargetColor::Blue => "blue",
        };
        write!(f, "{}", name)
    }
}

/// Builds a binary mask of the pixels whose hue falls inside the
/// colour's configured windows.
///
/// Selected pixels are white (255), everything else black (0). Pixels
/// below the minimum saturation never match, regardless of hue.
pub fn color_mask(image: &RgbImage, color: TargetColor, config: &DetectorConfig) -> GrayImage {
    let windows = color.hue_windows(config);
    let mut mask = GrayImage::new(image.width(), image.height());

    for (x, y, pixel) in image.enumerate_pixels() {
        let rgb = Srgb::new(
            f32::from(pixel.0[0]) / 255.0,
            f32::from(pixel.0[1]) / 255.0,
            f32::from(pixel.0[2]) / 255.0,
        );
        let hsv: Hsv = Hsv::from_color(rgb);
        let hue = hsv.hue.into_positive_degrees();

        if hsv.saturation >= MIN_MASK_SATURATION
            && windows.iter().any(|&(low, high)| hue >= low && hue <= high)
        {
            mask.put_pixel(x, y, Luma([255]));
        }
    }

    mask
}

/// Thresholds a grayscale image into a strict binary one: values above
/// `threshold` become white, everything else black.
pub fn binarize(image: &GrayImage, threshold: u8) -> GrayImage {
    let mut binary = image.clone();
    for p in binary.pixels_mut() {
        if p.0[0] > threshold {
            *p = Luma([255]);
        } else {
            *p = Luma([0]);
        }
    }
    binary
}
