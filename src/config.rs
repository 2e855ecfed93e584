/// Tunable parameters for the colour-shape detection pipeline.
///
/// All fields have defaults that work well for photographs of
/// solid-coloured objects resized to a few hundred pixels wide.
#[derive(Debug, Clone, PartialEq)]
pub struct DetectorConfig {
    /// Contours with a closed-loop perimeter shorter than this are
    /// treated as noise and dropped before ranking.
    pub min_contour_perimeter: f64,

    /// How many of the largest retained contours to classify and report.
    pub top_object_count: usize,

    /// Input images are scaled to this width (height follows
    /// proportionally) before any masking takes place.
    pub resize_width: u32,

    /// Full width, in degrees on the 0–360 hue circle, of the hue
    /// window considered "red". Red sits on the hue wrap, so the
    /// window is split into two ranges on either side of 0°.
    pub red_hue_width: f32,

    /// Full width in degrees of the hue window centred on green (120°).
    pub green_hue_width: f32,

    /// Full width in degrees of the hue window centred on blue (240°).
    pub blue_hue_width: f32,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            min_contour_perimeter: 22.0,
            top_object_count: 1,
            resize_width: 500,
            red_hue_width: 40.0,
            green_hue_width: 20.0,
            blue_hue_width: 80.0,
        }
    }
}
