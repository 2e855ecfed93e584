use thiserror::Error;

/// Errors that terminate a detection run.
///
/// An empty result set is not an error; the report simply carries no
/// objects.
#[derive(Debug, Error)]
pub enum DetectError {
    /// The requested colour is not one of the supported names.
    /// Raised before any image is opened.
    #[error("unsupported color {0:?} (expected one of: red, green, blue)")]
    UnsupportedColor(String),

    /// The input image could not be opened or decoded.
    #[error("failed to load image: {0}")]
    Image(#[from] image::ImageError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unsupported_color_display() {
        let err = DetectError::UnsupportedColor("purple".to_string());
        assert_eq!(
            err.to_string(),
            "unsupported color \"purple\" (expected one of: red, green, blue)"
        );
    }
}
