use std::fmt;

use imageproc::point::Point;

use crate::geometry::{approximate_closed_polygon, bounding_box, contour_perimeter};

/// Fraction of the contour perimeter used as the polygon approximation
/// tolerance.
const APPROX_TOLERANCE: f64 = 0.04;

/// Width/height ratios inside this band classify as squares.
const SQUARE_RATIO_MIN: f64 = 0.95;
const SQUARE_RATIO_MAX: f64 = 1.05;

/// The shape class of a contour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    Triangle,
    Square,
    Rectangle,
    /// The approximation has a vertex count no supported shape matches.
    Unknown,
    /// The contour is too degenerate to classify (fewer than 3 points
    /// or zero perimeter).
    Unidentified,
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Shape::Triangle => "Triangle",
            Shape::Square => "Square",
            Shape::Rectangle => "Rectangle",
            Shape::Unknown => "Unknown",
            Shape::Unidentified => "Unidentified",
        };
        write!(f, "{}", name)
    }
}

/// Classifies a contour by the vertex count of its polygon
/// approximation.
///
/// The contour is approximated with a tolerance of 4% of its perimeter.
/// Three vertices make a triangle. Four vertices are split into squares
/// and rectangles by the width/height ratio of the approximation's
/// bounding box, with ratios in `[0.95, 1.05]` counting as square. Any
/// other vertex count is [`Shape::Unknown`].
pub fn classify(points: &[Point<i32>]) -> Shape {
    if points.len() < 3 {
        return Shape::Unidentified;
    }

    let perimeter = contour_perimeter(points);
    if perimeter <= 0.0 {
        return Shape::Unidentified;
    }

    let approx = approximate_closed_polygon(points, APPROX_TOLERANCE * perimeter);
    match approx.len() {
        3 => Shape::Triangle,
        4 => {
            let Some(bounds) = bounding_box(&approx) else {
                return Shape::Unidentified;
            };
            // Pixel boxes of a non-empty approximation have dimensions
            // of at least 1, so the ratio is always defined.
            let ratio = f64::from(bounds.width) / f64::from(bounds.height);
            if (SQUARE_RATIO_MIN..=SQUARE_RATIO_MAX).contains(&ratio) {
                Shape::Square
            } else {
                Shape::Rectangle
            }
        }
        _ => Shape::Unknown,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Traces the axis-aligned rectangle `(0, 0)..(width, height)` with
    /// a point at every corner and at the middle of every edge.
    fn rectangle_contour(width: i32, height: i32) -> Vec<Point<i32>> {
        vec![
            Point::new(0, 0),
            Point::new(width / 2, 0),
            Point::new(width, 0),
            Point::new(width, height / 2),
            Point::new(width, height),
            Point::new(width / 2, height),
            Point::new(0, height),
            Point::new(0, height / 2),
        ]
    }

    fn circle_contour(cx: i32, cy: i32, radius: f64) -> Vec<Point<i32>> {
        let mut points = Vec::new();
        for degree in 0..360 {
            let angle = f64::from(degree).to_radians();
            let p = Point::new(
                cx + (radius * angle.cos()).round() as i32,
                cy + (radius * angle.sin()).round() as i32,
            );
            if points.last() != Some(&p) {
                points.push(p);
            }
        }
        points
    }

    #[test]
    fn triangle_has_three_vertices() {
        let triangle = vec![
            Point::new(0, 0),
            Point::new(25, 43),
            Point::new(50, 87),
            Point::new(75, 43),
            Point::new(100, 0),
            Point::new(50, 0),
        ];
        assert_eq!(classify(&triangle), Shape::Triangle);
    }

    #[test]
    fn square_when_sides_match() {
        assert_eq!(classify(&rectangle_contour(100, 100)), Shape::Square);
    }

    #[test]
    fn square_within_ratio_band() {
        // The pixel box is 101x98, a ratio of about 1.03, inside
        // [0.95, 1.05].
        assert_eq!(classify(&rectangle_contour(100, 97)), Shape::Square);
    }

    #[test]
    fn rectangle_outside_ratio_band() {
        // The pixel box is 201x101, a ratio of about 2.0.
        assert_eq!(classify(&rectangle_contour(200, 100)), Shape::Rectangle);
    }

    #[test]
    fn circle_is_unknown() {
        assert_eq!(classify(&circle_contour(150, 150, 100.0)), Shape::Unknown);
    }

    #[test]
    fn classification_is_deterministic() {
        let contour = rectangle_contour(200, 100);
        let first = classify(&contour);
        for _ in 0..10 {
            assert_eq!(classify(&contour), first);
        }
    }

    #[test]
    fn classification_ignores_trace_start_point() {
        let contour = rectangle_contour(100, 100);
        for shift in 0..contour.len() {
            let mut rotated = contour[shift..].to_vec();
            rotated.extend_from_slice(&contour[..shift]);
            assert_eq!(
                classify(&rotated),
                Shape::Square,
                "failed for start offset {}",
                shift
            );
        }
    }

    #[test]
    fn degenerate_contours_are_unidentified() {
        assert_eq!(classify(&[]), Shape::Unidentified);
        assert_eq!(classify(&[Point::new(5, 5)]), Shape::Unidentified);
        assert_eq!(
            classify(&[Point::new(0, 0), Point::new(10, 0)]),
            Shape::Unidentified
        );
        // Coincident points have zero perimeter.
        assert_eq!(
            classify(&[Point::new(3, 3), Point::new(3, 3), Point::new(3, 3)]),
            Shape::Unidentified
        );
    }

    #[test]
    fn flat_contour_does_not_divide_by_zero() {
        let flat = vec![
            Point::new(0, 0),
            Point::new(25, 0),
            Point::new(50, 0),
            Point::new(75, 0),
            Point::new(100, 0),
            Point::new(75, 0),
            Point::new(50, 0),
            Point::new(25, 0),
        ];
        // Collapses to 2 approximation vertices.
        assert_eq!(classify(&flat), Shape::Unknown);
    }

    #[test]
    fn shape_labels() {
        assert_eq!(Shape::Triangle.to_string(), "Triangle");
        assert_eq!(Shape::Square.to_string(), "Square");
        assert_eq!(Shape::Rectangle.to_string(), "Rectangle");
        assert_eq!(Shape::Unknown.to_string(), "Unknown");
        assert_eq!(Shape::Unidentified.to_string(), "Unidentified");
    }
}
