use image::math::Rect;
use imageproc::{geometry::approximate_polygon_dp, point::Point};
use num::{Num, NumCast};
use num_traits::{AsPrimitive, ToPrimitive};

/// Calculates the closed-loop perimeter of a contour.
///
/// The perimeter is the sum of Euclidean distances between consecutive
/// points, closing the loop by including the distance between the last
/// and first point. Contours with 0 or 1 point have a perimeter of `0.0`.
///
/// # Type Parameters
///
/// * `T`: The numeric type of the point coordinates. It must be a type
///   that can be losslessly converted to `f64` for distance
///   calculations, such as `i32` or `u32`.
pub fn contour_perimeter<T>(points: &[Point<T>]) -> f64
where
    T: Num + NumCast + Copy + PartialEq + Eq + AsPrimitive<f64>,
{
    points
        .iter()
        .zip(points.iter().cycle().skip(1))
        .map(|(p1, p2)| {
            let dx: f64 = p2.x.as_() - p1.x.as_();
            let dy: f64 = p2.y.as_() - p1.y.as_();
            dx.hypot(dy)
        })
        .sum()
}

/// Calculates the area enclosed by a contour using the shoelace formula.
///
/// The point sequence is treated as a closed polygon. Self-intersecting
/// input cancels itself out, so degenerate contours (fewer than 3
/// points, or points tracing a line) report an area of `0.0`.
pub fn contour_area<T>(points: &[Point<T>]) -> f64
where
    T: Num + NumCast + Copy + PartialEq + Eq + AsPrimitive<f64>,
{
    if points.len() < 3 {
        return 0.0;
    }

    let twice_area: f64 = points
        .iter()
        .zip(points.iter().cycle().skip(1))
        .map(|(p1, p2)| p1.x.as_() * p2.y.as_() - p2.x.as_() * p1.y.as_())
        .sum();

    (twice_area * 0.5).abs()
}

/// Calculates the axis-aligned bounding box of a point sequence.
///
/// Iterates through the points to find the minimum and maximum x and y
/// coordinates, then constructs an `image::math::Rect` that encloses
/// them all. Width and height count the covered integer coordinates
/// (`max - min + 1`), the pixel-box convention, so any non-empty input
/// yields dimensions of at least 1.
///
/// Returns `None` for an empty slice. Negative coordinates are clamped
/// to zero, matching image space.
pub fn bounding_box<T>(points: &[Point<T>]) -> Option<Rect>
where
    T: Copy + PartialOrd + Num + ToPrimitive,
{
    let p0 = points.first()?;
    let mut min_x = p0.x;
    let mut max_x = p0.x;
    let mut min_y = p0.y;
    let mut max_y = p0.y;

    // Manual comparison is used here because `T` only has a `PartialOrd`.
    // This is required to support floating-point types, which do not
    // implement `Ord`.
    for p in &points[1..] {
        if p.x < min_x {
            min_x = p.x;
        }
        if p.x > max_x {
            max_x = p.x;
        }
        if p.y < min_y {
            min_y = p.y;
        }
        if p.y > max_y {
            max_y = p.y;
        }
    }

    let x = min_x.to_u32().unwrap_or(0);
    let y = min_y.to_u32().unwrap_or(0);

    let width = max_x.to_u32().unwrap_or(0).saturating_sub(x) + 1;
    let height = max_y.to_u32().unwrap_or(0).saturating_sub(y) + 1;

    Some(Rect {
        x,
        y,
        width,
        height,
    })
}

/// Approximates a closed contour by a polygon whose maximum vertex
/// deviation is bounded by `epsilon`.
///
/// Plain Douglas-Peucker always keeps the first and last point of its
/// input, so running it directly on a contour would pin the result to
/// whichever boundary pixel the tracer happened to start from. Instead
/// the loop is split at a mutually far-apart pair of points (which are
/// true extremes of the polygon) and each half is simplified as an open
/// curve. The result starts at the earlier anchor and runs in input
/// order.
///
/// Inputs with at most 3 points, or a non-positive `epsilon`, are
/// returned unchanged.
pub fn approximate_closed_polygon(points: &[Point<i32>], epsilon: f64) -> Vec<Point<i32>> {
    if points.len() <= 3 || epsilon <= 0.0 {
        return points.to_vec();
    }

    let a = farthest_from(points, points[0]);
    let b = farthest_from(points, points[a]);
    if a == b {
        // All points coincide.
        return points.to_vec();
    }
    let (lo, hi) = if a < b { (a, b) } else { (b, a) };

    let mut wrapped: Vec<Point<i32>> = points[hi..].to_vec();
    wrapped.extend_from_slice(&points[..=lo]);

    let mut result = approximate_polygon_dp(&points[lo..=hi], epsilon, false);
    let back = approximate_polygon_dp(&wrapped, epsilon, false);

    // Both halves share their endpoints; drop the duplicates when
    // stitching the loop back together.
    result.pop();
    result.extend_from_slice(&back[..back.len() - 1]);
    result
}

fn farthest_from(points: &[Point<i32>], origin: Point<i32>) -> usize {
    let mut best = 0;
    let mut best_dist = -1.0;
    for (index, p) in points.iter().enumerate() {
        let dx = (p.x - origin.x) as f64;
        let dy = (p.y - origin.y) as f64;
        let dist = dx * dx + dy * dy;
        if dist > best_dist {
            best_dist = dist;
            best = index;
        }
    }
    best
}
