use image::math::Rect;
use imageproc::contours::{BorderType, Contour};
use log::debug;

use crate::config::DetectorConfig;
use crate::geometry::{bounding_box, contour_area, contour_perimeter};
use crate::shape::{Shape, classify};

/// Everything the detector reports about one retained contour.
#[derive(Debug, Clone, PartialEq)]
pub struct DetectedObject {
    pub shape: Shape,
    /// Closed-loop arc length of the contour.
    pub perimeter: f64,
    /// Enclosed area by the shoelace formula.
    pub area: f64,
    /// Axis-aligned bounding box of the contour, in the pixel-count
    /// convention (dimensions are `max - min + 1`).
    pub bounds: Rect,
    /// Bounding-box centre: `(x + w/2, y + h/2)`.
    pub center: (f64, f64),
    /// Height divided by width. `None` when the box has zero width,
    /// which pixel boxes of non-empty contours never have.
    ///
    /// Note the inversion: classification checks width/height, the
    /// report prints height/width. Both conventions are deliberate.
    pub aspect_ratio: Option<f64>,
}

/// Outcome of filtering, ranking and classifying a contour set.
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    /// How many contours survived the perimeter filter.
    pub total_found: usize,
    /// The largest survivors, ordered by area descending, at most
    /// `top_object_count` of them.
    pub objects: Vec<DetectedObject>,
}

impl Report {
    /// `true` when nothing of the requested colour was found.
    pub fn is_empty(&self) -> bool {
        self.total_found == 0
    }
}

/// Keeps only contours that trace an outer border, discarding holes.
pub fn retain_outer(contours: &mut Vec<Contour<i32>>) {
    contours.retain(|c| c.border_type == BorderType::Outer);
}

/// Keeps only contours whose closed-loop perimeter reaches
/// `min_perimeter`. Shorter contours are noise. A perimeter exactly at
/// the threshold is kept; relative order is preserved.
pub fn retain_large(contours: &mut Vec<Contour<i32>>, min_perimeter: f64) {
    contours.retain(|c| contour_perimeter(&c.points) >= min_perimeter);
}

/// Pairs each contour with its enclosed area and sorts the result in
/// descending order.
///
/// Takes ownership of the input vector to avoid cloning the contours.
/// The sort is stable, so contours with equal areas keep their relative
/// input order.
pub fn rank_by_area_owned(contours: Vec<Contour<i32>>) -> Vec<(Contour<i32>, f64)> {
    let mut ranked: Vec<(Contour<i32>, f64)> = contours
        .into_iter()
        .map(|contour| {
            let area = contour_area(&contour.points);
            (contour, area)
        })
        .collect();

    ranked.sort_by(|a, b| b.1.total_cmp(&a.1));

    ranked
}

/// Filters, ranks and classifies a contour set.
///
/// Contours below `min_contour_perimeter` are dropped, the rest are
/// ranked by area descending, and the top `top_object_count` are
/// measured into [`DetectedObject`] records.
pub fn analyze(mut contours: Vec<Contour<i32>>, config: &DetectorConfig) -> Report {
    retain_large(&mut contours, config.min_contour_perimeter);
    debug!(
        "{} contours above minimum perimeter {}",
        contours.len(),
        config.min_contour_perimeter
    );
    rank_and_measure(contours, config)
}

/// Ranks an already filtered contour set by area and measures the top
/// `top_object_count` into a [`Report`].
///
/// Callers that have not applied the perimeter filter yet should go
/// through [`analyze`] instead.
pub fn rank_and_measure(contours: Vec<Contour<i32>>, config: &DetectorConfig) -> Report {
    let ranked = rank_by_area_owned(contours);
    let total_found = ranked.len();

    let objects = ranked
        .into_iter()
        .take(config.top_object_count)
        .filter_map(|(contour, area)| measure(&contour, area))
        .collect();

    Report {
        total_found,
        objects,
    }
}

fn measure(contour: &Contour<i32>, area: f64) -> Option<DetectedObject> {
    let bounds = bounding_box(&contour.points)?;
    let center = (
        f64::from(bounds.x) + f64::from(bounds.width) / 2.0,
        f64::from(bounds.y) + f64::from(bounds.height) / 2.0,
    );
    let aspect_ratio =
        (bounds.width != 0).then(|| f64::from(bounds.height) / f64::from(bounds.width));

    Some(DetectedObject {
        shape: classify(&contour.points),
        perimeter: contour_perimeter(&contour.points),
        area,
        bounds,
        center,
        aspect_ratio,
    })
}
