use image::{GrayImage, Luma, Rgb, RgbImage};
use imageproc::{
    contours::Contour,
    drawing::{draw_hollow_rect_mut, draw_line_segment_mut},
};

use crate::report::DetectedObject;

const CONTOUR_COLOR: Rgb<u8> = Rgb([0, 0, 255]);
const BOX_COLOR: Rgb<u8> = Rgb([0, 255, 0]);

/// Keeps only the pixels of `image` where `mask` is set; everything
/// else goes black.
pub fn apply_mask(image: &RgbImage, mask: &GrayImage) -> RgbImage {
    let mut masked = image.clone();
    for (x, y, pixel) in masked.enumerate_pixels_mut() {
        if mask.get_pixel(x, y) == &Luma([0]) {
            *pixel = Rgb([0, 0, 0]);
        }
    }
    masked
}

/// Outlines each contour in blue on `canvas`.
pub fn draw_contours_mut(canvas: &mut RgbImage, contours: &[Contour<i32>]) {
    for contour in contours {
        if contour.points.len() < 2 {
            continue;
        }
        for i in 0..contour.points.len() {
            let p1 = contour.points[i];
            let p2 = contour.points[(i + 1) % contour.points.len()];
            draw_line_segment_mut(
                canvas,
                (p1.x as f32, p1.y as f32),
                (p2.x as f32, p2.y as f32),
                CONTOUR_COLOR,
            );
        }
    }
}

/// Draws each reported object's bounding box in green on `canvas`.
/// Boxes with a zero dimension are skipped.
pub fn draw_object_boxes_mut(canvas: &mut RgbImage, objects: &[DetectedObject]) {
    for object in objects {
        if object.bounds.width == 0 || object.bounds.height == 0 {
            continue;
        }
        let rect = imageproc::rect::Rect::at(object.bounds.x as i32, object.bounds.y as i32)
            .of_size(object.bounds.width, object.bounds.height);
        draw_hollow_rect_mut(canvas, rect, BOX_COLOR);
    }
}
