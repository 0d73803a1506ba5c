use image::GrayImage;
use imageproc::contours::find_contours;
use imageproc::point::Point;

use crate::{error::Result, traits::BoxExtractor, types::RegionBox};

/// Extracts bounding boxes of connected foreground blobs, largest first.
///
/// Outer and hole contours are both considered; only the flat bounding
/// rectangle of each is kept. A box survives iff its area is strictly
/// greater than `min_region_size` and it is strictly narrower and shorter
/// than the image, which drops the spurious full-frame contour an
/// all-foreground mask produces.
#[derive(Debug, Clone)]
pub struct BoundingBoxExtractor {
    pub min_region_size: i64,
}

impl Default for BoundingBoxExtractor {
    fn default() -> Self {
        Self {
            min_region_size: 10_000,
        }
    }
}

fn bounding_box(points: &[Point<i32>]) -> Option<RegionBox> {
    let first = points.first()?;
    let (mut min_x, mut min_y) = (first.x as i64, first.y as i64);
    let (mut max_x, mut max_y) = (min_x, min_y);
    for p in points {
        min_x = min_x.min(p.x as i64);
        min_y = min_y.min(p.y as i64);
        max_x = max_x.max(p.x as i64);
        max_y = max_y.max(p.y as i64);
    }
    Some(RegionBox::new(min_x, min_y, max_x - min_x + 1, max_y - min_y + 1))
}

impl BoxExtractor for BoundingBoxExtractor {
    fn extract_boxes(&self, mask: &GrayImage) -> Result<Vec<RegionBox>> {
        let width = mask.width() as i64;
        let height = mask.height() as i64;

        let mut boxes = Vec::new();
        for contour in find_contours::<i32>(mask) {
            let Some(b) = bounding_box(&contour.points) else {
                continue;
            };
            if b.area() > self.min_region_size && b.h < height && b.w < width {
                boxes.push(b);
            }
        }
        // Stable sort: equal areas keep contour discovery order.
        boxes.sort_by(|a, b| b.area().cmp(&a.area()));
        Ok(boxes)
    }
}
