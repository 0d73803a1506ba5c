use image::{GrayImage, ImageBuffer, Luma};
use imageproc::definitions::Image;
use imageproc::region_labelling::{Connectivity, connected_components};

use crate::{error::Result, traits::ComponentFilter};

/// Components below this pixel count do not contribute to the size
/// statistics (strictly greater qualifies).
const MIN_COMPONENT_AREA: u64 = 10;

/// 8-connected component labeling with per-label pixel counts.
///
/// Label 0 is background; labels 1..N are assigned in discovery order.
pub struct LabeledComponents {
    labels: Image<Luma<u32>>,
    areas: Vec<u64>,
}

impl LabeledComponents {
    /// Labels the components of `condition`, treating pixels equal to
    /// `background` as background.
    pub fn label(condition: &GrayImage, background: u8) -> Self {
        let labels = connected_components(condition, Connectivity::Eight, Luma([background]));
        let max_label = labels.pixels().map(|p| p[0]).max().unwrap_or(0) as usize;
        let mut areas = vec![0u64; max_label + 1];
        for p in labels.pixels() {
            areas[p[0] as usize] += 1;
        }
        Self { labels, areas }
    }

    pub fn label_at(&self, x: u32, y: u32) -> u32 {
        self.labels.get_pixel(x, y)[0]
    }

    /// Pixel count of one label. Index 0 reports the background size.
    pub fn area(&self, label: u32) -> u64 {
        self.areas.get(label as usize).copied().unwrap_or(0)
    }

    /// Per-label pixel counts, indexed by label (0 = background).
    pub fn areas(&self) -> &[u64] {
        &self.areas
    }
}

/// Removes small noise and oversized background blobs from a binary mask
/// using size thresholds derived from the mask itself.
///
/// The mask is thresholded at its own mean, and the labeling runs with the
/// bright side of the threshold as *background*, so the components are the
/// darker blobs. Components with area > 10 set the statistics: with more
/// than one such component, anything smaller than `average * 3 + 100` or
/// larger than fifteen times that is dropped. The output polarity is
/// inverted: surviving component pixels become 0 and everything else 255.
/// With at most one qualifying component the input mask is returned
/// unchanged.
#[derive(Debug, Clone, Default)]
pub struct AdaptiveComponentFilter;

impl ComponentFilter for AdaptiveComponentFilter {
    fn filter(&self, mask: GrayImage) -> Result<GrayImage> {
        let pixel_count = (mask.width() as u64 * mask.height() as u64) as f64;
        if pixel_count == 0.0 {
            return Ok(mask);
        }
        let mean = mask.pixels().map(|p| p[0] as f64).sum::<f64>() / pixel_count;

        let condition: GrayImage = ImageBuffer::from_fn(mask.width(), mask.height(), |x, y| {
            if mask.get_pixel(x, y)[0] as f64 > mean {
                Luma([1u8])
            } else {
                Luma([0u8])
            }
        });
        // Above-mean pixels are the labeling background; components form
        // over the darker side of the threshold. This inversion is
        // deliberate and must not be flipped.
        let labeled = LabeledComponents::label(&condition, 1);

        let mut total_pixels = 0u64;
        let mut region_count = 0u64;
        for &area in &labeled.areas()[1..] {
            if area > MIN_COMPONENT_AREA {
                total_pixels += area;
                region_count += 1;
            }
        }
        if region_count <= 1 {
            // Not enough components to derive thresholds from; pass the
            // mask through untouched.
            return Ok(mask);
        }

        let average = total_pixels as f64 / region_count as f64;
        let small_size_outlier = average * 3.0 + 100.0;
        let big_size_outlier = small_size_outlier * 15.0;

        let cleaned = ImageBuffer::from_fn(mask.width(), mask.height(), |x, y| {
            let label = labeled.label_at(x, y);
            if label == 0 {
                return Luma([255u8]);
            }
            let area = labeled.area(label) as f64;
            if area < small_size_outlier || area > big_size_outlier {
                Luma([255u8])
            } else {
                Luma([0u8])
            }
        });
        Ok(cleaned)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bright_mask(width: u32, height: u32) -> GrayImage {
        ImageBuffer::from_pixel(width, height, Luma([255u8]))
    }

    fn darken(mask: &mut GrayImage, x0: u32, y0: u32, w: u32, h: u32) {
        for y in y0..y0 + h {
            for x in x0..x0 + w {
                mask.put_pixel(x, y, Luma([0u8]));
            }
        }
    }

    #[test]
    fn single_component_falls_back_to_input() {
        let mut mask = bright_mask(100, 100);
        darken(&mut mask, 10, 10, 6, 6);
        let out = AdaptiveComponentFilter
            .filter(mask.clone())
            .expect("filter should run");
        assert_eq!(out, mask, "one qualifying component must pass through");
    }

    #[test]
    fn no_qualifying_components_falls_back_to_input() {
        // 3x3 = 9 pixels and 2x5 = 10 pixels: neither is strictly greater
        // than the 10-pixel qualification bound.
        let mut mask = bright_mask(100, 100);
        darken(&mut mask, 10, 10, 3, 3);
        darken(&mut mask, 50, 50, 2, 5);
        let out = AdaptiveComponentFilter
            .filter(mask.clone())
            .expect("filter should run");
        assert_eq!(out, mask);
    }

    #[test]
    fn uniform_mask_falls_back_to_input() {
        let mask = bright_mask(50, 50);
        let out = AdaptiveComponentFilter
            .filter(mask.clone())
            .expect("filter should run");
        assert_eq!(out, mask);
    }

    #[test]
    fn survivors_are_zero_rest_is_255() {
        // One 40x25 = 1000 px blob and four 4x5 = 20 px blobs. Statistics:
        // total = 1080, count = 5, average = 216, small outlier = 748,
        // big outlier = 11220. Only the 1000 px blob survives.
        let mut mask = bright_mask(100, 100);
        darken(&mut mask, 10, 10, 40, 25);
        darken(&mut mask, 60, 10, 4, 5);
        darken(&mut mask, 70, 10, 4, 5);
        darken(&mut mask, 80, 10, 4, 5);
        darken(&mut mask, 60, 30, 4, 5);

        let out = AdaptiveComponentFilter
            .filter(mask)
            .expect("filter should run");

        // Survivor pixels come out as 0, not 255.
        for y in 10..35 {
            for x in 10..50 {
                assert_eq!(out.get_pixel(x, y)[0], 0, "survivor at ({x}, {y})");
            }
        }
        // Removed small blobs and the bright background are 255.
        assert_eq!(out.get_pixel(61, 11)[0], 255, "small blob removed");
        assert_eq!(out.get_pixel(0, 0)[0], 255, "background inverted to 255");

        let zeros = out.pixels().filter(|p| p[0] == 0).count();
        assert_eq!(zeros, 1000, "exactly the surviving component remains");
    }
}
