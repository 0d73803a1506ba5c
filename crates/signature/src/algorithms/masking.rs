use image::{GrayImage, ImageBuffer, Luma, RgbImage};
use palette::{FromColor, Hsv, Srgb};

use crate::{error::Result, traits::MaskBuilder};

/// Marks pixels whose HSV value falls inside a configured range.
///
/// Bounds use OpenCV's 8-bit HSV scaling: H in `0..=180`, S and V in
/// `0..=255`. The defaults select bright pixels (V >= 250) regardless of hue
/// or saturation.
#[derive(Debug, Clone)]
pub struct HsvRangeMaskBuilder {
    /// Inclusive lower bound, `[h, s, v]`.
    pub low: [u8; 3],
    /// Inclusive upper bound, `[h, s, v]`.
    pub high: [u8; 3],
}

impl Default for HsvRangeMaskBuilder {
    fn default() -> Self {
        Self {
            low: [0, 0, 250],
            high: [255, 255, 255],
        }
    }
}

impl HsvRangeMaskBuilder {
    fn in_range(&self, hsv: [u8; 3]) -> bool {
        hsv.iter()
            .zip(self.low.iter().zip(self.high.iter()))
            .all(|(c, (lo, hi))| lo <= c && c <= hi)
    }
}

/// One pixel to OpenCV-scaled HSV.
fn hsv_components(r: u8, g: u8, b: u8) -> [u8; 3] {
    let rgb = Srgb::new(r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0);
    let hsv: Hsv = Hsv::from_color(rgb);
    let h = hsv.hue.into_positive_degrees() / 2.0;
    [
        h.round() as u8,
        (hsv.saturation * 255.0).round() as u8,
        (hsv.value * 255.0).round() as u8,
    ]
}

impl MaskBuilder for HsvRangeMaskBuilder {
    fn build_mask(&self, image: &RgbImage) -> Result<GrayImage> {
        let mask: GrayImage = ImageBuffer::from_fn(image.width(), image.height(), |x, y| {
            let p = image.get_pixel(x, y);
            if self.in_range(hsv_components(p[0], p[1], p[2])) {
                Luma([255u8])
            } else {
                Luma([0u8])
            }
        });
        Ok(mask)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    fn mask_of(pixel: [u8; 3]) -> u8 {
        let mut img = RgbImage::new(1, 1);
        img.put_pixel(0, 0, Rgb(pixel));
        let mask = HsvRangeMaskBuilder::default()
            .build_mask(&img)
            .expect("mask should build");
        mask.get_pixel(0, 0)[0]
    }

    #[test]
    fn white_pixels_are_foreground() {
        assert_eq!(mask_of([255, 255, 255]), 255);
    }

    #[test]
    fn value_boundary_is_inclusive_at_250() {
        assert_eq!(mask_of([250, 250, 250]), 255);
        assert_eq!(mask_of([249, 249, 249]), 0);
    }

    #[test]
    fn saturated_bright_colors_pass_the_default_range() {
        // V = max(r, g, b) = 255, and the default range ignores hue and
        // saturation entirely.
        assert_eq!(mask_of([255, 0, 0]), 255);
        assert_eq!(mask_of([0, 0, 255]), 255);
    }

    #[test]
    fn dark_pixels_are_background() {
        assert_eq!(mask_of([0, 0, 0]), 0);
        assert_eq!(mask_of([128, 128, 128]), 0);
    }
}
