use std::collections::BTreeMap;

use image::{GrayImage, imageops};

use crate::{
    error::Result,
    traits::RegionCropper,
    types::{RegionCrop, RegionMap},
};

/// Crops the mask pixels covered by each region rectangle `[x, y, x+w, y+h)`.
///
/// Boundary policy is `imageops::crop_imm`'s own: the crop interface is
/// `u32`, so negative coordinates saturate to zero, and the rectangle is
/// then clamped to the image bounds. A region partially outside the mask
/// yields only its in-bounds pixels; a region fully outside yields a 0x0
/// crop, which still appears in the result map under its identifier.
#[derive(Debug, Clone, Default)]
pub struct MaskCropper;

impl RegionCropper for MaskCropper {
    fn crop(&self, mask: &GrayImage, regions: &RegionMap) -> Result<BTreeMap<usize, RegionCrop>> {
        let mut results = BTreeMap::new();
        for (id, region) in regions.iter() {
            let x = region.x.max(0) as u32;
            let y = region.y.max(0) as u32;
            let w = region.w.max(0) as u32;
            let h = region.h.max(0) as u32;
            let cropped = imageops::crop_imm(mask, x, y, w, h).to_image();
            results.insert(
                id,
                RegionCrop {
                    region: *region,
                    mask: cropped,
                },
            );
        }
        Ok(results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::RegionBox;
    use image::{ImageBuffer, Luma};

    fn gradient_mask(width: u32, height: u32) -> GrayImage {
        ImageBuffer::from_fn(width, height, |x, y| Luma([((x + y) % 256) as u8]))
    }

    fn crop_one(mask: &GrayImage, region: RegionBox) -> RegionCrop {
        let mut regions = RegionMap::new();
        regions.insert(region);
        let crops = MaskCropper.crop(mask, &regions).expect("crop should run");
        crops.into_iter().next().expect("one crop").1
    }

    #[test]
    fn in_bounds_crop_copies_the_exact_pixels() {
        let mask = gradient_mask(100, 100);
        let crop = crop_one(&mask, RegionBox::new(10, 20, 30, 40));
        assert_eq!(crop.mask.dimensions(), (30, 40));
        assert_eq!(crop.mask.get_pixel(0, 0)[0], mask.get_pixel(10, 20)[0]);
        assert_eq!(crop.mask.get_pixel(29, 39)[0], mask.get_pixel(39, 59)[0]);
    }

    #[test]
    fn negative_coordinates_saturate_to_zero() {
        let mask = gradient_mask(100, 100);
        let crop = crop_one(&mask, RegionBox::new(-5, -5, 20, 20));
        assert_eq!(crop.mask.dimensions(), (20, 20));
        assert_eq!(crop.mask.get_pixel(0, 0)[0], mask.get_pixel(0, 0)[0]);
    }

    #[test]
    fn rectangle_is_clamped_to_the_mask_bounds() {
        let mask = gradient_mask(100, 100);
        let crop = crop_one(&mask, RegionBox::new(90, 90, 20, 20));
        assert_eq!(crop.mask.dimensions(), (10, 10));
    }

    #[test]
    fn region_fully_outside_yields_an_empty_crop() {
        let mask = gradient_mask(100, 100);
        let region = RegionBox::new(200, 200, 50, 50);
        let crop = crop_one(&mask, region);
        assert_eq!(crop.mask.dimensions(), (0, 0));
        assert_eq!(crop.region, region, "geometry is reported untouched");
    }

    #[test]
    fn crops_are_keyed_by_region_identifier() {
        let mask = gradient_mask(100, 100);
        let mut regions = RegionMap::new();
        regions.insert(RegionBox::new(0, 0, 10, 10));
        regions.insert(RegionBox::new(50, 50, 10, 10));
        let crops = MaskCropper.crop(&mask, &regions).expect("crop should run");
        assert_eq!(crops.keys().copied().collect::<Vec<_>>(), vec![0, 1]);
    }
}
