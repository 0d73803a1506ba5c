use std::collections::BTreeMap;

use image::{GrayImage, RgbImage};

use crate::{
    error::Result,
    types::{RegionBox, RegionCrop, RegionMap, SignatureCrops},
};

/// Trait for turning a color image into a binary foreground mask.
pub trait MaskBuilder: Send + Sync {
    /// Build a {0, 255} mask with the same dimensions as the input.
    fn build_mask(&self, image: &RgbImage) -> Result<GrayImage>;
}

/// Trait for cleaning a binary mask of noise and background blobs.
///
/// Takes the mask by value: ownership moves stage to stage and no stage
/// aliases another's output.
pub trait ComponentFilter: Send + Sync {
    fn filter(&self, mask: GrayImage) -> Result<GrayImage>;
}

/// Trait for extracting candidate bounding boxes from a mask.
pub trait BoxExtractor: Send + Sync {
    /// Boxes sorted by area descending, ties in discovery order.
    fn extract_boxes(&self, mask: &GrayImage) -> Result<Vec<RegionBox>>;
}

/// Trait for collapsing boxes into a map of merged regions.
pub trait RegionMerger: Send + Sync {
    fn merge(&self, boxes: &[RegionBox]) -> Result<RegionMap>;
}

/// Trait for cropping mask pixels out for each merged region.
pub trait RegionCropper: Send + Sync {
    fn crop(&self, mask: &GrayImage, regions: &RegionMap) -> Result<BTreeMap<usize, RegionCrop>>;
}

/// Main trait for end-to-end signature region detection.
pub trait SignatureDetector: Send + Sync {
    fn detect(&self, image: &RgbImage) -> Result<SignatureCrops>;
}
