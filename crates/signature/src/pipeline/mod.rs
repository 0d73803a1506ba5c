pub mod builder;

use image::{GrayImage, RgbImage};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
    error::{Result, ensure_nonempty},
    traits::{BoxExtractor, ComponentFilter, MaskBuilder, RegionCropper, RegionMerger},
    types::SignatureCrops,
};

/// Immutable pipeline configuration, fixed at construction time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SignatureConfig {
    /// Minimum box area (in pixels, strictly greater) for a candidate
    /// region.
    pub min_region_size: i64,
    /// Fraction of the shorter region side trimmed from merged regions.
    pub border_ratio: f64,
}

impl Default for SignatureConfig {
    fn default() -> Self {
        Self {
            min_region_size: 10_000,
            border_ratio: 0.1,
        }
    }
}

/// Signature region extraction pipeline.
///
/// Runs mask building, component filtering, box extraction, region merging
/// and cropping strictly in sequence. Holds no per-call state, so one
/// pipeline may serve many images; parallelism across images is the
/// caller's business.
pub struct Pipeline {
    mask_builder: Box<dyn MaskBuilder>,
    component_filter: Box<dyn ComponentFilter>,
    box_extractor: Box<dyn BoxExtractor>,
    region_merger: Box<dyn RegionMerger>,
    region_cropper: Box<dyn RegionCropper>,
}

impl Pipeline {
    /// Create a new pipeline builder.
    pub fn builder() -> builder::PipelineBuilder {
        builder::PipelineBuilder::new()
    }

    pub fn new(
        mask_builder: Box<dyn MaskBuilder>,
        component_filter: Box<dyn ComponentFilter>,
        box_extractor: Box<dyn BoxExtractor>,
        region_merger: Box<dyn RegionMerger>,
        region_cropper: Box<dyn RegionCropper>,
    ) -> Self {
        Self {
            mask_builder,
            component_filter,
            box_extractor,
            region_merger,
            region_cropper,
        }
    }

    /// Run the full pipeline over a color image.
    pub fn process(&self, image: &RgbImage) -> Result<SignatureCrops> {
        ensure_nonempty(image.width(), image.height())?;
        let mask = self.mask_builder.build_mask(image)?;
        let cleaned = self.component_filter.filter(mask)?;
        self.run_from_mask(cleaned)
    }

    /// Run the mask-onward sub-pipeline (boxes, merge, crop) over an
    /// already-built binary mask.
    pub fn crop_regions(&self, mask: GrayImage) -> Result<SignatureCrops> {
        ensure_nonempty(mask.width(), mask.height())?;
        self.run_from_mask(mask)
    }

    fn run_from_mask(&self, mask: GrayImage) -> Result<SignatureCrops> {
        let (image_width, image_height) = mask.dimensions();
        let boxes = self.box_extractor.extract_boxes(&mask)?;
        debug!(box_count = boxes.len(), "extracted candidate boxes");
        let regions = self.region_merger.merge(&boxes)?;
        debug!(region_count = regions.len(), "merged boxes into regions");
        let crops = self.region_cropper.crop(&mask, &regions)?;
        Ok(SignatureCrops {
            crops,
            image_width,
            image_height,
        })
    }
}
