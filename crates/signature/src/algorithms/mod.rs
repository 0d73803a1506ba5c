pub mod contours;
pub mod cropping;
pub mod filtering;
pub mod masking;
pub mod merging;

pub use contours::*;
pub use cropping::*;
pub use filtering::*;
pub use masking::*;
pub use merging::*;

use image::RgbImage;

use crate::{
    error::{Result, ensure_nonempty},
    traits::{
        BoxExtractor, ComponentFilter, MaskBuilder, RegionCropper, RegionMerger,
        SignatureDetector,
    },
    types::SignatureCrops,
};

/// Static-dispatch composition of the five pipeline stages.
#[derive(Debug)]
pub struct StandardSignatureDetector<M, F, B, R, C>
where
    M: MaskBuilder,
    F: ComponentFilter,
    B: BoxExtractor,
    R: RegionMerger,
    C: RegionCropper,
{
    pub mask_builder: M,
    pub component_filter: F,
    pub box_extractor: B,
    pub region_merger: R,
    pub region_cropper: C,
}

impl<M, F, B, R, C> StandardSignatureDetector<M, F, B, R, C>
where
    M: MaskBuilder,
    F: ComponentFilter,
    B: BoxExtractor,
    R: RegionMerger,
    C: RegionCropper,
{
    pub fn new(
        mask_builder: M,
        component_filter: F,
        box_extractor: B,
        region_merger: R,
        region_cropper: C,
    ) -> Self {
        Self {
            mask_builder,
            component_filter,
            box_extractor,
            region_merger,
            region_cropper,
        }
    }
}

impl<M, F, B, R, C> Default for StandardSignatureDetector<M, F, B, R, C>
where
    M: MaskBuilder + Default,
    F: ComponentFilter + Default,
    B: BoxExtractor + Default,
    R: RegionMerger + Default,
    C: RegionCropper + Default,
{
    fn default() -> Self {
        Self::new(
            M::default(),
            F::default(),
            B::default(),
            R::default(),
            C::default(),
        )
    }
}

impl<M, F, B, R, C> SignatureDetector for StandardSignatureDetector<M, F, B, R, C>
where
    M: MaskBuilder,
    F: ComponentFilter,
    B: BoxExtractor,
    R: RegionMerger,
    C: RegionCropper,
{
    fn detect(&self, image: &RgbImage) -> Result<SignatureCrops> {
        ensure_nonempty(image.width(), image.height())?;
        let mask = self.mask_builder.build_mask(image)?;
        let cleaned = self.component_filter.filter(mask)?;
        let boxes = self.box_extractor.extract_boxes(&cleaned)?;
        let regions = self.region_merger.merge(&boxes)?;
        let crops = self.region_cropper.crop(&cleaned, &regions)?;
        Ok(SignatureCrops {
            crops,
            image_width: image.width(),
            image_height: image.height(),
        })
    }
}
