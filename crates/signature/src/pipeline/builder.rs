use crate::{
    algorithms::{
        AdaptiveComponentFilter, BoundingBoxExtractor, FirstMatchMerger, HsvRangeMaskBuilder,
        MaskCropper,
    },
    pipeline::{Pipeline, SignatureConfig},
    traits::{BoxExtractor, ComponentFilter, MaskBuilder, RegionCropper, RegionMerger},
};

/// Builder for assembling pipelines with a fluent API.
///
/// Stages not set explicitly are filled in from the defaults, with
/// `SignatureConfig` feeding the box extractor's minimum area and the
/// merger's border ratio. An explicitly set stage wins over the config.
pub struct PipelineBuilder {
    mask_builder: Option<Box<dyn MaskBuilder>>,
    component_filter: Option<Box<dyn ComponentFilter>>,
    box_extractor: Option<Box<dyn BoxExtractor>>,
    region_merger: Option<Box<dyn RegionMerger>>,
    region_cropper: Option<Box<dyn RegionCropper>>,
    config: SignatureConfig,
}

impl PipelineBuilder {
    pub fn new() -> Self {
        Self {
            mask_builder: None,
            component_filter: None,
            box_extractor: None,
            region_merger: None,
            region_cropper: None,
            config: SignatureConfig::default(),
        }
    }

    pub fn with_config(mut self, config: SignatureConfig) -> Self {
        self.config = config;
        self
    }

    pub fn min_region_size(mut self, min_region_size: i64) -> Self {
        self.config.min_region_size = min_region_size;
        self
    }

    pub fn border_ratio(mut self, border_ratio: f64) -> Self {
        self.config.border_ratio = border_ratio;
        self
    }

    pub fn set_mask_builder<M>(mut self, mask_builder: M) -> Self
    where
        M: MaskBuilder + 'static,
    {
        self.mask_builder = Some(Box::new(mask_builder));
        self
    }

    pub fn set_component_filter<F>(mut self, component_filter: F) -> Self
    where
        F: ComponentFilter + 'static,
    {
        self.component_filter = Some(Box::new(component_filter));
        self
    }

    pub fn set_box_extractor<B>(mut self, box_extractor: B) -> Self
    where
        B: BoxExtractor + 'static,
    {
        self.box_extractor = Some(Box::new(box_extractor));
        self
    }

    pub fn set_region_merger<R>(mut self, region_merger: R) -> Self
    where
        R: RegionMerger + 'static,
    {
        self.region_merger = Some(Box::new(region_merger));
        self
    }

    pub fn set_region_cropper<C>(mut self, region_cropper: C) -> Self
    where
        C: RegionCropper + 'static,
    {
        self.region_cropper = Some(Box::new(region_cropper));
        self
    }

    /// Build the pipeline, filling unset stages with defaults.
    pub fn build(self) -> Pipeline {
        let mask_builder = self
            .mask_builder
            .unwrap_or_else(|| Box::new(HsvRangeMaskBuilder::default()));
        let component_filter = self
            .component_filter
            .unwrap_or_else(|| Box::new(AdaptiveComponentFilter));
        let box_extractor = self.box_extractor.unwrap_or_else(|| {
            Box::new(BoundingBoxExtractor {
                min_region_size: self.config.min_region_size,
            })
        });
        let region_merger = self.region_merger.unwrap_or_else(|| {
            Box::new(FirstMatchMerger {
                border_ratio: self.config.border_ratio,
            })
        });
        let region_cropper = self.region_cropper.unwrap_or_else(|| Box::new(MaskCropper));

        Pipeline::new(
            mask_builder,
            component_filter,
            box_extractor,
            region_merger,
            region_cropper,
        )
    }

    /// Build a pipeline with all defaults.
    pub fn build_default() -> Pipeline {
        Self::new().build()
    }

    /// Build a pipeline from a configuration value.
    pub fn build_with_config(config: SignatureConfig) -> Pipeline {
        Self::new().with_config(config).build()
    }
}

impl Default for PipelineBuilder {
    fn default() -> Self {
        Self::new()
    }
}
