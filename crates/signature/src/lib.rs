//! # Signature Region Extraction Library
//!
//! Extracts signature-like regions from scanned document images: a binary
//! mask of bright pixels is cleaned of noise and background blobs, bounding
//! boxes of the surviving blobs are merged into disjoint regions, and the
//! mask pixels under each region are cropped out. The result is a set of
//! candidate crops; nothing here decides whether a crop really is a
//! signature.
//!
//! ## Core Features
//!
//! - **Trait-based Architecture**: every stage (mask building, component
//!   filtering, box extraction, merging, cropping) sits behind a trait and
//!   can be swapped out
//! - **Pipeline System**: compose the stages behind a single `process` call,
//!   or run the mask-onward sub-pipeline with `crop_regions`
//! - **Adaptive Filtering**: component size thresholds derived from the
//!   mask's own statistics, no per-document tuning
//! - **Order-preserving Merging**: regions keyed by sequential identifiers,
//!   merge behavior deliberately dependent on insertion order
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use signature::Pipeline;
//!
//! // Create a pipeline with default settings
//! let pipeline = Pipeline::builder().build();
//!
//! // Process an image
//! let image = image::open("scan.png")?.to_rgb8();
//! let result = pipeline.process(&image)?;
//!
//! println!("{} candidate regions", result.region_count());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Custom Pipeline
//!
//! ```rust,no_run
//! use signature::{Pipeline, SignatureConfig, algorithms::*};
//!
//! let pipeline = Pipeline::builder()
//!     .with_config(SignatureConfig {
//!         min_region_size: 5_000,
//!         border_ratio: 0.05,
//!     })
//!     .set_mask_builder(HsvRangeMaskBuilder {
//!         low: [0, 0, 200],
//!         high: [255, 255, 255],
//!     })
//!     .build();
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

// Core modules
pub mod algorithms;
pub mod error;
pub mod pipeline;
pub mod traits;
pub mod types;

// Re-exports for convenience
pub use algorithms::*;
pub use error::{Result, SignatureError};
pub use pipeline::{Pipeline, SignatureConfig, builder::PipelineBuilder};
pub use traits::*;
pub use types::{RegionBox, RegionCrop, RegionMap, SignatureCrops};

/// Static-dispatch detector over the default stage implementations.
pub type DefaultDetector = StandardSignatureDetector<
    HsvRangeMaskBuilder,
    AdaptiveComponentFilter,
    BoundingBoxExtractor,
    FirstMatchMerger,
    MaskCropper,
>;
