use std::collections::BTreeMap;

use image::GrayImage;
use serde::{Deserialize, Serialize};

/// Axis-aligned box with a top-left corner, in pixel coordinates.
///
/// Coordinates are signed so that degenerate boxes produced by border
/// trimming or merging can flow through to the cropper, whose clamping
/// decides what they mean.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegionBox {
    pub x: i64,
    pub y: i64,
    pub w: i64,
    pub h: i64,
}

impl RegionBox {
    pub fn new(x: i64, y: i64, w: i64, h: i64) -> Self {
        Self { x, y, w, h }
    }

    pub fn area(&self) -> i64 {
        self.w * self.h
    }

    /// Whether the two boxes overlap. Only strict separation rejects, so
    /// boxes that merely touch along an edge or corner count as intersecting.
    pub fn intersects(&self, other: &RegionBox) -> bool {
        if self.y > other.y + other.h {
            return false;
        }
        if self.y + self.h < other.y {
            return false;
        }
        if self.x > other.x + other.w {
            return false;
        }
        if self.x + self.w < other.x {
            return false;
        }
        true
    }

    /// Smallest box covering both extents.
    pub fn union(&self, other: &RegionBox) -> RegionBox {
        let min_x = self.x.min(other.x);
        let min_y = self.y.min(other.y);
        let max_w = self
            .w
            .max(other.w)
            .max(other.x + other.w - self.x)
            .max(self.x + self.w - other.x);
        let max_h = self
            .h
            .max(other.h)
            .max(other.y + other.h - self.y)
            .max(self.y + self.h - other.y);
        RegionBox::new(min_x, min_y, max_w, max_h)
    }

    /// Shrinks the box by `floor(min(w, h) * border_ratio)` pixels.
    ///
    /// The trim moves the top-left corner inward and shortens the sides by
    /// the same amount, so the bottom-right corner stays where it was.
    pub fn trimmed(&self, border_ratio: f64) -> RegionBox {
        let border = (self.w.min(self.h) as f64 * border_ratio).floor() as i64;
        RegionBox::new(self.x + border, self.y + border, self.w - border, self.h - border)
    }
}

/// Ordered region store keyed by sequential integer identifiers.
///
/// Identifiers are assigned in insertion order (0, 1, 2, ...) and never
/// reused; iteration visits regions in identifier order. The merge logic
/// depends on this scan order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegionMap {
    regions: Vec<RegionBox>,
}

impl RegionMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    /// Stores a region under the next unused identifier and returns it.
    pub fn insert(&mut self, region: RegionBox) -> usize {
        self.regions.push(region);
        self.regions.len() - 1
    }

    pub fn get(&self, id: usize) -> Option<&RegionBox> {
        self.regions.get(id)
    }

    /// Replaces the region stored under `id`. Unknown identifiers are a
    /// no-op.
    pub fn replace(&mut self, id: usize, region: RegionBox) {
        if let Some(slot) = self.regions.get_mut(id) {
            *slot = region;
        }
    }

    /// Iterates regions in identifier order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &RegionBox)> {
        self.regions.iter().enumerate()
    }
}

/// One merged region together with the mask pixels cropped out for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegionCrop {
    pub region: RegionBox,
    pub mask: GrayImage,
}

/// Final output of a pipeline run: per-region crops keyed by identifier,
/// plus the dimensions of the source mask.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignatureCrops {
    pub crops: BTreeMap<usize, RegionCrop>,
    pub image_width: u32,
    pub image_height: u32,
}

impl SignatureCrops {
    pub fn region_count(&self) -> usize {
        self.crops.len()
    }

    /// Iterates the region geometry in identifier order.
    pub fn regions(&self) -> impl Iterator<Item = (usize, &RegionBox)> {
        self.crops.iter().map(|(id, crop)| (*id, &crop.region))
    }
}
