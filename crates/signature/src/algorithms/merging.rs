use crate::{
    error::Result,
    traits::RegionMerger,
    types::{RegionBox, RegionMap},
};

/// Collapses a sequence of area-sorted boxes into merged, border-trimmed
/// regions in a single pass.
///
/// Each incoming box is tested against the already-stored regions in
/// identifier order and merges into the *first* one it intersects; later
/// regions are not checked. That makes the result order-dependent and not a
/// fixed point: a post-merge region can still intersect a region it was
/// never tested against. This is intentional and relied upon; do not
/// replace it with a union-find style closure.
#[derive(Debug, Clone)]
pub struct FirstMatchMerger {
    /// Fraction of the shorter side trimmed on insert and on merge.
    pub border_ratio: f64,
}

impl Default for FirstMatchMerger {
    fn default() -> Self {
        Self { border_ratio: 0.1 }
    }
}

impl RegionMerger for FirstMatchMerger {
    fn merge(&self, boxes: &[RegionBox]) -> Result<RegionMap> {
        let mut regions = RegionMap::new();
        for &b in boxes {
            if regions.is_empty() {
                // The first region is stored untrimmed; it only picks up a
                // border if a later box merges into it.
                regions.insert(b);
                continue;
            }
            let hit = regions
                .iter()
                .find(|(_, region)| b.intersects(region))
                .map(|(id, region)| (id, *region));
            match hit {
                Some((id, region)) => {
                    regions.replace(id, region.union(&b).trimmed(self.border_ratio));
                }
                None => {
                    regions.insert(b.trimmed(self.border_ratio));
                }
            }
        }
        Ok(regions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn merge(ratio: f64, boxes: &[RegionBox]) -> RegionMap {
        FirstMatchMerger { border_ratio: ratio }
            .merge(boxes)
            .expect("merge should run")
    }

    #[test]
    fn overlapping_boxes_collapse_to_their_union() {
        let regions = merge(
            0.0,
            &[RegionBox::new(0, 0, 100, 100), RegionBox::new(50, 50, 100, 100)],
        );
        assert_eq!(regions.len(), 1);
        assert_eq!(regions.get(0), Some(&RegionBox::new(0, 0, 150, 150)));
    }

    #[test]
    fn disjoint_boxes_stay_separate() {
        let a = RegionBox::new(0, 0, 50, 50);
        let b = RegionBox::new(200, 200, 50, 50);
        let regions = merge(0.0, &[a, b]);
        assert_eq!(regions.len(), 2);
        assert_eq!(regions.get(0), Some(&a));
        assert_eq!(regions.get(1), Some(&b));
    }

    #[test]
    fn remerging_disjoint_regions_is_identity() {
        let boxes = [
            RegionBox::new(0, 0, 120, 90),
            RegionBox::new(300, 10, 80, 80),
            RegionBox::new(10, 300, 60, 70),
        ];
        let first = merge(0.0, &boxes);
        let again: Vec<RegionBox> = first.iter().map(|(_, r)| *r).collect();
        assert_eq!(merge(0.0, &again), first);
    }

    #[test]
    fn first_box_is_stored_untrimmed() {
        let a = RegionBox::new(0, 0, 100, 50);
        let b = RegionBox::new(400, 0, 100, 50);
        let regions = merge(0.1, &[a, b]);
        // Region 0 keeps its raw extent, region 1 loses a 5 px border
        // (floor(50 * 0.1)).
        assert_eq!(regions.get(0), Some(&a));
        assert_eq!(regions.get(1), Some(&RegionBox::new(405, 5, 95, 45)));
    }

    #[test]
    fn merge_applies_trim_to_the_union() {
        let regions = merge(
            0.1,
            &[RegionBox::new(0, 0, 100, 100), RegionBox::new(50, 50, 100, 100)],
        );
        // union = (0, 0, 150, 150), border = floor(150 * 0.1) = 15.
        assert_eq!(regions.len(), 1);
        assert_eq!(regions.get(0), Some(&RegionBox::new(15, 15, 135, 135)));
    }

    #[test]
    fn merge_is_first_match_not_a_fixed_point() {
        // The third box intersects both stored regions but merges into the
        // lower identifier only, leaving two regions that now intersect
        // each other.
        let regions = merge(
            0.0,
            &[
                RegionBox::new(0, 0, 100, 100),
                RegionBox::new(200, 0, 100, 100),
                RegionBox::new(50, 0, 200, 50),
            ],
        );
        assert_eq!(regions.len(), 2);
        assert_eq!(regions.get(0), Some(&RegionBox::new(0, 0, 250, 100)));
        assert_eq!(regions.get(1), Some(&RegionBox::new(200, 0, 100, 100)));
        let r0 = *regions.get(0).unwrap();
        let r1 = *regions.get(1).unwrap();
        assert!(r0.intersects(&r1), "non-idempotence is part of the contract");
    }

    #[test]
    fn empty_input_yields_empty_map() {
        assert!(merge(0.1, &[]).is_empty());
    }
}
