//! Lane geometry and occupancy bookkeeping

use serde::{Deserialize, Serialize};

use super::obstacle::LaneId;

/// Left edge of an obstacle placed in `lane`
///
/// Adjacent lanes are always `lane_width` apart.
#[inline]
pub fn lane_origin_x(
    road_origin_x: f32,
    lane: LaneId,
    lane_width: f32,
    lane_margin: f32,
) -> f32 {
    road_origin_x + lane.index() as f32 * lane_width + lane_margin
}

/// Per-lane count of assigned obstacles
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LaneOccupancy {
    counts: Vec<usize>,
    max_per_lane: usize,
}

impl LaneOccupancy {
    pub fn new(lane_count: usize, max_per_lane: usize) -> Self {
        Self {
            counts: vec![0; lane_count],
            max_per_lane,
        }
    }

    pub fn lane_count(&self) -> usize {
        self.counts.len()
    }

    pub fn max_per_lane(&self) -> usize {
        self.max_per_lane
    }

    pub fn count(&self, lane: LaneId) -> usize {
        self.counts[lane.index()]
    }

    pub fn counts(&self) -> &[usize] {
        &self.counts
    }

    pub fn is_full(&self, lane: LaneId) -> bool {
        self.count(lane) >= self.max_per_lane
    }

    /// True if some lane other than `lane` is completely empty
    pub fn has_free_lane_besides(&self, lane: LaneId) -> bool {
        self.counts
            .iter()
            .enumerate()
            .any(|(i, &count)| count == 0 && i != lane.index())
    }

    pub fn empty_lanes(&self) -> usize {
        self.counts.iter().filter(|&&c| c == 0).count()
    }

    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }

    pub(crate) fn occupy(&mut self, lane: LaneId) {
        let count = &mut self.counts[lane.index()];
        debug_assert!(*count < self.max_per_lane, "lane {} over capacity", lane.index());
        *count += 1;
    }

    pub(crate) fn release(&mut self, lane: LaneId) {
        let count = &mut self.counts[lane.index()];
        debug_assert!(*count > 0, "lane {} released while empty", lane.index());
        *count = count.saturating_sub(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lane_origin_spacing() {
        let x0 = lane_origin_x(310.0, LaneId(0), 200.0, 65.0);
        let x1 = lane_origin_x(310.0, LaneId(1), 200.0, 65.0);
        let x4 = lane_origin_x(310.0, LaneId(4), 200.0, 65.0);
        assert_eq!(x0, 375.0);
        assert_eq!(x1 - x0, 200.0);
        assert_eq!(x4, 310.0 + 800.0 + 65.0);
    }

    #[test]
    fn test_occupy_and_release() {
        let mut occ = LaneOccupancy::new(5, 3);
        occ.occupy(LaneId(2));
        occ.occupy(LaneId(2));
        assert_eq!(occ.count(LaneId(2)), 2);
        assert_eq!(occ.total(), 2);

        occ.release(LaneId(2));
        assert_eq!(occ.count(LaneId(2)), 1);
        assert_eq!(occ.empty_lanes(), 4);
    }

    #[test]
    fn test_full_lane() {
        let mut occ = LaneOccupancy::new(2, 2);
        assert!(!occ.is_full(LaneId(0)));
        occ.occupy(LaneId(0));
        occ.occupy(LaneId(0));
        assert!(occ.is_full(LaneId(0)));
        assert!(!occ.is_full(LaneId(1)));
    }

    #[test]
    fn test_free_lane_besides() {
        let mut occ = LaneOccupancy::new(3, 3);
        // Everything empty: any candidate has another free lane
        assert!(occ.has_free_lane_besides(LaneId(0)));

        occ.occupy(LaneId(0));
        occ.occupy(LaneId(1));
        // Only lane 2 is empty
        assert!(occ.has_free_lane_besides(LaneId(0)));
        assert!(occ.has_free_lane_besides(LaneId(1)));
        assert!(!occ.has_free_lane_besides(LaneId(2)));
    }
}
