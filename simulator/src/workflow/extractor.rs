use ringsweep::math::StatsHelper;
use ringsweep::{FeatureExtractor, IndexRange, Point};
use serde::{Deserialize, Serialize};

/// Per-ring statistics standing in for geometric features.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SweepSummary {
    pub ring_counts: Vec<usize>,
    pub mean_ranges: Vec<f32>,
    pub total_points: usize,
}

pub struct RingSummaryExtractor;

impl FeatureExtractor for RingSummaryExtractor {
    type Features = SweepSummary;

    fn extract(&mut self, cloud: &[Point], scan_indices: &[IndexRange]) -> SweepSummary {
        let mut summary = SweepSummary {
            total_points: cloud.len(),
            ..Default::default()
        };
        for range in scan_indices {
            let ring = &cloud[range.as_range()];
            summary.ring_counts.push(ring.len());
            summary.mean_ranges.push(StatsHelper::mean_range(ring));
        }
        summary
    }
}
