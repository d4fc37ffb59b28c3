use crate::workflow::extractor::SweepSummary;
use ringsweep::ImuState;
use serde::{Deserialize, Serialize};

/// Latest published sweep as served over HTTP.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct SweepModel {
    pub sweep_time: f64,
    pub summary: SweepSummary,
    pub imu_start: Option<ImuState>,
    pub published: usize,
}
