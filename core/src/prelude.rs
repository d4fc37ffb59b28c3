use crate::interface::{ImuState, IndexRange, Point, RawPoint};
use serde::{Deserialize, Serialize};

/// Seconds per sweep assumed when no scan period is configured.
pub const DEFAULT_SCAN_PERIOD: f32 = 0.1;

/// Number of sweeps discarded at the start of a session.
pub const DEFAULT_WARMUP_SWEEPS: usize = 20;

/// Shared configuration for one registration session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistrationParams {
    pub scan_period: f32,
    pub warmup_sweeps: usize,
}

impl Default for RegistrationParams {
    fn default() -> Self {
        Self {
            scan_period: DEFAULT_SCAN_PERIOD,
            warmup_sweeps: DEFAULT_WARMUP_SWEEPS,
        }
    }
}

impl RegistrationParams {
    pub fn validate(&self) -> RegistrationResult<()> {
        if !self.scan_period.is_finite() || self.scan_period <= 0.0 {
            return Err(RegistrationError::InvalidParameter(format!(
                "scan period must be positive, got {}",
                self.scan_period
            )));
        }
        Ok(())
    }
}

/// One raw sweep in firing order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SweepInput {
    pub points: Vec<RawPoint>,
    pub timestamp: f64,
}

impl SweepInput {
    pub fn new(points: Vec<RawPoint>, timestamp: f64) -> Self {
        Self { points, timestamp }
    }
}

/// Ring-sorted cloud ready for feature extraction.
#[derive(Debug, Clone)]
pub struct SweepOutput {
    pub cloud: Vec<Point>,
    pub scan_indices: Vec<IndexRange>,
    pub sweep_time: f64,
    pub imu_start: Option<ImuState>,
    pub metadata: SweepMetadata,
}

/// Per-sweep diagnostics gathered during reconstruction.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SweepMetadata {
    pub input_points: usize,
    pub retained_points: usize,
    pub ring_overflow: bool,
    pub timing_anomalies: usize,
    pub notes: Vec<String>,
}

/// Common error type for registration setup and handoff.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum RegistrationError {
    #[error("invalid vertical range: {lower} >= {upper}")]
    InvalidVerticalRange { lower: f32, upper: f32 },
    #[error("invalid number of scan rings: {0} (need at least 2)")]
    TooFewRings(u16),
    #[error("unsupported lidar model: {0}")]
    UnknownLidar(String),
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
    #[error("publish failed: {0}")]
    Publish(String),
}

pub type RegistrationResult<T> = Result<T, RegistrationError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_params_use_a_tenth_of_a_second() {
        let params = RegistrationParams::default();
        assert_eq!(params.scan_period, 0.1);
        assert!(params.validate().is_ok());
    }

    #[test]
    fn non_positive_scan_period_is_rejected() {
        let params = RegistrationParams {
            scan_period: 0.0,
            ..Default::default()
        };
        assert!(matches!(
            params.validate(),
            Err(RegistrationError::InvalidParameter(_))
        ));
    }
}
