use crate::interface::{IndexRange, Point, RawPoint};
use crate::math::axis::{azimuth, normalize_azimuth, to_working_frame};
use crate::motion::ImuProvider;
use crate::processing::buckets::RingBuckets;
use crate::processing::ring_model::RingModel;
use crate::telemetry::log::LogManager;
use std::f32::consts::PI;

/// Azimuth magnitude a rotation must pass on each side before a sign flip
/// counts as a ring change. Tuned by hand against real sweeps.
pub const PEAK_THRESHOLD: f32 = PI / 4.0;

/// Fraction of the scan period used as every point's capture time.
pub const RELATIVE_TIME_FRACTION: f32 = 0.99;

/// Relative times outside `[0, TIMING_WINDOW_MAX]` seconds are tallied.
pub const TIMING_WINDOW_MAX: f32 = 0.1;

const MIN_SQUARED_RANGE: f32 = 1e-4;

/// Infers the ring being delivered from successive azimuths.
#[derive(Debug, Clone)]
pub struct WrapDetector {
    ring_cursor: i32,
    neg_passed: bool,
    pos_passed: bool,
    previous: Option<f32>,
}

impl WrapDetector {
    pub fn new(ring_count: u16) -> Self {
        Self {
            ring_cursor: i32::from(ring_count) - 1,
            neg_passed: false,
            pos_passed: false,
            previous: None,
        }
    }

    pub fn ring_cursor(&self) -> i32 {
        self.ring_cursor
    }

    /// Feeds the azimuth of the next valid point and returns the ring cursor.
    ///
    /// A ring is complete when the azimuth jumps from positive to negative
    /// after having passed both `-PEAK_THRESHOLD` and `+PEAK_THRESHOLD`. The
    /// first point of a sweep never completes a ring.
    pub fn advance(&mut self, ori: f32) -> i32 {
        if let Some(previous) = self.previous {
            if ori < -PEAK_THRESHOLD {
                self.neg_passed = true;
            }
            if ori > PEAK_THRESHOLD {
                self.pos_passed = true;
            }
            if ori < 0.0 && previous > 0.0 && self.neg_passed && self.pos_passed {
                self.ring_cursor -= 1;
                self.neg_passed = false;
                self.pos_passed = false;
            }
        }
        self.ring_cursor
    }

    /// Records the azimuth of the point just bucketed for the next comparison.
    pub fn remember(&mut self, ori: f32) {
        self.previous = Some(ori);
    }
}

/// Outcome of reconstructing one sweep.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReconstructionReport {
    pub input_points: usize,
    pub retained_points: usize,
    pub ring_overflow: bool,
    pub timing_anomalies: usize,
}

/// Sorts a raw sweep into per-ring buckets.
pub struct SweepReconstructor {
    buckets: RingBuckets,
    ring_count: u16,
    scan_period: f32,
    logger: LogManager,
}

impl SweepReconstructor {
    pub fn new(ring_model: &RingModel, scan_period: f32) -> Self {
        Self {
            buckets: RingBuckets::with_rings(usize::from(ring_model.ring_count())),
            ring_count: ring_model.ring_count(),
            scan_period,
            logger: LogManager::new(),
        }
    }

    /// Capture time offset for a point `_sweep_progress` radians into its
    /// rotation. Every point gets the same near-end-of-sweep offset.
    pub fn relative_time(&self, _sweep_progress: f32) -> f32 {
        self.scan_period * RELATIVE_TIME_FRACTION
    }

    /// Rebuilds the ring buckets from `points`, which must be in firing order.
    ///
    /// Points that are non-finite or too close to the sensor are skipped. If
    /// more rotations arrive than there are rings, the remainder of the sweep
    /// is discarded and the report flags the overflow.
    pub fn reconstruct(
        &mut self,
        points: &[RawPoint],
        mut imu: Option<&mut (dyn ImuProvider + '_)>,
    ) -> ReconstructionReport {
        self.buckets.reset();
        let mut detector = WrapDetector::new(self.ring_count);
        let mut report = ReconstructionReport {
            input_points: points.len(),
            ..Default::default()
        };

        for (index, raw) in points.iter().enumerate() {
            let mut point = to_working_frame(raw);
            if !point.is_finite() || point.squared_norm() < MIN_SQUARED_RANGE {
                continue;
            }

            let ori = azimuth(&point);
            let ring_cursor = detector.advance(ori);
            if ring_cursor < 0 {
                self.logger.warn(&format!(
                    "too many rings in sweep, discarding {} of {} points",
                    points.len() - index,
                    points.len()
                ));
                report.ring_overflow = true;
                break;
            }

            let relative_time = self.relative_time(normalize_azimuth(ori));
            if !(0.0..=TIMING_WINDOW_MAX).contains(&relative_time) {
                report.timing_anomalies += 1;
            }

            point.intensity = ring_cursor as f32 + relative_time;

            if let Some(provider) = imu.as_deref_mut() {
                if provider.has_data() {
                    provider.set_target_time(relative_time);
                    point = provider.transform_to_sweep_start(point);
                }
            }

            detector.remember(azimuth(&point));
            self.buckets.push(ring_cursor as usize, point);
            report.retained_points += 1;
        }

        if report.timing_anomalies > 0 {
            self.logger.record(&format!(
                "relative time outside window for {} of {} points",
                report.timing_anomalies,
                points.len()
            ));
        }

        report
    }

    pub fn buckets(&self) -> &RingBuckets {
        &self.buckets
    }

    pub fn assemble(&self) -> (Vec<Point>, Vec<IndexRange>) {
        self.buckets.assemble()
    }
}
