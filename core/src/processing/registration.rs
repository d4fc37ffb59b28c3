use crate::motion::ImuProvider;
use crate::prelude::{RegistrationParams, RegistrationResult, SweepInput, SweepMetadata, SweepOutput};
use crate::processing::handoff::{FeatureExtractor, Handoff, Publisher};
use crate::processing::reconstructor::SweepReconstructor;
use crate::processing::ring_model::RingModel;
use crate::telemetry::{LogManager, Metrics, MetricsRecorder};

/// One sensor session: warm-up handling plus per-sweep reconstruction.
///
/// Sweeps must be fed one at a time in arrival order. Separate sessions share
/// nothing and can run on separate threads.
pub struct SweepRegistration {
    ring_model: RingModel,
    params: RegistrationParams,
    reconstructor: SweepReconstructor,
    warmup_remaining: usize,
    metrics: MetricsRecorder,
    logger: LogManager,
}

impl SweepRegistration {
    pub fn new(ring_model: RingModel, params: RegistrationParams) -> RegistrationResult<Self> {
        params.validate()?;
        let logger = LogManager::new();
        logger.record(&format!(
            "linear scan mapper from {} to {} degrees with {} rings, scan period {}s",
            ring_model.lower_bound(),
            ring_model.upper_bound(),
            ring_model.ring_count(),
            params.scan_period
        ));
        Ok(Self {
            reconstructor: SweepReconstructor::new(&ring_model, params.scan_period),
            warmup_remaining: params.warmup_sweeps,
            ring_model,
            params,
            metrics: MetricsRecorder::new(),
            logger,
        })
    }

    /// Swaps the ring geometry; bucket storage is resized to match.
    pub fn reconfigure(&mut self, ring_model: RingModel) {
        self.reconstructor = SweepReconstructor::new(&ring_model, self.params.scan_period);
        self.ring_model = ring_model;
    }

    pub fn ring_model(&self) -> &RingModel {
        &self.ring_model
    }

    pub fn params(&self) -> &RegistrationParams {
        &self.params
    }

    pub fn warmup_remaining(&self) -> usize {
        self.warmup_remaining
    }

    pub fn metrics(&self) -> Metrics {
        self.metrics.snapshot()
    }

    /// Reconstructs one sweep. Returns `None` while the session is warming up.
    pub fn process(
        &mut self,
        input: &SweepInput,
        mut imu: Option<&mut (dyn ImuProvider + '_)>,
    ) -> Option<SweepOutput> {
        if self.warmup_remaining > 0 {
            self.warmup_remaining -= 1;
            self.metrics.record_skipped();
            self.logger.trace(&format!(
                "warm-up: skipping sweep at {:.3}, {} left",
                input.timestamp, self.warmup_remaining
            ));
            return None;
        }

        if let Some(provider) = imu.as_deref_mut() {
            provider.begin_sweep(input.timestamp);
        }

        let report = self
            .reconstructor
            .reconstruct(&input.points, imu.as_deref_mut());
        let imu_start = imu.and_then(|provider| provider.start_state());

        self.metrics
            .record_processed(report.retained_points, report.timing_anomalies);
        let mut notes = Vec::new();
        if report.ring_overflow {
            self.metrics.record_overflow();
            notes.push(format!(
                "ring overflow: kept {} of {} points",
                report.retained_points, report.input_points
            ));
        }

        let (cloud, scan_indices) = self.reconstructor.assemble();
        Some(SweepOutput {
            cloud,
            scan_indices,
            sweep_time: input.timestamp,
            imu_start,
            metadata: SweepMetadata {
                input_points: report.input_points,
                retained_points: report.retained_points,
                ring_overflow: report.ring_overflow,
                timing_anomalies: report.timing_anomalies,
                notes,
            },
        })
    }

    /// Reconstructs one sweep and hands it to `handoff`.
    pub fn process_and_deliver<E, P>(
        &mut self,
        input: &SweepInput,
        imu: Option<&mut (dyn ImuProvider + '_)>,
        handoff: &mut Handoff<E, P>,
    ) -> RegistrationResult<Option<SweepMetadata>>
    where
        E: FeatureExtractor,
        P: Publisher<E::Features>,
    {
        match self.process(input, imu) {
            Some(output) => {
                handoff.deliver(&output)?;
                Ok(Some(output.metadata))
            }
            None => Ok(None),
        }
    }
}
