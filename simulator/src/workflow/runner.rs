use crate::generator::motion::SyntheticImu;
use crate::generator::profile::{build_sweep_from_config, GeneratorConfig};
use crate::workflow::config::WorkflowConfig;
use crate::workflow::extractor::{RingSummaryExtractor, SweepSummary};
use anyhow::Context;
use ringsweep::telemetry::Metrics;
use ringsweep::{Handoff, ImuHistory, ImuProvider, Publisher, SweepMetadata, SweepRegistration};

pub struct WorkflowResult {
    pub delivered: usize,
    pub last_metadata: Option<SweepMetadata>,
    pub metrics: Metrics,
}

#[derive(Clone)]
pub struct Runner {
    config: WorkflowConfig,
}

impl Runner {
    pub fn new(config: WorkflowConfig) -> Self {
        Self { config }
    }

    /// Sweeps needed so that `delivered` of them survive warm-up.
    pub fn session_length(&self, delivered: usize) -> anyhow::Result<usize> {
        Ok(self.config.to_params()?.warmup_sweeps + delivered)
    }

    /// Runs one session of `sweeps` generated sweeps through a fresh
    /// registration, publishing each delivered sweep to `publisher`.
    pub fn execute<P>(
        &self,
        generator: &GeneratorConfig,
        sweeps: usize,
        publisher: P,
    ) -> anyhow::Result<(WorkflowResult, P)>
    where
        P: Publisher<SweepSummary>,
    {
        let ring_model = self.config.ring_model()?;
        let params = self.config.to_params()?;
        let scan_period = f64::from(params.scan_period);
        let mut registration =
            SweepRegistration::new(ring_model, params).context("creating sweep registration")?;
        let mut handoff = Handoff::new(RingSummaryExtractor, publisher);

        let mut imu = self.config.motion.enabled.then(|| {
            (
                ImuHistory::default(),
                SyntheticImu::new(self.config.motion.clone(), generator.timestamp),
            )
        });

        let mut result = WorkflowResult {
            delivered: 0,
            last_metadata: None,
            metrics: Metrics::default(),
        };

        for index in 0..sweeps {
            let sweep_config = GeneratorConfig {
                seed: generator.seed.wrapping_add(index as u64),
                timestamp: generator.timestamp + index as f64 * scan_period,
                ..generator.clone()
            };
            let sweep = build_sweep_from_config(&sweep_config)
                .with_context(|| format!("generating sweep {}", index))?;

            let provider = match imu.as_mut() {
                Some((history, source)) => {
                    source.fill(history, sweep.timestamp + scan_period);
                    Some(history as &mut dyn ImuProvider)
                }
                None => None,
            };

            let metadata = registration
                .process_and_deliver(&sweep, provider, &mut handoff)
                .with_context(|| format!("delivering sweep {}", index))?;
            if let Some(metadata) = metadata {
                result.delivered += 1;
                result.last_metadata = Some(metadata);
            }
        }

        result.metrics = registration.metrics();
        let (_, publisher) = handoff.into_parts();
        Ok((result, publisher))
    }
}
