use crate::generator::motion::MotionConfig;
use anyhow::Context;
use ringsweep::{LidarModel, RegistrationParams, RingModel};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkflowConfig {
    pub lidar: Option<String>,
    pub min_vertical_angle: Option<f32>,
    pub max_vertical_angle: Option<f32>,
    pub n_scan_rings: Option<u16>,
    pub scan_period: Option<f32>,
    pub warmup_sweeps: Option<usize>,
    pub motion: MotionConfig,
}

impl WorkflowConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path_ref = path.as_ref();
        let contents = fs::read_to_string(path_ref)
            .with_context(|| format!("reading workflow config {}", path_ref.display()))?;
        let config: WorkflowConfig = serde_yaml::from_str(&contents)
            .with_context(|| format!("parsing workflow config {}", path_ref.display()))?;
        Ok(config)
    }

    pub fn from_args(lidar: Option<String>, scan_period: f32, warmup_sweeps: usize) -> Self {
        Self {
            lidar,
            scan_period: Some(scan_period),
            warmup_sweeps: Some(warmup_sweeps),
            ..Default::default()
        }
    }

    /// Named preset first, then an explicit vertical range, else VLP-16.
    pub fn ring_model(&self) -> anyhow::Result<RingModel> {
        if let Some(name) = self.lidar.as_deref() {
            let model: LidarModel = name
                .parse()
                .with_context(|| format!("selecting lidar \"{}\"", name))?;
            log::info!("Set {} scan mapper.", model);
            return Ok(model.ring_model());
        }

        match (self.min_vertical_angle, self.max_vertical_angle, self.n_scan_rings) {
            (Some(lower), Some(upper), Some(rings)) => {
                let model = RingModel::new(lower, upper, rings)
                    .context("configuring linear scan mapper")?;
                log::info!(
                    "Set linear scan mapper from {} to {} degrees with {} scan rings.",
                    lower,
                    upper,
                    rings
                );
                Ok(model)
            }
            _ => Ok(RingModel::default()),
        }
    }

    pub fn to_params(&self) -> anyhow::Result<RegistrationParams> {
        let defaults = RegistrationParams::default();
        let params = RegistrationParams {
            scan_period: self.scan_period.unwrap_or(defaults.scan_period),
            warmup_sweeps: self.warmup_sweeps.unwrap_or(defaults.warmup_sweeps),
        };
        params.validate().context("validating registration params")?;
        Ok(params)
    }
}
