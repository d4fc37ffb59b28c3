use ringsweep::{ImuHistory, ImuState};
use serde::{Deserialize, Serialize};

/// Platform motion used to synthesize IMU states.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MotionConfig {
    pub enabled: bool,
    /// Forward speed along the working z axis, m/s.
    pub speed: f32,
    /// Turn rate about the vertical axis, rad/s.
    pub yaw_rate: f32,
    pub rate_hz: f32,
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            speed: 1.0,
            yaw_rate: 0.0,
            rate_hz: 100.0,
        }
    }
}

/// Emits constant-velocity, constant-yaw-rate IMU states on demand.
pub struct SyntheticImu {
    config: MotionConfig,
    origin: f64,
    emitted: u64,
}

impl SyntheticImu {
    pub fn new(config: MotionConfig, origin: f64) -> Self {
        Self {
            config,
            origin,
            emitted: 0,
        }
    }

    fn period(&self) -> f64 {
        1.0 / f64::from(self.config.rate_hz.max(1.0))
    }

    pub fn state_at(&self, stamp: f64) -> ImuState {
        let elapsed = (stamp - self.origin) as f32;
        let yaw = self.config.yaw_rate * elapsed;
        let (sin_yaw, cos_yaw) = yaw.sin_cos();
        // straight-line motion when not turning, otherwise an arc
        let (x, z) = if self.config.yaw_rate.abs() < 1e-6 {
            (0.0, self.config.speed * elapsed)
        } else {
            let radius = self.config.speed / self.config.yaw_rate;
            (radius * (1.0 - cos_yaw), radius * sin_yaw)
        };
        ImuState::new(
            stamp,
            0.0,
            0.0,
            yaw,
            [x, 0.0, z],
            [self.config.speed * sin_yaw, 0.0, self.config.speed * cos_yaw],
        )
    }

    /// Pushes every state up to and including `until` into `history`.
    pub fn fill(&mut self, history: &mut ImuHistory, until: f64) {
        loop {
            let stamp = self.origin + self.emitted as f64 * self.period();
            if stamp > until {
                break;
            }
            history.push(self.state_at(stamp));
            self.emitted += 1;
        }
    }
}
