use crate::generator::template::{azimuth_sweep, ring_elevations};
use anyhow::{ensure, Context};
use rand::{rngs::StdRng, Rng, SeedableRng};
use ringsweep::math::axis::to_sensor_frame;
use ringsweep::{Point, RawPoint, RingModel, SweepInput};
use serde::{Deserialize, Serialize};

/// Configuration for generating synthetic sweeps.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    pub rings: usize,
    pub points_per_ring: usize,
    /// Rotations delivered; defaults to one per ring.
    pub rotations: Option<usize>,
    pub min_vertical_angle: f32,
    pub max_vertical_angle: f32,
    pub range: f32,
    pub noise: f32,
    pub invalid_ratio: f32,
    pub seed: u64,
    pub timestamp: f64,
    pub description: Option<String>,
    pub scenario: Option<String>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            rings: 16,
            points_per_ring: 360,
            rotations: None,
            min_vertical_angle: -15.0,
            max_vertical_angle: 15.0,
            range: 12.0,
            noise: 0.05,
            invalid_ratio: 0.01,
            seed: 0,
            timestamp: 0.0,
            description: None,
            scenario: None,
        }
    }
}

impl GeneratorConfig {
    /// Generator matching the beam layout of `model`.
    pub fn for_ring_model(model: &RingModel) -> Self {
        Self {
            rings: usize::from(model.ring_count()),
            min_vertical_angle: model.lower_bound(),
            max_vertical_angle: model.upper_bound(),
            ..Default::default()
        }
    }

    fn rotations(&self) -> usize {
        self.rotations.unwrap_or(self.rings)
    }
}

fn build_point_vector(config: &GeneratorConfig) -> anyhow::Result<Vec<RawPoint>> {
    ensure!(config.rings > 0, "generator needs at least one ring");
    ensure!(config.points_per_ring > 0, "generator needs points on each ring");
    let point_count = config
        .rotations()
        .checked_mul(config.points_per_ring)
        .context("overflow computing point count for generator")?;

    let mut rng = StdRng::seed_from_u64(config.seed);
    let azimuths = azimuth_sweep(config.points_per_ring);
    let elevations = ring_elevations(
        config.min_vertical_angle,
        config.max_vertical_angle,
        config.rings,
    );
    let mut points = Vec::with_capacity(point_count);

    // highest ring fires first
    for rotation in 0..config.rotations() {
        let elevation = elevations[(config.rings - 1).saturating_sub(rotation)];
        for &phi in &azimuths {
            if config.invalid_ratio > 0.0 && rng.gen::<f32>() < config.invalid_ratio {
                let dud = if rng.gen::<bool>() {
                    RawPoint::default()
                } else {
                    RawPoint::new(f32::NAN, 1.0, 1.0)
                };
                points.push(dud);
                continue;
            }

            let jitter = if config.noise > 0.0 {
                rng.gen_range(-config.noise..config.noise)
            } else {
                0.0
            };
            let range = config.range + jitter;
            let flat = range * elevation.cos();
            let working = Point::new(flat * phi.sin(), range * elevation.sin(), flat * phi.cos());
            points.push(to_sensor_frame(&working));
        }
    }

    Ok(points)
}

pub fn build_sweep_from_config(config: &GeneratorConfig) -> anyhow::Result<SweepInput> {
    let points = build_point_vector(config)?;
    Ok(SweepInput::new(points, config.timestamp))
}

#[cfg(test)]
pub fn build_sweep(rings: usize, points_per_ring: usize) -> anyhow::Result<SweepInput> {
    let config = GeneratorConfig {
        rings,
        points_per_ring,
        ..Default::default()
    };
    build_sweep_from_config(&config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ringsweep::{RegistrationParams, SweepRegistration};

    fn clean(rings: usize, points_per_ring: usize) -> GeneratorConfig {
        GeneratorConfig {
            rings,
            points_per_ring,
            noise: 0.0,
            invalid_ratio: 0.0,
            ..Default::default()
        }
    }

    #[test]
    fn generator_builds_expected_point_count() {
        let sweep = build_sweep(4, 90).unwrap();
        assert_eq!(sweep.points.len(), 4 * 90);
        assert_eq!(sweep.timestamp, 0.0);
    }

    #[test]
    fn generator_rejects_empty_rings() {
        assert!(build_sweep(0, 90).is_err());
        assert!(build_sweep(4, 0).is_err());
    }

    #[test]
    fn generated_sweep_reconstructs_one_rotation_per_ring() {
        let model = RingModel::new(-10.0, 10.0, 4).unwrap();
        let config = GeneratorConfig {
            min_vertical_angle: -10.0,
            max_vertical_angle: 10.0,
            ..clean(4, 120)
        };
        let sweep = build_sweep_from_config(&config).unwrap();
        let params = RegistrationParams {
            warmup_sweeps: 0,
            ..Default::default()
        };
        let mut registration = SweepRegistration::new(model, params).unwrap();
        let output = registration.process(&sweep, None).unwrap();

        assert_eq!(output.cloud.len(), 480);
        for (ring, range) in output.scan_indices.iter().enumerate() {
            assert_eq!(range.len(), 120);
            // the elevation-based mapping agrees with wrap detection
            for point in &output.cloud[range.as_range()] {
                let angle = (point.y / (point.x * point.x + point.z * point.z).sqrt()).atan();
                assert_eq!(model.angle_to_ring(angle), ring as i32);
            }
        }
    }

    #[test]
    fn invalid_points_are_injected_and_dropped() {
        let config = GeneratorConfig {
            invalid_ratio: 0.2,
            seed: 7,
            ..clean(3, 100)
        };
        let sweep = build_sweep_from_config(&config).unwrap();
        let duds = sweep
            .points
            .iter()
            .filter(|p| !p.x.is_finite() || (p.x == 0.0 && p.y == 0.0 && p.z == 0.0))
            .count();
        assert!(duds > 0);

        let model = RingModel::new(-15.0, 15.0, 3).unwrap();
        let params = RegistrationParams {
            warmup_sweeps: 0,
            ..Default::default()
        };
        let mut registration = SweepRegistration::new(model, params).unwrap();
        let output = registration.process(&sweep, None).unwrap();
        assert_eq!(output.metadata.retained_points, 300 - duds);
    }

    #[test]
    fn extra_rotations_reuse_the_lowest_ring() {
        let config = GeneratorConfig {
            rotations: Some(5),
            ..clean(3, 10)
        };
        let sweep = build_sweep_from_config(&config).unwrap();
        assert_eq!(sweep.points.len(), 50);
    }

    #[test]
    fn seeds_make_sweeps_repeatable() {
        let config = GeneratorConfig {
            seed: 42,
            ..Default::default()
        };
        let a = build_sweep_from_config(&config).unwrap();
        let b = build_sweep_from_config(&config).unwrap();
        assert_eq!(a.points.len(), b.points.len());
        assert!(a
            .points
            .iter()
            .zip(&b.points)
            .all(|(p, q)| p == q || (p.x.is_nan() && q.x.is_nan())));
    }
}
