use crate::prelude::{RegistrationError, RegistrationResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Linear mapping from vertical beam angle to ring index.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RingBounds", into = "RingBounds")]
pub struct RingModel {
    lower_bound: f32,
    upper_bound: f32,
    ring_count: u16,
    factor: f32,
}

/// Serialized form of [`RingModel`], validated on the way in.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct RingBounds {
    pub lower_bound: f32,
    pub upper_bound: f32,
    pub ring_count: u16,
}

impl RingModel {
    /// Builds a model for beams spread evenly between `lower_bound` and
    /// `upper_bound` degrees.
    pub fn new(lower_bound: f32, upper_bound: f32, ring_count: u16) -> RegistrationResult<Self> {
        // written so that NaN bounds fail too
        if !(lower_bound < upper_bound) {
            return Err(RegistrationError::InvalidVerticalRange {
                lower: lower_bound,
                upper: upper_bound,
            });
        }
        if ring_count < 2 {
            return Err(RegistrationError::TooFewRings(ring_count));
        }
        Ok(Self {
            lower_bound,
            upper_bound,
            ring_count,
            factor: f32::from(ring_count - 1) / (upper_bound - lower_bound),
        })
    }

    /// Velodyne VLP-16: 16 rings from -15 to 15 degrees.
    pub fn velodyne_vlp_16() -> Self {
        Self::preset(-15.0, 15.0, 16)
    }

    /// Velodyne HDL-32: 32 rings from -30.67 to 10.67 degrees.
    pub fn velodyne_hdl_32() -> Self {
        Self::preset(-30.67, 10.67, 32)
    }

    /// Velodyne HDL-64E: 64 rings from -24.9 to 2 degrees.
    pub fn velodyne_hdl_64e() -> Self {
        Self::preset(-24.9, 2.0, 64)
    }

    fn preset(lower_bound: f32, upper_bound: f32, ring_count: u16) -> Self {
        Self {
            lower_bound,
            upper_bound,
            ring_count,
            factor: f32::from(ring_count - 1) / (upper_bound - lower_bound),
        }
    }

    /// Replaces the geometry. On error the current geometry is kept.
    pub fn set(&mut self, lower_bound: f32, upper_bound: f32, ring_count: u16) -> RegistrationResult<()> {
        *self = Self::new(lower_bound, upper_bound, ring_count)?;
        Ok(())
    }

    /// Ring index for a vertical angle in radians, rounded to the nearest
    /// ring with halves going down. The result is not clamped; non-finite
    /// angles map to `i32::MIN` so they always fall outside the model.
    pub fn angle_to_ring(&self, angle: f32) -> i32 {
        if !angle.is_finite() {
            return i32::MIN;
        }
        let position = (angle.to_degrees() - self.lower_bound) * self.factor;
        (position - 0.5).ceil() as i32
    }

    pub fn lower_bound(&self) -> f32 {
        self.lower_bound
    }

    pub fn upper_bound(&self) -> f32 {
        self.upper_bound
    }

    pub fn ring_count(&self) -> u16 {
        self.ring_count
    }

    pub fn factor(&self) -> f32 {
        self.factor
    }
}

impl Default for RingModel {
    fn default() -> Self {
        Self::velodyne_vlp_16()
    }
}

impl TryFrom<RingBounds> for RingModel {
    type Error = RegistrationError;

    fn try_from(bounds: RingBounds) -> RegistrationResult<Self> {
        Self::new(bounds.lower_bound, bounds.upper_bound, bounds.ring_count)
    }
}

impl From<RingModel> for RingBounds {
    fn from(model: RingModel) -> Self {
        Self {
            lower_bound: model.lower_bound,
            upper_bound: model.upper_bound,
            ring_count: model.ring_count,
        }
    }
}

/// Named sensor geometries with a known ring layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LidarModel {
    #[serde(rename = "VLP-16")]
    Vlp16,
    #[serde(rename = "HDL-32")]
    Hdl32,
    #[serde(rename = "HDL-64E")]
    Hdl64e,
}

impl LidarModel {
    pub fn ring_model(&self) -> RingModel {
        match self {
            LidarModel::Vlp16 => RingModel::velodyne_vlp_16(),
            LidarModel::Hdl32 => RingModel::velodyne_hdl_32(),
            LidarModel::Hdl64e => RingModel::velodyne_hdl_64e(),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            LidarModel::Vlp16 => "VLP-16",
            LidarModel::Hdl32 => "HDL-32",
            LidarModel::Hdl64e => "HDL-64E",
        }
    }
}

impl FromStr for LidarModel {
    type Err = RegistrationError;

    fn from_str(name: &str) -> RegistrationResult<Self> {
        match name {
            "VLP-16" => Ok(LidarModel::Vlp16),
            "HDL-32" => Ok(LidarModel::Hdl32),
            "HDL-64E" => Ok(LidarModel::Hdl64e),
            other => Err(RegistrationError::UnknownLidar(other.to_string())),
        }
    }
}

impl fmt::Display for LidarModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
