//! Sweep registration core for multi-ring spinning LiDAR.
//!
//! The modules turn one raw sweep, delivered ring by ring in firing order,
//! into a ring-sorted cloud with per-ring index ranges. Ring membership is
//! inferred from azimuth wraps, each point is tagged with its ring and
//! relative capture time, and an optional IMU provider de-skews points into
//! the sweep-start frame before they are handed to feature extraction.

pub mod interface;
pub mod math;
pub mod motion;
pub mod prelude;
pub mod processing;
pub mod telemetry;

pub use interface::{ImuState, IndexRange, Point, RawPoint};
pub use motion::{ImuHistory, ImuProvider};
pub use prelude::{
    RegistrationError, RegistrationParams, RegistrationResult, SweepInput, SweepMetadata,
    SweepOutput,
};
pub use processing::{
    FeatureExtractor, Handoff, LidarModel, Publisher, RingModel, SweepRegistration,
};
