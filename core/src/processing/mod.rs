pub mod buckets;
pub mod handoff;
pub mod reconstructor;
pub mod registration;
pub mod ring_model;

pub use buckets::RingBuckets;
pub use handoff::{FeatureExtractor, Handoff, Publisher};
pub use reconstructor::{ReconstructionReport, SweepReconstructor, WrapDetector};
pub use registration::SweepRegistration;
pub use ring_model::{LidarModel, RingModel};
