pub mod imu;
pub mod point;

pub use imu::ImuState;
pub use point::{IndexRange, Point, RawPoint};
