use serde::{Deserialize, Serialize};

/// Integrated IMU state sample in the working frame.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ImuState {
    pub stamp: f64,
    pub roll: f32,
    pub pitch: f32,
    pub yaw: f32,
    pub position: [f32; 3],
    pub velocity: [f32; 3],
}

impl ImuState {
    pub fn new(
        stamp: f64,
        roll: f32,
        pitch: f32,
        yaw: f32,
        position: [f32; 3],
        velocity: [f32; 3],
    ) -> Self {
        Self {
            stamp,
            roll,
            pitch,
            yaw,
            position,
            velocity,
        }
    }
}
