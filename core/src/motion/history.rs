use crate::interface::{ImuState, Point};
use crate::math::MatrixHelper;
use crate::motion::provider::ImuProvider;
use ndarray::arr1;
use std::collections::VecDeque;
use std::f32::consts::PI;

/// Number of IMU states kept for interpolation.
pub const IMU_HISTORY_SIZE: usize = 200;

/// Bounded IMU state history with linear interpolation between samples.
pub struct ImuHistory {
    samples: VecDeque<ImuState>,
    capacity: usize,
    sweep_time: f64,
    start: ImuState,
    current: ImuState,
    position_shift: [f32; 3],
}

impl ImuHistory {
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            samples: VecDeque::with_capacity(capacity),
            capacity,
            sweep_time: 0.0,
            start: ImuState::default(),
            current: ImuState::default(),
            position_shift: [0.0; 3],
        }
    }

    /// Appends a state. Samples older than the newest one are ignored.
    pub fn push(&mut self, state: ImuState) {
        if let Some(newest) = self.samples.back() {
            if state.stamp < newest.stamp {
                log::debug!(
                    "dropping out-of-order IMU state {:.6} < {:.6}",
                    state.stamp,
                    newest.stamp
                );
                return;
            }
        }
        if self.samples.len() == self.capacity {
            self.samples.pop_front();
        }
        self.samples.push_back(state);
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// State at absolute `time`, clamped to the oldest/newest sample.
    pub fn interpolate(&self, time: f64) -> Option<ImuState> {
        let after = self.samples.iter().position(|s| s.stamp >= time);
        match after {
            None => self.samples.back().copied(),
            Some(0) => self.samples.front().copied(),
            Some(idx) => {
                let prev = &self.samples[idx - 1];
                let next = &self.samples[idx];
                let span = next.stamp - prev.stamp;
                if span <= 0.0 {
                    return Some(*next);
                }
                let ratio = ((time - prev.stamp) / span) as f32;
                Some(blend(prev, next, ratio, time))
            }
        }
    }

    pub fn position_shift(&self) -> [f32; 3] {
        self.position_shift
    }
}

impl Default for ImuHistory {
    fn default() -> Self {
        Self::with_capacity(IMU_HISTORY_SIZE)
    }
}

impl ImuProvider for ImuHistory {
    fn has_data(&self) -> bool {
        !self.samples.is_empty()
    }

    fn begin_sweep(&mut self, sweep_time: f64) {
        self.sweep_time = sweep_time;
        self.start = self.interpolate(sweep_time).unwrap_or_default();
        self.current = self.start;
        self.position_shift = [0.0; 3];
    }

    fn set_target_time(&mut self, relative_time: f32) {
        let Some(current) = self.interpolate(self.sweep_time + f64::from(relative_time)) else {
            return;
        };
        self.current = current;
        for axis in 0..3 {
            self.position_shift[axis] = current.position[axis]
                - self.start.position[axis]
                - self.start.velocity[axis] * relative_time;
        }
    }

    fn transform_to_sweep_start(&self, mut point: Point) -> Point {
        let current = MatrixHelper::attitude(self.current.roll, self.current.pitch, self.current.yaw);
        let start = MatrixHelper::attitude(self.start.roll, self.start.pitch, self.start.yaw);

        let world = current.dot(&MatrixHelper::to_vector(&point)) + arr1(&self.position_shift);
        let local = start.t().dot(&world);
        MatrixHelper::apply_vector(&mut point, &local);
        point
    }

    fn start_state(&self) -> Option<ImuState> {
        self.has_data().then_some(self.start)
    }
}

fn lerp(a: f32, b: f32, ratio: f32) -> f32 {
    a + (b - a) * ratio
}

fn lerp_angle(a: f32, b: f32, ratio: f32) -> f32 {
    let mut diff = b - a;
    while diff > PI {
        diff -= 2.0 * PI;
    }
    while diff < -PI {
        diff += 2.0 * PI;
    }
    a + diff * ratio
}

fn blend(prev: &ImuState, next: &ImuState, ratio: f32, stamp: f64) -> ImuState {
    let mut position = [0.0; 3];
    let mut velocity = [0.0; 3];
    for axis in 0..3 {
        position[axis] = lerp(prev.position[axis], next.position[axis], ratio);
        velocity[axis] = lerp(prev.velocity[axis], next.velocity[axis], ratio);
    }
    ImuState {
        stamp,
        roll: lerp_angle(prev.roll, next.roll, ratio),
        pitch: lerp_angle(prev.pitch, next.pitch, ratio),
        yaw: lerp_angle(prev.yaw, next.yaw, ratio),
        position,
        velocity,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn yawing_history() -> ImuHistory {
        let mut history = ImuHistory::default();
        for step in 0..3 {
            let t = step as f64 * 0.1;
            history.push(ImuState::new(t, 0.0, 0.0, t as f32, [0.0; 3], [0.0; 3]));
        }
        history
    }

    #[test]
    fn interpolation_blends_between_samples() {
        let history = yawing_history();
        let mid = history.interpolate(0.05).unwrap();
        assert!((mid.yaw - 0.05).abs() < 1e-6);
        assert_eq!(mid.stamp, 0.05);
    }

    #[test]
    fn interpolation_clamps_outside_history() {
        let history = yawing_history();
        assert_eq!(history.interpolate(-1.0).unwrap().yaw, 0.0);
        assert!((history.interpolate(5.0).unwrap().yaw - 0.2).abs() < 1e-6);
        assert!(ImuHistory::default().interpolate(0.0).is_none());
    }

    #[test]
    fn angle_blend_takes_the_short_way_round() {
        let blended = lerp_angle(PI - 0.1, -PI + 0.1, 0.5);
        assert!((blended.abs() - PI).abs() < 1e-5);
    }

    #[test]
    fn history_is_bounded_and_ordered() {
        let mut history = ImuHistory::with_capacity(2);
        history.push(ImuState::new(1.0, 0.0, 0.0, 0.0, [0.0; 3], [0.0; 3]));
        history.push(ImuState::new(0.5, 0.0, 0.0, 0.0, [0.0; 3], [0.0; 3]));
        assert_eq!(history.len(), 1);
        history.push(ImuState::new(2.0, 0.0, 0.0, 0.0, [0.0; 3], [0.0; 3]));
        history.push(ImuState::new(3.0, 0.0, 0.0, 0.0, [0.0; 3], [0.0; 3]));
        assert_eq!(history.len(), 2);
        assert_eq!(history.interpolate(0.0).unwrap().stamp, 2.0);
    }

    #[test]
    fn stationary_imu_leaves_points_untouched() {
        let mut history = ImuHistory::default();
        history.push(ImuState::default());
        history.begin_sweep(0.0);
        history.set_target_time(0.099);

        let mut point = Point::new(1.0, -2.0, 3.0);
        point.intensity = 4.099;
        let moved = history.transform_to_sweep_start(point);
        assert!((moved.x - 1.0).abs() < 1e-6);
        assert!((moved.y + 2.0).abs() < 1e-6);
        assert!((moved.z - 3.0).abs() < 1e-6);
        assert_eq!(moved.intensity, 4.099);
    }

    #[test]
    fn yaw_since_sweep_start_rotates_points() {
        let mut history = yawing_history();
        history.begin_sweep(0.0);
        history.set_target_time(0.1);

        let moved = history.transform_to_sweep_start(Point::new(0.0, 0.0, 1.0));
        assert!((moved.x - 0.1f32.sin()).abs() < 1e-5);
        assert!((moved.z - 0.1f32.cos()).abs() < 1e-5);
    }

    #[test]
    fn constant_velocity_produces_no_shift() {
        let mut history = ImuHistory::default();
        for step in 0..3 {
            let t = step as f32 * 0.1;
            history.push(ImuState::new(
                f64::from(t),
                0.0,
                0.0,
                0.0,
                [0.0, 0.0, 2.0 * t],
                [0.0, 0.0, 2.0],
            ));
        }
        history.begin_sweep(0.0);
        history.set_target_time(0.2);
        assert!(history.position_shift().iter().all(|v| v.abs() < 1e-6));
        assert!(history.start_state().is_some());
    }

    #[test]
    fn empty_history_reports_no_start_state() {
        let mut history = ImuHistory::default();
        history.begin_sweep(1.0);
        assert!(!history.has_data());
        assert!(history.start_state().is_none());
    }
}
