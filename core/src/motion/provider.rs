use crate::interface::{ImuState, Point};

/// Source of interpolated motion used to de-skew points within a sweep.
///
/// Implementations must answer without blocking: `transform_to_sweep_start`
/// runs once for every retained point.
pub trait ImuProvider {
    fn has_data(&self) -> bool;

    /// Anchors the sweep-start state at the absolute sweep time.
    fn begin_sweep(&mut self, sweep_time: f64);

    /// Selects the pose at `relative_time` seconds after sweep start.
    fn set_target_time(&mut self, relative_time: f32);

    /// Projects a point captured at the target time into the sweep-start frame.
    fn transform_to_sweep_start(&self, point: Point) -> Point;

    fn start_state(&self) -> Option<ImuState>;
}
