use crate::interface::{Point, RawPoint};
use std::f32::consts::PI;

/// Maps a raw sensor point into the working frame (`x=raw.y, y=raw.z, z=raw.x`).
pub fn to_working_frame(raw: &RawPoint) -> Point {
    Point::new(raw.y, raw.z, raw.x)
}

/// Inverse of [`to_working_frame`].
pub fn to_sensor_frame(point: &Point) -> RawPoint {
    RawPoint::new(point.z, point.x, point.y)
}

/// Horizontal angle about the vertical working axis, in `(-PI, PI]`.
pub fn azimuth(point: &Point) -> f32 {
    -point.x.atan2(point.z)
}

/// Folds an azimuth from `(-PI, PI]` onto `[0, 2*PI)` in sweep order.
pub fn normalize_azimuth(ori: f32) -> f32 {
    if ori > 0.0 {
        2.0 * PI - ori
    } else {
        -ori
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn remap_round_trips_exactly() {
        let samples = [
            RawPoint::new(1.5, -2.25, 3.0),
            RawPoint::new(-0.0, 1e-20, f32::MAX),
            RawPoint::new(f32::MIN_POSITIVE, -7.0, 0.0),
        ];
        for raw in samples {
            let working = to_working_frame(&raw);
            assert_eq!(working.x, raw.y);
            assert_eq!(working.y, raw.z);
            assert_eq!(working.z, raw.x);
            assert_eq!(to_sensor_frame(&working), raw);
        }
    }

    #[test]
    fn azimuth_is_zero_straight_ahead() {
        assert_eq!(azimuth(&Point::new(0.0, 0.0, 1.0)), 0.0);
        assert!((azimuth(&Point::new(1.0, 0.0, 0.0)) + PI / 2.0).abs() < 1e-6);
        assert!((azimuth(&Point::new(-1.0, 0.0, 0.0)) - PI / 2.0).abs() < 1e-6);
    }

    #[test]
    fn normalized_azimuth_lies_in_full_turn() {
        for step in 0..64 {
            let ori = -PI + 0.01 + step as f32 * (2.0 * PI - 0.02) / 63.0;
            let folded = normalize_azimuth(ori);
            assert!((0.0..2.0 * PI).contains(&folded), "{} -> {}", ori, folded);
        }
        assert_eq!(normalize_azimuth(-1.0), 1.0);
        assert!((normalize_azimuth(1.0) - (2.0 * PI - 1.0)).abs() < 1e-6);
    }
}
