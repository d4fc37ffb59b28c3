use serde::{Deserialize, Serialize};

/// Point as delivered by the rangefinder, in the raw sensor frame.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct RawPoint {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl RawPoint {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }
}

/// Working-frame point carrying one auxiliary scalar.
///
/// After reconstruction `intensity` holds `ring + relative_time`: the integer
/// part is the ring index and the fractional part the capture time offset.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub intensity: f32,
}

impl Point {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self {
            x,
            y,
            z,
            intensity: 0.0,
        }
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }

    pub fn squared_norm(&self) -> f32 {
        self.x * self.x + self.y * self.y + self.z * self.z
    }

    /// Ring index encoded in the auxiliary field.
    pub fn ring(&self) -> usize {
        self.intensity.floor() as usize
    }

    /// Relative capture time encoded in the auxiliary field.
    pub fn relative_time(&self) -> f32 {
        self.intensity - self.intensity.floor()
    }
}

/// Inclusive `(start, end)` bounds of one ring inside the sorted cloud.
///
/// An empty ring is recorded as `end == start - 1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexRange {
    pub start: isize,
    pub end: isize,
}

impl IndexRange {
    pub fn new(start: isize, end: isize) -> Self {
        Self { start, end }
    }

    pub fn len(&self) -> usize {
        (self.end - self.start + 1).max(0) as usize
    }

    pub fn is_empty(&self) -> bool {
        self.end < self.start
    }

    /// Half-open slice range over the sorted cloud.
    pub fn as_range(&self) -> std::ops::Range<usize> {
        let start = self.start.max(0) as usize;
        start..start + self.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn packed_field_splits_into_ring_and_time() {
        let mut point = Point::new(1.0, 2.0, 3.0);
        point.intensity = 5.0 + 0.099;
        assert_eq!(point.ring(), 5);
        assert!((point.relative_time() - 0.099).abs() < 1e-5);
    }

    #[test]
    fn empty_range_has_zero_length() {
        let range = IndexRange::new(4, 3);
        assert!(range.is_empty());
        assert_eq!(range.len(), 0);
        assert_eq!(range.as_range(), 4..4);

        let leading = IndexRange::new(0, -1);
        assert!(leading.is_empty());
        assert_eq!(leading.as_range(), 0..0);
    }

    #[test]
    fn filled_range_maps_to_slice_bounds() {
        let range = IndexRange::new(10, 19);
        assert_eq!(range.len(), 10);
        assert_eq!(range.as_range(), 10..20);
    }
}
