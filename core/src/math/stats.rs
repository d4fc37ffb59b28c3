use crate::interface::Point;

pub struct StatsHelper;

impl StatsHelper {
    pub fn mean(samples: &[f32]) -> f32 {
        if samples.is_empty() {
            return 0.0;
        }
        samples.iter().sum::<f32>() / samples.len() as f32
    }

    /// Mean distance of `points` from the sensor origin.
    pub fn mean_range(points: &[Point]) -> f32 {
        let ranges: Vec<f32> = points.iter().map(|p| p.squared_norm().sqrt()).collect();
        Self::mean(&ranges)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mean_of_empty_sequence_is_zero() {
        assert_eq!(StatsHelper::mean(&[]), 0.0);
        assert_eq!(StatsHelper::mean_range(&[]), 0.0);
    }

    #[test]
    fn mean_range_uses_euclidean_distance() {
        let points = [Point::new(3.0, 4.0, 0.0), Point::new(0.0, 0.0, 1.0)];
        assert_eq!(StatsHelper::mean_range(&points), 3.0);
    }
}
