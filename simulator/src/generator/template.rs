use std::f32::consts::PI;

/// Horizontal angles (`atan2(x, z)`) for one rotation, from just below `+PI`
/// down to just above `-PI`.
pub fn azimuth_sweep(points: usize) -> Vec<f32> {
    (0..points)
        .map(|k| PI - 2.0 * PI * (k as f32 + 0.5) / points as f32)
        .collect()
}

/// Beam elevations in radians, evenly spread between the bounds in degrees.
pub fn ring_elevations(lower_deg: f32, upper_deg: f32, rings: usize) -> Vec<f32> {
    if rings < 2 {
        return vec![lower_deg.to_radians(); rings];
    }
    let step = (upper_deg - lower_deg) / (rings - 1) as f32;
    (0..rings)
        .map(|ring| (lower_deg + ring as f32 * step).to_radians())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn azimuths_stay_inside_the_open_circle() {
        let sweep = azimuth_sweep(8);
        assert_eq!(sweep.len(), 8);
        assert!(sweep.iter().all(|phi| phi.abs() < PI));
        assert!(sweep.windows(2).all(|pair| pair[0] > pair[1]));
    }

    #[test]
    fn elevations_cover_the_bounds() {
        let elevations = ring_elevations(-15.0, 15.0, 16);
        assert_eq!(elevations.len(), 16);
        assert!((elevations[0] - (-15.0f32).to_radians()).abs() < 1e-6);
        assert!((elevations[15] - 15.0f32.to_radians()).abs() < 1e-6);
    }
}
