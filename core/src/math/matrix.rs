use crate::interface::Point;
use ndarray::{arr1, arr2, Array1, Array2, ArrayView2};

pub struct MatrixHelper;

impl MatrixHelper {
    /// Multiply two 2D arrays (all f32 for simplicity).
    pub fn multiply(lhs: ArrayView2<f32>, rhs: ArrayView2<f32>) -> Array2<f32> {
        lhs.dot(&rhs)
    }

    pub fn rot_x(angle: f32) -> Array2<f32> {
        let (s, c) = angle.sin_cos();
        arr2(&[[1.0, 0.0, 0.0], [0.0, c, -s], [0.0, s, c]])
    }

    pub fn rot_y(angle: f32) -> Array2<f32> {
        let (s, c) = angle.sin_cos();
        arr2(&[[c, 0.0, s], [0.0, 1.0, 0.0], [-s, 0.0, c]])
    }

    pub fn rot_z(angle: f32) -> Array2<f32> {
        let (s, c) = angle.sin_cos();
        arr2(&[[c, -s, 0.0], [s, c, 0.0], [0.0, 0.0, 1.0]])
    }

    /// Attitude rotation of the working frame: roll about z, then pitch about x,
    /// then yaw about the vertical y axis.
    pub fn attitude(roll: f32, pitch: f32, yaw: f32) -> Array2<f32> {
        let yx = Self::multiply(Self::rot_y(yaw).view(), Self::rot_x(pitch).view());
        Self::multiply(yx.view(), Self::rot_z(roll).view())
    }

    pub fn to_vector(point: &Point) -> Array1<f32> {
        arr1(&[point.x, point.y, point.z])
    }

    /// Writes a 3-vector back into `point`, keeping its auxiliary field.
    pub fn apply_vector(point: &mut Point, vector: &Array1<f32>) {
        point.x = vector[0];
        point.y = vector[1];
        point.z = vector[2];
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn attitude_is_orthonormal() {
        let rotation = MatrixHelper::attitude(0.3, -0.2, 1.1);
        let product = MatrixHelper::multiply(rotation.t(), rotation.view());
        for i in 0..3 {
            for j in 0..3 {
                let expected = if i == j { 1.0 } else { 0.0 };
                assert!((product[[i, j]] - expected).abs() < 1e-5);
            }
        }
    }

    #[test]
    fn yaw_turns_forward_axis_towards_x() {
        let rotation = MatrixHelper::attitude(0.0, 0.0, std::f32::consts::FRAC_PI_2);
        let forward = rotation.dot(&arr1(&[0.0, 0.0, 1.0]));
        assert!((forward[0] - 1.0).abs() < 1e-6);
        assert!(forward[2].abs() < 1e-6);
    }
}
