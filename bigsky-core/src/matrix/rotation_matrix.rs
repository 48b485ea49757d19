//! 3×3 rotation matrices in the ERFA passive-rotation convention.
//!
//! `rotate_x`, `rotate_y` and `rotate_z` premultiply the matrix in place, so
//! a sequence of calls builds the product right to left:
//!
//! ```
//! use bigsky_core::RotationMatrix3;
//!
//! let mut m = RotationMatrix3::identity();
//! m.rotate_z(0.1); // applied first
//! m.rotate_y(0.2); // applied second
//! let v = m.apply_to_vector([1.0, 0.0, 0.0]);
//! let len = (v[0] * v[0] + v[1] * v[1] + v[2] * v[2]).sqrt();
//! assert!((len - 1.0).abs() < 1e-15);
//! ```

use super::Vector3;

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RotationMatrix3 {
    elements: [[f64; 3]; 3],
}

impl RotationMatrix3 {
    pub const fn identity() -> Self {
        Self {
            elements: [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]],
        }
    }

    /// `self = Rx(phi) * self`.
    pub fn rotate_x(&mut self, phi: f64) {
        let (s, c) = libm::sincos(phi);

        for j in 0..3 {
            let a1 = c * self.elements[1][j] + s * self.elements[2][j];
            let a2 = -s * self.elements[1][j] + c * self.elements[2][j];
            self.elements[1][j] = a1;
            self.elements[2][j] = a2;
        }
    }

    /// `self = Ry(theta) * self`.
    ///
    /// ```text
    /// Ry(theta) = | cos  0  -sin |
    ///             |  0   1    0  |
    ///             | sin  0   cos |
    /// ```
    pub fn rotate_y(&mut self, theta: f64) {
        let (s, c) = libm::sincos(theta);

        for j in 0..3 {
            let a0 = c * self.elements[0][j] - s * self.elements[2][j];
            let a2 = s * self.elements[0][j] + c * self.elements[2][j];
            self.elements[0][j] = a0;
            self.elements[2][j] = a2;
        }
    }

    /// `self = Rz(psi) * self`.
    ///
    /// ```text
    /// Rz(psi) = |  cos  sin  0 |
    ///           | -sin  cos  0 |
    ///           |   0    0   1 |
    /// ```
    pub fn rotate_z(&mut self, psi: f64) {
        let (s, c) = libm::sincos(psi);

        for j in 0..3 {
            let a0 = c * self.elements[0][j] + s * self.elements[1][j];
            let a1 = -s * self.elements[0][j] + c * self.elements[1][j];
            self.elements[0][j] = a0;
            self.elements[1][j] = a1;
        }
    }

    pub fn apply_to_vector(&self, vector: [f64; 3]) -> [f64; 3] {
        let e = &self.elements;
        [
            e[0][0] * vector[0] + e[0][1] * vector[1] + e[0][2] * vector[2],
            e[1][0] * vector[0] + e[1][1] * vector[1] + e[1][2] * vector[2],
            e[2][0] * vector[0] + e[2][1] * vector[1] + e[2][2] * vector[2],
        ]
    }
}

impl Default for RotationMatrix3 {
    fn default() -> Self {
        Self::identity()
    }
}

impl std::ops::Mul<Vector3> for RotationMatrix3 {
    type Output = Vector3;

    fn mul(self, rhs: Vector3) -> Vector3 {
        Vector3::from_array(self.apply_to_vector(rhs.to_array()))
    }
}
