//! Vector math used by bodies and the force pass
//!
//! `Vector` wraps an `nalgebra` 3-vector of `f64`. 2D scenarios simply
//! keep `z = 0`. The in-place operations mutate the receiver and hand it
//! back so calls can be chained on the hot path without extra copies.

use std::ops::{Add, AddAssign, Mul, Neg, Sub, SubAssign};

use nalgebra::Vector3;

use crate::error::EngineError;

pub type NVec3 = Vector3<f64>;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vector(pub NVec3);

impl Vector {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Vector(NVec3::new(x, y, z))
    }

    /// Vector in the z = 0 plane
    pub fn planar(x: f64, y: f64) -> Self {
        Vector::new(x, y, 0.0)
    }

    pub fn zeros() -> Self {
        Vector(NVec3::zeros())
    }

    pub fn x(&self) -> f64 {
        self.0.x
    }

    pub fn y(&self) -> f64 {
        self.0.y
    }

    pub fn z(&self) -> f64 {
        self.0.z
    }

    /// In-place addition: self = self + other
    pub fn translate(&mut self, other: &Vector) -> &mut Self {
        self.0 += other.0;
        self
    }

    /// In-place sign flip of every component (parity operator)
    pub fn negate(&mut self) -> &mut Self {
        self.0.neg_mut();
        self
    }

    /// |v|^2, no square root
    pub fn magnitude_squared(&self) -> f64 {
        self.0.norm_squared()
    }

    pub fn magnitude(&self) -> f64 {
        self.0.norm()
    }

    /// Euclidean distance, symmetric and non-negative
    pub fn distance_to(&self, other: &Vector) -> f64 {
        (other.0 - self.0).norm()
    }

    /// Scale to unit length in place
    ///
    /// Fails without touching the receiver when the magnitude is zero or not
    /// finite, so coincident bodies never turn into NaN directions.
    pub fn normalize(&mut self) -> Result<&mut Self, EngineError> {
        let magnitude = self.magnitude();
        if magnitude == 0.0 || !magnitude.is_finite() {
            return Err(EngineError::domain(format!(
                "cannot normalize vector with magnitude {magnitude}"
            )));
        }
        self.0 /= magnitude;
        Ok(self)
    }

    /// Copying variant of [`Vector::normalize`]
    pub fn unit(&self) -> Result<Vector, EngineError> {
        let mut copy = *self;
        copy.normalize()?;
        Ok(copy)
    }

    pub fn is_finite(&self) -> bool {
        self.0.iter().all(|c| c.is_finite())
    }
}

impl From<NVec3> for Vector {
    fn from(v: NVec3) -> Self {
        Vector(v)
    }
}

/// Definitions carry 2 (planar) or 3 components
impl TryFrom<&[f64]> for Vector {
    type Error = EngineError;

    fn try_from(components: &[f64]) -> Result<Self, Self::Error> {
        let v = match *components {
            [x, y] => Vector::planar(x, y),
            [x, y, z] => Vector::new(x, y, z),
            _ => {
                return Err(EngineError::configuration(format!(
                    "vector needs 2 or 3 components, got {}",
                    components.len()
                )))
            }
        };
        if !v.is_finite() {
            return Err(EngineError::configuration(format!(
                "vector components must be finite, got {components:?}"
            )));
        }
        Ok(v)
    }
}

impl Add for Vector {
    type Output = Vector;

    fn add(self, rhs: Vector) -> Vector {
        Vector(self.0 + rhs.0)
    }
}

impl Sub for Vector {
    type Output = Vector;

    fn sub(self, rhs: Vector) -> Vector {
        Vector(self.0 - rhs.0)
    }
}

impl Neg for Vector {
    type Output = Vector;

    fn neg(self) -> Vector {
        Vector(-self.0)
    }
}

impl Mul<f64> for Vector {
    type Output = Vector;

    fn mul(self, rhs: f64) -> Vector {
        Vector(self.0 * rhs)
    }
}

impl Mul<Vector> for f64 {
    type Output = Vector;

    fn mul(self, rhs: Vector) -> Vector {
        Vector(rhs.0 * self)
    }
}

impl AddAssign for Vector {
    fn add_assign(&mut self, rhs: Vector) {
        self.0 += rhs.0;
    }
}

impl SubAssign for Vector {
    fn sub_assign(&mut self, rhs: Vector) {
        self.0 -= rhs.0;
    }
}
