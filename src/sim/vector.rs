//! Immutable 2D vector used for positions, sizes and velocities
//!
//! Thin value wrapper over `glam::DVec2`. Every operation returns a new value.

use std::ops::{Add, Mul, Neg};

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::error::SimError;

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vector(DVec2);

impl Vector {
    pub const ZERO: Self = Self(DVec2::ZERO);
    pub const ONE: Self = Self(DVec2::ONE);

    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Self(DVec2::new(x, y))
    }

    #[inline]
    pub fn x(self) -> f64 {
        self.0.x
    }

    #[inline]
    pub fn y(self) -> f64 {
        self.0.y
    }

    /// Component-wise sum
    #[inline]
    pub fn plus(self, other: Vector) -> Vector {
        Self(self.0 + other.0)
    }

    /// Component-wise scalar product
    #[inline]
    pub fn times(self, factor: f64) -> Vector {
        Self(self.0 * factor)
    }

    /// Floor of both components
    #[inline]
    pub fn floor(self) -> Vector {
        Self(self.0.floor())
    }

    /// Ceiling of both components
    #[inline]
    pub fn ceil(self) -> Vector {
        Self(self.0.ceil())
    }

    pub fn is_finite(self) -> bool {
        self.0.is_finite()
    }

    /// Reject NaN/infinite components, naming the offending argument
    pub fn ensure_finite(self, field: &'static str) -> Result<Vector, SimError> {
        if self.is_finite() {
            Ok(self)
        } else {
            Err(SimError::NonFiniteVector {
                field,
                x: self.x(),
                y: self.y(),
            })
        }
    }

    pub fn as_dvec2(self) -> DVec2 {
        self.0
    }
}

impl From<(f64, f64)> for Vector {
    fn from((x, y): (f64, f64)) -> Self {
        Self::new(x, y)
    }
}

impl From<DVec2> for Vector {
    fn from(v: DVec2) -> Self {
        Self(v)
    }
}

impl Add for Vector {
    type Output = Vector;

    fn add(self, rhs: Vector) -> Vector {
        self.plus(rhs)
    }
}

impl Mul<f64> for Vector {
    type Output = Vector;

    fn mul(self, rhs: f64) -> Vector {
        self.times(rhs)
    }
}

impl Neg for Vector {
    type Output = Vector;

    fn neg(self) -> Vector {
        self.times(-1.0)
    }
}
