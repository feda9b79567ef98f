// Copyright 2025 John Brosnihan
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//! Two dimensional vector value type
//!
//! `Vector2` is used for positions, sizes, velocities, accelerations and
//! forces. Arithmetic goes through the standard operator traits and always
//! yields a new value; only [`Vector2::maximize`], [`Vector2::maximize_xy`]
//! and [`Vector2::ceil`] modify the vector in place.

use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Div, Mul, MulAssign, Neg, Sub, SubAssign};

/// 2D vector with double-precision components
///
/// # Examples
///
/// ```
/// use playfield::math::Vector2;
///
/// let v = Vector2::new(3.0, 4.0);
/// assert_eq!(v.length(), 5.0);
/// assert_eq!(v + Vector2::new(1.0, 1.0), Vector2::new(4.0, 5.0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Vector2 {
    /// Horizontal component
    pub x: f64,
    /// Vertical component (grows downward, screen convention)
    pub y: f64,
}

impl Vector2 {
    /// The zero vector
    pub const ZERO: Vector2 = Vector2 { x: 0.0, y: 0.0 };

    /// Create a new vector
    pub const fn new(x: f64, y: f64) -> Self {
        Vector2 { x, y }
    }

    /// Create the zero vector
    pub fn zero() -> Self {
        Self::ZERO
    }

    /// Check if both components are finite (not NaN or infinite)
    pub fn is_valid(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// Check if both components are exactly zero
    pub fn is_zero(&self) -> bool {
        self.x == 0.0 && self.y == 0.0
    }

    /// Dot product
    pub fn dot(&self, other: Vector2) -> f64 {
        self.x * other.x + self.y * other.y
    }

    /// Euclidean length
    pub fn length(&self) -> f64 {
        (self.x * self.x + self.y * self.y).sqrt()
    }

    /// Distance between the points described by two vectors
    pub fn distance(&self, other: Vector2) -> f64 {
        (*self - other).length()
    }

    /// Unit vector with the same direction
    ///
    /// A zero-length vector has no direction; the zero vector is returned
    /// instead of dividing by zero.
    pub fn normalize(&self) -> Vector2 {
        let len = self.length();
        if len == 0.0 || !len.is_finite() {
            return Vector2::ZERO;
        }
        *self / len
    }

    /// Unoriented angle in radians between two vectors, in `[0, PI]`
    ///
    /// Returns 0 when either vector has zero length.
    pub fn angle(&self, other: Vector2) -> f64 {
        let lengths = self.length() * other.length();
        if lengths == 0.0 {
            return 0.0;
        }
        (self.dot(other) / lengths).clamp(-1.0, 1.0).acos()
    }

    /// Sum every vector of a list
    pub fn add_all<'a, I>(vectors: I) -> Vector2
    where
        I: IntoIterator<Item = &'a Vector2>,
    {
        vectors.into_iter().copied().sum()
    }

    /// Clamp both axes to `[-limit, +limit]`, keeping their sign
    pub fn maximize(&mut self, limit: f64) -> &mut Self {
        self.maximize_xy(limit, limit)
    }

    /// Clamp each axis to its own `[-max, +max]` range, keeping its sign
    pub fn maximize_xy(&mut self, max_x: f64, max_y: f64) -> &mut Self {
        self.x = clamp_magnitude(self.x, max_x);
        self.y = clamp_magnitude(self.y, max_y);
        self
    }

    /// Snap to zero every axis whose magnitude is below `threshold`
    ///
    /// Each axis is tested on its own magnitude.
    pub fn ceil(&mut self, threshold: f64) -> &mut Self {
        self.x = ceil_value(self.x, threshold);
        self.y = ceil_value(self.y, threshold);
        self
    }

    /// Component-wise product
    pub fn hadamard(&self, other: Vector2) -> Vector2 {
        Vector2::new(self.x * other.x, self.y * other.y)
    }
}

/// Zero `value` when its magnitude is below `threshold`
pub fn ceil_value(value: f64, threshold: f64) -> f64 {
    if value.abs() < threshold {
        0.0
    } else {
        value
    }
}

/// Clamp `value` into `[-max, +max]`
pub fn clamp_magnitude(value: f64, max: f64) -> f64 {
    if value.abs() > max {
        max.copysign(value)
    } else {
        value
    }
}

/// Apply an upper clamp then the lower snap-to-zero threshold
pub fn threshold_min_max(value: f64, min: f64, max: f64) -> f64 {
    ceil_value(clamp_magnitude(value, max), min)
}

impl fmt::Display for Vector2 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{x:{:.2},y:{:.2}}}", self.x, self.y)
    }
}

impl Add for Vector2 {
    type Output = Vector2;

    fn add(self, rhs: Vector2) -> Vector2 {
        Vector2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl AddAssign for Vector2 {
    fn add_assign(&mut self, rhs: Vector2) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl Sub for Vector2 {
    type Output = Vector2;

    fn sub(self, rhs: Vector2) -> Vector2 {
        Vector2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl SubAssign for Vector2 {
    fn sub_assign(&mut self, rhs: Vector2) {
        self.x -= rhs.x;
        self.y -= rhs.y;
    }
}

impl Mul<f64> for Vector2 {
    type Output = Vector2;

    fn mul(self, rhs: f64) -> Vector2 {
        Vector2::new(self.x * rhs, self.y * rhs)
    }
}

impl MulAssign<f64> for Vector2 {
    fn mul_assign(&mut self, rhs: f64) {
        self.x *= rhs;
        self.y *= rhs;
    }
}

impl Div<f64> for Vector2 {
    type Output = Vector2;

    fn div(self, rhs: f64) -> Vector2 {
        Vector2::new(self.x / rhs, self.y / rhs)
    }
}

impl Neg for Vector2 {
    type Output = Vector2;

    fn neg(self) -> Vector2 {
        Vector2::new(-self.x, -self.y)
    }
}

impl Sum for Vector2 {
    fn sum<I: Iterator<Item = Vector2>>(iter: I) -> Vector2 {
        iter.fold(Vector2::ZERO, Add::add)
    }
}

impl From<(f64, f64)> for Vector2 {
    fn from((x, y): (f64, f64)) -> Self {
        Vector2::new(x, y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-12;

    #[test]
    fn test_arithmetic() {
        let a = Vector2::new(1.0, 2.0);
        let b = Vector2::new(3.0, -4.0);
        assert_eq!(a + b, Vector2::new(4.0, -2.0));
        assert_eq!(a - b, Vector2::new(-2.0, 6.0));
        assert_eq!(a * 2.0, Vector2::new(2.0, 4.0));
        assert_eq!(b / 2.0, Vector2::new(1.5, -2.0));
        assert_eq!(-a, Vector2::new(-1.0, -2.0));
    }

    #[test]
    fn test_dot_is_standard_inner_product() {
        let a = Vector2::new(1.0, 2.0);
        let b = Vector2::new(3.0, 4.0);
        assert_eq!(a.dot(b), 11.0);
        assert_eq!(a.dot(b), b.dot(a));
        assert_eq!(Vector2::new(1.0, 0.0).dot(Vector2::new(0.0, 1.0)), 0.0);
    }

    #[test]
    fn test_length_and_distance() {
        assert_eq!(Vector2::new(3.0, 4.0).length(), 5.0);
        let a = Vector2::new(1.0, 1.0);
        let b = Vector2::new(4.0, 5.0);
        assert_eq!(a.distance(b), 5.0);
    }

    #[test]
    fn test_normalize() {
        let n = Vector2::new(10.0, 0.0).normalize();
        assert_eq!(n, Vector2::new(1.0, 0.0));

        let twice = Vector2::new(3.0, -7.0).normalize().normalize();
        assert!((twice.length() - 1.0).abs() < EPSILON);
    }

    #[test]
    fn test_normalize_zero_vector() {
        assert_eq!(Vector2::ZERO.normalize(), Vector2::ZERO);
    }

    #[test]
    fn test_angle() {
        let right = Vector2::new(1.0, 0.0);
        let up = Vector2::new(0.0, 1.0);
        assert!((right.angle(up) - std::f64::consts::FRAC_PI_2).abs() < EPSILON);
        assert!((right.angle(-right) - std::f64::consts::PI).abs() < EPSILON);
        assert_eq!(right.angle(Vector2::ZERO), 0.0);
    }

    #[test]
    fn test_add_all() {
        let forces = vec![
            Vector2::new(1.0, 0.0),
            Vector2::new(0.0, 2.0),
            Vector2::new(-0.5, 0.5),
        ];
        assert_eq!(Vector2::add_all(&forces), Vector2::new(0.5, 2.5));
        assert_eq!(Vector2::add_all(&Vec::<Vector2>::new()), Vector2::ZERO);
    }

    #[test]
    fn test_maximize_keeps_sign() {
        let mut v = Vector2::new(-50.0, 30.0);
        v.maximize(10.0);
        assert_eq!(v, Vector2::new(-10.0, 10.0));

        let mut w = Vector2::new(5.0, -500.0);
        w.maximize_xy(1.0, 100.0);
        assert_eq!(w, Vector2::new(1.0, -100.0));
    }

    #[test]
    fn test_ceil_is_per_axis() {
        // x below threshold, y above: only x snaps
        let mut v = Vector2::new(0.001, 5.0);
        v.ceil(0.01);
        assert_eq!(v, Vector2::new(0.0, 5.0));

        // x above threshold, y below: only y snaps
        let mut w = Vector2::new(-5.0, -0.001);
        w.ceil(0.01);
        assert_eq!(w, Vector2::new(-5.0, 0.0));
    }

    #[test]
    fn test_ceil_and_maximize_chain() {
        let mut v = Vector2::new(0.0001, -900.0);
        v.ceil(0.001).maximize_xy(600.0, 600.0);
        assert_eq!(v, Vector2::new(0.0, -600.0));
    }

    #[test]
    fn test_threshold_min_max() {
        assert_eq!(threshold_min_max(200.0, 0.01, 120.0), 120.0);
        assert_eq!(threshold_min_max(-200.0, 0.01, 120.0), -120.0);
        assert_eq!(threshold_min_max(0.005, 0.01, 120.0), 0.0);
        assert_eq!(threshold_min_max(-3.0, 0.01, 120.0), -3.0);
    }

    #[test]
    fn test_display() {
        assert_eq!(Vector2::new(1.0, -2.5).to_string(), "{x:1.00,y:-2.50}");
    }

    #[test]
    fn test_validation() {
        assert!(Vector2::new(1.0, 2.0).is_valid());
        assert!(!Vector2::new(f64::NAN, 2.0).is_valid());
        assert!(!Vector2::new(1.0, f64::INFINITY).is_valid());
    }
}
