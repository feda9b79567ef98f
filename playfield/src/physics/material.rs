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
//! Physical materials
//!
//! A [`Material`] bundles the three properties the engine reads while
//! integrating an entity: density scales accumulated forces, friction damps
//! velocity and elasticity scales the velocity reflected off a play-area edge.

use std::fmt;

/// Named bundle of physical properties
///
/// # Examples
///
/// ```
/// use playfield::physics::Material;
///
/// let rubber = Material::rubber();
/// assert_eq!(rubber.elasticity, 0.90);
///
/// let custom = Material::new("ice", 0.1, 0.9, 0.999);
/// assert_eq!(custom.name, "ice");
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Material {
    /// Display name of the material
    pub name: String,
    /// Scale applied to accumulated forces
    pub density: f64,
    /// Fraction of the velocity kept when bouncing off an edge (>= 0)
    pub elasticity: f64,
    /// Velocity damping factor, typically in `[0, 1]`
    pub friction: f64,
}

impl Material {
    /// Create a material
    ///
    /// Arguments follow the `mat(name,elasticity,density,friction)`
    /// configuration format. Negative elasticity is clamped to zero.
    pub fn new(name: impl Into<String>, elasticity: f64, density: f64, friction: f64) -> Self {
        Material {
            name: name.into(),
            density,
            elasticity: elasticity.max(0.0),
            friction,
        }
    }

    /// Neutral material: no bounce, unit density and friction
    pub fn default_material() -> Self {
        Material::new("default", 0.0, 1.0, 1.0)
    }

    /// Thin medium used as the world's default surrounding material
    pub fn air() -> Self {
        Material::new("air", 0.1, 0.01, 1.0)
    }

    /// Bouncy, slightly damped material
    pub fn rubber() -> Self {
        Material::new("rubber", 0.90, 0.7, 0.98)
    }

    /// Very bouncy material used by demo balls
    pub fn super_ball() -> Self {
        Material::new("superBall", 0.98, 0.7, 0.98)
    }

    /// Dense, barely bouncing material
    pub fn steel() -> Self {
        Material::new("steel", 0.25, 1.2, 0.96)
    }

    /// High-friction ground material
    pub fn floor() -> Self {
        Material::new("floor", 0.02, 0.6, 0.70)
    }

    /// Look up a preset by name (case-insensitive)
    pub fn preset(name: &str) -> Option<Material> {
        match name.to_ascii_lowercase().as_str() {
            "default" => Some(Self::default_material()),
            "air" => Some(Self::air()),
            "rubber" => Some(Self::rubber()),
            "superball" | "super_ball" => Some(Self::super_ball()),
            "steel" => Some(Self::steel()),
            "floor" => Some(Self::floor()),
            _ => None,
        }
    }

    /// Set the density
    pub fn with_density(mut self, density: f64) -> Self {
        self.density = density;
        self
    }

    /// Set the elasticity (negative values clamp to zero)
    pub fn with_elasticity(mut self, elasticity: f64) -> Self {
        self.elasticity = elasticity.max(0.0);
        self
    }

    /// Set the friction
    pub fn with_friction(mut self, friction: f64) -> Self {
        self.friction = friction;
        self
    }

    /// Combine two materials into a new one
    ///
    /// Each property is the arithmetic mean of both operands and the name
    /// joins both names with `+`. Neither operand is modified, and the result
    /// only depends on the two inputs.
    pub fn merge(&self, other: &Material) -> Material {
        Material {
            name: format!("{}+{}", self.name, other.name),
            density: (self.density + other.density) * 0.5,
            elasticity: (self.elasticity + other.elasticity) * 0.5,
            friction: (self.friction + other.friction) * 0.5,
        }
    }

    /// Check that every property is finite
    pub fn is_valid(&self) -> bool {
        self.density.is_finite() && self.elasticity.is_finite() && self.friction.is_finite()
    }
}

impl Default for Material {
    fn default() -> Self {
        Material::default_material()
    }
}

impl fmt::Display for Material {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}[d={:.2},e={:.2},f={:.2}]",
            self.name, self.density, self.elasticity, self.friction
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets() {
        let steel = Material::steel();
        assert_eq!(steel.name, "steel");
        assert_eq!(steel.elasticity, 0.25);
        assert_eq!(steel.density, 1.2);
        assert_eq!(steel.friction, 0.96);

        let air = Material::air();
        assert_eq!(air.density, 0.01);
        assert_eq!(air.friction, 1.0);
    }

    #[test]
    fn test_preset_lookup() {
        assert_eq!(Material::preset("RUBBER"), Some(Material::rubber()));
        assert_eq!(Material::preset("superBall"), Some(Material::super_ball()));
        assert_eq!(Material::preset("unobtainium"), None);
    }

    #[test]
    fn test_merge_averages_properties() {
        let merged = Material::rubber().merge(&Material::steel());
        assert_eq!(merged.name, "rubber+steel");
        assert!((merged.elasticity - 0.575).abs() < 1e-12);
        assert!((merged.density - 0.95).abs() < 1e-12);
        assert!((merged.friction - 0.97).abs() < 1e-12);
    }

    #[test]
    fn test_merge_is_deterministic_and_pure() {
        let a = Material::floor();
        let b = Material::super_ball();
        let first = a.merge(&b);
        let second = a.merge(&b);
        assert_eq!(first, second);
        assert_eq!(a, Material::floor());
        assert_eq!(b, Material::super_ball());
    }

    #[test]
    fn test_copy_is_independent() {
        let original = Material::rubber();
        let mut copy = original.clone();
        copy.friction = 0.1;
        assert_eq!(original.friction, 0.98);
    }

    #[test]
    fn test_negative_elasticity_is_clamped() {
        assert_eq!(Material::new("weird", -1.0, 1.0, 1.0).elasticity, 0.0);
        assert_eq!(Material::default().with_elasticity(-0.5).elasticity, 0.0);
    }

    #[test]
    fn test_display() {
        assert_eq!(Material::steel().to_string(), "steel[d=1.20,e=0.25,f=0.96]");
    }
}
