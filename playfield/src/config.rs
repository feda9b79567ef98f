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
//! World configuration
//!
//! Worlds are configured from a flat key/value source using the keys below.
//! Vector values use the `v(<x>,<y>)` syntax and materials use
//! `mat(<name>,<elasticity>,<density>,<friction>)`.
//!
//! ```text
//! app.physic.world.gravity=v(0,0.981)
//! app.physic.world.play.area.width=320
//! app.physic.world.play.area.height=200
//! app.physic.world.speed.min=0.001
//! app.physic.world.speed.x.max=120
//! app.physic.world.speed.y.max=120
//! app.physic.world.acceleration.min=0.00001
//! app.physic.world.acceleration.x.max=600
//! app.physic.world.acceleration.y.max=600
//! app.physic.world.material=mat(air,0.1,0.01,1.0)
//! ```
//!
//! # Error Handling
//!
//! A missing key keeps its default silently. A malformed value keeps its
//! default and logs a warning; configuration problems never reach the
//! simulation loop.

use crate::math::Vector2;
use crate::physics::Material;
use std::collections::HashMap;

/// Gravity vector key
pub const KEY_GRAVITY: &str = "app.physic.world.gravity";
/// Play area width key
pub const KEY_PLAY_AREA_WIDTH: &str = "app.physic.world.play.area.width";
/// Play area height key
pub const KEY_PLAY_AREA_HEIGHT: &str = "app.physic.world.play.area.height";
/// Minimum speed key
pub const KEY_MIN_SPEED: &str = "app.physic.world.speed.min";
/// Maximum horizontal speed key
pub const KEY_MAX_SPEED_X: &str = "app.physic.world.speed.x.max";
/// Maximum vertical speed key
pub const KEY_MAX_SPEED_Y: &str = "app.physic.world.speed.y.max";
/// Minimum acceleration key
pub const KEY_MIN_ACC: &str = "app.physic.world.acceleration.min";
/// Maximum horizontal acceleration key
pub const KEY_MAX_ACC_X: &str = "app.physic.world.acceleration.x.max";
/// Maximum vertical acceleration key
pub const KEY_MAX_ACC_Y: &str = "app.physic.world.acceleration.y.max";
/// World material key
pub const KEY_MATERIAL: &str = "app.physic.world.material";

/// Raw world settings, before [`crate::physics::World`] enforces its invariants
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct WorldConfig {
    /// Gravity applied to every dynamic entity each tick
    pub gravity: Vector2,
    /// Play area width
    pub play_area_width: f64,
    /// Play area height
    pub play_area_height: f64,
    /// Speed snap-to-zero threshold
    pub min_speed: f64,
    /// Horizontal speed limit
    pub max_speed_x: f64,
    /// Vertical speed limit
    pub max_speed_y: f64,
    /// Acceleration snap-to-zero threshold
    pub min_acc: f64,
    /// Horizontal acceleration limit
    pub max_acc_x: f64,
    /// Vertical acceleration limit
    pub max_acc_y: f64,
    /// Surrounding material, used for friction when an entity touches nothing
    pub material: Material,
}

impl Default for WorldConfig {
    fn default() -> Self {
        WorldConfig {
            gravity: Vector2::new(0.0, 0.981),
            play_area_width: 320.0,
            play_area_height: 200.0,
            min_speed: 0.001,
            max_speed_x: 120.0,
            max_speed_y: 120.0,
            min_acc: 0.00001,
            max_acc_x: 600.0,
            max_acc_y: 600.0,
            material: Material::air(),
        }
    }
}

impl WorldConfig {
    /// Build a configuration from key/value pairs
    ///
    /// Unknown keys are ignored. Each known key that fails to parse keeps
    /// its default value and a warning is logged.
    pub fn from_properties(properties: &HashMap<String, String>) -> Self {
        let mut config = WorldConfig::default();

        if let Some(value) = properties.get(KEY_GRAVITY) {
            config.gravity = or_default(KEY_GRAVITY, parse_vector(value), config.gravity);
        }
        if let Some(value) = properties.get(KEY_MATERIAL) {
            config.material = or_default(KEY_MATERIAL, parse_material(value), config.material);
        }

        let numbers: [(&str, &mut f64); 8] = [
            (KEY_PLAY_AREA_WIDTH, &mut config.play_area_width),
            (KEY_PLAY_AREA_HEIGHT, &mut config.play_area_height),
            (KEY_MIN_SPEED, &mut config.min_speed),
            (KEY_MAX_SPEED_X, &mut config.max_speed_x),
            (KEY_MAX_SPEED_Y, &mut config.max_speed_y),
            (KEY_MIN_ACC, &mut config.min_acc),
            (KEY_MAX_ACC_X, &mut config.max_acc_x),
            (KEY_MAX_ACC_Y, &mut config.max_acc_y),
        ];
        for (key, slot) in numbers {
            if let Some(value) = properties.get(key) {
                *slot = or_default(key, parse_number(value), *slot);
            }
        }

        config
    }

    /// Build a configuration from `key=value` lines
    ///
    /// Blank lines and lines starting with `#` or `!` are skipped, as are
    /// lines without a `=` separator.
    pub fn from_properties_str(text: &str) -> Self {
        Self::from_properties(&parse_properties(text))
    }

    /// Build a configuration from a JSON document
    ///
    /// Missing fields keep their defaults. Unlike the key/value loader, a
    /// document that is not valid JSON is reported to the caller.
    #[cfg(feature = "serde")]
    pub fn from_json(json: &str) -> Result<Self, String> {
        serde_json::from_str(json).map_err(|e| format!("Invalid world configuration: {}", e))
    }

    /// Serialize the configuration as pretty-printed JSON
    #[cfg(feature = "serde")]
    pub fn to_json(&self) -> Result<String, String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| format!("Unable to serialize world configuration: {}", e))
    }
}

fn or_default<T: std::fmt::Debug>(key: &str, parsed: Result<T, String>, default: T) -> T {
    match parsed {
        Ok(value) => value,
        Err(message) => {
            log::warn!("{} for '{}', using default {:?}", message, key, default);
            default
        }
    }
}

/// Split `key=value` lines into a map
pub fn parse_properties(text: &str) -> HashMap<String, String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#') && !line.starts_with('!'))
        .filter_map(|line| line.split_once('='))
        .map(|(key, value)| (key.trim().to_string(), value.trim().to_string()))
        .collect()
}

/// Parse a finite floating point value
pub fn parse_number(value: &str) -> Result<f64, String> {
    let number: f64 = value
        .trim()
        .parse()
        .map_err(|_| format!("Invalid number '{}'", value))?;
    if !number.is_finite() {
        return Err(format!("Number '{}' is not finite", value));
    }
    Ok(number)
}

/// Strip `prefix(` and `)` around a value, returning the inner arguments
fn call_arguments<'a>(value: &'a str, prefix: &str) -> Result<Vec<&'a str>, String> {
    let inner = value
        .trim()
        .strip_prefix(prefix)
        .and_then(|rest| rest.trim_start().strip_prefix('('))
        .and_then(|rest| rest.strip_suffix(')'))
        .ok_or_else(|| format!("Expected '{}(...)' but got '{}'", prefix, value))?;
    Ok(inner.split(',').map(str::trim).collect())
}

/// Parse a `v(<x>,<y>)` vector value
///
/// # Examples
///
/// ```
/// use playfield::config::parse_vector;
/// use playfield::math::Vector2;
///
/// assert_eq!(parse_vector("v(0,0.981)"), Ok(Vector2::new(0.0, 0.981)));
/// assert!(parse_vector("(1,2)").is_err());
/// ```
pub fn parse_vector(value: &str) -> Result<Vector2, String> {
    let args = call_arguments(value, "v")?;
    if args.len() != 2 {
        return Err(format!(
            "Vector '{}' needs 2 components, found {}",
            value,
            args.len()
        ));
    }
    Ok(Vector2::new(parse_number(args[0])?, parse_number(args[1])?))
}

/// Parse a `mat(<name>,<elasticity>,<density>,<friction>)` material value
///
/// # Examples
///
/// ```
/// use playfield::config::parse_material;
///
/// let steel = parse_material("mat(steel,0.25,1.2,0.96)").unwrap();
/// assert_eq!(steel.density, 1.2);
/// ```
pub fn parse_material(value: &str) -> Result<Material, String> {
    let args = call_arguments(value, "mat")?;
    if args.len() != 4 {
        return Err(format!(
            "Material '{}' needs 4 fields (name,elasticity,density,friction), found {}",
            value,
            args.len()
        ));
    }
    if args[0].is_empty() {
        return Err(format!("Material '{}' has an empty name", value));
    }
    Ok(Material::new(
        args[0],
        parse_number(args[1])?,
        parse_number(args[2])?,
        parse_number(args[3])?,
    ))
}
