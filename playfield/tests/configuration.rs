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
//! Building worlds from configuration sources

use playfield::config::WorldConfig;
use playfield::math::{Rect, Vector2};
use playfield::physics::{Material, World};

const PROPERTIES: &str = "
# physics
app.physic.world.gravity=v(0,0.000981)
app.physic.world.play.area.width=640
app.physic.world.play.area.height=480
app.physic.world.speed.min=0.01
app.physic.world.speed.x.max=60
app.physic.world.speed.y.max=80
app.physic.world.acceleration.min=0.0001
app.physic.world.acceleration.x.max=300
app.physic.world.acceleration.y.max=400
app.physic.world.material=mat(moon,0.5,0.2,0.9)
app.render.title=ignored
";

#[test]
fn test_world_from_properties() {
    let world = World::from_config(&WorldConfig::from_properties_str(PROPERTIES));
    assert_eq!(world.gravity(), Vector2::new(0.0, 0.000981));
    assert_eq!(world.play_area(), Rect::new(0.0, 0.0, 640.0, 480.0));
    assert_eq!(world.min_speed, 0.01);
    assert_eq!(world.max_speed_x, 60.0);
    assert_eq!(world.max_speed_y, 80.0);
    assert_eq!(world.min_acc, 0.0001);
    assert_eq!(world.max_acc_x, 300.0);
    assert_eq!(world.max_acc_y, 400.0);
    assert_eq!(world.material(), &Material::new("moon", 0.5, 0.2, 0.9));
}

#[test]
fn test_bad_values_fall_back_to_defaults() {
    let text = "
app.physic.world.gravity=down
app.physic.world.play.area.width=wide
app.physic.world.speed.min=NaN
app.physic.world.material=mat(broken)
";
    let world = World::from_config(&WorldConfig::from_properties_str(text));
    assert_eq!(world, World::default());
}

#[test]
fn test_negative_play_area_becomes_empty() {
    let text = "app.physic.world.play.area.width=-100";
    let world = World::from_config(&WorldConfig::from_properties_str(text));
    assert_eq!(world.play_area().width, 0.0);
    assert_eq!(world.play_area().height, 200.0);
}

#[test]
fn test_min_speed_above_max_is_lowered() {
    let text = "
app.physic.world.speed.min=500
app.physic.world.speed.x.max=50
";
    let world = World::from_config(&WorldConfig::from_properties_str(text));
    assert_eq!(world.min_speed, 50.0);
}

#[cfg(feature = "serde")]
#[test]
fn test_world_from_json() {
    let json = r#"{
        "gravity": {"x": 0.0, "y": 2.0},
        "play_area_width": 100.0,
        "material": {"name": "ice", "density": 0.9, "elasticity": 0.1, "friction": 0.99}
    }"#;
    let config = WorldConfig::from_json(json).unwrap();
    let world = World::from_config(&config);
    assert_eq!(world.gravity(), Vector2::new(0.0, 2.0));
    assert_eq!(world.play_area(), Rect::new(0.0, 0.0, 100.0, 200.0));
    assert_eq!(world.material().name, "ice");
    assert_eq!(world.max_speed_x, 120.0);

    let again = WorldConfig::from_json(&config.to_json().unwrap()).unwrap();
    assert_eq!(again, config);
}

#[cfg(feature = "serde")]
#[test]
fn test_invalid_json_is_an_error() {
    assert!(WorldConfig::from_json("{ not json").is_err());
}
