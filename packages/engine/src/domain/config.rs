use serde::{Deserialize, Serialize};

use crate::core::{BallpitError, Result};

/// Scalars driving the physics step.
///
/// `max_x`/`max_y` are rewritten after every resize and `control_sphere0`
/// by pointer enter/leave; the rest stays fixed for one `Physics` instance.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SimulationConfig {
    pub count: usize,
    pub min_size: f32,
    pub max_size: f32,
    pub size0: f32,
    pub gravity: f32,
    pub friction: f32,
    pub wall_bounce: f32,
    pub max_velocity: f32,
    pub max_x: f32,
    pub max_y: f32,
    pub max_z: f32,
    #[serde(rename = "controlSphere0")]
    pub control_sphere0: bool,
    /// Placement/size generator seed; `None` lets the host pick one
    pub seed: Option<u32>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            count: 200,
            min_size: 0.4,
            max_size: 0.8,
            size0: 1.0,
            gravity: 1.0,
            friction: 0.99,
            wall_bounce: 0.95,
            max_velocity: 0.2,
            max_x: 5.0,
            max_y: 5.0,
            max_z: 2.0,
            control_sphere0: false,
            seed: None,
        }
    }
}

impl SimulationConfig {
    /// Half-extent used for the Z wall test
    #[inline]
    pub fn z_boundary(&self) -> f32 {
        self.max_z.max(self.max_size)
    }

    pub fn validate(&self) -> Result<()> {
        let scalars = [
            ("minSize", self.min_size),
            ("maxSize", self.max_size),
            ("size0", self.size0),
            ("gravity", self.gravity),
            ("friction", self.friction),
            ("wallBounce", self.wall_bounce),
            ("maxVelocity", self.max_velocity),
            ("maxX", self.max_x),
            ("maxY", self.max_y),
            ("maxZ", self.max_z),
        ];
        for (name, value) in scalars {
            if !value.is_finite() {
                return Err(BallpitError::InvalidConfig(format!("{name} must be finite")));
            }
        }
        if self.min_size < 0.0 || self.size0 < 0.0 {
            return Err(BallpitError::InvalidConfig("sizes must be non-negative".into()));
        }
        if self.min_size > self.max_size {
            return Err(BallpitError::InvalidConfig(format!(
                "minSize {} exceeds maxSize {}",
                self.min_size, self.max_size
            )));
        }
        if self.max_velocity < 0.0 {
            return Err(BallpitError::InvalidConfig("maxVelocity must be non-negative".into()));
        }
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MaterialParams {
    pub metalness: f32,
    pub roughness: f32,
    pub clearcoat: f32,
    pub clearcoat_roughness: f32,
}

impl Default for MaterialParams {
    fn default() -> Self {
        Self {
            metalness: 0.3,
            roughness: 0.4,
            clearcoat: 0.8,
            clearcoat_roughness: 0.2,
        }
    }
}

/// Everything `create(canvas, config)` accepts. All keys optional.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BallpitConfig {
    #[serde(flatten)]
    pub simulation: SimulationConfig,
    /// Packed `0xRRGGBB` palette stops
    pub colors: Vec<u32>,
    pub ambient_color: u32,
    pub ambient_intensity: f32,
    pub light_intensity: f32,
    pub material_params: MaterialParams,
    pub follow_cursor: bool,
}

impl Default for BallpitConfig {
    fn default() -> Self {
        Self {
            simulation: SimulationConfig::default(),
            colors: vec![0x000080, 0x000000, 0xFFFFFF],
            ambient_color: 0xFFFFFF,
            ambient_intensity: 0.5,
            light_intensity: 300.0,
            material_params: MaterialParams::default(),
            follow_cursor: false,
        }
    }
}

impl BallpitConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        let config: BallpitConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.colors.len() < 2 {
            return Err(BallpitError::PaletteTooShort(self.colors.len()));
        }
        for (name, value) in [
            ("ambientIntensity", self.ambient_intensity),
            ("lightIntensity", self.light_intensity),
        ] {
            if !value.is_finite() {
                return Err(BallpitError::InvalidConfig(format!("{name} must be finite")));
            }
        }
        self.simulation.validate()
    }

    /// Render-side settings handed to the backend when instances are rebuilt
    pub fn style(&self) -> SceneStyle {
        SceneStyle {
            ambient_color: self.ambient_color,
            ambient_intensity: self.ambient_intensity,
            light_intensity: self.light_intensity,
            material_params: self.material_params.clone(),
        }
    }
}

/// Lighting and material parameters the renderer needs; serialized to JSON
/// for the browser backend.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SceneStyle {
    pub ambient_color: u32,
    pub ambient_intensity: f32,
    pub light_intensity: f32,
    pub material_params: MaterialParams,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_yields_defaults() {
        let config = BallpitConfig::from_json("{}").unwrap();
        assert_eq!(config, BallpitConfig::default());
        assert_eq!(config.simulation.count, 200);
        assert_eq!(config.simulation.max_z, 2.0);
    }

    #[test]
    fn camel_case_keys_reach_flattened_simulation() {
        let json = r#"{
            "count": 12,
            "gravity": 0.7,
            "friction": 0.8,
            "wallBounce": 0.5,
            "controlSphere0": true,
            "followCursor": true,
            "materialParams": { "clearcoatRoughness": 0.9 }
        }"#;
        let config = BallpitConfig::from_json(json).unwrap();
        assert_eq!(config.simulation.count, 12);
        assert_eq!(config.simulation.gravity, 0.7);
        assert_eq!(config.simulation.wall_bounce, 0.5);
        assert!(config.simulation.control_sphere0);
        assert!(config.follow_cursor);
        assert_eq!(config.material_params.clearcoat_roughness, 0.9);
        assert_eq!(config.material_params.metalness, 0.3);
    }

    #[test]
    fn short_palette_is_rejected() {
        let err = BallpitConfig::from_json(r#"{ "colors": [16711680] }"#).unwrap_err();
        assert!(matches!(err, BallpitError::PaletteTooShort(1)));
    }

    #[test]
    fn inverted_size_range_is_rejected() {
        let err = BallpitConfig::from_json(r#"{ "minSize": 2.0, "maxSize": 1.0 }"#).unwrap_err();
        assert!(matches!(err, BallpitError::InvalidConfig(_)));
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        let err = BallpitConfig::from_json("{ count: }").unwrap_err();
        assert!(matches!(err, BallpitError::ConfigParse(_)));
    }

    #[test]
    fn z_boundary_covers_largest_sphere() {
        let mut sim = SimulationConfig::default();
        assert_eq!(sim.z_boundary(), 2.0);
        sim.max_z = 0.5;
        assert_eq!(sim.z_boundary(), 0.8);
    }
}
