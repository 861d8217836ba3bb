//! Declarative map description (JSON or YAML) and the uniform scaling applied to it.

use crate::color::Color;
use crate::error::{Error, Result};
use crate::geom::{self, Size, point, size};
use crate::model::{City, Connection, Map};
use crate::style::TrackStyle;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConfigFormat {
    #[default]
    Json,
    Yaml,
}

impl ConfigFormat {
    /// `.yaml` / `.yml` select YAML; everything else is read as JSON.
    pub fn from_path(path: &Path) -> Self {
        match path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .as_deref()
        {
            Some("yaml" | "yml") => Self::Yaml,
            _ => Self::Json,
        }
    }
}

impl std::str::FromStr for ConfigFormat {
    type Err = ();

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "yaml" | "yml" => Ok(Self::Yaml),
            _ => Err(()),
        }
    }
}

/// Physical output canvas.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasConfig {
    /// Width in inches.
    pub width: f64,
    /// Height in inches.
    pub height: f64,
    pub units_per_inch: f64,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            width: 10.0,
            height: 10.0,
            units_per_inch: 25.4,
        }
    }
}

impl CanvasConfig {
    /// Canvas size in drawing units.
    pub fn size_in_units(&self) -> Size {
        size(
            self.width * self.units_per_inch,
            self.height * self.units_per_inch,
        )
    }

    pub fn validate(&self) -> Result<()> {
        for (what, v) in [
            ("width", self.width),
            ("height", self.height),
            ("units_per_inch", self.units_per_inch),
        ] {
            if !(v.is_finite() && v > 0.0) {
                return Err(Error::InvalidCanvas {
                    message: format!("canvas {what} must be positive, got {v}"),
                });
            }
        }
        Ok(())
    }
}

/// Coordinate space the city positions were authored in.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SourceSpace {
    pub width: f64,
    pub height: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CityConfig {
    pub name: String,
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConnectionConfig {
    pub from: String,
    pub to: String,
    pub length: i64,
    pub color: Color,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secondary_color: Option<Color>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapConfig {
    pub canvas: CanvasConfig,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<SourceSpace>,
    pub track: TrackStyle,
    pub cities: Vec<CityConfig>,
    pub connections: Vec<ConnectionConfig>,
}

impl MapConfig {
    pub fn from_json_str(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn from_yaml_str(text: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(text)?)
    }

    pub fn from_str_with_format(text: &str, format: ConfigFormat) -> Result<Self> {
        match format {
            ConfigFormat::Json => Self::from_json_str(text),
            ConfigFormat::Yaml => Self::from_yaml_str(text),
        }
    }

    /// Uniform, aspect-preserving factor from the source space onto the canvas.
    pub fn scale_factor(&self) -> Result<f64> {
        self.canvas.validate()?;
        let Some(src) = self.source else {
            return Ok(1.0);
        };
        if !(src.width.is_finite() && src.width > 0.0 && src.height.is_finite() && src.height > 0.0)
        {
            return Err(Error::InvalidCanvas {
                message: format!(
                    "source space must be positive, got {}x{}",
                    src.width, src.height
                ),
            });
        }
        let target = self.canvas.size_in_units();
        Ok((target.width / src.width).min(target.height / src.height))
    }

    /// Builds the map with every city position scaled onto the canvas.
    pub fn build_map(&self) -> Result<Map> {
        self.track.validate()?;
        let scale = self.scale_factor()?;
        let canvas = self.canvas.size_in_units();
        tracing::debug!(
            scale,
            cities = self.cities.len(),
            connections = self.connections.len(),
            "building map from config"
        );

        let mut map = Map::new();
        for c in &self.cities {
            let position = point(c.x * scale, c.y * scale);
            if geom::is_finite(position)
                && (!(0.0..=canvas.width).contains(&position.x)
                    || !(0.0..=canvas.height).contains(&position.y))
            {
                tracing::warn!(
                    city = %c.name,
                    x = position.x,
                    y = position.y,
                    "city lies outside the canvas"
                );
            }
            map.add_city(City::new(c.name.clone(), position))?;
        }
        for c in &self.connections {
            map.add_connection(Connection {
                city_a: c.from.clone(),
                city_b: c.to.clone(),
                length: c.length,
                primary: c.color,
                secondary: c.secondary_color,
            });
        }
        Ok(map)
    }
}
