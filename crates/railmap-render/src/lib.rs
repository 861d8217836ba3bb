#![forbid(unsafe_code)]

//! Headless track layout + SVG renderer for railmap.
//!
//! [`track::layout_cells`] is the geometric core. [`scene::build_scene`] turns a validated
//! [`Map`] into shape descriptions in paint order, and [`svg::render_scene_svg`] serializes
//! them.

pub mod error;
pub mod scene;
pub mod svg;
pub mod track;

pub use error::{Error, Result};
pub use scene::{Scene, SceneOptions, Shape, ShapeGroup, build_scene};
pub use track::{CellPlacement, layout_cells};

use railmap_core::{Map, MapConfig};

impl SceneOptions {
    /// Canvas and track style taken from a config document, other options at their defaults.
    pub fn from_config(config: &MapConfig) -> Self {
        Self {
            canvas: config.canvas,
            track: config.track,
            ..Self::default()
        }
    }
}

/// Builds the map described by `config` and lays it out.
pub fn layout_config(config: &MapConfig) -> Result<(Map, Scene)> {
    let map = config.build_map()?;
    let scene = build_scene(&map, &SceneOptions::from_config(config))?;
    Ok((map, scene))
}

/// Config to SVG text in one call.
pub fn render_config_svg(config: &MapConfig, options: &svg::SvgRenderOptions) -> Result<String> {
    let (_, scene) = layout_config(config)?;
    Ok(svg::render_scene_svg(&scene, options))
}
