#![forbid(unsafe_code)]

//! `railmap` renders schematic rail maps (cities joined by tracks of discrete cells) as
//! vector images.
//!
//! The model lives in `railmap-core` and is re-exported at the crate root; layout and SVG
//! output live under [`render`].
//!
//! # Features
//!
//! - `raster`: enable PNG/JPG/PDF output via pure-Rust SVG rasterization/conversion

pub use railmap_core::*;

pub mod render {
    pub use railmap_render::scene::{GroupKind, Rotation};
    pub use railmap_render::svg::{SvgRenderOptions, render_scene_svg, sanitize_svg_id};
    pub use railmap_render::{
        CellPlacement, Scene, SceneOptions, Shape, ShapeGroup, build_scene, layout_cells,
        layout_config, render_config_svg,
    };

    use railmap_core::{ConfigFormat, Map, MapConfig};

    #[cfg(feature = "raster")]
    pub mod raster;

    #[derive(Debug, thiserror::Error)]
    pub enum HeadlessError {
        #[error(transparent)]
        Config(#[from] railmap_core::Error),
        #[error(transparent)]
        Render(#[from] railmap_render::Error),
    }

    pub type Result<T> = std::result::Result<T, HeadlessError>;

    /// Parses config text in the given format.
    pub fn parse_config(text: &str, format: ConfigFormat) -> Result<MapConfig> {
        Ok(MapConfig::from_str_with_format(text, format)?)
    }

    /// Synchronous layout helper: config text to the validated map and its scene.
    pub fn layout_sync(text: &str, format: ConfigFormat) -> Result<(Map, Scene)> {
        let config = parse_config(text, format)?;
        Ok(railmap_render::layout_config(&config)?)
    }

    /// Synchronous SVG render helper.
    pub fn render_svg_sync(
        text: &str,
        format: ConfigFormat,
        svg_options: &SvgRenderOptions,
    ) -> Result<String> {
        let (_, scene) = layout_sync(text, format)?;
        Ok(render_scene_svg(&scene, svg_options))
    }

    /// Bundles the input format and SVG options so callers rendering many maps pass one value.
    #[derive(Debug, Clone, Default)]
    pub struct HeadlessRenderer {
        pub format: ConfigFormat,
        pub svg: SvgRenderOptions,
    }

    impl HeadlessRenderer {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn with_format(mut self, format: ConfigFormat) -> Self {
            self.format = format;
            self
        }

        pub fn with_svg_options(mut self, svg: SvgRenderOptions) -> Self {
            self.svg = svg;
            self
        }

        pub fn parse_config(&self, text: &str) -> Result<MapConfig> {
            parse_config(text, self.format)
        }

        pub fn layout_sync(&self, text: &str) -> Result<(Map, Scene)> {
            layout_sync(text, self.format)
        }

        pub fn render_svg_sync(&self, text: &str) -> Result<String> {
            render_svg_sync(text, self.format, &self.svg)
        }

        #[cfg(feature = "raster")]
        pub fn render_png_sync(
            &self,
            text: &str,
            options: &raster::RasterOptions,
        ) -> raster::Result<Vec<u8>> {
            raster::svg_to_png(&self.render_svg_sync(text)?, options)
        }

        #[cfg(feature = "raster")]
        pub fn render_jpeg_sync(
            &self,
            text: &str,
            options: &raster::RasterOptions,
        ) -> raster::Result<Vec<u8>> {
            raster::svg_to_jpeg(&self.render_svg_sync(text)?, options)
        }

        #[cfg(feature = "raster")]
        pub fn render_pdf_sync(&self, text: &str) -> raster::Result<Vec<u8>> {
            raster::svg_to_pdf(&self.render_svg_sync(text)?)
        }
    }
}
