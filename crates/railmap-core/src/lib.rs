#![forbid(unsafe_code)]

//! Rail map semantic model (headless).
//!
//! Holds everything that exists before layout: the color palette, cities and connections,
//! the map that owns them, the track cell style, and the declarative config they are built
//! from. No I/O happens here; callers pass config text in and get a validated [`Map`] out.

pub mod color;
pub mod config;
pub mod error;
pub mod geom;
pub mod model;
pub mod style;

pub use color::Color;
pub use config::{CanvasConfig, CityConfig, ConfigFormat, ConnectionConfig, MapConfig, SourceSpace};
pub use error::{Error, Result};
pub use model::{City, Connection, MAX_TRACK_LENGTH, Map};
pub use style::TrackStyle;
