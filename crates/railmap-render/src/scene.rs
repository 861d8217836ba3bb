use crate::Result;
use crate::track::{CellPlacement, layout_cells};
use railmap_core::geom::{self, Point};
use railmap_core::{CanvasConfig, City, Color, Connection, Map, TrackStyle};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SceneOptions {
    pub canvas: CanvasConfig,
    pub track: TrackStyle,
    pub marker_radius: f64,
    pub stroke_width: f64,
}

impl Default for SceneOptions {
    fn default() -> Self {
        Self {
            canvas: CanvasConfig::default(),
            track: TrackStyle::default(),
            marker_radius: 3.0,
            stroke_width: 1.0,
        }
    }
}

/// Rotation about a fixed point, in degrees (SVG `rotate(a, cx, cy)`).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rotation {
    pub degrees: f64,
    pub cx: f64,
    pub cy: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Shape {
    Rect {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        fill: Color,
        stroke: Color,
        stroke_width: f64,
        rotation: Rotation,
    },
    Circle {
        cx: f64,
        cy: f64,
        r: f64,
        fill: Color,
    },
    Text {
        x: f64,
        y: f64,
        text: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GroupKind {
    City,
    Connection,
}

/// Shapes that belong to one city or one connection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShapeGroup {
    pub kind: GroupKind,
    pub name: String,
    pub shapes: Vec<Shape>,
}

/// Everything needed to serialize a map, in paint order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    /// Physical width in inches.
    pub width_in: f64,
    /// Physical height in inches.
    pub height_in: f64,
    /// Width in drawing units.
    pub view_width: f64,
    /// Height in drawing units.
    pub view_height: f64,
    pub groups: Vec<ShapeGroup>,
}

impl Scene {
    pub fn shapes(&self) -> impl Iterator<Item = &Shape> {
        self.groups.iter().flat_map(|g| g.shapes.iter())
    }

    pub fn to_json_value(&self) -> Result<serde_json::Value> {
        Ok(serde_json::to_value(self)?)
    }
}

/// Builds the scene: every city (marker + label) in map order, then every connection's cells
/// in connection order.
///
/// The map is validated first, so a bad connection fails the whole scene.
pub fn build_scene(map: &Map, options: &SceneOptions) -> Result<Scene> {
    options.canvas.validate()?;
    options.track.validate()?;
    map.validate()?;

    let view = options.canvas.size_in_units();
    let mut groups = Vec::with_capacity(map.cities().len() + map.connections().len());
    for city in map.cities() {
        groups.push(city_group(city, options));
    }
    for connection in map.connections() {
        groups.push(connection_group(map, connection, options)?);
    }
    tracing::debug!(groups = groups.len(), "built scene");

    Ok(Scene {
        width_in: options.canvas.width,
        height_in: options.canvas.height,
        view_width: view.width,
        view_height: view.height,
        groups,
    })
}

fn city_group(city: &City, options: &SceneOptions) -> ShapeGroup {
    let Point { x, y, .. } = city.position;
    ShapeGroup {
        kind: GroupKind::City,
        name: city.name.clone(),
        shapes: vec![
            Shape::Circle {
                cx: x,
                cy: y,
                r: options.marker_radius,
                fill: Color::Black,
            },
            Shape::Text {
                x,
                y,
                text: city.name.clone(),
            },
        ],
    }
}

fn connection_group(
    map: &Map,
    connection: &Connection,
    options: &SceneOptions,
) -> Result<ShapeGroup> {
    let (a, b) = map.resolve_connection_endpoints(connection)?;
    let cells = layout_cells(
        connection.length,
        a.position,
        b.position,
        connection.primary,
        connection.secondary,
        &options.track,
    )?;
    Ok(ShapeGroup {
        kind: GroupKind::Connection,
        name: connection.id(),
        shapes: cells
            .iter()
            .map(|cell| cell_shape(cell, options))
            .collect(),
    })
}

fn cell_shape(cell: &CellPlacement, options: &SceneOptions) -> Shape {
    let size = options.track.cell_size();
    let corner = geom::centered_rect_corner(cell.center, size);
    Shape::Rect {
        x: corner.x,
        y: corner.y,
        width: size.width,
        height: size.height,
        fill: cell.color,
        stroke: Color::Black,
        stroke_width: options.stroke_width,
        rotation: Rotation {
            degrees: cell.rotation_degrees,
            cx: cell.center.x,
            cy: cell.center.y,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use railmap_core::geom::point;

    #[test]
    fn cell_rect_is_placed_by_its_corner_and_rotates_about_its_center() {
        let options = SceneOptions::default();
        let cell = CellPlacement {
            center: point(50.0, 20.0),
            rotation_degrees: 30.0,
            color: Color::Pink,
        };
        let Shape::Rect {
            x,
            y,
            width,
            height,
            fill,
            rotation,
            ..
        } = cell_shape(&cell, &options)
        else {
            panic!("expected a rect");
        };
        assert!((x - (50.0 - 12.7)).abs() < 1e-9);
        assert!((y - 15.0).abs() < 1e-9);
        assert_eq!((width, height), (25.4, 10.0));
        assert_eq!(fill, Color::Pink);
        assert_eq!(
            rotation,
            Rotation {
                degrees: 30.0,
                cx: 50.0,
                cy: 20.0
            }
        );
    }

    #[test]
    fn city_group_has_marker_then_label() {
        let city = City::new("Lyon", point(4.0, 5.0));
        let g = city_group(&city, &SceneOptions::default());
        assert_eq!(g.kind, GroupKind::City);
        assert_eq!(
            g.shapes,
            vec![
                Shape::Circle {
                    cx: 4.0,
                    cy: 5.0,
                    r: 3.0,
                    fill: Color::Black
                },
                Shape::Text {
                    x: 4.0,
                    y: 5.0,
                    text: "Lyon".to_string()
                },
            ]
        );
    }
}
