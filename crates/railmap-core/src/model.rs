use crate::color::Color;
use crate::error::{Error, Result};
use crate::geom::{self, Point};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct City {
    pub name: String,
    pub position: Point,
}

impl City {
    pub fn new(name: impl Into<String>, position: Point) -> Self {
        Self {
            name: name.into(),
            position,
        }
    }
}

/// A track between two cities, referenced by name and resolved at render time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Connection {
    pub city_a: String,
    pub city_b: String,
    /// Number of cells. Kept signed so that bad input reaches validation instead of the parser.
    pub length: i64,
    pub primary: Color,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secondary: Option<Color>,
}

impl Connection {
    pub fn new(
        city_a: impl Into<String>,
        city_b: impl Into<String>,
        length: i64,
        primary: Color,
    ) -> Self {
        Self {
            city_a: city_a.into(),
            city_b: city_b.into(),
            length,
            primary,
            secondary: None,
        }
    }

    pub fn with_secondary(mut self, color: Color) -> Self {
        self.secondary = Some(color);
        self
    }

    /// Stable identifier derived from both endpoint names.
    pub fn id(&self) -> String {
        format!("{}--{}", self.city_a, self.city_b)
    }

    pub fn is_dual(&self) -> bool {
        self.secondary.is_some()
    }
}

/// Upper bound on cells per connection; larger lengths are rejected as invalid.
pub const MAX_TRACK_LENGTH: i64 = 100_000;

/// Cities keyed by name (insertion ordered) plus connections in draw order.
#[derive(Debug, Clone, Default)]
pub struct Map {
    cities: IndexMap<String, City>,
    connections: Vec<Connection>,
}

impl Map {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_city(&mut self, city: City) -> Result<()> {
        if !geom::is_finite(city.position) {
            return Err(Error::NonFinitePosition {
                x: city.position.x,
                y: city.position.y,
                name: city.name,
            });
        }
        if self.cities.contains_key(&city.name) {
            return Err(Error::DuplicateCity { name: city.name });
        }
        self.cities.insert(city.name.clone(), city);
        Ok(())
    }

    /// Appends without checking the referenced names; see [`Map::resolve_connection_endpoints`].
    pub fn add_connection(&mut self, connection: Connection) {
        self.connections.push(connection);
    }

    pub fn city(&self, name: &str) -> Option<&City> {
        self.cities.get(name)
    }

    pub fn cities(&self) -> impl ExactSizeIterator<Item = &City> {
        self.cities.values()
    }

    pub fn connections(&self) -> &[Connection] {
        &self.connections
    }

    pub fn resolve_connection_endpoints(&self, connection: &Connection) -> Result<(&City, &City)> {
        let lookup = |name: &str| {
            self.cities
                .get(name)
                .ok_or_else(|| Error::DanglingReference {
                    connection: connection.id(),
                    city: name.to_string(),
                })
        };
        let a = lookup(&connection.city_a)?;
        let b = lookup(&connection.city_b)?;
        if a.name == b.name {
            return Err(Error::SelfLoop {
                connection: connection.id(),
            });
        }
        Ok((a, b))
    }

    /// Checks every connection up front so a render either completes or does not start.
    pub fn validate(&self) -> Result<()> {
        for c in &self.connections {
            self.resolve_connection_endpoints(c)?;
            if !(1..=MAX_TRACK_LENGTH).contains(&c.length) {
                return Err(Error::InvalidLength { length: c.length });
            }
        }
        Ok(())
    }
}
