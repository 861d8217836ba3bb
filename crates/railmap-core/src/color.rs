use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The fixed track palette. Names pass through untouched to the SVG `fill` attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    Grey,
    Red,
    Blue,
    Pink,
    Orange,
    Yellow,
    Black,
    White,
    Green,
}

impl Color {
    pub const ALL: [Color; 9] = [
        Color::Grey,
        Color::Red,
        Color::Blue,
        Color::Pink,
        Color::Orange,
        Color::Yellow,
        Color::Black,
        Color::White,
        Color::Green,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Color::Grey => "grey",
            Color::Red => "red",
            Color::Blue => "blue",
            Color::Pink => "pink",
            Color::Orange => "orange",
            Color::Yellow => "yellow",
            Color::Black => "black",
            Color::White => "white",
            Color::Green => "green",
        }
    }

    /// sRGB value of the SVG named color with the same name.
    pub fn rgb(self) -> [u8; 3] {
        match self {
            Color::Grey => [128, 128, 128],
            Color::Red => [255, 0, 0],
            Color::Blue => [0, 0, 255],
            Color::Pink => [255, 192, 203],
            Color::Orange => [255, 165, 0],
            Color::Yellow => [255, 255, 0],
            Color::Black => [0, 0, 0],
            Color::White => [255, 255, 255],
            Color::Green => [0, 128, 0],
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown track color: {0}")]
pub struct UnknownColor(pub String);

impl FromStr for Color {
    type Err = UnknownColor;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim().to_ascii_lowercase();
        Color::ALL
            .into_iter()
            .find(|c| c.as_str() == name)
            .ok_or_else(|| UnknownColor(s.to_string()))
    }
}
