//! Track cell layout: turns one connection into positioned, rotated unit cells.
//!
//! Cells of a single track are centered on the segment midpoint and spread outward one pitch
//! at a time. An odd track has a cell exactly on the midpoint; an even track straddles it with
//! its two innermost cells at half a pitch. After the innermost cell(s), cells are added in
//! pairs: one step toward `start`, then one step toward `end`.
//!
//! A dual-color connection is two single tracks shifted half a track gap to either side of the
//! centerline, primary color on the screen-up side.

use crate::Result;
use railmap_core::geom::{self, Point};
use railmap_core::{Color, Error as CoreError, MAX_TRACK_LENGTH, TrackStyle};
use serde::{Deserialize, Serialize};

/// One laid-out cell.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CellPlacement {
    pub center: Point,
    pub rotation_degrees: f64,
    pub color: Color,
}

/// Lays out `length` cells between `start` and `end`, twice over when `secondary` is set.
///
/// `length` must lie in `1..=MAX_TRACK_LENGTH`.
///
/// Output order is the paint order: the primary track before the secondary one, and within a
/// track the innermost cell(s) first.
pub fn layout_cells(
    length: i64,
    start: Point,
    end: Point,
    primary: Color,
    secondary: Option<Color>,
    style: &TrackStyle,
) -> Result<Vec<CellPlacement>> {
    style.validate()?;
    if !(1..=MAX_TRACK_LENGTH).contains(&length) {
        return Err(CoreError::InvalidLength { length }.into());
    }
    if start == end || !geom::is_finite(start) || !geom::is_finite(end) {
        return Err(CoreError::DegenerateSegment {
            x: start.x,
            y: start.y,
        }
        .into());
    }
    let count = usize::try_from(length).map_err(|_| CoreError::InvalidLength { length })?;
    let tracks = if secondary.is_some() { 2 } else { 1 };
    let total = count
        .checked_mul(tracks)
        .ok_or(CoreError::InvalidLength { length })?;
    let rotation = geom::angle(start, end);

    let mut out = Vec::with_capacity(total);
    place_track(&mut out, count, start, end, rotation, primary, secondary, style);
    tracing::debug!(
        length,
        cells = out.len(),
        rotation_degrees = geom::to_degrees(rotation),
        "laid out track"
    );
    Ok(out)
}

/// Recursion is at most one level deep: a dual track splits into two single tracks.
#[allow(clippy::too_many_arguments)]
fn place_track(
    out: &mut Vec<CellPlacement>,
    count: usize,
    start: Point,
    end: Point,
    rotation: f64,
    primary: Color,
    secondary: Option<Color>,
    style: &TrackStyle,
) {
    if let Some(secondary) = secondary {
        let offset = geom::perpendicular_offset(rotation, style.track_gap() / 2.0);
        place_track(
            out,
            count,
            start + offset,
            end + offset,
            rotation,
            primary,
            None,
            style,
        );
        place_track(
            out,
            count,
            start - offset,
            end - offset,
            rotation,
            secondary,
            None,
            style,
        );
        return;
    }

    let center = geom::midpoint(start, end);
    let direction = geom::direction(rotation);
    let rotation_degrees = geom::to_degrees(rotation);
    for steps in pitch_multiples(count) {
        let at = center + direction * (steps * style.pitch());
        tracing::trace!(x = at.x, y = at.y, %primary, "cell");
        out.push(CellPlacement {
            center: at,
            rotation_degrees,
            color: primary,
        });
    }
}

/// Signed distances from the midpoint, in pitches, in placement order.
///
/// Negative values lie toward `start`. Every value is an exact multiple of one half, so the set
/// is exactly symmetric about zero.
pub fn pitch_multiples(count: usize) -> Vec<f64> {
    let mut out = Vec::with_capacity(count);
    let mut next = if count % 2 == 1 {
        out.push(0.0);
        1.0
    } else {
        if count > 0 {
            out.push(0.5);
            out.push(-0.5);
        }
        1.5
    };
    while out.len() < count {
        out.push(-next);
        out.push(next);
        next += 1.0;
    }
    out
}
