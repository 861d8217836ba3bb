#![forbid(unsafe_code)]

//! 2D helpers shared by the layout and scene code.
//!
//! Angles are radians everywhere except at the SVG boundary, which goes through [`to_degrees`].

pub type Unit = euclid::UnknownUnit;

pub type Point = euclid::Point2D<f64, Unit>;
pub type Vector = euclid::Vector2D<f64, Unit>;
pub type Size = euclid::Size2D<f64, Unit>;

pub fn point(x: f64, y: f64) -> Point {
    euclid::point2(x, y)
}

pub fn vector(x: f64, y: f64) -> Vector {
    euclid::vec2(x, y)
}

pub fn size(width: f64, height: f64) -> Size {
    euclid::size2(width, height)
}

/// Symmetric in its arguments: `midpoint(a, b) == midpoint(b, a)` bit for bit.
pub fn midpoint(a: Point, b: Point) -> Point {
    point((a.x + b.x) * 0.5, (a.y + b.y) * 0.5)
}

/// Direction of the vector `a -> b`, in radians, over all four quadrants.
pub fn angle(a: Point, b: Point) -> f64 {
    (b.y - a.y).atan2(b.x - a.x)
}

/// Unit vector pointing along `angle`.
pub fn direction(angle: f64) -> Vector {
    let (sin, cos) = angle.sin_cos();
    vector(cos, sin)
}

/// A vector of length `distance`, perpendicular to `angle`.
///
/// In y-down canvas space the result points to the screen-up side of the direction of travel:
/// a left-to-right segment gets an offset of `(0, -distance)`.
pub fn perpendicular_offset(angle: f64, distance: f64) -> Vector {
    let (sin, cos) = angle.sin_cos();
    vector(distance * sin, -distance * cos)
}

/// Top-left corner of a rectangle of `size` centered on `center`.
pub fn centered_rect_corner(center: Point, size: Size) -> Point {
    point(center.x - size.width / 2.0, center.y - size.height / 2.0)
}

/// Center of a rectangle of `size` whose top-left corner is `corner`.
pub fn rect_center(corner: Point, size: Size) -> Point {
    point(corner.x + size.width / 2.0, corner.y + size.height / 2.0)
}

pub fn to_degrees(radians: f64) -> f64 {
    radians.to_degrees()
}

pub fn is_finite(p: Point) -> bool {
    p.x.is_finite() && p.y.is_finite()
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-12;

    #[test]
    fn midpoint_is_halfway() {
        let m = midpoint(point(0.0, 0.0), point(100.0, -40.0));
        assert_eq!(m, point(50.0, -20.0));
        let (a, b) = (point(0.1, 0.7), point(3.3, -2.9));
        assert_eq!(midpoint(a, b), midpoint(b, a));
    }

    #[test]
    fn angle_distinguishes_all_quadrants() {
        let o = point(0.0, 0.0);
        assert!((angle(o, point(1.0, 0.0)) - 0.0).abs() < EPS);
        assert!((angle(o, point(0.0, 1.0)) - std::f64::consts::FRAC_PI_2).abs() < EPS);
        assert!((angle(o, point(-1.0, 0.0)) - std::f64::consts::PI).abs() < EPS);
        assert!((angle(o, point(0.0, -1.0)) + std::f64::consts::FRAC_PI_2).abs() < EPS);
        assert!((angle(o, point(-1.0, -1.0)) + 3.0 * std::f64::consts::FRAC_PI_4).abs() < EPS);
    }

    #[test]
    fn perpendicular_offset_is_orthogonal_and_sized() {
        for deg in [0.0_f64, 30.0, 90.0, 135.0, -60.0, 180.0] {
            let a = deg.to_radians();
            let off = perpendicular_offset(a, 6.0);
            assert!((off.length() - 6.0).abs() < 1e-9, "length at {deg}");
            assert!(off.dot(direction(a)).abs() < 1e-9, "orthogonal at {deg}");
        }
        let off = perpendicular_offset(0.0, 6.0);
        assert!(off.x.abs() < EPS);
        assert!((off.y + 6.0).abs() < EPS);
    }

    #[test]
    fn rect_corner_and_center_round_trip() {
        let s = size(25.4, 10.0);
        let corner = centered_rect_corner(point(50.0, 20.0), s);
        assert!((corner.x - 37.3).abs() < 1e-9);
        assert!((corner.y - 15.0).abs() < 1e-9);
        let back = rect_center(corner, s);
        assert!((back.x - 50.0).abs() < 1e-9);
        assert!((back.y - 20.0).abs() < 1e-9);
    }

    #[test]
    fn degrees_boundary_is_exact_for_right_angles() {
        assert_eq!(to_degrees(0.0), 0.0);
        assert!((to_degrees(std::f64::consts::FRAC_PI_2) - 90.0).abs() < 1e-12);
        assert!((to_degrees(std::f64::consts::PI) - 180.0).abs() < 1e-12);
    }
}
