//! Orthogonal wire geometry.
//!
//! Routes are polylines built only from horizontal and vertical segments,
//! expressed in pixels. They are pure functions of their end points so the
//! router can compute them before anything is drawn.

use voltaic_core::geometry::Point;

/// Three-segment route: horizontal, vertical, horizontal.
///
/// The vertical segment sits at `midpoint` when given, otherwise halfway
/// between the two end points. Always yields four points, even when the
/// end points share a row and the middle segment has zero length.
///
/// # Examples
///
/// ```
/// # use voltaic::render::manhattan;
/// # use voltaic_core::geometry::Point;
/// let points = manhattan(Point::new(0.0, 10.0), Point::new(100.0, 50.0), None);
/// assert_eq!(
///     points,
///     [
///         Point::new(0.0, 10.0),
///         Point::new(50.0, 10.0),
///         Point::new(50.0, 50.0),
///         Point::new(100.0, 50.0),
///     ]
/// );
/// ```
pub fn manhattan(start: Point, end: Point, midpoint: Option<f32>) -> Vec<Point> {
    let mid_x = midpoint.unwrap_or_else(|| start.x() + (end.x() - start.x()) / 2.0);
    vec![
        start,
        Point::new(mid_x, start.y()),
        Point::new(mid_x, end.y()),
        end,
    ]
}

/// Five-segment return route from a hub around the bottom of the diagram.
///
/// Leaves `hub` to the right by `overhang`, drops to `floor_y`, runs left to
/// `overhang` short of `target`, rises to the target's row and ends on it.
pub fn closing_route(hub: Point, target: Point, floor_y: f32, overhang: f32) -> Vec<Point> {
    let out_x = hub.x() + overhang;
    let back_x = target.x() - overhang;
    vec![
        hub,
        Point::new(out_x, hub.y()),
        Point::new(out_x, floor_y),
        Point::new(back_x, floor_y),
        Point::new(back_x, target.y()),
        target,
    ]
}

/// Formats a polyline as SVG path data (`M x y L x y ...`).
pub fn path_data(points: &[Point]) -> String {
    let mut data = String::new();
    for (i, point) in points.iter().enumerate() {
        let command = if i == 0 { "M" } else { " L" };
        data.push_str(&format!("{command} {} {}", point.x(), point.y()));
    }
    data
}

/// Returns true when every segment of the polyline is horizontal or vertical.
pub fn is_orthogonal(points: &[Point]) -> bool {
    points
        .windows(2)
        .all(|pair| pair[0].x() == pair[1].x() || pair[0].y() == pair[1].y())
}
