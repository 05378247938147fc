//! Edge paths and arrowhead markers.
//!
//! All functions work in canvas coordinates (y grows downward). Paths start
//! and end on the node circles rather than at their centers, so the
//! arrowhead tip touches the target outline.

use svg::node::element::{Definitions, Marker, Path};

use flowplot_core::{color::Color, geometry::Point};

/// Bulge of a curved edge relative to its length.
const CURVE_BEND: f32 = 0.2;

/// Creates the arrowhead marker for edges of `color`.
pub fn create_marker_definitions(color: Color) -> Definitions {
    let arrow = Marker::new()
        .set("id", marker_id(color))
        .set("viewBox", "0 0 10 10")
        .set("refX", 10)
        .set("refY", 5)
        .set("markerWidth", 6)
        .set("markerHeight", 6)
        .set("orient", "auto")
        .add(
            Path::new()
                .set("d", "M 0 0 L 10 5 L 0 10 z")
                .set("fill", color.to_string()),
        );

    Definitions::new().add(arrow)
}

fn marker_id(color: Color) -> String {
    format!("arrow-right-{}", color.to_id_safe_string())
}

/// Geometry of a drawn edge.
#[derive(Debug, Clone, PartialEq)]
pub struct EdgeShape {
    data: String,
    bend: Point,
}

impl EdgeShape {
    /// Returns the SVG path data.
    pub fn data(&self) -> &str {
        &self.data
    }

    /// Offset of the curve's middle from its chord.
    ///
    /// Zero for straight edges; for loops it points just above the apex.
    pub fn bend(&self) -> Point {
        self.bend
    }
}

/// Straight edge between two circles of `radius`.
pub fn straight_edge(from: Point, to: Point, radius: f32) -> EdgeShape {
    let start = from.move_toward(to, radius);
    let end = to.move_toward(from, radius);

    EdgeShape {
        data: format!("M {} {} L {} {}", start.x(), start.y(), end.x(), end.y()),
        bend: Point::default(),
    }
}

/// Arc bending to the left of the travel direction.
///
/// An edge and its reverse bend to opposite sides, so both stay visible.
pub fn curved_edge(from: Point, to: Point, radius: f32) -> EdgeShape {
    let delta = to.sub_point(from);
    // Left-hand normal scaled to the bend; y points down on the canvas
    let normal = Point::new(delta.y(), -delta.x()).scale(CURVE_BEND);
    let control = from.midpoint(to).add_point(normal.scale(2.0));

    let start = from.move_toward(control, radius);
    let end = to.move_toward(control, radius);

    EdgeShape {
        data: format!(
            "M {} {} Q {} {}, {} {}",
            start.x(),
            start.y(),
            control.x(),
            control.y(),
            end.x(),
            end.y()
        ),
        // A quadratic curve passes halfway between the chord and its control point
        bend: normal,
    }
}

/// Loop above a node, leaving and re-entering its top.
pub fn self_loop(center: Point, radius: f32) -> EdgeShape {
    let (dx, dy) = (radius * 0.5, radius * 0.866);
    let height = loop_height(radius);
    let start = Point::new(center.x() - dx, center.y() - dy);
    let end = Point::new(center.x() + dx, center.y() - dy);

    EdgeShape {
        data: format!(
            "M {} {} C {} {}, {} {}, {} {}",
            start.x(),
            start.y(),
            center.x() - radius * 1.2,
            center.y() - height,
            center.x() + radius * 1.2,
            center.y() - height,
            end.x(),
            end.y()
        ),
        bend: Point::new(0.0, -height),
    }
}

/// Height of a self-loop's control points above the node center.
pub fn loop_height(radius: f32) -> f32 {
    radius * 2.4
}

/// Creates the path element for an edge.
pub fn create_path(shape: &EdgeShape, color: Color, width: f32) -> Path {
    Path::new()
        .set("d", shape.data())
        .set("fill", "none")
        .set("stroke", color.to_string())
        .set("stroke-width", width)
        .set("marker-end", format!("url(#{})", marker_id(color)))
}
