//! Text elements: node names, capacity labels and the title.

use svg::node::{
    Text as SvgText,
    element::{Group, Rectangle, Text},
};

use flowplot_core::{
    color::Color,
    geometry::{Insets, Point},
    text::TextDefinition,
};

/// Padding between a capacity label and its background box.
const LABEL_PADDING: f32 = 2.0;

/// Creates a single-line text element centered on `position`.
pub fn create_text(content: &str, definition: &TextDefinition, position: Point) -> Text {
    Text::new("")
        .set("x", position.x())
        .set("y", position.y())
        .set("text-anchor", "middle")
        .set("dominant-baseline", "central")
        .set("font-family", definition.font_family())
        .set("font-size", definition.font_size())
        .set("font-weight", definition.font_weight())
        .add(SvgText::new(content))
}

/// Creates a label, optionally on a rounded background box.
pub fn create_label(
    content: &str,
    definition: &TextDefinition,
    position: Point,
    background: Option<Color>,
) -> Group {
    let mut group = Group::new().set("class", "edge-label");

    if let Some(color) = background {
        let bounds = position
            .to_bounds(definition.measure(content))
            .add_padding(Insets::uniform(LABEL_PADDING));
        let min_point = bounds.min_point();

        let rect = Rectangle::new()
            .set("x", min_point.x())
            .set("y", min_point.y())
            .set("width", bounds.width())
            .set("height", bounds.height())
            .set("fill", color.to_string())
            .set("fill-opacity", color.alpha())
            .set("rx", 3.0);
        group = group.add(rect);
    }

    group.add(create_text(content, definition, position))
}
