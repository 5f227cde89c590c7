//! Drawing of placed components.

use log::debug;
use svg::node::element as svg_element;

use voltaic_core::{draw::Surface, geometry::Point};

use super::{ScaleManager, SymbolMap};
use crate::layout::PlacedComponent;

/// Vertical distance of the id label above the footprint.
const ID_LABEL_GAP: f32 = 5.0;
/// Vertical distance of the value label below the footprint.
const VALUE_LABEL_GAP: f32 = 5.0;

/// Draws one glyph and its labels per component.
///
/// Each component occupies a square footprint of `size` pixels centered on its
/// scaled grid position.
#[derive(Debug, Clone, Copy)]
pub struct ComponentRenderer<'a> {
    scales: &'a ScaleManager,
    symbols: &'a SymbolMap,
    size: f32,
}

impl<'a> ComponentRenderer<'a> {
    pub fn new(scales: &'a ScaleManager, symbols: &'a SymbolMap, size: f32) -> Self {
        Self {
            scales,
            symbols,
            size,
        }
    }

    /// Returns the footprint edge length in pixels.
    pub fn size(&self) -> f32 {
        self.size
    }

    /// Returns the pixel center of a component.
    pub fn center(&self, placed: &PlacedComponent) -> Point {
        self.scales.scale_point(placed.position())
    }

    /// Returns the top-left corner of a component's footprint.
    pub fn origin(&self, placed: &PlacedComponent) -> Point {
        let half = self.size / 2.0;
        let center = self.center(placed);
        Point::new(center.x() - half, center.y() - half)
    }

    /// Returns the point where a wire attaches to the component.
    ///
    /// A component that feeds a hub (`is_source`) is wired on its right edge;
    /// one that is fed by a hub is wired on its left edge.
    pub fn connection_point(&self, placed: &PlacedComponent, is_source: bool) -> Point {
        let half = self.size / 2.0;
        let offset = if is_source { half } else { -half };
        let center = self.center(placed);
        center.with_x(center.x() + offset)
    }

    /// Builds the group for a single component.
    pub fn render_component(&self, placed: &PlacedComponent) -> svg_element::Group {
        let component = placed.component();
        let origin = self.origin(placed);
        let href = self.symbols.href(component.kind());
        if href.is_empty() {
            debug!(id = component.id(), kind = component.kind().as_str(); "No glyph for component type");
        }

        let glyph = svg_element::Use::new()
            .set("href", href)
            .set("width", self.size)
            .set("height", self.size);

        let id_label = svg_element::Text::new(component.id())
            .set("x", self.size / 2.0)
            .set("y", -ID_LABEL_GAP)
            .set("text-anchor", "middle");

        let mut group = svg_element::Group::new()
            .set("class", "component")
            .set("data-id", component.id())
            .set(
                "transform",
                format!("translate({}, {})", origin.x(), origin.y()),
            )
            .add(glyph)
            .add(id_label);

        if let Some(value) = component.value() {
            group = group.add(
                svg_element::Text::new(value)
                    .set("x", self.size / 2.0)
                    .set("y", self.size + VALUE_LABEL_GAP)
                    .set("text-anchor", "middle"),
            );
        }

        group
    }

    /// Appends a `components` group holding every component, in the given order.
    ///
    /// Does not clear the surface.
    pub fn render(&self, surface: &mut Surface, components: &[PlacedComponent]) {
        let group = components.iter().fold(
            svg_element::Group::new().set("class", "components"),
            |group, placed| group.add(self.render_component(placed)),
        );
        surface.append(group);
    }
}
