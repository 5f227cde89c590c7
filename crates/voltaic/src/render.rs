//! Rendering of laid-out circuits to SVG.
//!
//! The [`CircuitRenderer`] owns the drawing [`Surface`] and the
//! [`ScaleManager`]. Each render is a full redraw: the surface is cleared,
//! the scales are fitted to the new layout, then the [`ComponentRenderer`]
//! and the [`NetRouter`] append their groups in that order. Sub-renderers
//! borrow the scales and the surface for the duration of one stage only.
//!
//! # Example
//!
//! ```
//! # use voltaic::{config::AppConfig, layout::layout, render::CircuitRenderer};
//! # use voltaic_core::netlist::Circuit;
//! let circuit = Circuit::from_json(r#"{
//!     "components": [
//!         {"id": "V1", "type": "voltage_source", "pins": ["+", "-"]},
//!         {"id": "R1", "type": "resistor", "pins": ["a", "b"]}
//!     ],
//!     "nets": [
//!         {"id": "N1", "connections": [["V1", "+"], ["R1", "a"]]},
//!         {"id": "N2", "connections": [["R1", "b"], ["V1", "-"]]}
//!     ]
//! }"#).unwrap();
//!
//! let mut renderer = CircuitRenderer::new(&AppConfig::default()).unwrap();
//! renderer.render(&layout(&circuit));
//! assert!(renderer.to_svg_string().contains("id=\"circuit\""));
//! ```

mod component;
mod net;
mod route;
mod scale;
mod symbols;

pub use component::ComponentRenderer;
pub use net::{NetRouter, NetRoutes, Route, RouteKind};
pub use route::{closing_route, is_orthogonal, manhattan, path_data};
pub use scale::{CircuitBounds, Extent, LinearScale, ScaleManager};
pub use symbols::{SymbolError, SymbolMap, SymbolSheet};

use log::{debug, info};
use svg::{Document, node::element as svg_element};

use voltaic_core::{color::Color, draw::StrokeDefinition, draw::Surface};

use crate::{
    config::{AppConfig, CanvasConfig, RoutingConfig},
    error::VoltaicError,
    layout::Layout,
};

/// Orchestrates one schematic drawing.
///
/// `clear` and `render` form a two-phase contract; `render` always clears
/// first, so rendering the same layout twice yields identical output.
#[derive(Debug)]
pub struct CircuitRenderer {
    canvas: CanvasConfig,
    routing: RoutingConfig,
    component_size: f32,
    stroke: StrokeDefinition,
    background: Option<Color>,
    symbol_map: SymbolMap,
    scales: ScaleManager,
    symbols: Option<SymbolSheet>,
    surface: Surface,
}

impl CircuitRenderer {
    /// Creates a renderer with an empty surface and default scale domains.
    ///
    /// # Errors
    ///
    /// Returns [`VoltaicError::Config`] if the wire stroke or background
    /// color in the configuration cannot be parsed.
    pub fn new(config: &AppConfig) -> Result<Self, VoltaicError> {
        let stroke = config.routing().wire_stroke().map_err(VoltaicError::Config)?;
        let background = config
            .style()
            .background_color()
            .map_err(VoltaicError::Config)?;

        Ok(Self {
            canvas: config.canvas().clone(),
            routing: config.routing().clone(),
            component_size: config.component().size(),
            stroke,
            background,
            symbol_map: SymbolMap::with_overrides(config.component().symbols()),
            scales: ScaleManager::new(config.canvas()),
            symbols: None,
            surface: Surface::new(),
        })
    }

    /// Attaches the glyph definitions.
    ///
    /// May be called before or after rendering; the definitions are written
    /// when the document is exported. A later sheet replaces an earlier one.
    pub fn attach_symbols(&mut self, sheet: SymbolSheet) {
        debug!(symbols = sheet.ids().len(); "Symbol sheet attached");
        self.symbols = Some(sheet);
    }

    /// Returns the attached glyph sheet, if any.
    pub fn symbols(&self) -> Option<&SymbolSheet> {
        self.symbols.as_ref()
    }

    /// Removes everything drawn so far.
    pub fn clear(&mut self) {
        self.surface.clear();
    }

    /// Redraws the surface for a new layout.
    pub fn render(&mut self, layout: &Layout) {
        info!(
            components = layout.components().len(),
            nets = layout.nets().len();
            "Rendering circuit"
        );

        self.clear();
        self.scales.update_scales_to_circuit(layout);

        let components =
            ComponentRenderer::new(&self.scales, &self.symbol_map, self.component_size);
        components.render(&mut self.surface, layout.components());

        let router = NetRouter::new(&self.scales, components, &self.routing, &self.stroke);
        router.render(&mut self.surface, layout);

        debug!(nodes = self.surface.len(); "Circuit rendered");
    }

    /// Returns the drawing surface.
    pub fn surface(&self) -> &Surface {
        &self.surface
    }

    /// Returns the scales fitted by the last render.
    pub fn scales(&self) -> &ScaleManager {
        &self.scales
    }

    /// Returns the symbol lookup used for component glyphs.
    pub fn symbol_map(&self) -> &SymbolMap {
        &self.symbol_map
    }

    /// Builds the complete SVG document.
    ///
    /// The drawing sits in a `<g id="circuit">` translated by the top-left
    /// padding, after the glyph definitions and the optional background.
    pub fn to_document(&self) -> Document {
        let width = self.canvas.width();
        let height = self.canvas.height();
        let padding = self.canvas.padding();

        let mut doc = Document::new()
            .set("viewBox", format!("0 0 {width} {height}"))
            .set("width", width)
            .set("height", height);

        if let Some(sheet) = &self.symbols {
            doc = doc.add(sheet.to_definitions());
        }

        if let Some(color) = &self.background {
            doc = doc.add(
                svg_element::Rectangle::new()
                    .set("x", 0)
                    .set("y", 0)
                    .set("width", width)
                    .set("height", height)
                    .set("fill", color),
            );
        }

        let root = self
            .surface
            .to_group()
            .set("id", "circuit")
            .set(
                "transform",
                format!("translate({}, {})", padding.left(), padding.top()),
            );

        doc.add(root)
    }

    /// Serializes the document to an SVG string.
    pub fn to_svg_string(&self) -> String {
        self.to_document().to_string()
    }
}
