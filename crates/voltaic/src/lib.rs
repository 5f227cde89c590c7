//! Voltaic - Topology-aware schematic rendering for simple circuits.
//!
//! Decoding, layout, and rendering of circuit netlists. A netlist is laid out
//! by walking it from its voltage source, each component lands on an integer
//! grid cell, and the result is drawn as SVG with orthogonal wires.

pub mod config;
pub mod layout;
pub mod render;

mod error;

pub use voltaic_core::{color, draw, geometry, netlist};

pub use error::VoltaicError;

use log::{debug, info, trace, warn};

use config::AppConfig;
use layout::Layout;
use netlist::Circuit;
use render::{CircuitRenderer, SymbolSheet};

/// Builder for decoding, laying out and rendering circuit netlists.
///
/// # Examples
///
/// ```rust,no_run
/// use voltaic::{SchematicBuilder, config::AppConfig};
///
/// let source = r#"{
///     "components": [
///         {"id": "V1", "type": "voltage_source", "pins": ["+", "-"]},
///         {"id": "R1", "type": "resistor", "value": "1k", "pins": ["a", "b"]}
///     ],
///     "nets": [
///         {"id": "N1", "connections": [["V1", "+"], ["R1", "a"]]},
///         {"id": "N2", "connections": [["R1", "b"], ["V1", "-"]]}
///     ]
/// }"#;
///
/// let builder = SchematicBuilder::new(AppConfig::default());
/// let circuit = builder.parse(source).expect("Failed to parse");
/// let svg = builder.render_svg(&circuit).expect("Failed to render");
/// ```
#[derive(Debug, Default)]
pub struct SchematicBuilder {
    config: AppConfig,
}

impl SchematicBuilder {
    /// Create a new schematic builder with the given configuration.
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    /// Returns the configuration this builder renders with.
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Decode a netlist from its JSON text.
    ///
    /// Structural problems found by [`Circuit::validate`] are logged as
    /// warnings and do not fail the call; layout degrades around them.
    ///
    /// # Errors
    ///
    /// Returns [`VoltaicError::Netlist`] when the text is not a valid netlist
    /// document. The error carries the source for diagnostics.
    pub fn parse(&self, source: &str) -> Result<Circuit, VoltaicError> {
        info!("Parsing netlist");

        let circuit = Circuit::from_json(source)
            .map_err(|err| VoltaicError::new_netlist_error(err, source))?;

        for issue in circuit.validate() {
            warn!(issue:%; "Netlist issue");
        }

        debug!(
            components = circuit.components().len(),
            nets = circuit.nets().len();
            "Netlist parsed successfully"
        );
        trace!(circuit:?; "Parsed netlist");

        Ok(circuit)
    }

    /// Place every reachable component and net hub on the grid.
    pub fn layout(&self, circuit: &Circuit) -> Layout {
        layout::layout(circuit)
    }

    /// Create a renderer with the configured glyph sheet attached.
    ///
    /// A configured sheet that cannot be loaded is reported and skipped, so
    /// the drawing still renders with unresolved glyph references. Without a
    /// configured sheet the bundled one is used.
    ///
    /// # Errors
    ///
    /// Returns [`VoltaicError::Config`] for an invalid stroke or color.
    pub fn renderer(&self) -> Result<CircuitRenderer, VoltaicError> {
        let mut renderer = CircuitRenderer::new(&self.config)?;

        match self.config.symbols().sheet() {
            Some(path) => match SymbolSheet::load(path) {
                Ok(sheet) => renderer.attach_symbols(sheet),
                Err(err) => {
                    warn!(path:? = path, err:%; "Failed to load symbol sheet, rendering without glyphs");
                }
            },
            None => renderer.attach_symbols(SymbolSheet::bundled()),
        }

        Ok(renderer)
    }

    /// Lay out and render a circuit to an SVG string.
    ///
    /// # Errors
    ///
    /// Returns [`VoltaicError::Config`] for an invalid stroke or color.
    pub fn render_svg(&self, circuit: &Circuit) -> Result<String, VoltaicError> {
        let layout = self.layout(circuit);

        let mut renderer = self.renderer()?;
        renderer.render(&layout);
        let svg = renderer.to_svg_string();

        info!(bytes = svg.len(); "SVG rendered successfully");
        Ok(svg)
    }

    /// Lay out a circuit and serialize the placement as pretty JSON.
    ///
    /// # Errors
    ///
    /// Returns [`VoltaicError::Export`] if serialization fails.
    pub fn layout_json(&self, circuit: &Circuit) -> Result<String, VoltaicError> {
        let layout = self.layout(circuit);
        let json = serde_json::to_string_pretty(&layout)?;
        debug!(bytes = json.len(); "Layout serialized");
        Ok(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use config::{CanvasConfig, ComponentConfig, RoutingConfig, StyleConfig, SymbolsConfig};

    const SERIES: &str = r#"{
        "components": [
            {"id": "V1", "type": "voltage_source", "pins": ["+", "-"]},
            {"id": "R1", "type": "resistor", "value": "1k", "pins": ["a", "b"]}
        ],
        "nets": [
            {"id": "N1", "connections": [["V1", "+"], ["R1", "a"]]},
            {"id": "N2", "connections": [["R1", "b"], ["V1", "-"]]}
        ]
    }"#;

    fn config_with_sheet(path: &str) -> AppConfig {
        AppConfig::new(
            CanvasConfig::default(),
            ComponentConfig::default(),
            RoutingConfig::default(),
            StyleConfig::default(),
            SymbolsConfig::with_sheet(path),
        )
    }

    #[test]
    fn test_parse_error_keeps_source() {
        let builder = SchematicBuilder::default();
        let source = "{\"components\": [";
        match builder.parse(source) {
            Err(VoltaicError::Netlist { src, .. }) => assert_eq!(src, source),
            other => panic!("expected netlist error, got {other:?}"),
        }
    }

    #[test]
    fn test_default_renderer_uses_bundled_sheet() {
        let renderer = SchematicBuilder::default().renderer().unwrap();
        let sheet = renderer.symbols().unwrap();
        assert!(sheet.contains("#resistor"));
    }

    #[test]
    fn test_missing_sheet_is_not_fatal() {
        let builder = SchematicBuilder::new(config_with_sheet("/nonexistent/voltaic/sheet.svg"));
        let circuit = builder.parse(SERIES).unwrap();

        let renderer = builder.renderer().unwrap();
        assert!(renderer.symbols().is_none());

        let svg = builder.render_svg(&circuit).unwrap();
        assert!(svg.contains("href=\"#resistor\""));
        assert!(!svg.contains("<defs"));
    }

    #[test]
    fn test_layout_json() {
        let builder = SchematicBuilder::default();
        let circuit = builder.parse(SERIES).unwrap();
        let json: serde_json::Value =
            serde_json::from_str(&builder.layout_json(&circuit).unwrap()).unwrap();

        assert_eq!(json["components"][1]["id"], "R1");
        assert_eq!(json["components"][1]["position"]["x"], 1);
        assert_eq!(json["nets"][0]["position"]["x"], 0.5);
    }
}
