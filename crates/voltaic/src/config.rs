//! Configuration types for Voltaic schematic rendering.
//!
//! This module provides configuration structures that control the canvas,
//! component footprint, wire routing and styling. All types implement
//! [`serde::Deserialize`] for flexible loading from external sources; every
//! section and every field is optional and falls back to the defaults below.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level configuration combining all sections.
//! - [`CanvasConfig`] - Canvas dimensions, padding and the scale buffer.
//! - [`ComponentConfig`] - Component footprint and symbol overrides.
//! - [`RoutingConfig`] - Wire routing constants and the wire stroke.
//! - [`StyleConfig`] - Visual styling options such as background color.
//! - [`SymbolsConfig`] - Location of the glyph sheet.
//!
//! # Example
//!
//! ```
//! # use voltaic::config::AppConfig;
//! let config = AppConfig::default();
//! assert_eq!(config.canvas().width(), 1160.0);
//! assert_eq!(config.component().size(), 80.0);
//! assert!(config.style().background_color().is_ok());
//! ```

use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use serde::Deserialize;

use voltaic_core::{
    color::Color,
    draw::StrokeDefinition,
    geometry::{Insets, Size},
};

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    canvas: CanvasConfig,

    #[serde(default)]
    component: ComponentConfig,

    #[serde(default)]
    routing: RoutingConfig,

    #[serde(default)]
    style: StyleConfig,

    #[serde(default)]
    symbols: SymbolsConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] from its sections.
    pub fn new(
        canvas: CanvasConfig,
        component: ComponentConfig,
        routing: RoutingConfig,
        style: StyleConfig,
        symbols: SymbolsConfig,
    ) -> Self {
        Self {
            canvas,
            component,
            routing,
            style,
            symbols,
        }
    }

    /// Returns the canvas configuration.
    pub fn canvas(&self) -> &CanvasConfig {
        &self.canvas
    }

    /// Returns the component configuration.
    pub fn component(&self) -> &ComponentConfig {
        &self.component
    }

    /// Returns the routing configuration.
    pub fn routing(&self) -> &RoutingConfig {
        &self.routing
    }

    /// Returns the style configuration.
    pub fn style(&self) -> &StyleConfig {
        &self.style
    }

    /// Returns the symbol sheet configuration.
    pub fn symbols(&self) -> &SymbolsConfig {
        &self.symbols
    }
}

/// Padding around the drawing area, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct PaddingConfig {
    top: f32,
    right: f32,
    bottom: f32,
    left: f32,
}

impl Default for PaddingConfig {
    fn default() -> Self {
        Self {
            top: 40.0,
            right: 40.0,
            bottom: 40.0,
            left: 150.0,
        }
    }
}

impl From<PaddingConfig> for Insets {
    fn from(padding: PaddingConfig) -> Self {
        Insets::new(padding.top, padding.right, padding.bottom, padding.left)
    }
}

impl From<Insets> for PaddingConfig {
    fn from(insets: Insets) -> Self {
        Self {
            top: insets.top(),
            right: insets.right(),
            bottom: insets.bottom(),
            left: insets.left(),
        }
    }
}

/// Canvas dimensions and scale settings.
///
/// The drawable area is the canvas shrunk by the padding; the root group of
/// the document is translated by the top-left padding.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct CanvasConfig {
    width: f32,
    height: f32,
    padding: PaddingConfig,
    /// Grid units added on every side of the circuit bounds.
    buffer: f32,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            width: 1160.0,
            height: 600.0,
            padding: PaddingConfig::default(),
            buffer: 2.0,
        }
    }
}

impl CanvasConfig {
    /// Creates a canvas of the given size and padding, with the default buffer.
    pub fn new(width: f32, height: f32, padding: Insets) -> Self {
        Self {
            width,
            height,
            padding: padding.into(),
            ..Self::default()
        }
    }

    /// Sets the scale buffer in grid units (builder style).
    pub fn with_buffer(mut self, buffer: f32) -> Self {
        self.buffer = buffer;
        self
    }

    /// Returns the canvas width in pixels.
    pub fn width(&self) -> f32 {
        self.width
    }

    /// Returns the canvas height in pixels.
    pub fn height(&self) -> f32 {
        self.height
    }

    /// Returns the full canvas size.
    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Returns the padding as [`Insets`].
    pub fn padding(&self) -> Insets {
        self.padding.into()
    }

    /// Returns the drawable size: the canvas minus padding.
    pub fn inner_size(&self) -> Size {
        self.size().shrink(self.padding())
    }

    /// Returns the scale buffer in grid units.
    pub fn buffer(&self) -> f32 {
        self.buffer
    }
}

/// Component footprint and glyph lookup.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ComponentConfig {
    /// Edge length of the square footprint, in pixels.
    size: f32,
    /// Type name to fragment id, e.g. `resistor = "#my-resistor"`.
    symbols: IndexMap<String, String>,
}

impl Default for ComponentConfig {
    fn default() -> Self {
        Self {
            size: 80.0,
            symbols: IndexMap::new(),
        }
    }
}

impl ComponentConfig {
    pub fn new(size: f32) -> Self {
        Self {
            size,
            ..Self::default()
        }
    }

    /// Adds a symbol override for a component type (builder style).
    pub fn with_symbol(mut self, kind: impl Into<String>, fragment: impl Into<String>) -> Self {
        self.symbols.insert(kind.into(), fragment.into());
        self
    }

    /// Returns the footprint size in pixels.
    pub fn size(&self) -> f32 {
        self.size
    }

    /// Returns the configured symbol overrides.
    pub fn symbols(&self) -> &IndexMap<String, String> {
        &self.symbols
    }
}

/// Wire routing constants.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct RoutingConfig {
    closing_overhang: f32,
    clearance: f32,
    marker_radius: f32,
    label_offset: f32,
    wire_width: f32,
    wire_color: String,
    wire_cap: String,
    wire_join: String,
}

impl Default for RoutingConfig {
    fn default() -> Self {
        Self {
            closing_overhang: 50.0,
            clearance: 50.0,
            marker_radius: 4.0,
            label_offset: 8.0,
            wire_width: 2.0,
            wire_color: "black".to_string(),
            wire_cap: "butt".to_string(),
            wire_join: "miter".to_string(),
        }
    }
}

impl RoutingConfig {
    /// Horizontal distance the closing route keeps from the hub and the source.
    pub fn closing_overhang(&self) -> f32 {
        self.closing_overhang
    }

    /// Vertical gap between the lowest component edge and the closing route.
    pub fn clearance(&self) -> f32 {
        self.clearance
    }

    /// Radius of the dot drawn at each net hub.
    pub fn marker_radius(&self) -> f32 {
        self.marker_radius
    }

    /// Distance of the net label above its hub.
    pub fn label_offset(&self) -> f32 {
        self.label_offset
    }

    /// Sets the closing overhang (builder style).
    pub fn with_closing_overhang(mut self, overhang: f32) -> Self {
        self.closing_overhang = overhang;
        self
    }

    /// Sets the clearance below the lowest component (builder style).
    pub fn with_clearance(mut self, clearance: f32) -> Self {
        self.clearance = clearance;
        self
    }

    /// Builds the stroke used for every wire.
    ///
    /// # Errors
    ///
    /// Returns an error if the color, cap or join cannot be parsed.
    pub fn wire_stroke(&self) -> Result<StrokeDefinition, String> {
        let color = Color::new(&self.wire_color)
            .map_err(|err| format!("Invalid wire color in config: {err}"))?;

        let mut stroke = StrokeDefinition::solid(color, self.wire_width);
        stroke.set_cap(self.wire_cap.parse()?);
        stroke.set_join(self.wire_join.parse()?);
        Ok(stroke)
    }
}

/// Visual styling configuration for rendered schematics.
#[derive(Debug, Default, Clone, PartialEq, Deserialize)]
pub struct StyleConfig {
    /// Background [`Color`] for the canvas, as a color string.
    #[serde(default)]
    background_color: Option<String>,
}

impl StyleConfig {
    /// Creates a style with the given background color string.
    pub fn with_background(color: impl Into<String>) -> Self {
        Self {
            background_color: Some(color.into()),
        }
    }

    /// Returns the parsed background [`Color`], or `None` if no color is configured.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured color string cannot be parsed
    /// into a valid [`Color`].
    pub fn background_color(&self) -> Result<Option<Color>, String> {
        self.background_color
            .as_ref()
            .map(|color| Color::new(color))
            .transpose()
            .map_err(|err| format!("Invalid background color in config: {err}"))
    }
}

/// Where to find the glyph sheet.
#[derive(Debug, Default, Clone, PartialEq, Deserialize)]
pub struct SymbolsConfig {
    /// Path to an SVG file with a `<defs>` section; the bundled sheet is used when unset.
    #[serde(default)]
    sheet: Option<PathBuf>,
}

impl SymbolsConfig {
    pub fn with_sheet(path: impl Into<PathBuf>) -> Self {
        Self {
            sheet: Some(path.into()),
        }
    }

    /// Returns the configured sheet path, if any.
    pub fn sheet(&self) -> Option<&Path> {
        self.sheet.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use voltaic_core::draw::{StrokeCap, StrokeJoin};

    #[test]
    fn test_default_canvas() {
        let canvas = CanvasConfig::default();
        assert_eq!(canvas.size(), Size::new(1160.0, 600.0));
        assert_eq!(canvas.padding(), Insets::new(40.0, 40.0, 40.0, 150.0));
        assert_eq!(canvas.inner_size(), Size::new(970.0, 520.0));
        assert_eq!(canvas.buffer(), 2.0);
    }

    #[test]
    fn test_partial_sections_keep_defaults() {
        let config: AppConfig = serde_json::from_str(
            r#"{"canvas": {"width": 800, "padding": {"left": 20}}, "routing": {"clearance": 30}}"#,
        )
        .unwrap();

        assert_eq!(config.canvas().width(), 800.0);
        assert_eq!(config.canvas().height(), 600.0);
        assert_eq!(config.canvas().padding(), Insets::new(40.0, 40.0, 40.0, 20.0));
        assert_eq!(config.routing().clearance(), 30.0);
        assert_eq!(config.routing().closing_overhang(), 50.0);
        assert_eq!(config.component().size(), 80.0);
        assert!(config.symbols().sheet().is_none());
    }

    #[test]
    fn test_symbol_overrides_keep_order() {
        let config: ComponentConfig =
            serde_json::from_str(r##"{"symbols": {"resistor": "#r-us", "diode": "#d-us"}}"##)
                .unwrap();

        let keys: Vec<_> = config.symbols().keys().map(String::as_str).collect();
        assert_eq!(keys, ["resistor", "diode"]);
        assert_eq!(config.size(), 80.0);
    }

    #[test]
    fn test_wire_stroke() {
        let stroke = RoutingConfig::default().wire_stroke().unwrap();
        assert_eq!(stroke.width(), 2.0);
        assert_eq!(stroke.color().to_string(), "black");
        assert_eq!(stroke.cap(), StrokeCap::Butt);
        assert_eq!(stroke.join(), StrokeJoin::Miter);
    }

    #[test]
    fn test_wire_stroke_rejects_bad_values() {
        let routing: RoutingConfig = serde_json::from_str(r#"{"wire_color": "nope"}"#).unwrap();
        assert!(routing.wire_stroke().unwrap_err().contains("nope"));

        let routing: RoutingConfig = serde_json::from_str(r#"{"wire_cap": "pointy"}"#).unwrap();
        assert!(routing.wire_stroke().is_err());
    }

    #[test]
    fn test_background_color() {
        assert_eq!(StyleConfig::default().background_color(), Ok(None));
        assert!(
            StyleConfig::with_background("white")
                .background_color()
                .unwrap()
                .is_some()
        );
        assert!(StyleConfig::with_background("bogus").background_color().is_err());
    }
}
