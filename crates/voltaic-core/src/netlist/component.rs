//! Circuit components and their kinds.

use std::{convert::Infallible, fmt, str::FromStr};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The electrical kind of a component, as named by the `type` field.
///
/// Kinds the renderer has no glyph for still deserialize, as [`ComponentKind::Other`].
///
/// # Examples
///
/// ```
/// # use voltaic_core::netlist::ComponentKind;
/// let kind: ComponentKind = "voltage_source".parse().unwrap();
/// assert_eq!(kind, ComponentKind::VoltageSource);
///
/// let kind: ComponentKind = "transformer".parse().unwrap();
/// assert_eq!(kind, ComponentKind::Other("transformer".to_string()));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ComponentKind {
    Resistor,
    VoltageSource,
    Diode,
    Inductor,
    Capacitor,
    CurrentSource,
    Ground,
    /// Any other `type` string, kept verbatim.
    Other(String),
}

impl ComponentKind {
    /// Returns the wire name of this kind (the `type` string).
    pub fn as_str(&self) -> &str {
        match self {
            Self::Resistor => "resistor",
            Self::VoltageSource => "voltage_source",
            Self::Diode => "diode",
            Self::Inductor => "inductor",
            Self::Capacitor => "capacitor",
            Self::CurrentSource => "current_source",
            Self::Ground => "ground",
            Self::Other(name) => name,
        }
    }
}

impl FromStr for ComponentKind {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "resistor" => Self::Resistor,
            "voltage_source" => Self::VoltageSource,
            "diode" => Self::Diode,
            "inductor" => Self::Inductor,
            "capacitor" => Self::Capacitor,
            "current_source" => Self::CurrentSource,
            "ground" => Self::Ground,
            other => Self::Other(other.to_string()),
        })
    }
}

impl From<String> for ComponentKind {
    fn from(value: String) -> Self {
        match value.parse() {
            Ok(kind) => kind,
            Err(never) => match never {},
        }
    }
}

impl From<ComponentKind> for String {
    fn from(kind: ComponentKind) -> Self {
        kind.as_str().to_string()
    }
}

impl fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single circuit element with named pins.
///
/// Keys the model does not know about are preserved in [`Component::extra`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Component {
    id: String,

    #[serde(rename = "type")]
    kind: ComponentKind,

    #[serde(default)]
    pins: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    value: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    name: Option<String>,

    #[serde(flatten)]
    extra: IndexMap<String, Value>,
}

impl Component {
    /// Creates a component with no pins, value or name.
    pub fn new(id: impl Into<String>, kind: ComponentKind) -> Self {
        Self {
            id: id.into(),
            kind,
            pins: Vec::new(),
            value: None,
            name: None,
            extra: IndexMap::new(),
        }
    }

    /// Sets the declared pin names (builder style).
    pub fn with_pins<I, S>(mut self, pins: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.pins = pins.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the value annotation, e.g. `"1k"` (builder style).
    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    /// Returns the unique id of the component
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Returns the component kind
    pub fn kind(&self) -> &ComponentKind {
        &self.kind
    }

    /// Returns the declared pin names, in declaration order
    pub fn pins(&self) -> &[String] {
        &self.pins
    }

    /// Returns the value annotation, if any
    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }

    /// Returns the human-readable name, if any
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Returns the attributes that are not part of the model
    pub fn extra(&self) -> &IndexMap<String, Value> {
        &self.extra
    }

    pub(crate) fn extra_mut(&mut self) -> &mut IndexMap<String, Value> {
        &mut self.extra
    }

    /// Returns true if this component is a voltage source.
    pub fn is_voltage_source(&self) -> bool {
        self.kind == ComponentKind::VoltageSource
    }

    /// Returns true if the component declares a pin with this name.
    ///
    /// Components that declare no pins accept any pin name.
    pub fn has_pin(&self, pin: &str) -> bool {
        self.pins.is_empty() || self.pins.iter().any(|p| p == pin)
    }

    /// The positive terminal: the pin named `+`, otherwise the first declared pin.
    pub fn positive_pin(&self) -> Option<&str> {
        self.pins
            .iter()
            .find(|pin| *pin == "+")
            .or_else(|| self.pins.first())
            .map(String::as_str)
    }

    /// The negative terminal: the pin named `-`, otherwise the second declared pin.
    pub fn negative_pin(&self) -> Option<&str> {
        self.pins
            .iter()
            .find(|pin| *pin == "-")
            .or_else(|| self.pins.get(1))
            .map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_round_trips_through_string() {
        for name in ["resistor", "voltage_source", "diode", "ground", "opamp"] {
            let kind = ComponentKind::from(name.to_string());
            assert_eq!(String::from(kind), name);
        }
    }

    #[test]
    fn test_component_deserialize_keeps_extra_attributes() {
        let json = r#"{"id": "R1", "type": "resistor", "pins": ["a", "b"], "value": "1k", "tolerance": "5%"}"#;
        let component: Component = serde_json::from_str(json).unwrap();

        assert_eq!(component.id(), "R1");
        assert_eq!(component.kind(), &ComponentKind::Resistor);
        assert_eq!(component.pins(), ["a", "b"]);
        assert_eq!(component.value(), Some("1k"));
        assert_eq!(component.extra().get("tolerance"), Some(&Value::from("5%")));
    }

    #[test]
    fn test_component_pins_and_value_are_optional() {
        let component: Component =
            serde_json::from_str(r#"{"id": "D1", "type": "diode"}"#).unwrap();
        assert!(component.pins().is_empty());
        assert_eq!(component.value(), None);
        assert!(component.has_pin("anything"));
    }

    #[test]
    fn test_source_terminals_by_name() {
        let source = Component::new("V1", ComponentKind::VoltageSource).with_pins(["-", "+"]);
        assert_eq!(source.positive_pin(), Some("+"));
        assert_eq!(source.negative_pin(), Some("-"));
    }

    #[test]
    fn test_source_terminals_by_position() {
        let source = Component::new("V1", ComponentKind::VoltageSource).with_pins(["p", "n"]);
        assert_eq!(source.positive_pin(), Some("p"));
        assert_eq!(source.negative_pin(), Some("n"));

        let bare = Component::new("V2", ComponentKind::VoltageSource);
        assert_eq!(bare.positive_pin(), None);
        assert_eq!(bare.negative_pin(), None);
    }

    #[test]
    fn test_has_pin_checks_declared_pins() {
        let resistor = Component::new("R1", ComponentKind::Resistor).with_pins(["a", "b"]);
        assert!(resistor.has_pin("a"));
        assert!(!resistor.has_pin("c"));
    }
}
