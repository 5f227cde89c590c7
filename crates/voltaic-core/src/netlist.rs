//! The netlist model: components, nets and the circuit that owns them.
//!
//! A netlist is plain data produced upstream (usually JSON):
//!
//! ```json
//! {
//!   "components": [{"id": "V1", "type": "voltage_source", "pins": ["+", "-"], "value": "5V"}],
//!   "nets": [{"id": "N1", "name": null, "connections": [["V1", "+"], ["R1", "a"]]}]
//! }
//! ```
//!
//! Positions are never part of the input; the layout engine computes them.
//! Invariant violations are reported by [`Circuit::validate`] rather than
//! rejected, so a partially broken netlist can still be drawn.

mod component;
mod graph;
mod net;
mod validate;

pub use component::{Component, ComponentKind};
pub use graph::CircuitGraph;
pub use net::{Connection, Net};
pub use validate::NetlistIssue;

use indexmap::IndexMap;
use log::debug;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Errors raised while decoding a netlist.
#[derive(Debug, Error)]
pub enum NetlistError {
    /// The input is not valid netlist JSON.
    #[error("invalid netlist JSON at line {line}, column {column}: {message}")]
    Json {
        line: usize,
        column: usize,
        message: String,
    },
}

impl From<serde_json::Error> for NetlistError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json {
            line: err.line(),
            column: err.column(),
            message: err.to_string(),
        }
    }
}

/// A complete netlist.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Circuit {
    #[serde(default)]
    components: Vec<Component>,

    #[serde(default)]
    nets: Vec<Net>,

    #[serde(flatten)]
    extra: IndexMap<String, Value>,
}

impl Circuit {
    pub fn new(components: Vec<Component>, nets: Vec<Net>) -> Self {
        Self {
            components,
            nets,
            extra: IndexMap::new(),
        }
    }

    /// Decodes a circuit from JSON.
    ///
    /// Any `position` attributes on the input are dropped: positions belong
    /// to the layout engine.
    ///
    /// # Errors
    ///
    /// Returns [`NetlistError::Json`] with the line and column of the first
    /// syntax or shape error.
    ///
    /// # Examples
    ///
    /// ```
    /// # use voltaic_core::netlist::Circuit;
    /// let circuit = Circuit::from_json(r#"{
    ///     "components": [{"id": "V1", "type": "voltage_source", "pins": ["+", "-"]}],
    ///     "nets": []
    /// }"#).unwrap();
    /// assert_eq!(circuit.components().len(), 1);
    /// ```
    pub fn from_json(source: &str) -> Result<Self, NetlistError> {
        let mut circuit: Circuit = serde_json::from_str(source)?;

        for component in &mut circuit.components {
            if component.extra_mut().shift_remove("position").is_some() {
                debug!(component = component.id(); "Ignoring input position");
            }
        }
        for net in &mut circuit.nets {
            if net.extra_mut().shift_remove("position").is_some() {
                debug!(net = net.id(); "Ignoring input position");
            }
        }

        Ok(circuit)
    }

    /// Returns the components in declaration order
    pub fn components(&self) -> &[Component] {
        &self.components
    }

    /// Returns the nets in declaration order
    pub fn nets(&self) -> &[Net] {
        &self.nets
    }

    /// Returns the top-level attributes that are not part of the model
    pub fn extra(&self) -> &IndexMap<String, Value> {
        &self.extra
    }

    /// Looks up a component by id.
    pub fn component(&self, id: &str) -> Option<&Component> {
        self.components.iter().find(|component| component.id() == id)
    }

    /// Looks up a net by id.
    pub fn net(&self, id: &str) -> Option<&Net> {
        self.nets.iter().find(|net| net.id() == id)
    }

    /// Iterates over the voltage sources, in declaration order.
    pub fn voltage_sources(&self) -> impl Iterator<Item = &Component> {
        self.components
            .iter()
            .filter(|component| component.is_voltage_source())
    }

    /// Iterates over the nets that touch the given component, in declaration order.
    pub fn nets_of<'a>(&'a self, component_id: &'a str) -> impl Iterator<Item = &'a Net> + 'a {
        self.nets.iter().filter(move |net| net.connects(component_id))
    }

    /// Checks the netlist invariants and reports every violation found.
    ///
    /// An empty result means the circuit is well formed. Issues never stop
    /// layout or rendering; they explain why a drawing may be incomplete.
    pub fn validate(&self) -> Vec<NetlistIssue> {
        validate::validate(self)
    }
}
