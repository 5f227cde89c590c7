//! Nets and the pin connections they join.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One `(component, pin)` membership of a net.
///
/// Producers write connections either as a pair `["R1", "a"]` or as an
/// object `{"component": "R1", "pin": "a"}`; both are accepted. Connections
/// are always written back as pairs.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "ConnectionRepr", into = "(String, String)")]
pub struct Connection {
    component: String,
    pin: String,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ConnectionRepr {
    Pair(String, String),
    Object { component: String, pin: String },
}

impl From<ConnectionRepr> for Connection {
    fn from(repr: ConnectionRepr) -> Self {
        match repr {
            ConnectionRepr::Pair(component, pin) | ConnectionRepr::Object { component, pin } => {
                Self { component, pin }
            }
        }
    }
}

impl From<Connection> for (String, String) {
    fn from(connection: Connection) -> Self {
        (connection.component, connection.pin)
    }
}

impl Connection {
    pub fn new(component: impl Into<String>, pin: impl Into<String>) -> Self {
        Self {
            component: component.into(),
            pin: pin.into(),
        }
    }

    /// Returns the id of the connected component
    pub fn component(&self) -> &str {
        &self.component
    }

    /// Returns the name of the connected pin
    pub fn pin(&self) -> &str {
        &self.pin
    }
}

/// A single electrical node: the set of pins wired together.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Net {
    id: String,

    #[serde(default)]
    name: Option<String>,

    #[serde(default)]
    connections: Vec<Connection>,

    #[serde(flatten)]
    extra: IndexMap<String, Value>,
}

impl Net {
    /// Creates a net from its connections, in order.
    pub fn new<I>(id: impl Into<String>, connections: I) -> Self
    where
        I: IntoIterator<Item = Connection>,
    {
        Self {
            id: id.into(),
            name: None,
            connections: connections.into_iter().collect(),
            extra: IndexMap::new(),
        }
    }

    /// Sets the human-readable net name (builder style).
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Returns the unique id of the net
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Returns the net name, if any
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Returns the connections in declaration order
    pub fn connections(&self) -> &[Connection] {
        &self.connections
    }

    /// Returns the attributes that are not part of the model
    pub fn extra(&self) -> &IndexMap<String, Value> {
        &self.extra
    }

    pub(crate) fn extra_mut(&mut self) -> &mut IndexMap<String, Value> {
        &mut self.extra
    }

    /// Returns true if any pin of the given component is on this net.
    pub fn connects(&self, component_id: &str) -> bool {
        self.connections
            .iter()
            .any(|connection| connection.component == component_id)
    }

    /// Returns true if exactly this pin of the component is on this net.
    pub fn connects_pin(&self, component_id: &str, pin: &str) -> bool {
        self.connections
            .iter()
            .any(|connection| connection.component == component_id && connection.pin == pin)
    }
}
