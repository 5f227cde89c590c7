//! Layout engine: netlist to grid positions.
//!
//! [`layout`] is a pure function of the circuit. It places the voltage source
//! at the grid origin and walks the nets outward (see the `walk` module),
//! then gives every net a hub: the synthetic waypoint its wires converge on.
//!
//! The engine never fails. Circuits it cannot fully lay out produce a partial
//! [`Layout`] together with the [`LayoutWarning`]s that explain where the walk
//! stopped.
//!
//! # Example
//!
//! ```
//! # use voltaic::layout::layout;
//! # use voltaic_core::{geometry::GridPoint, netlist::Circuit};
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
//! let layout = layout(&circuit);
//! assert_eq!(layout.position_of("R1"), Some(GridPoint::new(1, 0)));
//! assert_eq!(layout.closing().map(|link| link.net_id()), Some("N2"));
//! ```

mod walk;
mod warning;

pub use warning::LayoutWarning;

use log::{debug, info};
use serde::Serialize;

use voltaic_core::{
    geometry::{GridPoint, Point},
    netlist::{Circuit, Component, Net},
};

/// A component with its grid position.
///
/// Serializes as the component's own fields plus `position`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlacedComponent {
    #[serde(flatten)]
    component: Component,
    position: GridPoint,
}

impl PlacedComponent {
    pub fn new(component: Component, position: GridPoint) -> Self {
        Self {
            component,
            position,
        }
    }

    pub fn component(&self) -> &Component {
        &self.component
    }

    pub fn id(&self) -> &str {
        self.component.id()
    }

    pub fn position(&self) -> GridPoint {
        self.position
    }
}

/// A net with its hub position, in grid units.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlacedNet {
    #[serde(flatten)]
    net: Net,
    position: Point,
}

impl PlacedNet {
    pub fn new(net: Net, position: Point) -> Self {
        Self { net, position }
    }

    pub fn net(&self) -> &Net {
        &self.net
    }

    pub fn id(&self) -> &str {
        self.net.id()
    }

    /// Returns the hub position.
    pub fn position(&self) -> Point {
        self.position
    }
}

/// The net that closes the loop back into the voltage source.
///
/// The router draws the source's connection on this net as the return path
/// around the whole diagram.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClosingLink {
    net_id: String,
    source_id: String,
}

impl ClosingLink {
    pub fn new(net_id: impl Into<String>, source_id: impl Into<String>) -> Self {
        Self {
            net_id: net_id.into(),
            source_id: source_id.into(),
        }
    }

    pub fn net_id(&self) -> &str {
        &self.net_id
    }

    pub fn source_id(&self) -> &str {
        &self.source_id
    }

    /// Returns true if the given connection is the one routed as the return path.
    pub fn is_closing(&self, net_id: &str, component_id: &str) -> bool {
        self.net_id == net_id && self.source_id == component_id
    }
}

/// The result of laying out a circuit.
///
/// Serializes as `{"components": [...], "nets": [...]}` with positions filled in.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Layout {
    components: Vec<PlacedComponent>,
    nets: Vec<PlacedNet>,

    #[serde(skip)]
    closing: Option<ClosingLink>,

    #[serde(skip)]
    warnings: Vec<LayoutWarning>,
}

impl Layout {
    /// Creates a layout from already positioned parts.
    pub fn new(components: Vec<PlacedComponent>, nets: Vec<PlacedNet>) -> Self {
        Self {
            components,
            nets,
            closing: None,
            warnings: Vec::new(),
        }
    }

    /// Tags the closing net (builder style).
    pub fn with_closing(mut self, closing: ClosingLink) -> Self {
        self.closing = Some(closing);
        self
    }

    /// Returns the positioned components: source first, then in placement order.
    pub fn components(&self) -> &[PlacedComponent] {
        &self.components
    }

    /// Returns the nets that received a hub, in circuit order.
    pub fn nets(&self) -> &[PlacedNet] {
        &self.nets
    }

    pub fn closing(&self) -> Option<&ClosingLink> {
        self.closing.as_ref()
    }

    /// Returns the reasons the layout is partial, if it is.
    pub fn warnings(&self) -> &[LayoutWarning] {
        &self.warnings
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    pub fn component(&self, id: &str) -> Option<&PlacedComponent> {
        self.components.iter().find(|placed| placed.id() == id)
    }

    pub fn net(&self, id: &str) -> Option<&PlacedNet> {
        self.nets.iter().find(|placed| placed.id() == id)
    }

    /// Shorthand for the grid position of a component.
    pub fn position_of(&self, id: &str) -> Option<GridPoint> {
        self.component(id).map(PlacedComponent::position)
    }

    /// Returns the smallest grid y of any placed component.
    pub fn lowest_y(&self) -> Option<i32> {
        self.components
            .iter()
            .map(|placed| placed.position().y())
            .min()
    }
}

/// Lays out a circuit on the grid.
///
/// Deterministic: the same circuit always produces the same layout.
pub fn layout(circuit: &Circuit) -> Layout {
    info!(
        components = circuit.components().len(),
        nets = circuit.nets().len();
        "Laying out circuit"
    );

    let walk = walk::walk(circuit);

    // Placement order is the order of `walk.placed`; the first match wins on duplicate ids
    let components: Vec<_> = walk
        .placed
        .iter()
        .filter_map(|(id, &position)| {
            circuit
                .component(id)
                .map(|component| PlacedComponent::new(component.clone(), position))
        })
        .collect();

    let nets: Vec<_> = circuit
        .nets()
        .iter()
        .zip(&walk.hubs)
        .filter_map(|(net, hub)| hub.map(|position| PlacedNet::new(net.clone(), position)))
        .collect();

    let closing = walk.source.and_then(|(source, start)| {
        let start = start?;
        circuit
            .nets()
            .iter()
            .enumerate()
            .rev()
            .find(|(idx, net)| {
                *idx != start
                    && match source.negative_pin() {
                        Some(pin) => net.connects_pin(source.id(), pin),
                        None => net.connects(source.id()),
                    }
            })
            .map(|(_, net)| ClosingLink::new(net.id(), source.id()))
    });

    debug!(
        placed = components.len(),
        hubs = nets.len(),
        closing:? = closing.as_ref().map(ClosingLink::net_id),
        warnings = walk.warnings.len();
        "Layout computed"
    );

    Layout {
        components,
        nets,
        closing,
        warnings: walk.warnings,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use voltaic_core::netlist::{ComponentKind, Connection};

    fn resistor(id: &str) -> Component {
        Component::new(id, ComponentKind::Resistor).with_pins(["a", "b"])
    }

    fn source(id: &str) -> Component {
        Component::new(id, ComponentKind::VoltageSource).with_pins(["+", "-"])
    }

    fn net(id: &str, connections: &[(&str, &str)]) -> Net {
        Net::new(
            id,
            connections
                .iter()
                .map(|(component, pin)| Connection::new(*component, *pin)),
        )
    }

    fn voltage_divider() -> Circuit {
        Circuit::new(
            vec![resistor("R1"), resistor("R2"), source("V1")],
            vec![
                net("N1", &[("V1", "+"), ("R1", "a")]),
                net("N2", &[("R1", "b"), ("R2", "a")]),
                net("N3", &[("R2", "b"), ("V1", "-")]),
            ],
        )
    }

    fn current_divider() -> Circuit {
        Circuit::new(
            vec![source("V1"), resistor("R1"), resistor("R2")],
            vec![
                net("N1", &[("V1", "+"), ("R1", "a"), ("R2", "a")]),
                net("N2", &[("R1", "b"), ("R2", "b"), ("V1", "-")]),
            ],
        )
    }

    #[test]
    fn test_voltage_divider_positions() {
        let layout = layout(&voltage_divider());

        let ids: Vec<_> = layout.components().iter().map(PlacedComponent::id).collect();
        assert_eq!(ids, ["V1", "R1", "R2"]);
        assert_eq!(layout.position_of("V1"), Some(GridPoint::new(0, 0)));
        assert_eq!(layout.position_of("R1"), Some(GridPoint::new(1, 0)));
        assert_eq!(layout.position_of("R2"), Some(GridPoint::new(2, 0)));
        assert!(layout.warnings().is_empty());
    }

    #[test]
    fn test_voltage_divider_hubs_and_closing() {
        let layout = layout(&voltage_divider());

        let hubs: Vec<_> = layout.nets().iter().map(|net| (net.id(), net.position())).collect();
        assert_eq!(
            hubs,
            [
                ("N1", Point::new(0.5, 0.0)),
                ("N2", Point::new(1.5, 0.0)),
                ("N3", Point::new(2.5, 0.0)),
            ]
        );
        assert_eq!(layout.closing(), Some(&ClosingLink::new("N3", "V1")));
    }

    #[test]
    fn test_current_divider_branches_follow_connection_order() {
        let layout = layout(&current_divider());

        assert_eq!(layout.position_of("V1"), Some(GridPoint::new(0, 0)));
        assert_eq!(layout.position_of("R1"), Some(GridPoint::new(1, 1)));
        assert_eq!(layout.position_of("R2"), Some(GridPoint::new(1, -1)));
        assert_eq!(layout.net("N2").map(PlacedNet::position), Some(Point::new(1.5, 0.0)));
        assert_eq!(layout.closing().map(ClosingLink::net_id), Some("N2"));
        assert_eq!(layout.lowest_y(), Some(-1));
    }

    #[test]
    fn test_no_voltage_source_gives_empty_layout() {
        let circuit = Circuit::new(
            vec![resistor("R1"), resistor("R2")],
            vec![net("N1", &[("R1", "b"), ("R2", "a")])],
        );

        let layout = layout(&circuit);
        assert!(layout.is_empty());
        assert!(layout.nets().is_empty());
        assert_eq!(layout.closing(), None);
        assert_eq!(layout.warnings(), [LayoutWarning::NoVoltageSource]);
    }

    #[test]
    fn test_no_positive_net() {
        let circuit = Circuit::new(
            vec![source("V1"), resistor("R1")],
            vec![net("N1", &[("V1", "-"), ("R1", "a")])],
        );

        let layout = layout(&circuit);
        assert_eq!(layout.components().len(), 1);
        assert_eq!(
            layout.warnings(),
            [LayoutWarning::NoPositiveNet {
                source: "V1".to_string()
            }]
        );
        // The source is still placed, so the net touching it gets a hub
        assert_eq!(layout.net("N1").map(PlacedNet::position), Some(Point::new(0.5, 0.0)));
    }

    #[test]
    fn test_single_connection_net_stops_walk() {
        let circuit = Circuit::new(
            vec![source("V1"), resistor("R1"), resistor("R2")],
            vec![
                net("N1", &[("V1", "+"), ("R1", "a")]),
                net("N2", &[("R1", "b")]),
                net("N3", &[("R2", "b"), ("V1", "-")]),
            ],
        );

        let layout = layout(&circuit);
        let ids: Vec<_> = layout.components().iter().map(PlacedComponent::id).collect();
        assert_eq!(ids, ["V1", "R1"]);
        assert_eq!(
            layout.warnings(),
            [LayoutWarning::UnsupportedConnectionCount {
                net: "N2".to_string(),
                count: 1
            }]
        );
        assert!(layout.nets().iter().all(|net| net.position().is_finite()));
    }

    #[test]
    fn test_unresolved_component_stops_walk() {
        let circuit = Circuit::new(
            vec![source("V1"), resistor("R1")],
            vec![
                net("N1", &[("V1", "+"), ("R1", "a")]),
                net("N2", &[("R1", "b"), ("X9", "a")]),
                net("N3", &[("X9", "b"), ("V1", "-")]),
            ],
        );

        let layout = layout(&circuit);
        assert_eq!(layout.components().len(), 2);
        assert_eq!(
            layout.warnings(),
            [LayoutWarning::UnresolvedComponent {
                net: "N2".to_string(),
                component: "X9".to_string()
            }]
        );
    }

    #[test]
    fn test_revisited_component_stops_walk() {
        // N2 leads straight back into the source
        let circuit = Circuit::new(
            vec![source("V1"), resistor("R1"), resistor("R2")],
            vec![
                net("N1", &[("V1", "+"), ("R1", "a")]),
                net("N2", &[("R1", "b"), ("V1", "-")]),
                net("N3", &[("R2", "a"), ("R2", "b")]),
            ],
        );

        let layout = layout(&circuit);
        assert_eq!(layout.components().len(), 2);
        assert_eq!(
            layout.warnings(),
            [LayoutWarning::RevisitedComponent {
                net: "N2".to_string(),
                component: "V1".to_string()
            }]
        );
        assert!(layout.net("N3").is_none());
    }

    #[test]
    fn test_dead_end_reports_no_next_net() {
        let circuit = Circuit::new(
            vec![source("V1"), resistor("R1"), resistor("R2")],
            vec![
                net("N1", &[("V1", "+"), ("R1", "a")]),
                net("N2", &[("R2", "a"), ("V1", "-")]),
                net("N3", &[("R2", "b"), ("V1", "-")]),
            ],
        );

        let layout = layout(&circuit);
        assert_eq!(
            layout.warnings(),
            [LayoutWarning::NoNextNet {
                component: "R1".to_string()
            }]
        );
    }

    #[test]
    fn test_closing_net_is_on_negative_terminal() {
        // N3 comes last but taps the positive terminal again
        let circuit = Circuit::new(
            vec![source("V1"), resistor("R1"), resistor("R2")],
            vec![
                net("N1", &[("V1", "+"), ("R1", "a")]),
                net("N2", &[("R1", "b"), ("V1", "-")]),
                net("N3", &[("V1", "+"), ("R2", "a")]),
            ],
        );

        let closing = layout(&circuit).closing().cloned().unwrap();
        assert_eq!(closing.net_id(), "N2");
        assert_eq!(closing.source_id(), "V1");
    }

    #[test]
    fn test_closing_net_of_pinless_source() {
        let circuit = Circuit::new(
            vec![
                Component::new("V1", ComponentKind::VoltageSource),
                resistor("R1"),
            ],
            vec![
                net("N1", &[("V1", "+"), ("R1", "a")]),
                net("N2", &[("R1", "b"), ("V1", "-")]),
            ],
        );

        let layout = layout(&circuit);
        assert_eq!(layout.closing().map(ClosingLink::net_id), Some("N2"));
    }

    #[test]
    fn test_layout_serializes_positions() {
        let layout = layout(&voltage_divider());
        let json = serde_json::to_value(&layout).unwrap();

        assert_eq!(json["components"][1]["id"], "R1");
        assert_eq!(json["components"][1]["type"], "resistor");
        assert_eq!(json["components"][1]["position"]["x"], 1);
        assert_eq!(json["nets"][2]["position"]["x"], 2.5);
        assert!(json.get("warnings").is_none());
    }
}
