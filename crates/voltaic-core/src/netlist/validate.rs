//! Netlist invariant checks.

use std::{collections::HashSet, fmt};

use super::{Circuit, CircuitGraph};

/// A violated netlist invariant.
///
/// Issues describe why a drawing may come out incomplete; none of them
/// prevents layout or rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NetlistIssue {
    DuplicateComponent { id: String },
    DuplicateNet { id: String },
    /// A connection names a component that does not exist.
    DanglingConnection { net: String, component: String },
    /// A connection names a pin the component does not declare.
    UnknownPin {
        net: String,
        component: String,
        pin: String,
    },
    /// A net joins fewer than two pins.
    UnderconnectedNet { net: String, connections: usize },
    /// A component is not on any net.
    UnconnectedComponent { id: String },
    /// The circuit does not have exactly one voltage source.
    VoltageSourceCount { count: usize },
    /// A component cannot be reached from the source's positive terminal.
    Unreachable { id: String },
}

impl fmt::Display for NetlistIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DuplicateComponent { id } => write!(f, "duplicate component id `{id}`"),
            Self::DuplicateNet { id } => write!(f, "duplicate net id `{id}`"),
            Self::DanglingConnection { net, component } => {
                write!(f, "net `{net}` references unknown component `{component}`")
            }
            Self::UnknownPin {
                net,
                component,
                pin,
            } => write!(
                f,
                "net `{net}` references pin `{pin}` which `{component}` does not declare"
            ),
            Self::UnderconnectedNet { net, connections } => {
                write!(f, "net `{net}` has {connections} connection(s), at least 2 required")
            }
            Self::UnconnectedComponent { id } => write!(f, "component `{id}` is not on any net"),
            Self::VoltageSourceCount { count } => {
                write!(f, "expected exactly one voltage source, found {count}")
            }
            Self::Unreachable { id } => {
                write!(f, "component `{id}` is not reachable from the voltage source")
            }
        }
    }
}

pub(super) fn validate(circuit: &Circuit) -> Vec<NetlistIssue> {
    let mut issues = Vec::new();

    let mut seen = HashSet::new();
    for component in circuit.components() {
        if !seen.insert(component.id()) {
            issues.push(NetlistIssue::DuplicateComponent {
                id: component.id().to_string(),
            });
        }
    }

    let mut seen = HashSet::new();
    for net in circuit.nets() {
        if !seen.insert(net.id()) {
            issues.push(NetlistIssue::DuplicateNet {
                id: net.id().to_string(),
            });
        }

        if net.connections().len() < 2 {
            issues.push(NetlistIssue::UnderconnectedNet {
                net: net.id().to_string(),
                connections: net.connections().len(),
            });
        }

        for connection in net.connections() {
            match circuit.component(connection.component()) {
                None => issues.push(NetlistIssue::DanglingConnection {
                    net: net.id().to_string(),
                    component: connection.component().to_string(),
                }),
                Some(component) if !component.has_pin(connection.pin()) => {
                    issues.push(NetlistIssue::UnknownPin {
                        net: net.id().to_string(),
                        component: component.id().to_string(),
                        pin: connection.pin().to_string(),
                    });
                }
                Some(_) => {}
            }
        }
    }

    for component in circuit.components() {
        if circuit.nets_of(component.id()).next().is_none() {
            issues.push(NetlistIssue::UnconnectedComponent {
                id: component.id().to_string(),
            });
        }
    }

    let sources: Vec<_> = circuit.voltage_sources().collect();
    if sources.len() != 1 {
        issues.push(NetlistIssue::VoltageSourceCount {
            count: sources.len(),
        });
    }

    // Reachability only makes sense with a single, well defined source
    if let [source] = sources.as_slice() {
        let start_net = circuit.nets().iter().find(|net| match source.positive_pin() {
            Some(pin) => net.connects_pin(source.id(), pin),
            None => net.connects(source.id()),
        });

        if let Some(start_net) = start_net {
            let graph = CircuitGraph::new(circuit);
            let reachable = graph.components_reachable_from_net(start_net.id());
            let mut reported = HashSet::new();
            for component in circuit.components() {
                if !reachable.contains(component.id()) && reported.insert(component.id()) {
                    issues.push(NetlistIssue::Unreachable {
                        id: component.id().to_string(),
                    });
                }
            }
        }
    }

    issues
}
