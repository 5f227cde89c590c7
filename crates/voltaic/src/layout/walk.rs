//! The topology walk that assigns grid positions.
//!
//! Starting at the voltage source, the walk follows nets one stage at a time.
//! A two-pin net is a series link and places one component one column to the
//! right; a three-pin net is a parallel junction and places two components in
//! the next column, above and below the axis. The walk runs for at most one
//! step fewer than there are nets, the remaining net being the one that
//! returns to the source.

use indexmap::IndexMap;
use log::{debug, trace, warn};

use voltaic_core::{
    geometry::{GridPoint, Point},
    netlist::{Circuit, Component, Net},
};

use super::LayoutWarning;

/// Rows used by each supported net shape, in connection order.
const SERIES_ROWS: &[i32] = &[0];
const PARALLEL_ROWS: &[i32] = &[1, -1];

/// Offset of a hub from the column of the components that feed it.
const HUB_OFFSET: f32 = 0.5;

/// Result of a walk, expressed as indices into the circuit.
#[derive(Debug, Default)]
pub(super) struct Walk<'a> {
    /// Placed components, keyed by id, in placement order.
    pub placed: IndexMap<&'a str, GridPoint>,
    /// Hub of each net, by net index.
    pub hubs: Vec<Option<Point>>,
    /// The voltage source and the index of the net on its positive terminal.
    pub source: Option<(&'a Component, Option<usize>)>,
    pub warnings: Vec<LayoutWarning>,
}

impl Walk<'_> {
    fn warn(&mut self, warning: LayoutWarning) {
        warn!(warning:% = warning; "Layout walk stopped early");
        self.warnings.push(warning);
    }
}

pub(super) fn walk(circuit: &Circuit) -> Walk<'_> {
    let mut walk = Walk {
        hubs: vec![None; circuit.nets().len()],
        ..Walk::default()
    };

    let Some(source) = circuit.voltage_sources().next() else {
        walk.warn(LayoutWarning::NoVoltageSource);
        return walk;
    };
    walk.placed.insert(source.id(), GridPoint::ORIGIN);

    let start = circuit.nets().iter().position(|net| match source.positive_pin() {
        Some(pin) => net.connects_pin(source.id(), pin),
        None => net.connects(source.id()),
    });
    walk.source = Some((source, start));

    let Some(mut current) = start else {
        walk.warn(LayoutWarning::NoPositiveNet {
            source: source.id().to_string(),
        });
        assign_remaining_hubs(circuit, &mut walk);
        return walk;
    };

    let steps = circuit.nets().len().saturating_sub(1);
    let mut prev = source.id();

    'walk: for step in 0..steps {
        let net = &circuit.nets()[current];
        let column = step as i32 + 1;
        if walk.hubs[current].is_none() {
            walk.hubs[current] = Some(Point::new(step as f32 + HUB_OFFSET, 0.0));
        }

        let rows = match net.connections().len() {
            2 => SERIES_ROWS,
            3 => PARALLEL_ROWS,
            count => {
                walk.warn(LayoutWarning::UnsupportedConnectionCount {
                    net: net.id().to_string(),
                    count,
                });
                break;
            }
        };

        let downstream: Vec<_> = net
            .connections()
            .iter()
            .filter(|connection| connection.component() != prev)
            .take(rows.len())
            .collect();
        if downstream.len() < rows.len() {
            walk.warn(LayoutWarning::MissingDownstream {
                net: net.id().to_string(),
            });
            break;
        }

        for (connection, &row) in downstream.into_iter().zip(rows) {
            let Some(component) = circuit.component(connection.component()) else {
                walk.warn(LayoutWarning::UnresolvedComponent {
                    net: net.id().to_string(),
                    component: connection.component().to_string(),
                });
                break 'walk;
            };
            if walk.placed.contains_key(component.id()) {
                walk.warn(LayoutWarning::RevisitedComponent {
                    net: net.id().to_string(),
                    component: component.id().to_string(),
                });
                break 'walk;
            }

            let position = GridPoint::new(column, row);
            trace!(component = component.id(), x = position.x(), y = position.y(); "Placed component");
            walk.placed.insert(component.id(), position);
            prev = component.id();
        }

        match next_net(circuit, current, prev) {
            Some(next) => current = next,
            None => {
                if step + 1 < steps {
                    walk.warn(LayoutWarning::NoNextNet {
                        component: prev.to_string(),
                    });
                }
                break;
            }
        }
    }

    assign_remaining_hubs(circuit, &mut walk);
    walk
}

/// Finds the first net, other than `current`, that touches `component_id`.
fn next_net(circuit: &Circuit, current: usize, component_id: &str) -> Option<usize> {
    circuit
        .nets()
        .iter()
        .enumerate()
        .find(|(idx, net)| *idx != current && net.connects(component_id))
        .map(|(idx, _)| idx)
}

/// Gives every net the walk did not visit a hub to the right of its members.
fn assign_remaining_hubs(circuit: &Circuit, walk: &mut Walk<'_>) {
    for (idx, net) in circuit.nets().iter().enumerate() {
        if walk.hubs[idx].is_some() {
            continue;
        }

        match rightmost_member(net, &walk.placed) {
            Some(x) => walk.hubs[idx] = Some(Point::new(x as f32 + HUB_OFFSET, 0.0)),
            None => debug!(net = net.id(); "Net has no placed member, skipping hub"),
        }
    }
}

fn rightmost_member(net: &Net, placed: &IndexMap<&str, GridPoint>) -> Option<i32> {
    net.connections()
        .iter()
        .filter_map(|connection| placed.get(connection.component()))
        .map(|position| position.x())
        .max()
}
