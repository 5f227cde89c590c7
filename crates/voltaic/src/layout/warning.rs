use std::fmt;

/// Why the topology walk stopped before placing every component.
///
/// A warning never invalidates the layout: everything placed before the walk
/// stopped is kept and drawn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LayoutWarning {
    /// The circuit has no voltage source; nothing is placed.
    NoVoltageSource,
    /// No net touches the source's positive terminal.
    NoPositiveNet { source: String },
    /// A walked net joins a number of pins other than 2 or 3.
    UnsupportedConnectionCount { net: String, count: usize },
    /// A walked net has fewer downstream connections than its shape needs.
    MissingDownstream { net: String },
    /// A connection names a component that does not exist.
    UnresolvedComponent { net: String, component: String },
    /// The walk came back to a component that is already placed.
    RevisitedComponent { net: String, component: String },
    /// No other net continues from the last placed component.
    NoNextNet { component: String },
}

impl fmt::Display for LayoutWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoVoltageSource => write!(f, "circuit has no voltage source"),
            Self::NoPositiveNet { source } => {
                write!(f, "no net is connected to the positive terminal of `{source}`")
            }
            Self::UnsupportedConnectionCount { net, count } => write!(
                f,
                "net `{net}` has {count} connection(s); only series (2) and parallel (3) nets are laid out"
            ),
            Self::MissingDownstream { net } => {
                write!(f, "net `{net}` does not lead to any new component")
            }
            Self::UnresolvedComponent { net, component } => {
                write!(f, "net `{net}` references unknown component `{component}`")
            }
            Self::RevisitedComponent { net, component } => {
                write!(f, "net `{net}` leads back to already placed component `{component}`")
            }
            Self::NoNextNet { component } => {
                write!(f, "no further net continues from `{component}`")
            }
        }
    }
}
