//! The drawing surface shared by the schematic renderers.
//!
//! A [`Surface`] is a retained list of SVG nodes. Renderers append finished
//! groups to it; the owner clears it before every redraw so nothing from a
//! previous circuit survives.
//!
//! # Example
//!
//! ```
//! # use voltaic_core::draw::Surface;
//! # use svg::node::element::{Circle, Group};
//!
//! let mut surface = Surface::new();
//! surface.append(Group::new().set("class", "nets").add(Circle::new().set("r", 4)));
//! assert_eq!(surface.len(), 1);
//!
//! surface.clear();
//! assert!(surface.is_empty());
//! ```

use svg::node::element::Group;

/// Type alias for boxed SVG nodes.
pub type SvgNode = Box<dyn svg::Node>;

/// An owned, clearable list of top-level SVG nodes.
#[derive(Debug, Default, Clone)]
pub struct Surface {
    nodes: Vec<SvgNode>,
}

impl Surface {
    /// Creates a new empty `Surface`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a node after everything drawn so far.
    ///
    /// Later nodes paint over earlier ones.
    pub fn append<N>(&mut self, node: N)
    where
        N: Into<SvgNode>,
    {
        self.nodes.push(node.into());
    }

    /// Removes every node from the surface.
    pub fn clear(&mut self) {
        self.nodes.clear();
    }

    /// Returns the number of top-level nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns `true` if nothing has been drawn.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Returns the top-level nodes in paint order.
    pub fn nodes(&self) -> &[SvgNode] {
        &self.nodes
    }

    /// Serializes all nodes to SVG markup, in paint order.
    ///
    /// Two surfaces holding the same drawing produce identical markup.
    pub fn to_markup(&self) -> String {
        self.nodes.iter().map(|node| node.to_string()).collect()
    }

    /// Wraps a copy of all nodes in a single group.
    pub fn to_group(&self) -> Group {
        self.nodes
            .iter()
            .cloned()
            .fold(Group::new(), |group, node| group.add(node))
    }
}
