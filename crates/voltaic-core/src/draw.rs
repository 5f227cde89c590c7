//! Drawing primitives shared by the schematic renderers.
//!
//! - [`StrokeDefinition`]: wire and outline styling, applied with [`apply_stroke!`](crate::apply_stroke!)
//! - [`Surface`]: the retained drawing surface the renderers append to

mod stroke;
mod surface;

pub use stroke::{StrokeCap, StrokeDefinition, StrokeJoin};
pub use surface::{Surface, SvgNode};
