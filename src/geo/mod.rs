//! Map projection, layer painting and pointer picking.
//!
//! Layers arrive as renderer-agnostic descriptors from `crate::layers`;
//! this module is the only place that turns them into egui shapes.

mod picking;
mod projection;
mod renderer;

pub use picking::pick;
pub use projection::MapProjection;
pub use renderer::paint_layers;
