//! Debug-overlay output
//!
//! The simulation never renders. It only describes its hitboxes to an
//! explicit [`debug::DebugDraw`] context supplied by the caller.

pub mod debug;
pub mod vertex;

pub use debug::{DebugDraw, LineList};
pub use vertex::Vertex;
