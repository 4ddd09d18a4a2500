//! The track catalog: scanning a directory for audio files and reading
//! their metadata.
//!
//! The catalog is built once at startup and never mutated afterwards.

mod display;
mod model;
mod scan;

pub use display::*;
pub use model::*;
pub use scan::*;
