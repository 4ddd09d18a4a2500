//! Application module: exposes the app model used by the TUI and runtime.
//!
//! The `App` model lives in `app::model` and holds the current catalog,
//! selection, session phase and the latest user-visible notice.

mod model;

pub use model::*;

#[cfg(test)]
mod tests;
