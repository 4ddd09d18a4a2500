//! Playback engine: a dedicated rodio thread driven by commands, with
//! end-of-track events reported back to the runtime.
//!
//! The thread never advances to another track by itself; when the
//! current sink drains it emits [`AudioEvent::TrackEnded`] and waits.
//! Deciding what plays next is the sequencer's job.

mod player;
mod sink;
mod thread;
mod types;

pub use player::*;
pub use types::*;

#[cfg(test)]
mod tests;
