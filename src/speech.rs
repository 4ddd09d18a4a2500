//! Text-to-speech announcements.
//!
//! The announcer shells out to an external TTS command (`say`,
//! `espeak-ng`, ...) and reports utterance completion back to the
//! runtime over a channel. Announcement text comes from a fixed
//! Japanese template in `render`.

mod announcer;
mod render;

pub use announcer::*;
pub use render::*;
