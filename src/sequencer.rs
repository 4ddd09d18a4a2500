//! The speak-then-play state machine.
//!
//! The sequencer owns nothing but a track index and reacts to two
//! asynchronous event sources: speech completion and playback reaching
//! the end of a track. It returns the actions the runtime should take
//! instead of calling into the speech/audio engines itself, which keeps
//! it testable without either engine.

mod machine;

pub use machine::*;

#[cfg(test)]
mod tests;
