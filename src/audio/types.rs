//! Audio-related small types and handles.

use std::sync::{Arc, Mutex};
use std::time::Duration;

#[derive(Debug)]
pub enum AudioCmd {
    /// Load the track at the given index and start playing it.
    Play(usize),
    /// Stop playback immediately.
    Stop,
    /// Toggle pause/resume.
    TogglePause,
    /// Quit the audio thread, fading out over `fade_out_ms` milliseconds.
    Quit { fade_out_ms: u64 },
}

/// Events emitted by the audio thread.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum AudioEvent {
    /// The loaded track played to its end. Emitted once per track; the
    /// thread clears its sink and waits for the next command.
    TrackEnded,
}

#[derive(Debug, Clone, Default)]
/// Runtime playback information shared with the UI.
pub struct PlaybackInfo {
    /// Currently playing track index in the catalog (if any).
    pub index: Option<usize>,
    /// Elapsed playback time for the current track.
    pub elapsed: Duration,
    /// Whether playback is currently active.
    pub playing: bool,
    /// Last open/decode failure, for the status line.
    pub notice: Option<String>,
}

pub type PlaybackHandle = Arc<Mutex<PlaybackInfo>>;
