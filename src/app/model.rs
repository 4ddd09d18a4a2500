//! Application model types: `App` and `SessionPhase`.

use crate::audio::PlaybackHandle;
use crate::library::Track;

/// What the announce-and-play session is currently doing.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub enum SessionPhase {
    #[default]
    Stopped,
    /// The announcement for the upcoming track is being spoken.
    Announcing,
    Playing,
    Paused,
}

/// The main application model.
pub struct App {
    pub tracks: Vec<Track>,
    pub selected: usize,
    pub phase: SessionPhase,
    /// Index of the track whose session announcement is being spoken.
    pub announcing: Option<usize>,
    pub playback_handle: Option<PlaybackHandle>,

    /// Cursor follows the currently playing track while a session runs.
    pub follow_playback: bool,

    pub current_dir: Option<String>,
    /// Latest user-visible notice (voice unavailable, empty library, ...).
    pub notice: Option<String>,
    pub metadata_window: bool,
}

impl App {
    /// Create a new `App` with the provided list of `tracks`.
    pub fn new(tracks: Vec<Track>) -> Self {
        Self {
            tracks,
            selected: 0,
            phase: SessionPhase::Stopped,
            announcing: None,
            playback_handle: None,
            follow_playback: true,
            current_dir: None,
            notice: None,
            metadata_window: false,
        }
    }

    /// Return true if the catalog contains any tracks.
    pub fn has_tracks(&self) -> bool {
        !self.tracks.is_empty()
    }

    /// Attach a `PlaybackHandle` used to observe playback progress.
    pub fn set_playback_handle(&mut self, h: PlaybackHandle) {
        self.playback_handle = Some(h);
    }

    /// Record the scanned directory in the app state.
    pub fn set_current_dir(&mut self, dir: String) {
        self.current_dir = Some(dir);
    }

    /// Replace the visible notice. Later notices win; the status line
    /// shows one at a time.
    pub fn set_notice(&mut self, notice: impl Into<String>) {
        self.notice = Some(notice.into());
    }

    pub fn toggle_metadata_window(&mut self) {
        self.metadata_window = !self.metadata_window;
    }

    pub fn follow_playback_on(&mut self) {
        self.follow_playback = true;
    }

    pub fn follow_playback_off(&mut self) {
        self.follow_playback = false;
    }

    /// Set the selected track index, clamped into the catalog.
    pub fn set_selected(&mut self, idx: usize) {
        if self.tracks.is_empty() {
            self.selected = 0;
        } else {
            self.selected = idx.min(self.tracks.len() - 1);
        }
    }

    /// Move selection to the next track, wrapping at the end.
    pub fn next(&mut self) {
        if self.tracks.is_empty() {
            return;
        }
        self.selected = (self.selected + 1) % self.tracks.len();
    }

    /// Move selection to the previous track, wrapping at the start.
    pub fn prev(&mut self) {
        if self.tracks.is_empty() {
            return;
        }
        self.selected = if self.selected == 0 {
            self.tracks.len() - 1
        } else {
            self.selected - 1
        };
    }
}
