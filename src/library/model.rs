use std::path::PathBuf;
use std::time::Duration;

/// One playable item discovered by the startup scan.
#[derive(Clone)]
pub struct Track {
    pub path: PathBuf,
    pub title: String,
    pub artist: Option<String>,
    pub album: Option<String>,
    pub duration: Option<Duration>,
    pub display: String,
}
