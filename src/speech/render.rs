use crate::library::Track;

/// Build the announcement line for a track: "{artist}さんで{title}です"
/// ("It's {title} by {artist}"). A missing artist renders as the empty
/// string rather than a placeholder, matching how the catalog treats
/// absent metadata.
pub fn render_announcement(track: &Track) -> String {
    let artist = track.artist.as_deref().unwrap_or("");
    format!("{}さんで{}です", artist, track.title)
}
