//! Creating `rodio` sinks from `Track` values.

use std::fs::File;
use std::io::BufReader;

use rodio::{Decoder, OutputStream, Sink};

use crate::library::Track;

/// Open, decode and load `track` into a fresh paused `Sink`.
///
/// Errors (unreadable file, unsupported codec) are returned rather than
/// panicking so the audio thread can surface them as a notice and stay
/// alive.
pub(super) fn create_sink(
    handle: &OutputStream,
    track: &Track,
) -> Result<Sink, Box<dyn std::error::Error + Send + Sync>> {
    let file = File::open(&track.path)?;
    let source = Decoder::new(BufReader::new(file))?;

    let sink = Sink::connect_new(handle.mixer());
    sink.append(source);
    sink.pause();
    Ok(sink)
}
