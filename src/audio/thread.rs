use std::sync::mpsc::{Receiver, RecvTimeoutError, Sender};
use std::thread;
use std::thread::JoinHandle;
use std::time::Duration;

use rodio::{OutputStreamBuilder, Sink};

use crate::library::Track;

use super::sink::create_sink;
use super::types::{AudioCmd, AudioEvent, PlaybackHandle};

pub(super) const FADE_STEPS: u64 = 20;

/// Sleep interval between fade steps; never zero, so even very short
/// fades step through every volume level.
pub(super) fn fade_step_ms(fade_out_ms: u64, steps: u64) -> u64 {
    (fade_out_ms / steps).max(1)
}

/// Linear volume ramp from 1.0 down to 0.0 over `steps` steps.
pub(super) fn fade_volume(step: u64, steps: u64) -> f32 {
    1.0 - step as f32 / steps as f32
}

pub(super) fn spawn_audio_thread(
    tracks: Vec<Track>,
    rx: Receiver<AudioCmd>,
    events: Sender<AudioEvent>,
    playback_info: PlaybackHandle,
) -> JoinHandle<()> {
    thread::spawn(move || {
        let mut stream =
            OutputStreamBuilder::open_default_stream().expect("ERR: No audio output device");
        // rodio logs to stderr when OutputStream is dropped. That's useful in debugging,
        // but noisy for a TUI app.
        stream.log_on_drop(false);

        let mut index: Option<usize> = None;
        let mut paused = true;
        let mut sink: Option<Sink> = None;

        // Ticker thread updating playback_info.elapsed for the UI.
        let info_for_ticker = playback_info.clone();
        thread::spawn(move || loop {
            thread::sleep(Duration::from_millis(500));
            let Ok(mut info) = info_for_ticker.lock() else {
                return;
            };
            if info.playing {
                info.elapsed += Duration::from_millis(500);
            }
        });

        fn do_stop(
            sink: &mut Option<Sink>,
            index: &mut Option<usize>,
            paused: &mut bool,
            playback_info: &PlaybackHandle,
        ) {
            if let Some(s) = sink.as_ref() {
                s.stop();
            }
            *sink = None;
            *index = None;
            *paused = true;
            if let Ok(mut info) = playback_info.lock() {
                info.index = None;
                info.elapsed = Duration::ZERO;
                info.playing = false;
            }
        }

        fn fade_out_sink(sink: &Sink, fade_out_ms: u64) {
            if fade_out_ms == 0 {
                sink.set_volume(0.0);
                return;
            }
            let step_ms = fade_step_ms(fade_out_ms, FADE_STEPS);
            sink.set_volume(1.0);
            for step in 1..=FADE_STEPS {
                sink.set_volume(fade_volume(step, FADE_STEPS));
                thread::sleep(Duration::from_millis(step_ms));
            }
            sink.set_volume(0.0);
        }

        loop {
            match rx.recv_timeout(Duration::from_millis(200)) {
                Ok(cmd) => match cmd {
                    AudioCmd::Play(i) => {
                        let Some(track) = tracks.get(i) else {
                            continue;
                        };
                        // Replace whatever is loaded; one sink at a time.
                        if let Some(s) = sink.as_ref() {
                            s.stop();
                        }
                        match create_sink(&stream, track) {
                            Ok(new_sink) => {
                                new_sink.set_volume(1.0);
                                new_sink.play();
                                sink = Some(new_sink);
                                index = Some(i);
                                paused = false;
                                if let Ok(mut info) = playback_info.lock() {
                                    info.index = Some(i);
                                    info.elapsed = Duration::ZERO;
                                    info.playing = true;
                                    info.notice = None;
                                }
                            }
                            Err(e) => {
                                do_stop(&mut sink, &mut index, &mut paused, &playback_info);
                                if let Ok(mut info) = playback_info.lock() {
                                    info.notice =
                                        Some(format!("cannot play {}: {e}", track.path.display()));
                                }
                            }
                        }
                    }

                    AudioCmd::Stop => {
                        do_stop(&mut sink, &mut index, &mut paused, &playback_info);
                    }

                    AudioCmd::TogglePause => {
                        if let Some(ref s) = sink {
                            if paused {
                                s.play();
                            } else {
                                s.pause();
                            }
                            paused = !paused;
                            if let Ok(mut info) = playback_info.lock() {
                                info.playing = !paused;
                            }
                        }
                    }

                    AudioCmd::Quit { fade_out_ms } => {
                        if let Some(ref s) = sink {
                            // Fade out gently before stopping.
                            fade_out_sink(s, fade_out_ms);
                            s.stop();
                        }
                        if let Ok(mut info) = playback_info.lock() {
                            info.playing = false;
                        }
                        break;
                    }
                },
                Err(RecvTimeoutError::Timeout) => {
                    // End-of-track check: report it once and go idle.
                    let ended = sink.as_ref().map(|s| !paused && s.empty()).unwrap_or(false);
                    if ended {
                        do_stop(&mut sink, &mut index, &mut paused, &playback_info);
                        let _ = events.send(AudioEvent::TrackEnded);
                    }
                }
                Err(RecvTimeoutError::Disconnected) => break,
            }
        }
    })
}
