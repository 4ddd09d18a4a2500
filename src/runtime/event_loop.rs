use std::collections::VecDeque;
use std::sync::mpsc::Receiver;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::app::{App, SessionPhase};
use crate::audio::{AudioCmd, AudioEvent, AudioPlayer};
use crate::config;
use crate::sequencer::{Action, Sequencer, SequencerEvent, UtteranceTag};
use crate::speech::{Announcer, SpeechEvent, render_announcement};
use crate::ui;

/// State tracked by the runtime event loop across iterations.
pub struct EventLoopState {
    /// Internal two-key prefix state used for `gg` handling.
    pub pending_gg: bool,
}

impl EventLoopState {
    pub fn new() -> Self {
        Self { pending_gg: false }
    }
}

/// Main terminal event loop: handles input, UI drawing, and feeds
/// speech/audio events through the sequencer. Returns `Ok(())` when
/// shutdown is requested.
pub fn run(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    settings: &config::Settings,
    app: &mut App,
    audio_player: &AudioPlayer,
    announcer: &mut Announcer,
    sequencer: &mut Sequencer,
    speech_rx: &Receiver<SpeechEvent>,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut state = EventLoopState::new();

    loop {
        // Feed completed playback/speech into the state machine.
        while let Some(AudioEvent::TrackEnded) = audio_player.poll_event() {
            dispatch_event(
                SequencerEvent::PlaybackEnded,
                sequencer,
                app,
                audio_player,
                announcer,
            );
        }
        while let Ok(ev) = speech_rx.try_recv() {
            match ev {
                SpeechEvent::Done(tag) => dispatch_event(
                    SequencerEvent::SpeechDone(tag),
                    sequencer,
                    app,
                    audio_player,
                    announcer,
                ),
                SpeechEvent::Failed(tag) => {
                    // An utterance error never advances the session; it
                    // only shows up in the status line.
                    app.set_notice("announcement failed: TTS command exited with an error");
                    if tag == UtteranceTag::Session && app.phase == SessionPhase::Announcing {
                        app.phase = SessionPhase::Stopped;
                        app.announcing = None;
                    }
                }
            }
        }

        // Sync playback state from the audio thread; follow now-playing.
        if let Some(handle) = app.playback_handle.as_ref().cloned() {
            if let Ok(info) = handle.lock() {
                if let Some(idx) = info.index {
                    if app.follow_playback {
                        app.set_selected(idx);
                    }
                    app.phase = if info.playing {
                        SessionPhase::Playing
                    } else {
                        SessionPhase::Paused
                    };
                } else if app.phase != SessionPhase::Announcing {
                    app.phase = SessionPhase::Stopped;
                }
            }
        }

        terminal.draw(|f| ui::draw(f, app, &settings.ui))?;

        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                if handle_key_event(
                    key,
                    settings,
                    app,
                    audio_player,
                    announcer,
                    sequencer,
                    &mut state,
                )? {
                    break;
                }
            }
        }
    }

    Ok(())
}

/// Feed one external event through the sequencer and run the actions it
/// produces. Actions may synthesize further events (speech disabled →
/// an announcement "completes" immediately), which are fed back in
/// until the machine goes quiet.
fn dispatch_event(
    event: SequencerEvent,
    sequencer: &mut Sequencer,
    app: &mut App,
    audio_player: &AudioPlayer,
    announcer: &mut Announcer,
) {
    let actions = sequencer.handle(event);
    run_actions(actions, sequencer, app, audio_player, announcer);
}

/// Kick off freshly produced actions (from a user trigger) through the
/// same synthetic-event plumbing as [`dispatch_event`].
fn run_actions(
    actions: impl IntoIterator<Item = Action>,
    sequencer: &mut Sequencer,
    app: &mut App,
    audio_player: &AudioPlayer,
    announcer: &mut Announcer,
) {
    let mut queue: VecDeque<Action> = actions.into_iter().collect();
    while let Some(action) = queue.pop_front() {
        for synthetic in apply_action(action, app, audio_player, announcer) {
            queue.extend(sequencer.handle(synthetic));
        }
    }
}

/// Execute one sequencer action against the engines. Returns synthetic
/// events the sequencer still needs to see.
fn apply_action(
    action: Action,
    app: &mut App,
    audio_player: &AudioPlayer,
    announcer: &mut Announcer,
) -> Vec<SequencerEvent> {
    match action {
        Action::Announce { index, tag } => {
            let Some(track) = app.tracks.get(index) else {
                return Vec::new();
            };
            let text = render_announcement(track);
            if tag == UtteranceTag::Session {
                app.phase = SessionPhase::Announcing;
                app.announcing = Some(index);
                if app.follow_playback {
                    app.set_selected(index);
                }
            }
            match announcer.speak(&text, tag) {
                Ok(()) => Vec::new(),
                Err(e) => {
                    app.set_notice(format!("speech unavailable: {e}"));
                    // Keep the session usable without announcements:
                    // pretend the utterance completed right away.
                    vec![SequencerEvent::SpeechDone(tag)]
                }
            }
        }
        Action::Play { index } => {
            app.announcing = None;
            app.phase = SessionPhase::Playing;
            let _ = audio_player.send(AudioCmd::Play(index));
            Vec::new()
        }
        Action::Stop => {
            let _ = audio_player.send(AudioCmd::Stop);
            Vec::new()
        }
    }
}

fn handle_key_event(
    key: KeyEvent,
    settings: &config::Settings,
    app: &mut App,
    audio_player: &AudioPlayer,
    announcer: &mut Announcer,
    sequencer: &mut Sequencer,
    state: &mut EventLoopState,
) -> Result<bool, Box<dyn std::error::Error>> {
    match key.code {
        KeyCode::Char('q') => {
            state.pending_gg = false;
            announcer.shutdown();
            audio_player.quit_softly(Duration::from_millis(settings.audio.quit_fade_out_ms));
            return Ok(true);
        }
        KeyCode::Char('p') => {
            state.pending_gg = false;
            // Start (or restart) the session from the top of the catalog.
            app.follow_playback_on();
            let actions = sequencer.start();
            run_actions(actions, sequencer, app, audio_player, announcer);
        }
        KeyCode::Char('s') => {
            state.pending_gg = false;
            let actions = sequencer.halt();
            run_actions(actions, sequencer, app, audio_player, announcer);
            app.phase = SessionPhase::Stopped;
            app.announcing = None;
        }
        KeyCode::Enter => {
            state.pending_gg = false;
            // Ask what the selected track is, without touching playback.
            let actions = sequencer.announce(app.selected);
            run_actions(actions, sequencer, app, audio_player, announcer);
        }
        KeyCode::Char(' ') => {
            state.pending_gg = false;
            let _ = audio_player.send(AudioCmd::TogglePause);
        }
        KeyCode::Char('g') => {
            if state.pending_gg {
                state.pending_gg = false;
                app.follow_playback_off();
                app.set_selected(0);
            } else {
                state.pending_gg = true;
            }
        }
        KeyCode::Char('G') => {
            state.pending_gg = false;
            app.follow_playback_off();
            let last = app.tracks.len().saturating_sub(1);
            app.set_selected(last);
        }
        KeyCode::Char('j') | KeyCode::Down => {
            state.pending_gg = false;
            app.follow_playback_off();
            app.next();
        }
        KeyCode::Char('k') | KeyCode::Up => {
            state.pending_gg = false;
            app.follow_playback_off();
            app.prev();
        }
        KeyCode::Char('K') => {
            state.pending_gg = false;
            app.toggle_metadata_window();
        }
        KeyCode::Char(_) => {
            // g pending should clear on any other printable char
            state.pending_gg = false;
        }
        _ => {}
    }

    Ok(false)
}
