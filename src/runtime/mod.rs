use std::env;
use std::path::Path;
use std::sync::mpsc;
use std::time::Duration;

use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::app::App;
use crate::audio::AudioPlayer;
use crate::library::scan;
use crate::sequencer::Sequencer;
use crate::speech::{Announcer, SpeechEvent};

mod event_loop;
mod settings;

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let settings = settings::load_settings();

    let dir = env::args().nth(1).unwrap_or_else(|| {
        std::env::current_dir()
            .ok()
            .and_then(|p| p.to_str().map(|s| s.to_string()))
            .unwrap_or_else(|| "Music".to_string())
    });

    let tracks = scan(Path::new(&dir), &settings.library);

    let audio_player = AudioPlayer::new(tracks.clone());
    let (speech_tx, speech_rx) = mpsc::channel::<SpeechEvent>();
    let mut announcer = Announcer::new(&settings.speech, speech_tx);
    let mut sequencer = Sequencer::new(tracks.len());

    let mut app = App::new(tracks);
    app.follow_playback = settings.ui.follow_playback;
    app.set_current_dir(dir.clone());
    app.set_playback_handle(audio_player.playback_handle());
    if !app.has_tracks() {
        // An unreadable or empty directory is not an error, but saying
        // nothing about it helps nobody.
        app.set_notice(format!("no audio files found under {dir}"));
    }

    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let run_result = event_loop::run(
        &mut terminal,
        &settings,
        &mut app,
        &audio_player,
        &mut announcer,
        &mut sequencer,
        &speech_rx,
    );

    // The event loop already shut both engines down on quit; repeating
    // here covers the error paths and is safe either way.
    announcer.shutdown();
    audio_player.quit_softly(Duration::from_millis(settings.audio.quit_fade_out_ms));

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    run_result
}
