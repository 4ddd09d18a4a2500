use std::io;
use std::process::{Child, Command, Stdio};
use std::sync::mpsc::Sender;
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

use crate::config::SpeechSettings;
use crate::sequencer::UtteranceTag;

/// Completion reports from the announcer, delivered on the runtime's
/// speech channel by a watcher thread.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum SpeechEvent {
    /// The utterance finished speaking. Sent exactly once per utterance
    /// that runs to completion; a flushed utterance sends nothing.
    Done(UtteranceTag),
    /// The TTS command exited with a non-zero status.
    Failed(UtteranceTag),
}

struct ActiveUtterance {
    child: Child,
    tag: UtteranceTag,
    generation: u64,
}

/// Wraps an external text-to-speech command.
///
/// `speak` has flush semantics: a new call kills the utterance in
/// progress and its completion is discarded. Completion of the current
/// utterance is detected by a watcher thread polling the child process
/// and reported as a [`SpeechEvent`].
pub struct Announcer {
    command: String,
    args: Vec<String>,
    events: Sender<SpeechEvent>,
    active: Arc<Mutex<Option<ActiveUtterance>>>,
    generation: u64,
    disabled: bool,
    shut_down: bool,
}

/// Platform default TTS command: `say` ships with macOS, `espeak-ng`
/// is the common choice elsewhere.
fn default_command() -> (String, Vec<String>) {
    if cfg!(target_os = "macos") {
        ("say".to_string(), Vec::new())
    } else {
        ("espeak-ng".to_string(), vec!["-v".to_string()])
    }
}

impl Announcer {
    pub fn new(settings: &SpeechSettings, events: Sender<SpeechEvent>) -> Self {
        let (command, args) = match &settings.command {
            Some(cmd) => (cmd.clone(), settings.args.clone()),
            None => {
                let (cmd, mut args) = default_command();
                // The default espeak-ng invocation takes the voice as the
                // value of `-v`; an explicit command supplies its own args.
                if !args.is_empty() {
                    args.push(settings.voice.clone());
                }
                (cmd, args)
            }
        };

        Self {
            command,
            args,
            events,
            active: Arc::new(Mutex::new(None)),
            generation: 0,
            disabled: false,
            shut_down: false,
        }
    }

    /// Whether speech has been given up on after a spawn failure.
    pub fn disabled(&self) -> bool {
        self.disabled
    }

    /// Speak `text`, flushing any utterance in progress.
    ///
    /// A spawn failure (typically: the TTS command is not installed)
    /// disables the announcer; every later call fails fast without
    /// touching the system again.
    pub fn speak(&mut self, text: &str, tag: UtteranceTag) -> io::Result<()> {
        if self.shut_down {
            return Ok(());
        }
        if self.disabled {
            return Err(io::Error::new(
                io::ErrorKind::Unsupported,
                format!("speech disabled: '{}' failed to start earlier", self.command),
            ));
        }

        self.generation += 1;
        let generation = self.generation;

        let Ok(mut active) = self.active.lock() else {
            return Ok(());
        };
        // Flush: the superseded utterance dies unreported.
        if let Some(mut prev) = active.take() {
            let _ = prev.child.kill();
            let _ = prev.child.wait();
        }

        let child = match Command::new(&self.command)
            .args(&self.args)
            .arg(text)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
        {
            Ok(c) => c,
            Err(e) => {
                self.disabled = true;
                return Err(e);
            }
        };
        *active = Some(ActiveUtterance {
            child,
            tag,
            generation,
        });
        drop(active);

        let active = Arc::clone(&self.active);
        let events = self.events.clone();
        thread::spawn(move || watch_utterance(active, events, generation));
        Ok(())
    }

    /// Release the engine. Safe to call more than once; after the first
    /// call no further speech events are produced by this announcer.
    pub fn shutdown(&mut self) {
        if self.shut_down {
            return;
        }
        self.shut_down = true;
        if let Ok(mut active) = self.active.lock() {
            if let Some(mut a) = active.take() {
                let _ = a.child.kill();
                let _ = a.child.wait();
            }
        }
    }
}

impl Drop for Announcer {
    fn drop(&mut self) {
        self.shutdown();
    }
}

enum WatchStep {
    Waiting,
    Superseded,
    Reaped(Option<(UtteranceTag, bool)>),
}

fn watch_utterance(
    active: Arc<Mutex<Option<ActiveUtterance>>>,
    events: Sender<SpeechEvent>,
    generation: u64,
) {
    loop {
        thread::sleep(Duration::from_millis(25));
        let Ok(mut guard) = active.lock() else {
            return;
        };
        let step = match guard.as_mut() {
            Some(a) if a.generation == generation => match a.child.try_wait() {
                Ok(Some(status)) => WatchStep::Reaped(Some((a.tag, status.success()))),
                Ok(None) => WatchStep::Waiting,
                Err(_) => WatchStep::Reaped(None),
            },
            // Superseded by a newer utterance or shut down; the child
            // was already reaped by whoever replaced it.
            _ => WatchStep::Superseded,
        };
        match step {
            WatchStep::Waiting => {}
            WatchStep::Superseded => return,
            WatchStep::Reaped(outcome) => {
                *guard = None;
                if let Some((tag, success)) = outcome {
                    let event = if success {
                        SpeechEvent::Done(tag)
                    } else {
                        SpeechEvent::Failed(tag)
                    };
                    let _ = events.send(event);
                }
                return;
            }
        }
    }
}
