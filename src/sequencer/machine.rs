/// Identifies who requested an utterance.
///
/// Session announcements chain into playback when they finish; ad-hoc
/// announcements (a user asking "what is this track?") never do. The
/// distinction is the only thing preventing an ad-hoc announce from
/// advancing playback when it completes.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum UtteranceTag {
    Session,
    Adhoc,
}

/// Asynchronous inputs to the sequencer.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum SequencerEvent {
    /// An utterance with the given tag finished speaking.
    SpeechDone(UtteranceTag),
    /// The currently loaded track played to its end.
    PlaybackEnded,
}

/// What the runtime should do next.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Action {
    /// Speak the announcement for the track at `index`, tagged `tag`.
    Announce { index: usize, tag: UtteranceTag },
    /// Load the track at `index` and start playing it.
    Play { index: usize },
    /// Stop playback.
    Stop,
}

/// Orchestrates announce-then-play across the catalog.
///
/// The index always stays in `0..len` (or 0 when the catalog is empty).
/// Reaching the end of the catalog wraps the index back to 0 but takes
/// no further action; the cycle stays paused until [`Sequencer::start`]
/// is called again.
pub struct Sequencer {
    index: usize,
    len: usize,
    engaged: bool,
    /// Set while a session announcement is in flight. During that
    /// window the previous track may still be draining, so an incoming
    /// `PlaybackEnded` must not advance the session.
    announcing: bool,
}

impl Sequencer {
    pub fn new(len: usize) -> Self {
        Self {
            index: 0,
            len,
            engaged: false,
            announcing: false,
        }
    }

    /// Current track index.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Whether a session is in progress (started and not halted).
    pub fn engaged(&self) -> bool {
        self.engaged
    }

    /// Start a session from the top of the catalog.
    ///
    /// Always leads with `Stop` so whatever was playing (a previous
    /// session's track, a leftover sink) is silenced before the first
    /// announcement. An empty catalog produces no actions and leaves
    /// the sequencer disengaged.
    pub fn start(&mut self) -> Vec<Action> {
        if self.len == 0 {
            return Vec::new();
        }
        self.index = 0;
        self.engaged = true;
        self.announcing = true;
        vec![
            Action::Stop,
            Action::Announce {
                index: self.index,
                tag: UtteranceTag::Session,
            },
        ]
    }

    /// Stop the session. Playback is stopped; the index keeps its value
    /// so the state remains inspectable, but session events are ignored
    /// until the next [`Sequencer::start`].
    pub fn halt(&mut self) -> Option<Action> {
        let was_engaged = self.engaged;
        self.engaged = false;
        self.announcing = false;
        was_engaged.then_some(Action::Stop)
    }

    /// Announce a single track without affecting the session.
    pub fn announce(&self, index: usize) -> Option<Action> {
        (index < self.len).then_some(Action::Announce {
            index,
            tag: UtteranceTag::Adhoc,
        })
    }

    /// Feed one event into the state machine and collect the resulting
    /// actions, in execution order.
    pub fn handle(&mut self, event: SequencerEvent) -> Vec<Action> {
        match event {
            SequencerEvent::SpeechDone(UtteranceTag::Session) => {
                if self.engaged && self.announcing && self.index < self.len {
                    self.announcing = false;
                    vec![Action::Play { index: self.index }]
                } else {
                    Vec::new()
                }
            }
            // Ad-hoc announcements never chain into playback.
            SequencerEvent::SpeechDone(UtteranceTag::Adhoc) => Vec::new(),
            SequencerEvent::PlaybackEnded => {
                // While announcing, an ended event can only be a stale
                // report from the track the session just replaced.
                if !self.engaged || self.announcing || self.len == 0 {
                    return Vec::new();
                }
                self.index += 1;
                let mut actions = vec![Action::Stop];
                if self.index < self.len {
                    self.announcing = true;
                    actions.push(Action::Announce {
                        index: self.index,
                        tag: UtteranceTag::Session,
                    });
                } else {
                    // Wrap, but stay quiet until the next external start.
                    self.index = 0;
                    self.engaged = false;
                }
                actions
            }
        }
    }
}
