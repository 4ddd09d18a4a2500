use super::*;

#[test]
fn start_stops_then_announces_first_track_with_session_tag() {
    let mut seq = Sequencer::new(3);
    assert_eq!(
        seq.start(),
        vec![
            Action::Stop,
            Action::Announce {
                index: 0,
                tag: UtteranceTag::Session
            }
        ]
    );
    assert!(seq.engaged());
    assert_eq!(seq.index(), 0);
}

#[test]
fn start_on_empty_catalog_does_nothing() {
    let mut seq = Sequencer::new(0);
    assert!(seq.start().is_empty());
    assert!(!seq.engaged());
    // Events arriving anyway must be harmless.
    assert!(seq.handle(SequencerEvent::PlaybackEnded).is_empty());
    assert!(
        seq.handle(SequencerEvent::SpeechDone(UtteranceTag::Session))
            .is_empty()
    );
}

#[test]
fn session_speech_done_starts_playback_of_current_track() {
    let mut seq = Sequencer::new(2);
    seq.start();
    let actions = seq.handle(SequencerEvent::SpeechDone(UtteranceTag::Session));
    assert_eq!(actions, vec![Action::Play { index: 0 }]);
}

#[test]
fn adhoc_speech_done_never_starts_playback() {
    let mut seq = Sequencer::new(2);
    seq.start();
    // Even mid-session, a completed ad-hoc utterance is ignored.
    assert!(
        seq.handle(SequencerEvent::SpeechDone(UtteranceTag::Adhoc))
            .is_empty()
    );
    // And the session announcement still works afterwards.
    assert_eq!(
        seq.handle(SequencerEvent::SpeechDone(UtteranceTag::Session)),
        vec![Action::Play { index: 0 }]
    );
}

#[test]
fn announce_is_adhoc_and_leaves_index_alone() {
    let mut seq = Sequencer::new(3);
    seq.start();
    assert_eq!(
        seq.announce(2),
        Some(Action::Announce {
            index: 2,
            tag: UtteranceTag::Adhoc
        })
    );
    assert_eq!(seq.index(), 0);
    assert_eq!(seq.announce(3), None);
}

#[test]
fn playback_ended_advances_and_announces_next() {
    let mut seq = Sequencer::new(3);
    seq.start();
    seq.handle(SequencerEvent::SpeechDone(UtteranceTag::Session));

    let actions = seq.handle(SequencerEvent::PlaybackEnded);
    assert_eq!(
        actions,
        vec![
            Action::Stop,
            Action::Announce {
                index: 1,
                tag: UtteranceTag::Session
            }
        ]
    );
    assert_eq!(seq.index(), 1);
}

#[test]
fn wraps_to_zero_exactly_once_after_full_pass() {
    let len = 4;
    let mut seq = Sequencer::new(len);
    seq.start();

    let mut wraps = 0;
    for n in 0..len {
        seq.handle(SequencerEvent::SpeechDone(UtteranceTag::Session));
        let actions = seq.handle(SequencerEvent::PlaybackEnded);
        if seq.index() == 0 {
            wraps += 1;
            // Final track: stop only, no follow-up announcement.
            assert_eq!(actions, vec![Action::Stop]);
        } else {
            assert_eq!(seq.index(), n + 1);
        }
    }
    assert_eq!(wraps, 1);

    // The cycle stays paused until the next external start.
    assert_eq!(seq.index(), 0);
    assert!(!seq.engaged());
    assert!(seq.handle(SequencerEvent::PlaybackEnded).is_empty());
}

#[test]
fn restart_during_playback_ignores_stale_playback_ended() {
    let mut seq = Sequencer::new(3);
    seq.start();
    seq.handle(SequencerEvent::SpeechDone(UtteranceTag::Session));

    // Track 0 is playing; the user restarts the session. The old track
    // may still drain and report its end during the new announcement.
    seq.start();
    assert!(seq.handle(SequencerEvent::PlaybackEnded).is_empty());
    assert_eq!(seq.index(), 0);

    // The fresh session still announces-and-plays track 0.
    assert_eq!(
        seq.handle(SequencerEvent::SpeechDone(UtteranceTag::Session)),
        vec![Action::Play { index: 0 }]
    );
}

#[test]
fn halt_stops_session_and_ignores_later_session_events() {
    let mut seq = Sequencer::new(2);
    seq.start();
    assert_eq!(seq.halt(), Some(Action::Stop));
    assert!(!seq.engaged());
    assert_eq!(seq.halt(), None);

    assert!(
        seq.handle(SequencerEvent::SpeechDone(UtteranceTag::Session))
            .is_empty()
    );
    assert!(seq.handle(SequencerEvent::PlaybackEnded).is_empty());
}

#[test]
fn two_track_session_scenario() {
    // Two tracks, full session walk-through.
    let mut seq = Sequencer::new(2);

    assert_eq!(
        seq.start(),
        vec![
            Action::Stop,
            Action::Announce {
                index: 0,
                tag: UtteranceTag::Session
            }
        ]
    );
    assert_eq!(
        seq.handle(SequencerEvent::SpeechDone(UtteranceTag::Session)),
        vec![Action::Play { index: 0 }]
    );
    assert_eq!(
        seq.handle(SequencerEvent::PlaybackEnded),
        vec![
            Action::Stop,
            Action::Announce {
                index: 1,
                tag: UtteranceTag::Session
            }
        ]
    );
    assert_eq!(
        seq.handle(SequencerEvent::SpeechDone(UtteranceTag::Session)),
        vec![Action::Play { index: 1 }]
    );
    // Second ended: wrap to 0, stop, nothing further until restarted.
    assert_eq!(seq.handle(SequencerEvent::PlaybackEnded), vec![Action::Stop]);
    assert_eq!(seq.index(), 0);
    assert!(!seq.engaged());

    // A fresh start picks up from the top again.
    assert_eq!(
        seq.start(),
        vec![
            Action::Stop,
            Action::Announce {
                index: 0,
                tag: UtteranceTag::Session
            }
        ]
    );
}
