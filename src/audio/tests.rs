use std::time::Duration;

use super::player::AudioPlayer;
use super::thread::{FADE_STEPS, fade_step_ms, fade_volume};
use super::types::AudioCmd;

#[test]
fn quit_softly_twice_does_not_panic() {
    let player = AudioPlayer::new(Vec::new());
    player.quit_softly(Duration::from_millis(0));
    // The second call finds the join handle already taken.
    player.quit_softly(Duration::from_millis(0));
}

#[test]
fn commands_after_quit_are_rejected() {
    let player = AudioPlayer::new(Vec::new());
    player.quit_softly(Duration::from_millis(0));

    // The thread is joined, so its receiver is gone.
    assert!(player.send(AudioCmd::Stop).is_err());
    assert!(player.poll_event().is_none());
}

#[test]
fn fade_step_ms_never_returns_zero() {
    assert_eq!(fade_step_ms(1000, FADE_STEPS), 50);
    assert_eq!(fade_step_ms(20, FADE_STEPS), 1);
    // Fades shorter than the step count still sleep between steps.
    assert_eq!(fade_step_ms(5, FADE_STEPS), 1);
    assert_eq!(fade_step_ms(1, FADE_STEPS), 1);
}

#[test]
fn fade_volume_ramps_linearly_to_silence() {
    assert_eq!(fade_volume(0, FADE_STEPS), 1.0);
    assert_eq!(fade_volume(FADE_STEPS, FADE_STEPS), 0.0);
    assert_eq!(fade_volume(FADE_STEPS / 2, FADE_STEPS), 0.5);

    let mut prev = fade_volume(0, FADE_STEPS);
    for step in 1..=FADE_STEPS {
        let v = fade_volume(step, FADE_STEPS);
        assert!(v < prev);
        prev = v;
    }
}
