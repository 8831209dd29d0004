use std::time::Duration;

use crate::config::PlaybackSettings;

use super::AudioPlayer;
use super::transport::{
    COMMAND_TICK, NextOutcome, PrevOutcome, has_next, next_outcome, poll_timeout, prev_outcome,
    progress_fraction,
};

#[test]
fn next_advances_until_the_last_track() {
    assert_eq!(next_outcome(0, 3), NextOutcome::Advance(1));
    assert_eq!(next_outcome(1, 3), NextOutcome::Advance(2));
}

#[test]
fn next_on_the_last_track_stops_instead_of_wrapping() {
    assert_eq!(next_outcome(2, 3), NextOutcome::StopAtEnd);
    // Single-track list: already at the end.
    assert_eq!(next_outcome(0, 1), NextOutcome::StopAtEnd);
}

#[test]
fn prev_retreats_until_the_first_track() {
    assert_eq!(prev_outcome(2), PrevOutcome::Retreat(1));
    assert_eq!(prev_outcome(1), PrevOutcome::Retreat(0));
}

#[test]
fn prev_on_the_first_track_restarts_it() {
    assert_eq!(prev_outcome(0), PrevOutcome::Restart);
}

#[test]
fn has_next_is_false_only_on_the_last_track() {
    assert!(has_next(0, 2));
    assert!(!has_next(1, 2));
    assert!(!has_next(0, 1));
}

#[test]
fn progress_fraction_is_elapsed_over_duration() {
    let f = progress_fraction(Duration::from_secs(30), Duration::from_secs(120));
    assert!((f - 0.25).abs() < f32::EPSILON);
}

#[test]
fn progress_fraction_of_unknown_duration_is_zero() {
    assert_eq!(progress_fraction(Duration::from_secs(30), Duration::ZERO), 0.0);
}

#[test]
fn progress_fraction_clamps_past_the_end() {
    let f = progress_fraction(Duration::from_secs(130), Duration::from_secs(120));
    assert_eq!(f, 1.0);
}

#[test]
fn poll_timeout_waits_a_full_tick_while_paused() {
    assert_eq!(poll_timeout(true, Duration::ZERO), COMMAND_TICK);
    assert_eq!(poll_timeout(true, Duration::from_millis(450)), COMMAND_TICK);
}

#[test]
fn poll_timeout_caps_the_wait_at_the_refresh_deadline() {
    assert_eq!(poll_timeout(false, Duration::ZERO), COMMAND_TICK);
    assert_eq!(poll_timeout(false, Duration::from_millis(200)), COMMAND_TICK);
    // 100ms left until the refresh is due: wake exactly then, not a full
    // tick later.
    assert_eq!(
        poll_timeout(false, Duration::from_millis(400)),
        Duration::from_millis(100)
    );
}

#[test]
fn poll_timeout_is_zero_once_the_refresh_is_overdue() {
    assert_eq!(poll_timeout(false, Duration::from_millis(700)), Duration::ZERO);
}

#[test]
fn release_is_safe_to_call_twice() {
    let player = AudioPlayer::new(Vec::new(), PlaybackSettings::default());
    player.release();
    player.release();
}
