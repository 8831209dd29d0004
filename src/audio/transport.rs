//! Index arithmetic and timing math behind the audio thread.

use std::time::Duration;

/// Cadence of progress refreshes while playing.
pub(super) const PROGRESS_POLL_INTERVAL: Duration = Duration::from_millis(500);

/// Base wait on the command channel between timeout ticks.
pub(super) const COMMAND_TICK: Duration = Duration::from_millis(200);

/// Where a next press lands, starting from `index`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum NextOutcome {
    /// Load and play the track at this index.
    Advance(usize),
    /// Already at the last track: stop, rewound to the start.
    StopAtEnd,
}

/// Where a previous press lands, starting from `index`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum PrevOutcome {
    /// Load and play the track at this index.
    Retreat(usize),
    /// Already at the first track: seek back to its start.
    Restart,
}

pub(super) fn next_outcome(index: usize, track_count: usize) -> NextOutcome {
    if index + 1 >= track_count {
        NextOutcome::StopAtEnd
    } else {
        NextOutcome::Advance(index + 1)
    }
}

pub(super) fn prev_outcome(index: usize) -> PrevOutcome {
    if index == 0 {
        PrevOutcome::Restart
    } else {
        PrevOutcome::Retreat(index - 1)
    }
}

pub(super) fn has_next(index: usize, track_count: usize) -> bool {
    index + 1 < track_count
}

/// Fraction of the track played, clamped to `[0.0, 1.0]`. A zero (unknown)
/// duration reports zero rather than dividing by it.
pub(super) fn progress_fraction(elapsed: Duration, duration: Duration) -> f32 {
    if duration.is_zero() {
        return 0.0;
    }
    (elapsed.as_secs_f32() / duration.as_secs_f32()).clamp(0.0, 1.0)
}

/// How long the command loop may block waiting for the next command. While
/// playing the wait is capped at the time left until the progress refresh
/// is due, so refreshes hit the 500ms cadence instead of the first tick
/// after it; paused, it is the plain command tick.
pub(super) fn poll_timeout(paused: bool, since_refresh: Duration) -> Duration {
    if paused {
        COMMAND_TICK
    } else {
        PROGRESS_POLL_INTERVAL
            .saturating_sub(since_refresh)
            .min(COMMAND_TICK)
    }
}
