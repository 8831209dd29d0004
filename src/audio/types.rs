//! Audio-related small types and handles.
//!
//! This module defines the command enum understood by the audio thread and
//! the playback snapshot it publishes for the UI and MPRIS layers.

use std::sync::{Arc, Mutex};
use std::time::Duration;

#[derive(Debug)]
pub enum AudioCmd {
    /// Toggle between playing and paused, retrying the current track when
    /// nothing is decoded yet.
    PlayPause,
    /// Resume playback. No-op while already playing.
    Play,
    /// Pause playback. No-op while already paused.
    Pause,
    /// Skip to the next track; past the last track this stops, rewound.
    Next,
    /// Go to the previous track; at the first track this seeks to its start.
    Prev,
    /// Pause and rewind the current track.
    Stop,
    /// Quit the audio thread.
    Quit,
}

/// Position within the current track.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Progress {
    /// Fraction of the track played so far, in `[0.0, 1.0]`.
    pub position: f32,
    /// Playback time elapsed so far.
    pub elapsed: Duration,
}

#[derive(Debug, Clone, Default, PartialEq)]
/// One snapshot of the player's transport state.
///
/// The audio thread replaces the whole value on every event; readers never
/// see a partially updated snapshot.
pub struct Playback {
    /// A track is being resolved/decoded and cannot start yet.
    pub is_loading: bool,
    /// Whether playback is currently active.
    pub is_playing: bool,
    /// Total duration of the current track, zero when unknown.
    pub duration: Duration,
    /// How far into the current track playback is.
    pub progress: Progress,
    /// Whether a next track exists in the list.
    pub has_next: bool,
    /// Whether the previous control has a target (it always does once a
    /// track is loaded: at the first track it restarts).
    pub has_previous: bool,
}

#[derive(Debug, Clone, Default)]
/// Shared now-playing information: which track, and its latest snapshot.
pub struct NowPlaying {
    /// Index of the current track in the track list (if any loaded).
    pub index: Option<usize>,
    /// Latest published transport snapshot.
    pub playback: Playback,
}

pub type PlaybackHandle = Arc<Mutex<NowPlaying>>;
