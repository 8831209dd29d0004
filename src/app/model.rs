//! Application model types: `App` and `PlaybackState`.
//!
//! The `App` struct holds the track list and the latest playback state
//! observed from the audio thread.

use crate::audio::{NowPlaying, PlaybackHandle};
use crate::library::Track;

/// The playback state of the application.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PlaybackState {
    Stopped,
    Playing,
    Paused,
}

impl Default for PlaybackState {
    fn default() -> Self {
        Self::Stopped
    }
}

/// The main application model.
pub struct App {
    pub tracks: Vec<Track>,
    pub playback: PlaybackState,
    pub playback_handle: Option<PlaybackHandle>,
}

impl App {
    /// Create a new `App` with the provided list of `tracks`.
    pub fn new(tracks: Vec<Track>) -> Self {
        Self {
            tracks,
            playback: PlaybackState::Stopped,
            playback_handle: None,
        }
    }

    /// Attach a `PlaybackHandle` used to observe playback progress.
    pub fn set_playback_handle(&mut self, h: PlaybackHandle) {
        self.playback_handle = Some(h);
    }

    /// Clone the latest now-playing snapshot out of the shared handle.
    /// Without a handle (or with a poisoned lock) this returns the default,
    /// stopped snapshot.
    pub fn now_playing(&self) -> NowPlaying {
        self.playback_handle
            .as_ref()
            .and_then(|h| h.lock().ok().map(|info| info.clone()))
            .unwrap_or_default()
    }

    /// Fold a snapshot into the coarse `PlaybackState` used by the UI.
    pub fn sync_playback(&mut self, now: &NowPlaying) {
        self.playback = if now.index.is_none() {
            PlaybackState::Stopped
        } else if now.playback.is_playing {
            PlaybackState::Playing
        } else {
            PlaybackState::Paused
        };
    }

    /// The track a snapshot points at, when its index is in range.
    pub fn current_track(&self, now: &NowPlaying) -> Option<&Track> {
        now.index.and_then(|i| self.tracks.get(i))
    }
}
