//! View state for the player screen, derived fresh on every draw.

use std::time::Duration;

use crate::audio::Playback;
use crate::library::Track;

/// Everything the player screen needs, precomputed from the latest
/// playback snapshot and the current track.
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerState {
    pub title: Option<String>,
    pub artist: Option<String>,
    /// The current track is still being resolved or decoded.
    pub is_loading: bool,
    /// Play/pause reacts to input. False only while loading.
    pub can_play: bool,
    /// Render the play glyph; otherwise the pause glyph.
    pub show_play: bool,
    pub has_next: bool,
    pub has_previous: bool,
    /// Fraction of the track played, in `[0.0, 1.0]`.
    pub position: f32,
    pub elapsed_text: String,
    pub duration_text: String,
}

impl PlayerState {
    pub fn derive(playback: &Playback, track: Option<&Track>) -> Self {
        Self {
            title: track.map(|t| t.title.clone()),
            artist: track.and_then(|t| t.artist.clone()),
            is_loading: playback.is_loading,
            can_play: !playback.is_loading,
            show_play: !playback.is_playing,
            has_next: playback.has_next,
            has_previous: playback.has_previous,
            position: playback.progress.position,
            elapsed_text: format_display_time(playback.progress.elapsed),
            duration_text: format_display_time(playback.duration),
        }
    }
}

/// Format a duration as `MM:SS`, both parts zero padded. Minutes keep
/// counting past the hour instead of wrapping.
pub fn format_display_time(d: Duration) -> String {
    let total = d.as_secs();
    format!("{:02}:{:02}", total / 60, total % 60)
}
