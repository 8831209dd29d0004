//! Audio playback, isolated on its own thread.
//!
//! The rest of the app never touches rodio directly. It sends [`AudioCmd`]s
//! through the [`AudioPlayer`] handle and reads back [`NowPlaying`]
//! snapshots, each one complete enough to render a player screen from.

mod player;
mod sink;
mod source;
mod thread;
mod transport;
mod types;

pub use player::AudioPlayer;
pub use types::{AudioCmd, NowPlaying, Playback, PlaybackHandle, Progress};

#[cfg(test)]
mod tests;
