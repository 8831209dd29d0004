use std::sync::mpsc::{self, Sender};
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;

use crate::config::PlaybackSettings;
use crate::library::Track;

use super::thread::spawn_audio_thread;
use super::types::{AudioCmd, NowPlaying, PlaybackHandle};

/// Handle to the audio thread. Commands go in through [`send`], state comes
/// back out through the shared snapshot behind [`playback_handle`].
///
/// [`send`]: AudioPlayer::send
/// [`playback_handle`]: AudioPlayer::playback_handle
pub struct AudioPlayer {
    tx: Sender<AudioCmd>,
    playback: PlaybackHandle,
    join: Mutex<Option<JoinHandle<()>>>,
}

impl AudioPlayer {
    pub fn new(tracks: Vec<Track>, playback_settings: PlaybackSettings) -> Self {
        let (tx, rx) = mpsc::channel::<AudioCmd>();
        let playback_info: PlaybackHandle = Arc::new(Mutex::new(NowPlaying::default()));

        let audio_handle =
            spawn_audio_thread(tracks, rx, playback_info.clone(), playback_settings);

        Self {
            tx,
            playback: playback_info,
            join: Mutex::new(Some(audio_handle)),
        }
    }

    pub fn playback_handle(&self) -> PlaybackHandle {
        self.playback.clone()
    }

    pub fn send(&self, cmd: AudioCmd) -> Result<(), mpsc::SendError<AudioCmd>> {
        self.tx.send(cmd)
    }

    /// Shut the audio thread down and wait for it. Safe to call again once
    /// released; only the first call joins.
    pub fn release(&self) {
        let _ = self.send(AudioCmd::Quit);

        if let Ok(mut j) = self.join.lock() {
            if let Some(h) = j.take() {
                let _ = h.join();
            }
        }
    }
}
