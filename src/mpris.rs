//! MPRIS (`org.mpris.MediaPlayer2`) integration over the session bus.
//!
//! Desktop media controls drive the player through [`ControlCmd`]s; the
//! runtime mirrors playback state back in through the [`MprisHandle`], and a
//! small service loop turns those updates into `PropertiesChanged` signals.

use std::collections::HashMap;
use std::sync::mpsc::{self, Sender};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_io::{Timer, block_on};
use tracing::warn;
use zbus::{Connection, interface};
use zvariant::{ObjectPath, OwnedValue, Value};

use crate::app::PlaybackState;
use crate::library::Track;

#[derive(Clone, Debug)]
pub enum ControlCmd {
    Quit,
    Play,
    Pause,
    PlayPause,
    Stop,
    Next,
    Prev,
}

#[derive(Debug, Default)]
struct SharedState {
    playback: PlaybackState,
    title: Option<String>,
    artist: Vec<String>,
    album: Option<String>,
    url: Option<String>,
    art_url: Option<String>,
    length_micros: Option<i64>,
    track_id: Option<ObjectPath<'static>>,
    can_next: bool,
    can_previous: bool,
}

/// Write side of the MPRIS mirror. Every setter nudges the service loop so
/// it re-emits the affected properties.
pub struct MprisHandle {
    state: Arc<Mutex<SharedState>>,
    notify: Sender<()>,
}

impl MprisHandle {
    pub fn set_playback(&self, playback: PlaybackState) {
        if let Ok(mut s) = self.state.lock() {
            s.playback = playback;
        }
        let _ = self.notify.send(());
    }

    pub fn set_track_metadata(&self, index: Option<usize>, track: Option<&Track>) {
        if let Ok(mut s) = self.state.lock() {
            match track {
                Some(t) => {
                    s.title = Some(t.title.clone());
                    s.artist = t.artist.clone().into_iter().collect();
                    s.album = t.album.clone();
                    s.url = Some(t.url());
                    s.art_url = t.artwork_uri.clone();
                    s.length_micros = t.duration.map(|d| d.as_micros() as i64);
                    s.track_id = index.and_then(|i| {
                        ObjectPath::try_from(format!("/org/mpris/MediaPlayer2/track/{i}")).ok()
                    });
                }
                None => {
                    s.title = None;
                    s.artist = Vec::new();
                    s.album = None;
                    s.url = None;
                    s.art_url = None;
                    s.length_micros = None;
                    s.track_id = None;
                }
            }
        }
        let _ = self.notify.send(());
    }

    pub fn set_capabilities(&self, can_next: bool, can_previous: bool) {
        if let Ok(mut s) = self.state.lock() {
            s.can_next = can_next;
            s.can_previous = can_previous;
        }
        let _ = self.notify.send(());
    }
}

struct RootIface {
    tx: Sender<ControlCmd>,
}

#[interface(name = "org.mpris.MediaPlayer2")]
impl RootIface {
    fn raise(&self) {
        // No-op for TUI.
    }

    fn quit(&self) {
        let _ = self.tx.send(ControlCmd::Quit);
    }

    #[zbus(property)]
    fn can_quit(&self) -> bool {
        true
    }

    #[zbus(property)]
    fn can_raise(&self) -> bool {
        false
    }

    #[zbus(property)]
    fn has_track_list(&self) -> bool {
        false
    }

    #[zbus(property)]
    fn identity(&self) -> &str {
        "andante"
    }

    #[zbus(property)]
    fn supported_uri_schemes(&self) -> Vec<String> {
        vec!["file".into(), "http".into(), "https".into()]
    }

    #[zbus(property)]
    fn supported_mime_types(&self) -> Vec<String> {
        vec![]
    }
}

struct PlayerIface {
    tx: Sender<ControlCmd>,
    state: Arc<Mutex<SharedState>>,
}

#[interface(name = "org.mpris.MediaPlayer2.Player")]
impl PlayerIface {
    fn next(&self) {
        let _ = self.tx.send(ControlCmd::Next);
    }

    fn previous(&self) {
        let _ = self.tx.send(ControlCmd::Prev);
    }

    fn play(&self) {
        let _ = self.tx.send(ControlCmd::Play);
    }

    fn pause(&self) {
        let _ = self.tx.send(ControlCmd::Pause);
    }

    fn play_pause(&self) {
        let _ = self.tx.send(ControlCmd::PlayPause);
    }

    fn stop(&self) {
        let _ = self.tx.send(ControlCmd::Stop);
    }

    #[zbus(property)]
    fn playback_status(&self) -> &str {
        // NOTE: This returns a &'static str; we map state into static strings.
        let Ok(s) = self.state.lock() else {
            return "Stopped";
        };
        match s.playback {
            PlaybackState::Stopped => "Stopped",
            PlaybackState::Playing => "Playing",
            PlaybackState::Paused => "Paused",
        }
    }

    #[zbus(property)]
    fn can_control(&self) -> bool {
        true
    }

    #[zbus(property)]
    fn can_play(&self) -> bool {
        true
    }

    #[zbus(property)]
    fn can_pause(&self) -> bool {
        true
    }

    #[zbus(property)]
    fn can_go_next(&self) -> bool {
        self.state.lock().map(|s| s.can_next).unwrap_or(false)
    }

    #[zbus(property)]
    fn can_go_previous(&self) -> bool {
        self.state.lock().map(|s| s.can_previous).unwrap_or(false)
    }

    #[zbus(property)]
    fn metadata(&self) -> HashMap<String, OwnedValue> {
        let mut map = HashMap::new();
        let Ok(s) = self.state.lock() else {
            return map;
        };

        if let Some(p) = &s.track_id {
            insert_value(&mut map, "mpris:trackid", p.clone());
        }
        if let Some(title) = &s.title {
            insert_value(&mut map, "xesam:title", title.clone());
        }
        if !s.artist.is_empty() {
            insert_value(&mut map, "xesam:artist", s.artist.clone());
        }
        if let Some(album) = &s.album {
            insert_value(&mut map, "xesam:album", album.clone());
        }
        if let Some(url) = &s.url {
            insert_value(&mut map, "xesam:url", url.clone());
        }
        if let Some(art_url) = &s.art_url {
            insert_value(&mut map, "mpris:artUrl", art_url.clone());
        }
        if let Some(length) = s.length_micros {
            insert_value(&mut map, "mpris:length", length);
        }
        map
    }
}

fn insert_value<'v>(
    map: &mut HashMap<String, OwnedValue>,
    key: &str,
    value: impl Into<Value<'v>>,
) {
    if let Ok(owned) = OwnedValue::try_from(value.into()) {
        map.insert(key.to_string(), owned);
    }
}

pub fn spawn_mpris(tx: Sender<ControlCmd>) -> MprisHandle {
    let state = Arc::new(Mutex::new(SharedState::default()));
    let (notify_tx, notify_rx) = mpsc::channel::<()>();

    let state_for_thread = state.clone();
    std::thread::spawn(move || {
        block_on(async move {
            let path = "/org/mpris/MediaPlayer2";

            let connection = match Connection::session().await {
                Ok(c) => c,
                Err(e) => {
                    warn!("mpris: failed to connect to session bus: {e}");
                    return;
                }
            };

            if let Err(e) = connection
                .request_name("org.mpris.MediaPlayer2.andante")
                .await
            {
                warn!("mpris: failed to acquire name: {e}");
                return;
            }

            let object_server = connection.object_server();

            if let Err(e) = object_server.at(path, RootIface { tx: tx.clone() }).await {
                warn!("mpris: failed to register root iface: {e}");
                return;
            }

            if let Err(e) = object_server
                .at(
                    path,
                    PlayerIface {
                        tx,
                        state: state_for_thread,
                    },
                )
                .await
            {
                warn!("mpris: failed to register player iface: {e}");
                return;
            }

            let iface_ref = match object_server.interface::<_, PlayerIface>(path).await {
                Ok(r) => r,
                Err(e) => {
                    warn!("mpris: failed to look up player iface: {e}");
                    return;
                }
            };

            // Coalesce handle updates into PropertiesChanged emissions.
            loop {
                Timer::after(Duration::from_millis(250)).await;

                let mut dirty = false;
                loop {
                    match notify_rx.try_recv() {
                        Ok(()) => dirty = true,
                        Err(mpsc::TryRecvError::Empty) => break,
                        Err(mpsc::TryRecvError::Disconnected) => return,
                    }
                }
                if !dirty {
                    continue;
                }

                let iface = iface_ref.get().await;
                let emitter = iface_ref.signal_emitter();
                let _ = iface.playback_status_changed(emitter).await;
                let _ = iface.metadata_changed(emitter).await;
                let _ = iface.can_go_next_changed(emitter).await;
                let _ = iface.can_go_previous_changed(emitter).await;
            }
        });
    });

    MprisHandle {
        state,
        notify: notify_tx,
    }
}

#[cfg(test)]
mod tests;
