use std::sync::mpsc;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::app::{App, PlaybackState, PlayerState};
use crate::audio::{AudioCmd, AudioPlayer};
use crate::config;
use crate::mpris::{ControlCmd, MprisHandle};
use crate::runtime::mpris_sync::update_mpris;
use crate::ui;

/// State tracked by the runtime event loop across iterations.
pub struct EventLoopState {
    /// Last-known playing index as emitted to MPRIS.
    pub last_mpris_index: Option<usize>,
    /// Last-known playback state as emitted to MPRIS.
    pub last_mpris_playback: PlaybackState,
    /// Last-known (next, previous) capabilities as emitted to MPRIS.
    pub last_mpris_caps: (bool, bool),
}

impl EventLoopState {
    /// Construct a new `EventLoopState` seeded from `app`.
    pub fn new(app: &App) -> Self {
        Self {
            last_mpris_index: None,
            last_mpris_playback: app.playback,
            last_mpris_caps: (false, false),
        }
    }
}

/// Main terminal event loop: handles input, UI drawing, sync with the audio
/// thread and MPRIS. Returns `Ok(())` when shutdown is requested.
pub fn run(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    settings: &config::Settings,
    app: &mut App,
    audio_player: &AudioPlayer,
    mpris: &MprisHandle,
    control_tx: &mpsc::Sender<ControlCmd>,
    control_rx: &mpsc::Receiver<ControlCmd>,
    state: &mut EventLoopState,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        // Sync playback state from the audio thread.
        let now = app.now_playing();
        app.sync_playback(&now);

        // Keep MPRIS in sync even when playback changes come from media keys
        // or auto-advance.
        let caps = (now.playback.has_next, now.playback.has_previous);
        if now.index != state.last_mpris_index
            || app.playback != state.last_mpris_playback
            || caps != state.last_mpris_caps
        {
            update_mpris(mpris, app);
            state.last_mpris_index = now.index;
            state.last_mpris_playback = app.playback;
            state.last_mpris_caps = caps;
        }

        let player = PlayerState::derive(&now.playback, app.current_track(&now));
        terminal.draw(|f| ui::draw(f, &player, &settings.ui))?;

        while let Ok(cmd) = control_rx.try_recv() {
            if handle_control_cmd(cmd, audio_player) {
                return Ok(());
            }
        }

        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                if handle_key_event(key, audio_player, control_tx) {
                    break;
                }
            }
        }
    }

    Ok(())
}

/// Forward a control command to the audio thread. Returns true on quit.
/// The audio thread owns the no-op rules (play while playing, next past the
/// end), so commands pass through unfiltered.
fn handle_control_cmd(cmd: ControlCmd, audio_player: &AudioPlayer) -> bool {
    match cmd {
        ControlCmd::Quit => {
            audio_player.release();
            return true;
        }
        ControlCmd::Play => {
            let _ = audio_player.send(AudioCmd::Play);
        }
        ControlCmd::Pause => {
            let _ = audio_player.send(AudioCmd::Pause);
        }
        ControlCmd::PlayPause => {
            let _ = audio_player.send(AudioCmd::PlayPause);
        }
        ControlCmd::Stop => {
            let _ = audio_player.send(AudioCmd::Stop);
        }
        ControlCmd::Next => {
            let _ = audio_player.send(AudioCmd::Next);
        }
        ControlCmd::Prev => {
            let _ = audio_player.send(AudioCmd::Prev);
        }
    }

    false
}

/// Handle a key press. Transport keys funnel through the same `ControlCmd`
/// channel MPRIS uses. Returns true on quit.
fn handle_key_event(
    key: KeyEvent,
    audio_player: &AudioPlayer,
    control_tx: &mpsc::Sender<ControlCmd>,
) -> bool {
    match key.code {
        KeyCode::Char('q') => {
            audio_player.release();
            return true;
        }
        KeyCode::Char('p') | KeyCode::Char(' ') => {
            let _ = control_tx.send(ControlCmd::PlayPause);
        }
        KeyCode::Char('l') | KeyCode::Right => {
            let _ = control_tx.send(ControlCmd::Next);
        }
        KeyCode::Char('h') | KeyCode::Left => {
            let _ = control_tx.send(ControlCmd::Prev);
        }
        _ => {}
    }

    false
}
