use std::env;
use std::path::Path;
use std::sync::mpsc;

use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::{Terminal, backend::CrosstermBackend};
use tracing::{info, warn};

use crate::app::App;
use crate::audio::AudioPlayer;
use crate::library::{demo_tracks, tracks_from_path};
use crate::mpris::ControlCmd;

mod event_loop;
mod logging;
mod mpris_sync;
mod settings;

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let settings = settings::load_settings();
    let _log_guard = logging::init(&settings.log);

    // With no path argument, fall back to the built-in demo pair.
    let tracks = match env::args().nth(1) {
        Some(path) => tracks_from_path(Path::new(&path), &settings.library),
        None => demo_tracks(),
    };
    info!("starting with {} track(s)", tracks.len());

    let audio_player = AudioPlayer::new(tracks.clone(), settings.playback.clone());
    let mut app = App::new(tracks);
    app.set_playback_handle(audio_player.playback_handle());

    let (control_tx, control_rx) = mpsc::channel::<ControlCmd>();
    let mpris = crate::mpris::spawn_mpris(control_tx.clone());

    mpris_sync::update_mpris(&mpris, &app);

    let run_result: Result<(), Box<dyn std::error::Error>> = (|| {
        enable_raw_mode()?;
        let mut stdout = std::io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        let mut state = event_loop::EventLoopState::new(&app);
        let result = event_loop::run(
            &mut terminal,
            &settings,
            &mut app,
            &audio_player,
            &mpris,
            &control_tx,
            &control_rx,
            &mut state,
        );

        // Restore is best-effort; a failure here must not skip the release
        // below.
        if let Err(e) = disable_raw_mode() {
            warn!("failed to disable raw mode: {e}");
        }
        if let Err(e) = execute!(terminal.backend_mut(), LeaveAlternateScreen) {
            warn!("failed to leave the alternate screen: {e}");
        }
        if let Err(e) = terminal.show_cursor() {
            warn!("failed to restore the cursor: {e}");
        }

        result
    })();

    // Runs on every exit path, including a failed terminal setup. Releasing
    // twice (after a quit key already did) is fine.
    audio_player.release();

    run_result
}
