use crate::app::App;
use crate::mpris::MprisHandle;

pub fn update_mpris(mpris: &MprisHandle, app: &App) {
    let now = app.now_playing();
    mpris.set_track_metadata(now.index, app.current_track(&now));
    mpris.set_capabilities(now.playback.has_next, now.playback.has_previous);
    mpris.set_playback(app.playback);
}
