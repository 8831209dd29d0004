use std::sync::mpsc::{Receiver, RecvTimeoutError};
use std::thread;
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use rodio::{OutputStream, OutputStreamBuilder, Sink};
use tracing::{debug, error, info};

use crate::config::PlaybackSettings;
use crate::library::Track;

use super::sink::create_sink;
use super::transport::{self, NextOutcome, PrevOutcome};
use super::types::{AudioCmd, Playback, PlaybackHandle, Progress};

pub(super) fn spawn_audio_thread(
    tracks: Vec<Track>,
    rx: Receiver<AudioCmd>,
    playback_info: PlaybackHandle,
    settings: PlaybackSettings,
) -> JoinHandle<()> {
    thread::spawn(move || {
        let mut stream = match OutputStreamBuilder::open_default_stream() {
            Ok(s) => s,
            Err(e) => {
                error!("no audio output device: {e}");
                return;
            }
        };
        // rodio logs to stderr when OutputStream is dropped. That's useful in
        // debugging, but noisy for a TUI app.
        stream.log_on_drop(false);

        let mut index: Option<usize> = None;
        let mut paused = true;
        let mut sink: Option<Sink> = None;

        // Duration of the current track, as last published.
        let mut duration = Duration::ZERO;
        let mut last_refresh = Instant::now();

        /// Build one complete snapshot; every publish replaces the previous
        /// value wholesale.
        fn snapshot(
            track_count: usize,
            index: Option<usize>,
            is_loading: bool,
            is_playing: bool,
            duration: Duration,
            elapsed: Duration,
        ) -> Playback {
            Playback {
                is_loading,
                is_playing,
                duration,
                progress: Progress {
                    position: transport::progress_fraction(elapsed, duration),
                    elapsed,
                },
                has_next: index.is_some_and(|i| transport::has_next(i, track_count)),
                has_previous: index.is_some(),
            }
        }

        fn publish(playback_info: &PlaybackHandle, index: Option<usize>, playback: Playback) {
            if let Ok(mut info) = playback_info.lock() {
                info.index = index;
                info.playback = playback;
            }
        }

        /// Swap in the track at `i`. A loading snapshot goes out before the
        /// fetch/decode; failures are logged and leave that snapshot in
        /// place, so the UI keeps showing loading until the next command.
        fn load_track(
            i: usize,
            start_playing: bool,
            stream: &OutputStream,
            tracks: &[Track],
            sink: &mut Option<Sink>,
            index: &mut Option<usize>,
            paused: &mut bool,
            duration: &mut Duration,
            last_refresh: &mut Instant,
            playback_info: &PlaybackHandle,
            volume: f32,
        ) {
            let track = &tracks[i];

            if let Some(s) = sink.take() {
                s.stop();
            }

            *index = Some(i);
            *paused = true;
            *duration = track.duration.unwrap_or(Duration::ZERO);
            publish(
                playback_info,
                *index,
                snapshot(tracks.len(), *index, true, false, *duration, Duration::ZERO),
            );

            info!("loading track {}: {}", i, track.uri);
            let loaded = match create_sink(stream, track, volume) {
                Ok(l) => l,
                Err(e) => {
                    error!("failed to load {}: {e}", track.uri);
                    return;
                }
            };

            *duration = loaded.duration.or(track.duration).unwrap_or(Duration::ZERO);
            if start_playing {
                loaded.sink.play();
                *paused = false;
            }
            *sink = Some(loaded.sink);
            *last_refresh = Instant::now();
            publish(
                playback_info,
                *index,
                snapshot(
                    tracks.len(),
                    *index,
                    false,
                    !*paused,
                    *duration,
                    Duration::ZERO,
                ),
            );
        }

        /// Seek the current track back to its start. With `stop` the sink is
        /// paused as well; otherwise the play/pause state is untouched.
        fn rewind_current(
            stop: bool,
            track_count: usize,
            sink: &Option<Sink>,
            index: Option<usize>,
            paused: &mut bool,
            duration: Duration,
            playback_info: &PlaybackHandle,
        ) {
            let elapsed = match sink {
                Some(s) => {
                    if stop {
                        s.pause();
                        *paused = true;
                    }
                    match s.try_seek(Duration::ZERO) {
                        Ok(()) => Duration::ZERO,
                        Err(e) => {
                            // Leave the position where it is; the snapshot
                            // keeps reporting the real value.
                            debug!("seek to start failed: {e}");
                            s.get_pos()
                        }
                    }
                }
                None => {
                    if stop {
                        *paused = true;
                    }
                    Duration::ZERO
                }
            };

            let playing = !*paused && sink.is_some();
            publish(
                playback_info,
                index,
                snapshot(track_count, index, false, playing, duration, elapsed),
            );
        }

        fn do_resume(
            stream: &OutputStream,
            tracks: &[Track],
            sink: &mut Option<Sink>,
            index: &mut Option<usize>,
            paused: &mut bool,
            duration: &mut Duration,
            last_refresh: &mut Instant,
            playback_info: &PlaybackHandle,
            volume: f32,
        ) {
            // A drained sink has consumed its source and cannot replay, so
            // it counts as "nothing decoded" here.
            let resumable = sink.as_ref().is_some_and(|s| !s.empty());

            if resumable {
                if let Some(s) = sink.as_ref() {
                    s.play();
                    *paused = false;
                    *last_refresh = Instant::now();
                    publish(
                        playback_info,
                        *index,
                        snapshot(tracks.len(), *index, false, true, *duration, s.get_pos()),
                    );
                }
            } else {
                // Earlier load failed, the list never loaded, or the track
                // played out. (Re)load the current track and play.
                let retry = match *index {
                    Some(i) => Some(i),
                    None if !tracks.is_empty() => Some(0),
                    None => None,
                };
                if let Some(i) = retry {
                    load_track(
                        i,
                        true,
                        stream,
                        tracks,
                        sink,
                        index,
                        paused,
                        duration,
                        last_refresh,
                        playback_info,
                        volume,
                    );
                }
            }
        }

        fn do_pause(
            track_count: usize,
            sink: &Option<Sink>,
            index: Option<usize>,
            paused: &mut bool,
            duration: Duration,
            playback_info: &PlaybackHandle,
        ) {
            if let Some(s) = sink {
                s.pause();
                *paused = true;
                publish(
                    playback_info,
                    index,
                    snapshot(track_count, index, false, false, duration, s.get_pos()),
                );
            }
        }

        /// Next press and natural end of track take the same path: advance,
        /// or stop rewound when the list is exhausted.
        fn go_next(
            stream: &OutputStream,
            tracks: &[Track],
            sink: &mut Option<Sink>,
            index: &mut Option<usize>,
            paused: &mut bool,
            duration: &mut Duration,
            last_refresh: &mut Instant,
            playback_info: &PlaybackHandle,
            volume: f32,
        ) {
            let Some(i) = *index else {
                return;
            };
            match transport::next_outcome(i, tracks.len()) {
                NextOutcome::Advance(next) => load_track(
                    next,
                    true,
                    stream,
                    tracks,
                    sink,
                    index,
                    paused,
                    duration,
                    last_refresh,
                    playback_info,
                    volume,
                ),
                NextOutcome::StopAtEnd => rewind_current(
                    true,
                    tracks.len(),
                    sink,
                    *index,
                    paused,
                    *duration,
                    playback_info,
                ),
            }
        }

        if tracks.is_empty() {
            info!("no tracks to play");
        } else {
            load_track(
                0,
                settings.autoplay,
                &stream,
                &tracks,
                &mut sink,
                &mut index,
                &mut paused,
                &mut duration,
                &mut last_refresh,
                &playback_info,
                settings.volume,
            );
        }

        loop {
            let timeout = transport::poll_timeout(paused, last_refresh.elapsed());
            match rx.recv_timeout(timeout) {
                Ok(cmd) => match cmd {
                    AudioCmd::PlayPause => {
                        if paused {
                            do_resume(
                                &stream,
                                &tracks,
                                &mut sink,
                                &mut index,
                                &mut paused,
                                &mut duration,
                                &mut last_refresh,
                                &playback_info,
                                settings.volume,
                            );
                        } else {
                            do_pause(
                                tracks.len(),
                                &sink,
                                index,
                                &mut paused,
                                duration,
                                &playback_info,
                            );
                        }
                    }

                    AudioCmd::Play => {
                        if paused {
                            do_resume(
                                &stream,
                                &tracks,
                                &mut sink,
                                &mut index,
                                &mut paused,
                                &mut duration,
                                &mut last_refresh,
                                &playback_info,
                                settings.volume,
                            );
                        }
                    }

                    AudioCmd::Pause => {
                        if !paused {
                            do_pause(
                                tracks.len(),
                                &sink,
                                index,
                                &mut paused,
                                duration,
                                &playback_info,
                            );
                        }
                    }

                    AudioCmd::Next => {
                        go_next(
                            &stream,
                            &tracks,
                            &mut sink,
                            &mut index,
                            &mut paused,
                            &mut duration,
                            &mut last_refresh,
                            &playback_info,
                            settings.volume,
                        );
                    }

                    AudioCmd::Prev => {
                        if let Some(i) = index {
                            match transport::prev_outcome(i) {
                                PrevOutcome::Retreat(prev) => load_track(
                                    prev,
                                    true,
                                    &stream,
                                    &tracks,
                                    &mut sink,
                                    &mut index,
                                    &mut paused,
                                    &mut duration,
                                    &mut last_refresh,
                                    &playback_info,
                                    settings.volume,
                                ),
                                PrevOutcome::Restart => rewind_current(
                                    false,
                                    tracks.len(),
                                    &sink,
                                    index,
                                    &mut paused,
                                    duration,
                                    &playback_info,
                                ),
                            }
                        }
                    }

                    AudioCmd::Stop => {
                        rewind_current(
                            true,
                            tracks.len(),
                            &sink,
                            index,
                            &mut paused,
                            duration,
                            &playback_info,
                        );
                    }

                    AudioCmd::Quit => {
                        if let Some(s) = sink.take() {
                            s.stop();
                        }
                        paused = true;
                        publish(
                            &playback_info,
                            index,
                            snapshot(tracks.len(), index, false, false, duration, Duration::ZERO),
                        );
                        debug!("audio thread shutting down");
                        break;
                    }
                },
                Err(RecvTimeoutError::Timeout) => {
                    // Periodic tick: auto-advance at natural end of track,
                    // and the progress refresh while playing.
                    let drained = !paused && sink.as_ref().is_some_and(|s| s.empty());
                    if drained {
                        go_next(
                            &stream,
                            &tracks,
                            &mut sink,
                            &mut index,
                            &mut paused,
                            &mut duration,
                            &mut last_refresh,
                            &playback_info,
                            settings.volume,
                        );
                    } else if !paused
                        && last_refresh.elapsed() >= transport::PROGRESS_POLL_INTERVAL
                    {
                        if let Some(ref s) = sink {
                            publish(
                                &playback_info,
                                index,
                                snapshot(tracks.len(), index, false, true, duration, s.get_pos()),
                            );
                        }
                        last_refresh = Instant::now();
                    }
                }
                Err(RecvTimeoutError::Disconnected) => break,
            }
        }
    })
}
