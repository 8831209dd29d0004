//! Utilities for creating `rodio` sinks from `Track` values.
//!
//! The helper here encapsulates resolving/decoding a track and preparing a
//! paused `Sink` at the start of the file.

use std::io::BufReader;
use std::time::Duration;

use rodio::{Decoder, OutputStream, Sink, Source};

use crate::library::Track;

use super::source::{SourceError, open_source};

pub(super) struct LoadedSink {
    pub sink: Sink,
    /// Total duration as reported by the decoder, when the format knows it.
    pub duration: Option<Duration>,
}

/// Open and decode `track`, returning a paused `Sink` at the track start.
pub(super) fn create_sink(
    stream: &OutputStream,
    track: &Track,
    volume: f32,
) -> Result<LoadedSink, SourceError> {
    let file = open_source(track)?;
    let source = Decoder::new(BufReader::new(file))?;
    let duration = source.total_duration();

    let sink = Sink::connect_new(stream.mixer());
    sink.set_volume(volume);
    sink.append(source);
    sink.pause();
    Ok(LoadedSink { sink, duration })
}
