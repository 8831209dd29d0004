use std::fs::File;
use std::io::{Seek, SeekFrom};
use std::time::Duration;

use thiserror::Error;
use tracing::debug;

use crate::library::Track;

/// Cap on the whole prefetch request. `release` joins through an in-flight
/// fetch, so a stalled download holds shutdown for at most this long.
const FETCH_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error("decode failed: {0}")]
    Decode(#[from] rodio::decoder::DecoderError),
}

/// Resolve a track URI to a file the decoder can work on.
///
/// Remote tracks are fetched whole into an unnamed temp file first; the
/// decoder needs a seekable source. The OS reclaims the file when the sink
/// drops it.
pub(super) fn open_source(track: &Track) -> Result<File, SourceError> {
    if track.is_remote() {
        fetch_to_tempfile(&track.uri, FETCH_TIMEOUT)
    } else {
        Ok(File::open(&track.uri)?)
    }
}

fn fetch_to_tempfile(url: &str, timeout: Duration) -> Result<File, SourceError> {
    let client = reqwest::blocking::Client::builder()
        .timeout(timeout)
        .build()?;
    let mut response = client.get(url).send()?.error_for_status()?;
    let mut cache = tempfile::tempfile()?;
    let bytes = response.copy_to(&mut cache)?;
    debug!("fetched {bytes} bytes from {url}");
    cache.seek(SeekFrom::Start(0))?;
    Ok(cache)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn track(uri: &str) -> Track {
        Track {
            id: uri.to_string(),
            uri: uri.to_string(),
            title: "t".to_string(),
            artist: None,
            album: None,
            artwork_uri: None,
            duration: None,
        }
    }

    #[test]
    fn open_source_reports_missing_local_files() {
        let result = open_source(&track("/nonexistent/andante-test.mp3"));
        assert!(matches!(result, Err(SourceError::Io(_))));
    }

    #[test]
    fn remote_fetch_gives_up_after_the_timeout() {
        // The listener never answers, so the request can only end on the
        // client-side timeout.
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let url = format!("http://{}/never.mp3", listener.local_addr().unwrap());

        let result = fetch_to_tempfile(&url, Duration::from_millis(200));
        assert!(matches!(result, Err(SourceError::Http(_))));
    }
}
