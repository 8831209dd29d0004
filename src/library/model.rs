use std::time::Duration;

#[derive(Clone)]
pub struct Track {
    pub id: String,
    pub uri: String,
    pub title: String,
    pub artist: Option<String>,
    pub album: Option<String>,
    pub artwork_uri: Option<String>,
    pub duration: Option<Duration>,
}

impl Track {
    /// True when the URI points at something we have to fetch before decoding.
    pub fn is_remote(&self) -> bool {
        self.uri.starts_with("http://") || self.uri.starts_with("https://")
    }

    /// URL form of the URI, for consumers that want a scheme on local paths.
    pub fn url(&self) -> String {
        if self.is_remote() {
            self.uri.clone()
        } else {
            format!("file://{}", self.uri)
        }
    }
}
