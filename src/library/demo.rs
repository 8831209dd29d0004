//! The built-in track pair used when no path is given on the command line.
//!
//! Both samples come from the Library of Congress "Citizen DJ" collection
//! and are served over plain HTTPS, so the demo works out of the box.

use super::model::Track;

pub fn demo_tracks() -> Vec<Track> {
    vec![
        Track {
            id: "demo-castle-in-the-cloud".to_string(),
            uri: "https://citizen-dj.labs.loc.gov/audio/samplepacks/loc-fma/Castle-in-the-cloud_fma-174212_001_00-00-00.mp3"
                .to_string(),
            title: "Castle in the cloud".to_string(),
            artist: Some("Citizen DJ".to_string()),
            album: None,
            artwork_uri: None,
            duration: None,
        },
        Track {
            id: "demo-childhood-scene".to_string(),
            uri: "https://citizen-dj.labs.loc.gov/audio/samplepacks/loc-fma/Childhood-scene_fma-153138_001_00-01-18.mp3"
                .to_string(),
            title: "Childhood scene".to_string(),
            artist: Some("Citizen DJ".to_string()),
            album: None,
            artwork_uri: None,
            duration: None,
        },
    ]
}
