//! Track model and track-list sources.
//!
//! A `Track` either comes from the built-in demo pair (remote URLs) or from
//! scanning a local path handed over on the command line.

mod demo;
mod model;
mod scan;

pub use demo::demo_tracks;
pub use model::Track;
pub use scan::{scan, tracks_from_path};
