//! Application module: the app model and the view state derived from it.

mod model;
mod state;

pub use model::*;
pub use state::*;
