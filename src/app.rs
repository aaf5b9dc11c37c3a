//! Application module: the navigation shell used by the TUI and runtime.
//!
//! `App` in `app::model` holds the page, current track, favorites and
//! cursor; `app::forms` holds the profile and admin upload forms.

mod forms;
mod model;

pub use forms::*;
pub use model::*;
