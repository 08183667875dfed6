//! WindowController service: responsibility and boundaries
//!
//! This module and its submodules are responsible ONLY for answering three questions
//! about the desktop: is a window with an exact title focused, what is its durable
//! handle, and does that handle still exist. Waiting, timeouts and the lifecycle loop
//! live in `services::readiness` and `services::lifecycle`.

mod detect;
mod dotool;
mod dry_run;
mod kdotool;
mod wmctrl;
mod xdotool;
mod r#trait;

pub use self::r#trait::{create_window_controller, WindowController, WindowHandle};
