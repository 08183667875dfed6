pub mod prerequisites;

pub use prerequisites::{check_prerequisites, install_hint};
