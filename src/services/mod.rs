pub mod geometry;
pub mod launcher;
pub mod lifecycle;
pub mod readiness;
pub mod window_controller;

pub use launcher::build_launch_specs;
pub use lifecycle::Shutdown;
pub use readiness::ReadinessWaiter;
pub use window_controller::create_window_controller;
