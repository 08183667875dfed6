pub mod filter_shortcuts;

pub use filter_shortcuts::FilterShortcut;
