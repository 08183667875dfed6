//! Запросы геометрии: разрешение экрана и размер кадра видео

mod display;
mod video;

pub use display::display_size;
pub use video::probe_video_size;
