use crate::config::LayoutConfig;
use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Разрешение экрана
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplaySize {
    pub width: u32,
    pub height: u32,
}

/// Размер кадра видео
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoSize {
    pub width: u32,
    pub height: u32,
}

impl VideoSize {
    pub fn aspect(&self) -> f64 {
        self.width as f64 / self.height as f64
    }
}

impl fmt::Display for VideoSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Геометрия окна плеера
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rect {
    pub width: u32,
    pub height: u32,
    pub x: i32,
    pub y: i32,
}

impl fmt::Display for Rect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}+{}+{}", self.width, self.height, self.x, self.y)
    }
}

/// Пара окон: слева оригинал, справа второе видео
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
    pub left: Rect,
    pub right: Rect,
}

/// Рассчитать размеры и позиции окон.
///
/// Оба окна занимают чуть меньше половины ширины экрана, высота сохраняет
/// пропорции первого видео.
pub fn compute_layout(display: DisplaySize, video: VideoSize, config: &LayoutConfig) -> Result<Layout> {
    if video.width == 0 || video.height == 0 {
        return Err(crate::sbs_error!(layout, "нулевой размер кадра видео: {}", video));
    }
    if display.width <= config.margin {
        return Err(crate::sbs_error!(
            layout,
            "ширина экрана {} не превышает отступ {}",
            display.width,
            config.margin
        ));
    }

    let width = (display.width - config.margin) / 2;
    let height = (width as f64 / video.aspect()).floor() as u32;
    if height == 0 {
        return Err(crate::sbs_error!(layout, "вычисленная высота окна равна 0 для {}", video));
    }

    let left = Rect {
        width,
        height,
        x: config.left_x,
        y: config.top_y,
    };
    let right = Rect {
        width,
        height,
        x: (display.width / 2) as i32 + config.right_offset,
        y: config.top_y,
    };

    Ok(Layout { left, right })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::error::SbsError;

    fn layout_config() -> LayoutConfig {
        Config::default().layout
    }

    #[test]
    fn test_full_hd_display_with_full_hd_video() {
        let layout = compute_layout(
            DisplaySize { width: 1920, height: 1080 },
            VideoSize { width: 1920, height: 1080 },
            &layout_config(),
        )
        .unwrap();

        assert_eq!(layout.left, Rect { width: 950, height: 534, x: 10, y: 35 });
        assert_eq!(layout.right, Rect { width: 950, height: 534, x: 965, y: 35 });
    }

    #[test]
    fn test_odd_display_width_floors() {
        let layout = compute_layout(
            DisplaySize { width: 1367, height: 768 },
            VideoSize { width: 640, height: 480 },
            &layout_config(),
        )
        .unwrap();

        // (1367 - 20) / 2 = 673.5 -> 673; 673 / (4/3) = 504.75 -> 504
        assert_eq!(layout.left.width, 673);
        assert_eq!(layout.left.height, 504);
        assert_eq!(layout.right.x, 683 + 5);
        assert_eq!((layout.left.x, layout.left.y), (10, 35));
        assert_eq!(layout.right.y, 35);
    }

    #[test]
    fn test_portrait_video_keeps_aspect() {
        let layout = compute_layout(
            DisplaySize { width: 2560, height: 1440 },
            VideoSize { width: 1080, height: 1920 },
            &layout_config(),
        )
        .unwrap();

        assert_eq!(layout.left.width, 1270);
        assert_eq!(layout.left.height, 2257);
        assert_eq!(layout.left.height, layout.right.height);
    }

    #[test]
    fn test_zero_video_size_is_an_error() {
        let result = compute_layout(
            DisplaySize { width: 1920, height: 1080 },
            VideoSize { width: 0, height: 0 },
            &layout_config(),
        );
        assert!(matches!(result, Err(SbsError::InvalidLayout(_))));
    }

    #[test]
    fn test_display_narrower_than_margin_is_an_error() {
        let result = compute_layout(
            DisplaySize { width: 20, height: 10 },
            VideoSize { width: 16, height: 9 },
            &layout_config(),
        );
        assert!(matches!(result, Err(SbsError::InvalidLayout(_))));
    }

    #[test]
    fn test_rect_display() {
        let rect = Rect { width: 950, height: 534, x: 965, y: 35 };
        assert_eq!(rect.to_string(), "950x534+965+35");
    }
}
