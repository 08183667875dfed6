use crate::error::Result;
use crate::layout::VideoSize;
use once_cell::sync::Lazy;
use regex::Regex;
use std::path::Path;
use std::process::Command;
use tracing::{debug, info};

const VIDEO_MARKER: &str = "Video:";

// Размер кадра окружён пробелами (или запятой): ", 1920x1080 [SAR 1:1 DAR 16:9]"
static FRAME_SIZE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s(\d+)x(\d+)[\s,]").expect("valid frame size regex"));

/// Найти размер кадра в диагностическом выводе ffprobe
pub fn parse_frame_size(stderr: &str) -> Option<VideoSize> {
    stderr.lines().find_map(|line| {
        let (_, after) = line.split_once(VIDEO_MARKER)?;
        // Добавляем пробел, чтобы последний токен строки тоже имел разделитель
        let haystack = format!("{} ", after);
        let caps = FRAME_SIZE.captures(&haystack)?;
        Some(VideoSize {
            width: caps[1].parse().ok()?,
            height: caps[2].parse().ok()?,
        })
    })
}

/// Запустить ffprobe и извлечь размер кадра первого видеопотока
pub fn probe_video_size(probe_command: &str, path: &Path) -> Result<VideoSize> {
    debug!("Запуск {} -i {:?}", probe_command, path);

    let output = Command::new(probe_command)
        .arg("-i")
        .arg(path)
        .output()
        .map_err(|e| crate::sbs_error!(probe, "не удалось запустить {}: {}", probe_command, e))?;

    let stderr = String::from_utf8_lossy(&output.stderr);
    match parse_frame_size(&stderr) {
        Some(size) => {
            info!("Размер кадра {:?}: {}", path, size);
            Ok(size)
        }
        None => Err(crate::sbs_error!(
            probe,
            "размер кадра не найден в выводе для {:?} (код выхода {})",
            path,
            output.status
        )),
    }
}
