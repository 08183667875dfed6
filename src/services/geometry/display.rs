use crate::config::LayoutConfig;
use crate::error::Result;
use crate::layout::DisplaySize;
use once_cell::sync::Lazy;
use regex::Regex;
use std::process::Command;
use tracing::{debug, info};

// Screen 0: minimum 320 x 200, current 1920 x 1080, maximum 16384 x 16384
static XRANDR_CURRENT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"current (\d+) x (\d+)").expect("valid xrandr regex"));

//   dimensions:    1920x1080 pixels (508x285 millimeters)
static XDPYINFO_DIMENSIONS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"dimensions:\s+(\d+)x(\d+) pixels").expect("valid xdpyinfo regex"));

fn parse_pair(re: &Regex, text: &str) -> Option<DisplaySize> {
    let caps = re.captures(text)?;
    Some(DisplaySize {
        width: caps[1].parse().ok()?,
        height: caps[2].parse().ok()?,
    })
}

fn parse_xrandr(stdout: &str) -> Option<DisplaySize> {
    parse_pair(&XRANDR_CURRENT, stdout)
}

fn parse_xdpyinfo(stdout: &str) -> Option<DisplaySize> {
    parse_pair(&XDPYINFO_DIMENSIONS, stdout)
}

fn query(program: &str, args: &[&str], parse: fn(&str) -> Option<DisplaySize>) -> Result<DisplaySize> {
    let output = Command::new(program)
        .args(args)
        .output()
        .map_err(|e| crate::sbs_error!(display, "{} не найден: {}", program, e))?;

    if !output.status.success() {
        return Err(crate::sbs_error!(
            display,
            "{} вернул ошибку: {}",
            program,
            String::from_utf8_lossy(&output.stderr).trim()
        ));
    }

    parse(&String::from_utf8_lossy(&output.stdout))
        .ok_or_else(|| crate::sbs_error!(display, "не удалось разобрать вывод {}", program))
}

/// Разрешение экрана: из конфигурации, иначе xrandr, иначе xdpyinfo
pub fn display_size(config: &LayoutConfig) -> Result<DisplaySize> {
    if let (Some(width), Some(height)) = (config.display_width, config.display_height) {
        info!("Размер экрана задан в конфигурации: {}x{}", width, height);
        return Ok(DisplaySize { width, height });
    }

    let size = query("xrandr", &["--current"], parse_xrandr).or_else(|e| {
        debug!("xrandr не сработал ({}), пробуем xdpyinfo", e);
        query("xdpyinfo", &[], parse_xdpyinfo)
    })?;

    info!("Размер экрана: {}x{}", size.width, size.height);
    Ok(size)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_xrandr() {
        let stdout = "Screen 0: minimum 320 x 200, current 3840 x 1080, maximum 16384 x 16384\n\
                      DP-1 connected primary 1920x1080+0+0 (normal left inverted right x axis y axis) 527mm x 296mm\n";
        assert_eq!(parse_xrandr(stdout), Some(DisplaySize { width: 3840, height: 1080 }));
        assert_eq!(parse_xrandr("garbage"), None);
    }

    #[test]
    fn test_parse_xdpyinfo() {
        let stdout = "screen #0:\n  dimensions:    2560x1440 pixels (677x381 millimeters)\n";
        assert_eq!(parse_xdpyinfo(stdout), Some(DisplaySize { width: 2560, height: 1440 }));
    }

    #[test]
    fn test_config_override_skips_query() {
        let mut config = crate::config::Config::default().layout;
        config.display_width = Some(1280);
        config.display_height = Some(720);
        assert_eq!(
            display_size(&config).unwrap(),
            DisplaySize { width: 1280, height: 720 }
        );
    }
}
