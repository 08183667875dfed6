use crate::error::Result;
use crate::layout::{Layout, Rect};
use crate::request::{ComparisonRequest, FilterArgs};
use std::fmt;
use std::path::Path;
use std::process::{Child, Command, Stdio};
use tracing::{debug, info};

/// Описание запуска одного экземпляра плеера
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchSpec {
    /// Уникальный заголовок окна, по нему окно потом ищется
    pub title: String,
    pub command: String,
    pub args: Vec<String>,
}

impl LaunchSpec {
    pub fn new(player: &str, index: u8, video: &Path, filters: &FilterArgs, rect: Rect) -> Self {
        let video = video.to_string_lossy().to_string();
        let title = format!("{}: {}", index, video);

        // -v 0 глушит собственный вывод ffplay
        let mut args = vec![
            "-v".to_string(),
            "0".to_string(),
            "-window_title".to_string(),
            title.clone(),
            "-i".to_string(),
            video,
        ];
        args.extend(filters.tokens().iter().cloned());
        args.extend([
            "-x".to_string(),
            rect.width.to_string(),
            "-y".to_string(),
            rect.height.to_string(),
            "-left".to_string(),
            rect.x.to_string(),
            "-top".to_string(),
            rect.y.to_string(),
        ]);

        Self {
            title,
            command: player.to_string(),
            args,
        }
    }

    /// Запустить плеер как независимый процесс
    pub fn spawn(&self) -> Result<Child> {
        info!("Запуск окна '{}'", self.title);
        debug!("Команда: {}", self);

        let child = Command::new(&self.command)
            .args(&self.args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| crate::sbs_error!(launch, "Could not start {}: {}", self.command, e))?;

        debug!("'{}' запущен, pid {}", self.title, child.id());
        Ok(child)
    }
}

impl fmt::Display for LaunchSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.command)?;
        for arg in &self.args {
            if arg.is_empty() || arg.contains(char::is_whitespace) {
                write!(f, " \"{}\"", arg)?;
            } else {
                write!(f, " {}", arg)?;
            }
        }
        Ok(())
    }
}

/// Два запуска: первое видео без фильтров, второе с аргументами фильтров
pub fn build_launch_specs(
    player: &str,
    request: &ComparisonRequest,
    layout: &Layout,
) -> (LaunchSpec, LaunchSpec) {
    let first = LaunchSpec::new(player, 1, &request.video1, &FilterArgs::default(), layout.left);
    let second = LaunchSpec::new(player, 2, &request.video2, &request.filters, layout.right);
    (first, second)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SbsError;

    fn layout() -> Layout {
        Layout {
            left: Rect { width: 950, height: 534, x: 10, y: 35 },
            right: Rect { width: 950, height: 534, x: 965, y: 35 },
        }
    }

    fn request(list: &[&str]) -> ComparisonRequest {
        let args: Vec<String> = list.iter().map(|s| s.to_string()).collect();
        ComparisonRequest::from_args(&args).unwrap()
    }

    #[test]
    fn test_same_source_only_second_has_filters() {
        let (first, second) =
            build_launch_specs("ffplay", &request(&["clip.mp4", "-same", "-gamma", "0.90"]), &layout());

        assert_eq!(first.title, "1: clip.mp4");
        assert_eq!(second.title, "2: clip.mp4");
        assert_eq!(first.args[5], "clip.mp4");
        assert_eq!(second.args[5], "clip.mp4");
        assert!(!first.args.iter().any(|a| a == "-vf"));
        assert_eq!(&second.args[6..8], &["-vf".to_string(), "eq=gamma=0.9".to_string()]);
    }

    #[test]
    fn test_command_line_rendering() {
        let (first, second) = build_launch_specs("ffplay", &request(&["my clip.mp4", "b.mp4"]), &layout());

        assert_eq!(
            first.to_string(),
            "ffplay -v 0 -window_title \"1: my clip.mp4\" -i \"my clip.mp4\" -x 950 -y 534 -left 10 -top 35"
        );
        assert_eq!(
            second.to_string(),
            "ffplay -v 0 -window_title \"2: b.mp4\" -i b.mp4 -x 950 -y 534 -left 965 -top 35"
        );
    }

    #[test]
    fn test_spawn_failure_is_a_launch_error() {
        let (first, _) = build_launch_specs(
            "sidebyside-no-such-player",
            &request(&["a.mp4", "-same"]),
            &layout(),
        );
        assert!(matches!(first.spawn(), Err(SbsError::Launch(_))));
    }
}
