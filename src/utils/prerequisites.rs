use crate::config::Config;
use crate::error::{Result, SbsError};
use std::path::PathBuf;
use tracing::{info, warn};

/// Проверить, что внешние программы доступны в PATH
pub fn check_prerequisites(config: &Config, dry_run: bool) -> Result<()> {
    info!("Проверка внешних программ...");

    let probe = require(&config.player.probe_command)?;
    info!("{} найден: {:?}", config.player.probe_command, probe);

    // В dry-run плеер не запускается
    match require(&config.player.command) {
        Ok(player) => info!("{} найден: {:?}", config.player.command, player),
        Err(e) if dry_run => warn!("{} (не важно в dry-run режиме)", e),
        Err(e) => return Err(e),
    }

    info!("Проверка внешних программ завершена успешно");
    Ok(())
}

fn require(program: &str) -> Result<PathBuf> {
    which::which(program).map_err(|_| SbsError::ToolNotFound(program.to_string()))
}

/// Команды установки зависимостей для популярных дистрибутивов
pub fn install_hint() -> &'static str {
    "sudo apt install ffmpeg xdotool wmctrl x11-utils x11-xserver-utils  # Debian/Ubuntu\n\
     sudo dnf install ffmpeg xdotool wmctrl xprop xrandr                  # Fedora"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_probe_is_reported_by_name() {
        let mut config = Config::default();
        config.player.probe_command = "sidebyside-no-such-ffprobe".to_string();

        match check_prerequisites(&config, false) {
            Err(SbsError::ToolNotFound(name)) => assert_eq!(name, "sidebyside-no-such-ffprobe"),
            other => panic!("ожидалась ошибка ToolNotFound, получено {:?}", other),
        }
    }

    #[test]
    fn test_missing_player_tolerated_in_dry_run() {
        let mut config = Config::default();
        config.player.probe_command = "sh".to_string();
        config.player.command = "sidebyside-no-such-ffplay".to_string();

        assert!(check_prerequisites(&config, true).is_ok());
        assert!(matches!(
            check_prerequisites(&config, false),
            Err(SbsError::ToolNotFound(_))
        ));
    }

    #[test]
    fn test_install_hint() {
        assert!(install_hint().contains("ffmpeg"));
        assert!(install_hint().contains("xdotool"));
    }
}
