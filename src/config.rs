use anyhow::{Context, Result};
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub logging: LoggingConfig,
    pub player: PlayerConfig,
    pub layout: LayoutConfig,
    pub timing: TimingConfig,
    pub window: WindowConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PlayerConfig {
    /// Команда плеера (ffplay)
    pub command: String,
    /// Команда анализатора (ffprobe)
    pub probe_command: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LayoutConfig {
    /// Суммарный горизонтальный отступ, который вычитается из ширины экрана
    pub margin: u32,
    pub left_x: i32,
    pub top_y: i32,
    /// Сдвиг правого окна относительно середины экрана
    pub right_offset: i32,
    #[serde(default)]
    pub display_width: Option<u32>,
    #[serde(default)]
    pub display_height: Option<u32>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TimingConfig {
    pub ready_poll_interval_ms: u64,
    pub ready_timeout_ms: u64,
    pub lifecycle_poll_interval_ms: u64,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct WindowConfig {
    /// auto | xdotool | kdotool | wmctrl
    pub backend: String,
    /// Сколько проверок существования переживает окно в dry-run режиме
    pub dry_run_lifetime_polls: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            logging: LoggingConfig {
                level: "warn".to_string(),
                format: "pretty".to_string(),
            },
            player: PlayerConfig {
                command: "ffplay".to_string(),
                probe_command: "ffprobe".to_string(),
            },
            layout: LayoutConfig {
                margin: 20,
                left_x: 10,
                top_y: 35,
                right_offset: 5,
                display_width: None,
                display_height: None,
            },
            timing: TimingConfig {
                ready_poll_interval_ms: 100,
                ready_timeout_ms: 5000,
                lifecycle_poll_interval_ms: 1000,
            },
            window: WindowConfig {
                backend: "auto".to_string(),
                dry_run_lifetime_polls: 3,
            },
        }
    }
}

impl Config {
    pub fn load<P: AsRef<Path>>(config_path: P) -> Result<Self> {
        let config_path = config_path.as_ref();

        let figment = Figment::from(Serialized::defaults(Config::default()))
            .merge(Toml::file(config_path))
            .merge(Env::prefixed("SBS_").split("__"));

        let config: Config = figment
            .extract()
            .with_context(|| format!("Не удалось загрузить конфигурацию из {:?}", config_path))?;

        config.validate()?;

        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        match self.logging.level.as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            _ => anyhow::bail!("Неверный уровень логирования: {}", self.logging.level),
        }

        match self.logging.format.as_str() {
            "pretty" | "json" => {}
            _ => anyhow::bail!("Неверный формат логирования: {}", self.logging.format),
        }

        if self.player.command.trim().is_empty() {
            anyhow::bail!("player.command не может быть пустым");
        }
        if self.player.probe_command.trim().is_empty() {
            anyhow::bail!("player.probe_command не может быть пустым");
        }

        if self.timing.ready_poll_interval_ms == 0 {
            anyhow::bail!("ready_poll_interval_ms должно быть больше 0");
        }
        if self.timing.ready_timeout_ms < self.timing.ready_poll_interval_ms {
            anyhow::bail!("ready_timeout_ms должно быть не меньше ready_poll_interval_ms");
        }
        if self.timing.lifecycle_poll_interval_ms == 0 {
            anyhow::bail!("lifecycle_poll_interval_ms должно быть больше 0");
        }

        match self.window.backend.as_str() {
            "auto" | "xdotool" | "kdotool" | "wmctrl" => {}
            _ => anyhow::bail!("Неверный backend управления окнами: {}", self.window.backend),
        }

        if let (Some(0), _) | (_, Some(0)) = (self.layout.display_width, self.layout.display_height) {
            anyhow::bail!("Размер экрана в конфигурации должен быть больше 0");
        }

        Ok(())
    }

    pub fn ready_poll_interval(&self) -> Duration {
        Duration::from_millis(self.timing.ready_poll_interval_ms)
    }

    pub fn ready_timeout(&self) -> Duration {
        Duration::from_millis(self.timing.ready_timeout_ms)
    }

    pub fn lifecycle_poll_interval(&self) -> Duration {
        Duration::from_millis(self.timing.lifecycle_poll_interval_ms)
    }
}
