use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SbsError {
    #[error("Недостаточно аргументов: {0}")]
    Usage(String),

    #[error("Could not find: {}", .0.display())]
    FileNotFound(PathBuf),

    #[error("Программа не найдена в PATH: {0}")]
    ToolNotFound(String),

    #[error("Не удалось определить размер экрана: {0}")]
    DisplayQuery(String),

    #[error("Ошибка ffprobe: {0}")]
    Probe(String),

    #[error("Некорректная раскладка окон: {0}")]
    InvalidLayout(String),

    #[error("Не удалось запустить плеер: {0}")]
    Launch(String),

    #[error("expired: {0}")]
    Expired(String),

    #[error("Управление окнами недоступно: {0}")]
    WindowControl(String),

    #[error("Ошибка конфигурации: {0}")]
    Config(#[from] anyhow::Error),

    #[error("Ошибка ввода-вывода: {0}")]
    Io(#[from] std::io::Error),
}

impl SbsError {
    /// Код завершения процесса для данной ошибки
    pub fn exit_code(&self) -> u8 {
        match self {
            SbsError::Usage(_) => 2,
            _ => 1,
        }
    }
}

pub type Result<T> = std::result::Result<T, SbsError>;

// Удобные макросы для создания ошибок
#[macro_export]
macro_rules! sbs_error {
    (usage, $($arg:tt)*) => {
        $crate::error::SbsError::Usage(format!($($arg)*))
    };
    (display, $($arg:tt)*) => {
        $crate::error::SbsError::DisplayQuery(format!($($arg)*))
    };
    (probe, $($arg:tt)*) => {
        $crate::error::SbsError::Probe(format!($($arg)*))
    };
    (layout, $($arg:tt)*) => {
        $crate::error::SbsError::InvalidLayout(format!($($arg)*))
    };
    (launch, $($arg:tt)*) => {
        $crate::error::SbsError::Launch(format!($($arg)*))
    };
    (expired, $($arg:tt)*) => {
        $crate::error::SbsError::Expired(format!($($arg)*))
    };
    (window, $($arg:tt)*) => {
        $crate::error::SbsError::WindowControl(format!($($arg)*))
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes() {
        assert_eq!(sbs_error!(usage, "нужно два видео").exit_code(), 2);
        assert_eq!(SbsError::FileNotFound("a.mp4".into()).exit_code(), 1);
        assert_eq!(sbs_error!(expired, "окно").exit_code(), 1);
    }

    #[test]
    fn test_user_facing_messages() {
        let err = SbsError::FileNotFound(PathBuf::from("missing.mp4"));
        assert_eq!(err.to_string(), "Could not find: missing.mp4");

        let err = sbs_error!(expired, "окно '{}' не стало активным", "1: a.mp4");
        assert!(err.to_string().starts_with("expired"));
    }
}
