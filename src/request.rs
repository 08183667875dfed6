use crate::error::{Result, SbsError};
use crate::mappings::FilterShortcut;
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Маркер второго аргумента: сравнивать видео с самим собой
pub const SAME_MARKER: &str = "-same";

/// Аргументы фильтров, передаваемые второму плееру без изменений
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterArgs(Vec<String>);

impl FilterArgs {
    /// Разобрать хвост командной строки (всё после второго видео).
    /// Сокращением считается только первый аргумент хвоста.
    pub fn from_trailing(trailing: &[String]) -> Self {
        let Some(first) = trailing.first() else {
            return Self::default();
        };

        match FilterShortcut::parse(first) {
            Some(shortcut) if !shortcut.takes_value() => Self(shortcut.expand(None)),
            Some(shortcut) if trailing.len() > 1 => Self(shortcut.expand(Some(trailing[1].as_str()))),
            _ => Self(trailing.to_vec()),
        }
    }

    pub fn tokens(&self) -> &[String] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for FilterArgs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.join(" "))
    }
}

/// Разобранный запрос на сравнение двух видео
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComparisonRequest {
    pub video1: PathBuf,
    pub video2: PathBuf,
    pub filters: FilterArgs,
}

impl ComparisonRequest {
    /// Разобрать позиционные аргументы `<video1> <video2|-same> [флаги...]`
    pub fn from_args(args: &[String]) -> Result<Self> {
        let [video1, video2, trailing @ ..] = args else {
            return Err(SbsError::Usage(format!(
                "ожидалось минимум 2 позиционных аргумента, получено {}",
                args.len()
            )));
        };

        let video1 = PathBuf::from(video1);
        let video2 = if video2.eq_ignore_ascii_case(SAME_MARKER) {
            video1.clone()
        } else {
            PathBuf::from(video2)
        };

        let filters = FilterArgs::from_trailing(trailing);
        debug!("Аргументы фильтров для второго окна: '{}'", filters);

        Ok(Self {
            video1,
            video2,
            filters,
        })
    }

    /// Разобрать аргументы и убедиться, что оба файла существуют
    pub fn interpret(args: &[String]) -> Result<Self> {
        let request = Self::from_args(args)?;
        request.verify_inputs()?;
        Ok(request)
    }

    pub fn verify_inputs(&self) -> Result<()> {
        check_file(&self.video1)?;
        check_file(&self.video2)
    }

    pub fn is_same_source(&self) -> bool {
        self.video1 == self.video2
    }
}

fn check_file(path: &Path) -> Result<()> {
    if path.is_file() {
        Ok(())
    } else {
        Err(SbsError::FileNotFound(path.to_path_buf()))
    }
}

/// Текст подсказки, печатаемый при нехватке аргументов
pub fn usage_text() -> &'static str {
    r#"
sidebyside video1 video2

    Displays two videos side by side for comparison. This is useful to see
    before and after video effects such as colour/contrast manipulation or
    scaling.

    If you want to try some ffmpeg filters before applying them to a complete
    video you can supply ffmpeg parameters ad hoc. To use the same video for
    both panels specify '-same' as the second video. For example, to see the
    effect of a gamma correction you can type:

        sidebyside video.mp4 -same -vf eq=gamma=0.9

    Shortcuts:

        sidebyside video.mp4 -same -gamma 0.9        apply gamma correction
        sidebyside video.mp4 -same -contrast .12     apply contrast correction
        sidebyside video.mp4 -same -grey             convert to greyscale
        sidebyside video.mp4 -same -sepia            convert to sepia
"#
}
