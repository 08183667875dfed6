//! Общая логика для утилит с интерфейсом xdotool (xdotool, kdotool)

use crate::error::Result;
use std::process::{Command, Output};
use tracing::debug;

use super::r#trait::WindowHandle;

/// Построитель команд для конкретной утилиты
pub trait DotoolCommand: Send + Sync {
    const PROGRAM: &'static str;

    fn command(&self, args: &[&str]) -> Command;
}

fn run<C: DotoolCommand>(tool: &C, args: &[&str]) -> Result<Output> {
    tool.command(args)
        .output()
        .map_err(|e| crate::sbs_error!(window, "{} не найден: {}", C::PROGRAM, e))
}

fn stdout_line(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout)
        .trim_end_matches(['\n', '\r'])
        .to_string()
}

/// Регулярное выражение для точного совпадения заголовка
pub fn exact_title_pattern(title: &str) -> String {
    format!("^{}$", regex::escape(title))
}

pub fn active_window_id<C: DotoolCommand>(tool: &C) -> Result<String> {
    let output = run(tool, &["getactivewindow"])?;
    if !output.status.success() {
        return Err(crate::sbs_error!(
            window,
            "{} getactivewindow: {}",
            C::PROGRAM,
            String::from_utf8_lossy(&output.stderr).trim()
        ));
    }

    let id = stdout_line(&output);
    if id.is_empty() {
        return Err(crate::sbs_error!(window, "{} вернул пустой id окна", C::PROGRAM));
    }
    Ok(id)
}

/// Заголовок окна по id; `None`, если окна больше нет
pub fn window_name<C: DotoolCommand>(tool: &C, id: &str) -> Result<Option<String>> {
    let output = run(tool, &["getwindowname", id])?;
    if !output.status.success() {
        debug!("{} getwindowname {} не удался", C::PROGRAM, id);
        return Ok(None);
    }
    Ok(Some(stdout_line(&output)))
}

pub fn search_exact<C: DotoolCommand>(tool: &C, title: &str) -> Result<Vec<String>> {
    let pattern = exact_title_pattern(title);
    let output = run(tool, &["search", "--name", &pattern])?;

    // search завершается с кодом 1, если ничего не найдено
    if !output.status.success() && !output.stdout.is_empty() {
        return Err(crate::sbs_error!(
            window,
            "{} search: {}",
            C::PROGRAM,
            String::from_utf8_lossy(&output.stderr).trim()
        ));
    }

    Ok(parse_ids(&String::from_utf8_lossy(&output.stdout)))
}

fn parse_ids(stdout: &str) -> Vec<String> {
    stdout
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

pub fn is_active<C: DotoolCommand>(tool: &C, title: &str) -> Result<bool> {
    let id = active_window_id(tool)?;
    Ok(window_name(tool, &id)?.as_deref() == Some(title))
}

pub fn resolve_handle<C: DotoolCommand>(tool: &C, title: &str) -> Result<WindowHandle> {
    // Активное окно предпочтительнее: заголовок может повторяться
    if let Ok(id) = active_window_id(tool) {
        if window_name(tool, &id)?.as_deref() == Some(title) {
            return Ok(WindowHandle::new(id));
        }
    }

    search_exact(tool, title)?
        .into_iter()
        .next()
        .map(WindowHandle::new)
        .ok_or_else(|| crate::sbs_error!(window, "окно '{}' не найдено ({})", title, C::PROGRAM))
}

pub fn exists<C: DotoolCommand>(tool: &C, handle: &WindowHandle) -> Result<bool> {
    Ok(window_name(tool, handle.id())?.is_some())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_title_pattern_escapes_paths() {
        assert_eq!(exact_title_pattern("1: clip.mp4"), r"^1: clip\.mp4$");
        assert_eq!(
            exact_title_pattern("2: /tmp/a (copy).mkv"),
            r"^2: /tmp/a \(copy\)\.mkv$"
        );
    }

    #[test]
    fn test_parse_ids() {
        assert_eq!(parse_ids("60817415\n60817420\n\n"), vec!["60817415", "60817420"]);
        assert!(parse_ids("").is_empty());
    }
}
