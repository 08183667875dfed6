use crate::error::Result;
use once_cell::sync::Lazy;
use regex::Regex;
use std::process::Command;
use tracing::debug;

use super::r#trait::{WindowController, WindowHandle};

/// wmctrl для списка окон и xprop для активного окна
pub struct WmctrlController;

// 0x03a00007  0 host Заголовок окна
static LIST_LINE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(0x[0-9a-fA-F]+)\s+-?\d+\s+\S+\s(.*)$").expect("valid wmctrl line regex")
});

// _NET_ACTIVE_WINDOW(WINDOW): window id # 0x3a00007
static ACTIVE_LINE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"window id # (0x[0-9a-fA-F]+)").expect("valid xprop regex")
});

#[derive(Debug, Clone, PartialEq, Eq)]
struct ListedWindow {
    id: u64,
    raw_id: String,
    title: String,
}

fn parse_hex(id: &str) -> Option<u64> {
    u64::from_str_radix(id.trim_start_matches("0x"), 16).ok()
}

fn parse_window_list(stdout: &str) -> Vec<ListedWindow> {
    stdout
        .lines()
        .filter_map(|line| {
            let caps = LIST_LINE.captures(line)?;
            let raw_id = caps[1].to_string();
            Some(ListedWindow {
                id: parse_hex(&raw_id)?,
                raw_id,
                title: caps[2].to_string(),
            })
        })
        .collect()
}

fn parse_active_id(stdout: &str) -> Option<u64> {
    let caps = ACTIVE_LINE.captures(stdout)?;
    parse_hex(&caps[1]).filter(|id| *id != 0)
}

impl WmctrlController {
    pub fn new() -> Self {
        Self
    }

    fn list_windows(&self) -> Result<Vec<ListedWindow>> {
        let output = Command::new("wmctrl")
            .args(["-l"])
            .output()
            .map_err(|e| crate::sbs_error!(window, "wmctrl не найден: {}", e))?;

        if !output.status.success() {
            return Err(crate::sbs_error!(window, "wmctrl вернул ошибку"));
        }

        Ok(parse_window_list(&String::from_utf8_lossy(&output.stdout)))
    }

    fn active_window_id(&self) -> Result<Option<u64>> {
        let output = Command::new("xprop")
            .args(["-root", "_NET_ACTIVE_WINDOW"])
            .output()
            .map_err(|e| crate::sbs_error!(window, "xprop не найден: {}", e))?;

        if !output.status.success() {
            return Err(crate::sbs_error!(window, "xprop вернул ошибку"));
        }

        Ok(parse_active_id(&String::from_utf8_lossy(&output.stdout)))
    }
}

#[async_trait::async_trait]
impl WindowController for WmctrlController {
    fn name(&self) -> &'static str {
        "wmctrl"
    }

    async fn test(&self) -> Result<()> {
        self.list_windows()?;
        self.active_window_id()?;
        Ok(())
    }

    async fn is_active(&self, title: &str) -> Result<bool> {
        let Some(active) = self.active_window_id()? else {
            return Ok(false);
        };

        Ok(self
            .list_windows()?
            .iter()
            .any(|w| w.id == active && w.title == title))
    }

    async fn resolve_handle(&self, title: &str) -> Result<WindowHandle> {
        let active = self.active_window_id()?;
        let matches: Vec<ListedWindow> = self
            .list_windows()?
            .into_iter()
            .filter(|w| w.title == title)
            .collect();
        debug!("wmctrl: {} окон с заголовком '{}'", matches.len(), title);

        matches
            .iter()
            .find(|w| Some(w.id) == active)
            .or_else(|| matches.first())
            .map(|w| WindowHandle::new(w.raw_id.clone()))
            .ok_or_else(|| crate::sbs_error!(window, "окно '{}' не найдено (wmctrl)", title))
    }

    async fn exists(&self, handle: &WindowHandle) -> Result<bool> {
        let Some(id) = parse_hex(handle.id()) else {
            return Ok(false);
        };
        Ok(self.list_windows()?.iter().any(|w| w.id == id))
    }
}
