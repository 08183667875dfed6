use crate::config::Config;
use crate::error::Result;
use std::fmt;
use tracing::{info, warn};

use super::detect::{detect_desktop_environment, DesktopEnvironment};

/// Стабильный идентификатор окна (например, X11 window id)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct WindowHandle(String);

impl WindowHandle {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn id(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for WindowHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[HANDLE:{}]", self.0)
    }
}

/// Trait for the window-management surface the comparison session relies on.
/// Titles are matched exactly.
#[async_trait::async_trait]
pub trait WindowController: Send + Sync {
    /// Backend name for logs
    fn name(&self) -> &'static str;

    /// Check that the backend's tools work on this desktop
    async fn test(&self) -> Result<()>;

    /// Is the window with exactly this title the focused one
    async fn is_active(&self, title: &str) -> Result<bool>;

    /// Resolve a durable handle for the window with this title
    async fn resolve_handle(&self, title: &str) -> Result<WindowHandle>;

    /// Does the window behind the handle still exist
    async fn exists(&self, handle: &WindowHandle) -> Result<bool>;
}

/// Factory function to create a window controller based on config and the dry_run flag
pub async fn create_window_controller(
    config: &Config,
    dry_run: bool,
) -> Result<Box<dyn WindowController>> {
    if dry_run {
        return Ok(Box::new(super::dry_run::DryRunController::new(
            config.window.dry_run_lifetime_polls,
        )));
    }

    let candidates = match config.window.backend.as_str() {
        "auto" => {
            let desktop_env = detect_desktop_environment();
            info!("Обнаружена среда рабочего стола: {:?}", desktop_env);
            candidates_for(&desktop_env)
        }
        name => vec![backend_by_name(name)?],
    };

    for controller in candidates {
        match controller.test().await {
            Ok(()) => {
                info!("Используем {} для управления окнами", controller.name());
                return Ok(controller);
            }
            Err(e) => warn!("{} недоступен: {}", controller.name(), e),
        }
    }

    Err(crate::sbs_error!(
        window,
        "ни один метод управления окнами не работает (backend = {})",
        config.window.backend
    ))
}

fn candidates_for(desktop_env: &DesktopEnvironment) -> Vec<Box<dyn WindowController>> {
    let kdotool: Box<dyn WindowController> = Box::new(super::kdotool::KdotoolController::new());
    let xdotool: Box<dyn WindowController> = Box::new(super::xdotool::XdotoolController::new());
    let wmctrl: Box<dyn WindowController> = Box::new(super::wmctrl::WmctrlController::new());

    match desktop_env {
        // На KDE Wayland xdotool видит только XWayland-окна
        DesktopEnvironment::KdeWayland => vec![kdotool, xdotool, wmctrl],
        _ => vec![xdotool, wmctrl, kdotool],
    }
}

fn backend_by_name(name: &str) -> Result<Box<dyn WindowController>> {
    match name {
        "xdotool" => Ok(Box::new(super::xdotool::XdotoolController::new())),
        "kdotool" => Ok(Box::new(super::kdotool::KdotoolController::new())),
        "wmctrl" => Ok(Box::new(super::wmctrl::WmctrlController::new())),
        other => Err(crate::sbs_error!(window, "неизвестный backend: {}", other)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_handle_display() {
        let handle = WindowHandle::new("0x3a00007");
        assert_eq!(handle.id(), "0x3a00007");
        assert_eq!(handle.to_string(), "[HANDLE:0x3a00007]");
    }

    #[test]
    fn test_candidate_order() {
        let names: Vec<_> = candidates_for(&DesktopEnvironment::KdeWayland)
            .iter()
            .map(|c| c.name())
            .collect();
        assert_eq!(names, vec!["kdotool", "xdotool", "wmctrl"]);

        let names: Vec<_> = candidates_for(&DesktopEnvironment::X11Generic)
            .iter()
            .map(|c| c.name())
            .collect();
        assert_eq!(names, vec!["xdotool", "wmctrl", "kdotool"]);
    }

    #[test]
    fn test_unknown_backend_name() {
        assert!(backend_by_name("sway").is_err());
        assert_eq!(backend_by_name("wmctrl").unwrap().name(), "wmctrl");
    }

    #[tokio::test]
    async fn test_dry_run_factory() {
        let controller = create_window_controller(&Config::default(), true).await.unwrap();
        assert_eq!(controller.name(), "dry-run");
    }
}
