use crate::error::Result;
use std::collections::HashMap;
use std::process::Command;
use tracing::debug;

use super::dotool::{self, DotoolCommand};
use super::r#trait::{WindowController, WindowHandle};

/// kdotool для KDE Plasma (в том числе под Wayland)
pub struct KdotoolController;

/// Переменные окружения пользовательской сессии для заданного uid
fn session_env(uid: &str, user: &str) -> HashMap<String, String> {
    let user_runtime_dir = format!("/run/user/{}", uid);
    let dbus_address = format!("unix:path={}/bus", user_runtime_dir);

    HashMap::from([
        ("DBUS_SESSION_BUS_ADDRESS".to_string(), dbus_address),
        ("XDG_RUNTIME_DIR".to_string(), user_runtime_dir),
        ("USER".to_string(), user.to_string()),
    ])
}

fn build_env_overrides() -> HashMap<String, String> {
    let mut env_vars = HashMap::new();

    if std::env::var("USER").unwrap_or_default() == "root" {
        if let Ok(sudo_user) = std::env::var("SUDO_USER") {
            if let Ok(output) = Command::new("id").args(["-u", &sudo_user]).output() {
                if let Ok(uid_str) = String::from_utf8(output.stdout) {
                    let uid = uid_str.trim();
                    debug!("Подставляем переменные окружения для пользователя {}: uid={}", sudo_user, uid);
                    env_vars.extend(session_env(uid, &sudo_user));
                }
            }
        }
    }

    if let Ok(display_var) = std::env::var("DISPLAY") {
        env_vars.insert("DISPLAY".to_string(), display_var);
    }

    env_vars
}

impl KdotoolController {
    pub fn new() -> Self {
        Self
    }
}

impl DotoolCommand for KdotoolController {
    const PROGRAM: &'static str = "kdotool";

    fn command(&self, args: &[&str]) -> Command {
        // kdotool ходит в KWin по D-Bus сессии, поэтому под sudo запускаем от пользователя
        let mut cmd = if let Ok(sudo_user) = std::env::var("SUDO_USER") {
            let mut cmd = Command::new("sudo");
            cmd.args(["-E", "-u", &sudo_user, Self::PROGRAM]);
            cmd.args(args);
            cmd
        } else {
            let mut cmd = Command::new(Self::PROGRAM);
            cmd.args(args);
            cmd
        };

        for (key, value) in build_env_overrides() {
            cmd.env(key, value);
        }

        cmd
    }
}

#[async_trait::async_trait]
impl WindowController for KdotoolController {
    fn name(&self) -> &'static str {
        Self::PROGRAM
    }

    async fn test(&self) -> Result<()> {
        debug!("=== Тестируем kdotool ===");
        let id = dotool::active_window_id(self)?;
        debug!("kdotool получил window_id: '{}'", id);
        Ok(())
    }

    async fn is_active(&self, title: &str) -> Result<bool> {
        dotool::is_active(self, title)
    }

    async fn resolve_handle(&self, title: &str) -> Result<WindowHandle> {
        dotool::resolve_handle(self, title)
    }

    async fn exists(&self, handle: &WindowHandle) -> Result<bool> {
        dotool::exists(self, handle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_env() {
        let env = session_env("1000", "alice");
        assert_eq!(env["XDG_RUNTIME_DIR"], "/run/user/1000");
        assert_eq!(env["DBUS_SESSION_BUS_ADDRESS"], "unix:path=/run/user/1000/bus");
        assert_eq!(env["USER"], "alice");
    }
}
