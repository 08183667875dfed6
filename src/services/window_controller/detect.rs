use std::process::Command;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DesktopEnvironment {
    KdeWayland,
    KdeX11,
    X11Generic,
    WaylandGeneric,
    Unknown,
}

pub fn detect_desktop_environment() -> DesktopEnvironment {
    let desktop = std::env::var("XDG_CURRENT_DESKTOP").ok();
    let session = std::env::var("XDG_SESSION_TYPE").ok();

    let kde = match desktop.as_deref() {
        Some(d) => d.to_lowercase().contains("kde"),
        None => is_running("kwin"),
    };

    classify(kde, session.as_deref())
}

fn classify(kde: bool, session: Option<&str>) -> DesktopEnvironment {
    match (kde, session) {
        (true, Some("wayland")) => DesktopEnvironment::KdeWayland,
        (true, _) => DesktopEnvironment::KdeX11,
        (false, Some("wayland")) => DesktopEnvironment::WaylandGeneric,
        (false, Some("x11")) => DesktopEnvironment::X11Generic,
        _ => DesktopEnvironment::Unknown,
    }
}

fn is_running(process: &str) -> bool {
    Command::new("pgrep")
        .arg("-f")
        .arg(process)
        .output()
        .map(|output| !output.stdout.is_empty())
        .unwrap_or(false)
}
