use crate::error::Result;
use std::process::Command;

use super::dotool::{self, DotoolCommand};
use super::r#trait::{WindowController, WindowHandle};

pub struct XdotoolController;

impl XdotoolController {
    pub fn new() -> Self {
        Self
    }
}

impl DotoolCommand for XdotoolController {
    const PROGRAM: &'static str = "xdotool";

    fn command(&self, args: &[&str]) -> Command {
        let mut cmd = Command::new(Self::PROGRAM);
        cmd.args(args);
        cmd
    }
}

#[async_trait::async_trait]
impl WindowController for XdotoolController {
    fn name(&self) -> &'static str {
        Self::PROGRAM
    }

    async fn test(&self) -> Result<()> {
        dotool::active_window_id(self).map(|_| ())
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
