use crate::error::Result;
use parking_lot::Mutex;
use std::collections::HashMap;
use tracing::info;

use super::r#trait::{WindowController, WindowHandle};

/// Эмуляция окон: каждый заголовок сразу активен, а окно «закрывается»
/// после заданного числа проверок существования
pub struct DryRunController {
    lifetime_polls: u32,
    handles: Mutex<HashMap<String, WindowHandle>>,
    polls: Mutex<HashMap<WindowHandle, u32>>,
}

impl DryRunController {
    pub fn new(lifetime_polls: u32) -> Self {
        info!("Dry-run режим - окна эмулируются, {} проверок до закрытия", lifetime_polls);
        Self {
            lifetime_polls,
            handles: Mutex::new(HashMap::new()),
            polls: Mutex::new(HashMap::new()),
        }
    }
}

#[async_trait::async_trait]
impl WindowController for DryRunController {
    fn name(&self) -> &'static str {
        "dry-run"
    }

    async fn test(&self) -> Result<()> {
        Ok(())
    }

    async fn is_active(&self, _title: &str) -> Result<bool> {
        Ok(true)
    }

    async fn resolve_handle(&self, title: &str) -> Result<WindowHandle> {
        let mut handles = self.handles.lock();
        let next_id = handles.len() + 1;
        let handle = handles
            .entry(title.to_string())
            .or_insert_with(|| WindowHandle::new(format!("dry-run:{}", next_id)))
            .clone();
        Ok(handle)
    }

    async fn exists(&self, handle: &WindowHandle) -> Result<bool> {
        let mut polls = self.polls.lock();
        let count = polls.entry(handle.clone()).or_insert(0);
        *count += 1;
        Ok(*count <= self.lifetime_polls)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_handles_are_stable_per_title() {
        let controller = DryRunController::new(2);
        let a = controller.resolve_handle("1: a.mp4").await.unwrap();
        let b = controller.resolve_handle("2: a.mp4").await.unwrap();

        assert_ne!(a, b);
        assert_eq!(controller.resolve_handle("1: a.mp4").await.unwrap(), a);
        assert!(controller.is_active("anything").await.unwrap());
    }

    #[tokio::test]
    async fn test_windows_close_after_lifetime() {
        let controller = DryRunController::new(2);
        let handle = controller.resolve_handle("1: a.mp4").await.unwrap();

        assert!(controller.exists(&handle).await.unwrap());
        assert!(controller.exists(&handle).await.unwrap());
        assert!(!controller.exists(&handle).await.unwrap());
    }
}
