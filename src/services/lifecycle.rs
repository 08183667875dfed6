use crate::services::window_controller::{WindowController, WindowHandle};
use std::collections::HashSet;
use std::future::Future;
use std::time::Duration;
use tokio::signal;
use tokio::time::sleep;
use tracing::{debug, info, warn};

/// Причина завершения сеанса сравнения
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shutdown {
    AllClosed,
    Interrupted,
}

/// Опрашивать существование окон, пока не закроются все.
/// Возвращает число выполненных опросов.
pub async fn wait_until_closed(
    controller: &dyn WindowController,
    handles: &[WindowHandle],
    interval: Duration,
) -> u32 {
    let mut closed: HashSet<&WindowHandle> = HashSet::new();
    let mut polls = 0;

    loop {
        polls += 1;

        let pending: Vec<&WindowHandle> = handles.iter().filter(|h| !closed.contains(h)).collect();

        for handle in pending {
            let alive = match controller.exists(handle).await {
                Ok(alive) => alive,
                Err(e) => {
                    warn!("Проверка окна {} не удалась, считаем закрытым: {}", handle, e);
                    false
                }
            };
            if !alive {
                info!("Окно {} закрыто", handle);
                closed.insert(handle);
            }
        }

        if closed.len() == handles.len() {
            debug!("Все окна закрыты после {} опросов", polls);
            return polls;
        }

        sleep(interval).await;
    }
}

/// Ждать закрытия окон или внешнего прерывания, что наступит раньше
pub async fn watch_with<F>(
    controller: &dyn WindowController,
    handles: &[WindowHandle],
    interval: Duration,
    interrupt: F,
) -> Shutdown
where
    F: Future<Output = ()>,
{
    tokio::select! {
        _ = wait_until_closed(controller, handles, interval) => Shutdown::AllClosed,
        _ = interrupt => Shutdown::Interrupted,
    }
}

/// То же, что [`watch_with`], с прерыванием по Ctrl+C
pub async fn watch(
    controller: &dyn WindowController,
    handles: &[WindowHandle],
    interval: Duration,
) -> Shutdown {
    watch_with(controller, handles, interval, ctrl_c()).await
}

async fn ctrl_c() {
    match signal::ctrl_c().await {
        Ok(()) => info!("Получен сигнал завершения (Ctrl+C)"),
        Err(err) => {
            warn!("Не удалось установить обработчик Ctrl+C: {}", err);
            std::future::pending::<()>().await
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Result;
    use parking_lot::Mutex;
    use std::collections::HashMap;

    /// Окно существует заданное число проверок; `None` — вечно
    struct ClosingController {
        lifetimes: HashMap<String, Option<u32>>,
        checks: Mutex<HashMap<String, u32>>,
    }

    impl ClosingController {
        fn new(lifetimes: &[(&str, Option<u32>)]) -> Self {
            Self {
                lifetimes: lifetimes.iter().map(|(id, n)| (id.to_string(), *n)).collect(),
                checks: Mutex::new(HashMap::new()),
            }
        }
    }

    #[async_trait::async_trait]
    impl WindowController for ClosingController {
        fn name(&self) -> &'static str {
            "closing"
        }

        async fn test(&self) -> Result<()> {
            Ok(())
        }

        async fn is_active(&self, _title: &str) -> Result<bool> {
            Ok(true)
        }

        async fn resolve_handle(&self, title: &str) -> Result<WindowHandle> {
            Ok(WindowHandle::new(title))
        }

        async fn exists(&self, handle: &WindowHandle) -> Result<bool> {
            let lifetime = match self.lifetimes.get(handle.id()) {
                Some(lifetime) => *lifetime,
                None => return Err(crate::sbs_error!(window, "неизвестное окно")),
            };
            let mut checks = self.checks.lock();
            let count = checks.entry(handle.id().to_string()).or_insert(0);
            *count += 1;
            Ok(lifetime.map_or(true, |n| *count <= n))
        }
    }

    const INTERVAL: Duration = Duration::from_secs(1);

    #[tokio::test(start_paused = true)]
    async fn test_keeps_polling_while_either_window_exists() {
        let controller = ClosingController::new(&[("a", Some(1)), ("b", Some(4))]);
        let handles = vec![WindowHandle::new("a"), WindowHandle::new("b")];

        let polls = wait_until_closed(&controller, &handles, INTERVAL).await;

        assert_eq!(polls, 5);
        // закрытое окно больше не опрашивается
        assert_eq!(controller.checks.lock()["a"], 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_both_already_closed() {
        let controller = ClosingController::new(&[("a", Some(0)), ("b", Some(0))]);
        let handles = vec![WindowHandle::new("a"), WindowHandle::new("b")];

        assert_eq!(wait_until_closed(&controller, &handles, INTERVAL).await, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_controller_error_counts_as_closed() {
        let controller = ClosingController::new(&[("a", Some(2))]);
        let handles = vec![WindowHandle::new("a"), WindowHandle::new("missing")];

        assert_eq!(wait_until_closed(&controller, &handles, INTERVAL).await, 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_interrupt_ends_watch() {
        let controller = ClosingController::new(&[("a", None), ("b", None)]);
        let handles = vec![WindowHandle::new("a"), WindowHandle::new("b")];

        let shutdown = watch_with(&controller, &handles, INTERVAL, async {
            sleep(Duration::from_millis(2500)).await;
        })
        .await;

        assert_eq!(shutdown, Shutdown::Interrupted);
    }

    #[tokio::test(start_paused = true)]
    async fn test_watch_reports_all_closed() {
        let controller = ClosingController::new(&[("a", Some(1)), ("b", Some(2))]);
        let handles = vec![WindowHandle::new("a"), WindowHandle::new("b")];

        let shutdown = watch_with(&controller, &handles, INTERVAL, std::future::pending()).await;

        assert_eq!(shutdown, Shutdown::AllClosed);
    }
}
