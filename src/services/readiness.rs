use crate::error::Result;
use crate::services::window_controller::{WindowController, WindowHandle};
use std::time::Duration;
use tokio::time::{sleep, Instant};
use tracing::{debug, info, warn};

/// Состояние ожидания одного окна
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReadinessState {
    Waiting { attempts: u32 },
    Active(WindowHandle),
    Expired { attempts: u32 },
}

/// Ожидание, пока окно с заданным заголовком станет активным
pub struct ReadinessWaiter<'a> {
    controller: &'a dyn WindowController,
    interval: Duration,
    timeout: Duration,
}

impl<'a> ReadinessWaiter<'a> {
    pub fn new(controller: &'a dyn WindowController, interval: Duration, timeout: Duration) -> Self {
        Self {
            controller,
            interval,
            timeout,
        }
    }

    /// Опрашивать `is_active` каждые `interval`, пока не истечёт `timeout`.
    /// При успехе вернуть устойчивый handle окна.
    pub async fn wait_for(&self, title: &str) -> Result<WindowHandle> {
        let deadline = Instant::now() + self.timeout;
        let mut state = ReadinessState::Waiting { attempts: 0 };

        loop {
            state = match state {
                ReadinessState::Waiting { attempts } => self.step(title, attempts, deadline).await?,
                ReadinessState::Active(handle) => {
                    info!("Окно '{}' активно, handle {}", title, handle);
                    return Ok(handle);
                }
                ReadinessState::Expired { attempts } => {
                    warn!("Окно '{}' не стало активным после {} проверок", title, attempts);
                    return Err(crate::sbs_error!(
                        expired,
                        "окно '{}' не стало активным за {} мс",
                        title,
                        self.timeout.as_millis()
                    ));
                }
            };
        }
    }

    async fn step(&self, title: &str, attempts: u32, deadline: Instant) -> Result<ReadinessState> {
        let attempts = attempts + 1;

        match self.controller.is_active(title).await {
            Ok(true) => {
                let handle = self.controller.resolve_handle(title).await?;
                return Ok(ReadinessState::Active(handle));
            }
            Ok(false) => {}
            // Окно может ещё не существовать, это не ошибка
            Err(e) => debug!("Проверка активности '{}' не удалась: {}", title, e),
        }

        sleep(self.interval).await;

        if Instant::now() >= deadline {
            Ok(ReadinessState::Expired { attempts })
        } else {
            Ok(ReadinessState::Waiting { attempts })
        }
    }
}
