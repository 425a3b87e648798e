//! Startup gate that waits for the backend to answer.

use std::time::Duration;

use crate::backend::ChatBackend;

pub const MAX_PROBES: u32 = 60;
pub const PROBE_INTERVAL: Duration = Duration::from_secs(2);

/// Result of one polling run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Readiness {
    Ready { attempts: u32 },
    Unavailable { attempts: u32 },
}

impl Readiness {
    pub fn is_ready(&self) -> bool {
        matches!(self, Self::Ready { .. })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BackendReadinessPoller {
    pub max_attempts: u32,
    pub interval: Duration,
}

impl Default for BackendReadinessPoller {
    fn default() -> Self {
        Self {
            max_attempts: MAX_PROBES,
            interval: PROBE_INTERVAL,
        }
    }
}

impl BackendReadinessPoller {
    pub fn new(max_attempts: u32, interval: Duration) -> Self {
        Self {
            max_attempts,
            interval,
        }
    }

    /// Probe until the backend answers or the probe budget is spent.
    ///
    /// Probe failures only mean "not yet"; this never returns an error.
    pub async fn wait_until_ready<B>(&self, backend: &B) -> Readiness
    where
        B: ChatBackend + ?Sized,
    {
        for attempt in 1..=self.max_attempts {
            match backend.probe_health().await {
                Ok(()) => {
                    tracing::info!(attempts = attempt, "backend ready");
                    return Readiness::Ready { attempts: attempt };
                }
                Err(error) => {
                    tracing::debug!(attempt, %error, "backend not ready yet");
                }
            }

            if attempt < self.max_attempts {
                tokio::time::sleep(self.interval).await;
            }
        }

        tracing::error!(
            attempts = self.max_attempts,
            "backend failed to become ready within the probe budget"
        );
        Readiness::Unavailable {
            attempts: self.max_attempts,
        }
    }
}
