//! Simulated submit collaborator.
//!
//! Stands in for a backend: sleeps for a configurable delay, logs the record
//! it received, and optionally fails. The demo binary wires this in; tests
//! and other frontends inject their own handler instead.

use std::time::Duration;

use async_trait::async_trait;

use enroll_form::{FormValues, SubmitContext, SubmitHandler};

/// Pretend backend used by the demo binary.
#[derive(Debug, Clone)]
pub struct SimulatedSubmit {
    delay: Duration,
    fail: bool,
}

impl SimulatedSubmit {
    /// Classic demo pacing: five seconds of suspense per submission.
    pub const DEFAULT_DELAY: Duration = Duration::from_secs(5);

    pub fn new(delay: Duration) -> Self {
        Self { delay, fail: false }
    }

    /// Make every attempt fail after the delay.
    pub fn failing(mut self, fail: bool) -> Self {
        self.fail = fail;
        self
    }
}

impl Default for SimulatedSubmit {
    fn default() -> Self {
        Self::new(Self::DEFAULT_DELAY)
    }
}

#[async_trait]
impl SubmitHandler for SimulatedSubmit {
    async fn submit(&self, values: &FormValues, context: &SubmitContext) -> anyhow::Result<()> {
        tokio::time::sleep(self.delay).await;

        match serde_json::to_string(values) {
            Ok(json) => tracing::info!(
                attempt = context.attempt,
                values = %json,
                "simulated backend received the record"
            ),
            Err(error) => tracing::warn!(%error, "could not serialize the record for logging"),
        }

        if self.fail {
            anyhow::bail!("simulated backend rejected the submission");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> FormValues {
        FormValues {
            full_name: "Jane Doe".into(),
            ..FormValues::default()
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_completes_after_the_delay() {
        let handler = SimulatedSubmit::default();
        let started = tokio::time::Instant::now();
        let result = handler.submit(&record(), &SubmitContext { attempt: 1 }).await;
        assert!(result.is_ok());
        assert!(started.elapsed() >= SimulatedSubmit::DEFAULT_DELAY);
    }

    #[tokio::test(start_paused = true)]
    async fn test_failing_mode_reports_an_error() {
        let handler = SimulatedSubmit::new(Duration::from_millis(10)).failing(true);
        let result = handler.submit(&record(), &SubmitContext { attempt: 1 }).await;
        assert!(result.is_err());
    }
}
