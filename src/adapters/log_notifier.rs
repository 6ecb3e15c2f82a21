use crate::domain::model::{ContactSubmission, FormOption};
use crate::domain::ports::Notifier;
use crate::utils::error::Result;
use async_trait::async_trait;
use std::time::Duration;

/// Logs the inquiry and waits, standing in for a real email provider.
#[derive(Debug, Clone)]
pub struct LogNotifier {
    delay: Duration,
}

impl LogNotifier {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

impl Default for LogNotifier {
    fn default() -> Self {
        Self::new(Duration::from_millis(1000))
    }
}

#[async_trait]
impl Notifier for LogNotifier {
    async fn send(&self, submission: &ContactSubmission) -> Result<()> {
        tracing::info!(
            name = %submission.name,
            email = %submission.email,
            company = submission.company.as_deref().unwrap_or("-"),
            phone = submission.phone.as_deref().unwrap_or("-"),
            service = submission.service.label(),
            budget = submission.budget.label(),
            timeline = submission.timeline.label(),
            "📝 Contact form submission: {}",
            submission.message
        );

        // 模擬寄送郵件的延遲
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        Ok(())
    }

    fn name(&self) -> &'static str {
        "log"
    }
}
