use crate::domain::model::ContactSubmission;
use crate::domain::ports::Notifier;
use crate::utils::error::{Result, SiteError};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::Serialize;
use std::time::Duration;

#[derive(Debug, Serialize)]
struct WebhookPayload<'a> {
    event: &'static str,
    submitted_at: DateTime<Utc>,
    submission: &'a ContactSubmission,
}

/// POSTs each inquiry as JSON to a configured endpoint (CRM, mail relay, chat hook).
#[derive(Debug, Clone)]
pub struct WebhookNotifier {
    client: Client,
    endpoint: String,
    retry_attempts: u32,
    retry_delay: Duration,
}

impl WebhookNotifier {
    pub fn new(endpoint: String, timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            endpoint,
            retry_attempts: 0,
            retry_delay: Duration::from_millis(500),
        })
    }

    pub fn with_retry(mut self, retry_attempts: u32, retry_delay: Duration) -> Self {
        self.retry_attempts = retry_attempts;
        self.retry_delay = retry_delay;
        self
    }

    /// 首次嘗試加上重試次數，u32::MAX 時不溢位
    fn total_attempts(&self) -> u32 {
        self.retry_attempts.saturating_add(1)
    }

    async fn post_once(&self, payload: &WebhookPayload<'_>) -> Result<()> {
        let response = self.client.post(&self.endpoint).json(payload).send().await?;
        let status = response.status();

        tracing::debug!("Webhook response status: {}", status);

        if status.is_success() {
            Ok(())
        } else {
            Err(SiteError::DispatchError {
                message: format!("webhook responded with {}", status),
            })
        }
    }
}

#[async_trait]
impl Notifier for WebhookNotifier {
    async fn send(&self, submission: &ContactSubmission) -> Result<()> {
        let payload = WebhookPayload {
            event: "contact.submitted",
            submitted_at: Utc::now(),
            submission,
        };

        let total_attempts = self.total_attempts();
        let mut last_error = None;

        for attempt in 1..=total_attempts {
            tracing::debug!(
                "Posting contact submission to {} (attempt {}/{})",
                self.endpoint,
                attempt,
                total_attempts
            );

            match self.post_once(&payload).await {
                Ok(()) => return Ok(()),
                Err(e) => {
                    tracing::warn!("⚠️ Webhook attempt {} failed: {}", attempt, e);
                    last_error = Some(e);
                    if attempt < total_attempts {
                        tokio::time::sleep(self.retry_delay).await;
                    }
                }
            }
        }

        Err(SiteError::DispatchError {
            message: format!(
                "webhook delivery failed after {} attempt(s): {}",
                total_attempts,
                last_error.map(|e| e.to_string()).unwrap_or_default()
            ),
        })
    }

    fn name(&self) -> &'static str {
        "webhook"
    }
}
