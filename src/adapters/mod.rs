// Adapters layer: concrete notifiers and the HTTP surface.

#[cfg(feature = "server")]
pub mod http;
pub mod log_notifier;
pub mod outbox;
pub mod webhook;

use crate::config::{ContactConfig, NotifierKind};
use crate::domain::ports::Notifier;
use crate::utils::error::Result;
use crate::utils::validation::validate_required_field;
use std::sync::Arc;

pub use log_notifier::LogNotifier;
pub use outbox::OutboxNotifier;
pub use webhook::WebhookNotifier;

/// 依配置建立對應的通知器
pub fn notifier_from_config(config: &ContactConfig) -> Result<Arc<dyn Notifier>> {
    let notifier: Arc<dyn Notifier> = match config.notifier {
        NotifierKind::Log => Arc::new(LogNotifier::new(config.delay())),
        NotifierKind::Webhook => {
            let url = validate_required_field("contact.webhook_url", &config.webhook_url)?;
            Arc::new(
                WebhookNotifier::new(url.clone(), config.timeout())?
                    .with_retry(config.retry_attempts, config.retry_delay()),
            )
        }
        NotifierKind::Outbox => {
            let path = validate_required_field("contact.outbox_path", &config.outbox_path)?;
            Arc::new(OutboxNotifier::new(path))
        }
    };

    tracing::debug!("Using {} notifier", notifier.name());
    Ok(notifier)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notifier_from_config() {
        let config = ContactConfig::default();
        assert_eq!(notifier_from_config(&config).unwrap().name(), "log");

        let config = ContactConfig {
            notifier: NotifierKind::Outbox,
            outbox_path: Some("contacts.csv".to_string()),
            ..ContactConfig::default()
        };
        assert_eq!(notifier_from_config(&config).unwrap().name(), "outbox");

        let config = ContactConfig {
            notifier: NotifierKind::Webhook,
            ..ContactConfig::default()
        };
        assert!(notifier_from_config(&config).is_err());
    }
}
