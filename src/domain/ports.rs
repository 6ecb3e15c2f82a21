use crate::domain::model::ContactSubmission;
use crate::utils::error::Result;
use async_trait::async_trait;

/// Delivery side of the contact form (email, CRM, webhook, ...).
///
/// Implementations should report any delivery problem as an error; the
/// handler turns it into a dispatch failure for the visitor.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn send(&self, submission: &ContactSubmission) -> Result<()>;

    fn name(&self) -> &'static str;
}
