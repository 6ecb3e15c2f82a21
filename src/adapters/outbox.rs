use crate::domain::model::{ContactSubmission, FormOption};
use crate::domain::ports::Notifier;
use crate::utils::error::Result;
use async_trait::async_trait;
use chrono::Utc;
use std::fs::OpenOptions;
use std::path::PathBuf;
use tokio::sync::Mutex;

const HEADER: [&str; 9] = [
    "submitted_at",
    "name",
    "email",
    "company",
    "phone",
    "service",
    "budget",
    "timeline",
    "message",
];

/// Appends each inquiry as a CSV row so someone can follow up by hand.
pub struct OutboxNotifier {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl OutboxNotifier {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }
}

#[async_trait]
impl Notifier for OutboxNotifier {
    async fn send(&self, submission: &ContactSubmission) -> Result<()> {
        // 同一時間只允許一筆寫入，避免列交錯
        let _guard = self.write_lock.lock().await;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        let needs_header = file.metadata()?.len() == 0;

        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(file);

        if needs_header {
            writer.write_record(HEADER)?;
        }

        let submitted_at = Utc::now().to_rfc3339();
        writer.write_record([
            submitted_at.as_str(),
            submission.name.as_str(),
            submission.email.as_str(),
            submission.company.as_deref().unwrap_or(""),
            submission.phone.as_deref().unwrap_or(""),
            submission.service.as_str(),
            submission.budget.as_str(),
            submission.timeline.as_str(),
            submission.message.as_str(),
        ])?;
        writer.flush()?;

        tracing::debug!("Appended contact submission to {}", self.path.display());
        Ok(())
    }

    fn name(&self) -> &'static str {
        "outbox"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{BudgetBand, ServiceCategory, Timeline};
    use tempfile::TempDir;

    fn submission(name: &str) -> ContactSubmission {
        ContactSubmission {
            name: name.to_string(),
            email: "jane@example.com".to_string(),
            company: None,
            phone: Some("+1 555 0100".to_string()),
            service: ServiceCategory::Hosting,
            budget: BudgetBand::Over100k,
            timeline: Timeline::Flexible,
            message: "Please call me back, about \"hosting\", thanks".to_string(),
        }
    }

    #[tokio::test]
    async fn test_outbox_writes_header_once() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("inbox").join("contacts.csv");
        let outbox = OutboxNotifier::new(&path);
        assert_eq!(outbox.path(), &path);

        outbox.send(&submission("Jane Doe")).await.unwrap();
        outbox.send(&submission("John Roe")).await.unwrap();

        let mut reader = csv::Reader::from_path(&path).unwrap();
        let headers = reader.headers().unwrap().clone();
        assert_eq!(headers.len(), 9);
        assert_eq!(&headers[1], "name");

        let rows: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 2);
        assert_eq!(&rows[0][1], "Jane Doe");
        assert_eq!(&rows[1][1], "John Roe");
        assert_eq!(&rows[0][3], "");
        assert_eq!(&rows[0][5], "hosting");
        assert_eq!(&rows[0][6], "over-100k");
        assert_eq!(&rows[0][8], "Please call me back, about \"hosting\", thanks");
    }
}
