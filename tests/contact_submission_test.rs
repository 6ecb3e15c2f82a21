use agency_site::adapters::LogNotifier;
use agency_site::core::contact::SUCCESS_MESSAGE;
use agency_site::domain::model::{ContactForm, ContactSubmission, SubmissionState};
use agency_site::domain::ports::Notifier;
use agency_site::{ContactHandler, Result, SiteError};
use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Records every dispatched submission instead of delivering it.
#[derive(Default)]
struct RecordingNotifier {
    sent: Mutex<Vec<ContactSubmission>>,
}

impl RecordingNotifier {
    fn sent(&self) -> Vec<ContactSubmission> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn send(&self, submission: &ContactSubmission) -> Result<()> {
        tokio::time::sleep(Duration::from_millis(10)).await;
        self.sent.lock().unwrap().push(submission.clone());
        Ok(())
    }

    fn name(&self) -> &'static str {
        "recording"
    }
}

struct FailingNotifier;

#[async_trait]
impl Notifier for FailingNotifier {
    async fn send(&self, _submission: &ContactSubmission) -> Result<()> {
        Err(SiteError::IoError(std::io::Error::new(
            std::io::ErrorKind::ConnectionRefused,
            "mail relay unavailable",
        )))
    }

    fn name(&self) -> &'static str {
        "failing"
    }
}

fn valid_form() -> ContactForm {
    ContactForm {
        name: "Jane Doe".to_string(),
        email: "jane@example.com".to_string(),
        company: None,
        phone: None,
        service: "websites".to_string(),
        budget: "10k-25k".to_string(),
        timeline: "asap".to_string(),
        message: "We would like a quote for a new website.".to_string(),
    }
}

fn recording_handler() -> (ContactHandler, Arc<RecordingNotifier>) {
    let notifier = Arc::new(RecordingNotifier::default());
    let handler = ContactHandler::new(notifier.clone());
    (handler, notifier)
}

#[tokio::test]
async fn test_well_formed_submission_dispatches_once() {
    let (handler, notifier) = recording_handler();

    let response = handler.submit(valid_form()).await;

    assert!(response.success);
    assert_eq!(response.message, SUCCESS_MESSAGE);
    assert!(response.errors.is_none());
    assert_eq!(response.state, SubmissionState::Accepted);

    let sent = notifier.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].name, "Jane Doe");
    assert_eq!(sent[0].email, "jane@example.com");
}

#[tokio::test]
async fn test_short_name_rejected_without_dispatch() {
    let (handler, notifier) = recording_handler();
    let form = ContactForm {
        name: "A".to_string(),
        ..valid_form()
    };

    let response = handler.submit(form).await;

    assert!(!response.success);
    assert_eq!(response.state, SubmissionState::Rejected);
    assert_eq!(response.message, "Please check your form data and try again.");
    let errors = response.errors.unwrap();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].field, "name");
    assert_eq!(errors[0].message, "Name must be at least 2 characters");
    assert!(notifier.sent().is_empty());
}

#[tokio::test]
async fn test_invalid_email_flags_only_email() {
    let (handler, notifier) = recording_handler();
    let form = ContactForm {
        email: "not-an-email".to_string(),
        ..valid_form()
    };

    let err = handler.process(form).await.unwrap_err();

    let fields: Vec<&str> = err.field_errors().iter().map(|e| e.field.as_str()).collect();
    assert_eq!(fields, vec!["email"]);
    assert_eq!(err.field_errors()[0].message, "Please enter a valid email address");
    assert!(notifier.sent().is_empty());
}

#[tokio::test]
async fn test_optional_fields_may_be_blank() {
    let (handler, notifier) = recording_handler();
    let form = ContactForm {
        company: Some(String::new()),
        phone: Some("+44 20 7946 0000".to_string()),
        ..valid_form()
    };

    let submission = handler.process(form).await.unwrap();

    assert_eq!(submission.company, None);
    assert_eq!(submission.phone.as_deref(), Some("+44 20 7946 0000"));
    assert_eq!(notifier.sent().len(), 1);
}

#[tokio::test]
async fn test_dispatch_failure_is_not_a_validation_failure() {
    let handler = ContactHandler::new(Arc::new(FailingNotifier));

    let err = handler.process(valid_form()).await.unwrap_err();
    assert!(matches!(err, SiteError::DispatchError { .. }));
    assert!(err.to_string().contains("mail relay unavailable"));

    let response = handler.submit(valid_form()).await;
    assert!(!response.success);
    assert!(response.errors.is_none());
    assert_eq!(response.state, SubmissionState::Accepted);
    assert_eq!(response.message, "Something went wrong. Please try again later.");
}

#[tokio::test]
async fn test_invalid_form_never_reaches_failing_notifier() {
    let handler = ContactHandler::new(Arc::new(FailingNotifier));
    let form = ContactForm {
        message: "hi".to_string(),
        ..valid_form()
    };

    let err = handler.process(form).await.unwrap_err();
    assert!(matches!(err, SiteError::ValidationError { .. }));
}

#[tokio::test]
async fn test_concurrent_submissions_are_independent() {
    let (handler, notifier) = recording_handler();
    let first = ContactForm {
        name: "Jane Doe".to_string(),
        ..valid_form()
    };
    let second = ContactForm {
        name: "John Roe".to_string(),
        email: "john@example.org".to_string(),
        service: "hosting".to_string(),
        ..valid_form()
    };

    let other = handler.clone();
    let (a, b) = tokio::join!(
        tokio::spawn(async move { other.submit(first).await }),
        handler.submit(second)
    );

    assert!(a.unwrap().success);
    assert!(b.success);

    let mut names: Vec<String> = notifier.sent().into_iter().map(|s| s.name).collect();
    names.sort();
    assert_eq!(names, vec!["Jane Doe", "John Roe"]);
}

#[tokio::test]
async fn test_log_notifier_accepts_submission() {
    let handler = ContactHandler::new(Arc::new(LogNotifier::new(Duration::ZERO)));

    let response = handler.submit(valid_form()).await;

    assert!(response.success);
    assert_eq!(handler.notifier_name(), "log");
}
