use crate::domain::model::{
    BudgetBand, ContactForm, ContactResponse, ContactSubmission, FieldError, FormOption,
    ServiceCategory, SubmissionState, Timeline,
};
use crate::domain::ports::Notifier;
use crate::utils::error::{Result, SiteError};
use crate::utils::validation::{has_min_length, is_valid_email};
use std::sync::Arc;

pub const SUCCESS_MESSAGE: &str =
    "Thank you for your message! We'll get back to you within 24 hours.";

const NAME_MIN_CHARS: usize = 2;
const MESSAGE_MIN_CHARS: usize = 10;

/// Validates contact inquiries and hands accepted ones to a [`Notifier`].
///
/// The handler keeps no per-submission state, so one instance can serve
/// any number of concurrent submissions.
#[derive(Clone)]
pub struct ContactHandler {
    notifier: Arc<dyn Notifier>,
}

impl ContactHandler {
    pub fn new(notifier: Arc<dyn Notifier>) -> Self {
        Self { notifier }
    }

    pub fn notifier_name(&self) -> &'static str {
        self.notifier.name()
    }

    /// 檢查所有欄位並一次回報全部錯誤
    pub fn validate(form: &ContactForm) -> std::result::Result<ContactSubmission, Vec<FieldError>> {
        let mut errors = Vec::new();

        if !has_min_length(&form.name, NAME_MIN_CHARS) {
            errors.push(FieldError::new("name", "Name must be at least 2 characters"));
        }

        if !is_valid_email(&form.email) {
            errors.push(FieldError::new("email", "Please enter a valid email address"));
        }

        let service = parse_option::<ServiceCategory>("service", &form.service, &mut errors);
        let budget = parse_option::<BudgetBand>("budget", &form.budget, &mut errors);
        let timeline = parse_option::<Timeline>("timeline", &form.timeline, &mut errors);

        if !has_min_length(&form.message, MESSAGE_MIN_CHARS) {
            errors.push(FieldError::new(
                "message",
                "Message must be at least 10 characters",
            ));
        }

        match (service, budget, timeline) {
            (Some(service), Some(budget), Some(timeline)) if errors.is_empty() => {
                Ok(ContactSubmission {
                    name: form.name.clone(),
                    email: form.email.clone(),
                    company: non_blank(&form.company),
                    phone: non_blank(&form.phone),
                    service,
                    budget,
                    timeline,
                    message: form.message.clone(),
                })
            }
            _ => Err(errors),
        }
    }

    /// Runs one submission through validation and dispatch.
    ///
    /// Returns `ValidationError` when the form is rejected (nothing is sent)
    /// and `DispatchError` when the form was accepted but delivery failed.
    pub async fn process(&self, form: ContactForm) -> Result<ContactSubmission> {
        let mut state = SubmissionState::Idle;
        tracing::debug!("Contact submission state: {:?}", state);

        state = SubmissionState::Validating;
        tracing::debug!("Contact submission state: {:?}", state);

        let submission = match Self::validate(&form) {
            Ok(submission) => submission,
            Err(errors) => {
                state = SubmissionState::Rejected;
                tracing::info!(
                    "❌ Contact submission {:?} with {} field error(s)",
                    state,
                    errors.len()
                );
                return Err(SiteError::ValidationError { errors });
            }
        };

        state = SubmissionState::Accepted;
        tracing::info!(
            name = %submission.name,
            email = %submission.email,
            service = submission.service.as_str(),
            budget = submission.budget.as_str(),
            timeline = submission.timeline.as_str(),
            "📨 Contact submission {:?}, dispatching via {}",
            state,
            self.notifier.name()
        );

        match self.notifier.send(&submission).await {
            Ok(()) => {
                tracing::info!("✅ Contact submission delivered");
                Ok(submission)
            }
            Err(e) => {
                tracing::error!("❌ Contact submission dispatch failed: {}", e);
                Err(match e {
                    SiteError::DispatchError { .. } => e,
                    other => SiteError::DispatchError {
                        message: other.to_string(),
                    },
                })
            }
        }
    }

    /// Form boundary: always answers with a [`ContactResponse`].
    pub async fn submit(&self, form: ContactForm) -> ContactResponse {
        match self.process(form).await {
            Ok(_) => ContactResponse {
                success: true,
                message: SUCCESS_MESSAGE.to_string(),
                errors: None,
                state: SubmissionState::Accepted,
            },
            Err(SiteError::ValidationError { errors }) => ContactResponse::rejected(errors),
            Err(e) => {
                tracing::warn!("💡 {}", e.recovery_suggestion());
                ContactResponse {
                    success: false,
                    message: e.user_friendly_message(),
                    errors: None,
                    state: SubmissionState::Accepted,
                }
            }
        }
    }
}

fn parse_option<T: FormOption>(
    field: &str,
    value: &str,
    errors: &mut Vec<FieldError>,
) -> Option<T> {
    let parsed = T::parse_option(value);
    if parsed.is_none() {
        errors.push(FieldError::new(
            field,
            format!(
                "Invalid option '{}'. Expected one of: {}",
                value,
                T::expected_values()
            ),
        ));
    }
    parsed
}

fn non_blank(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}
