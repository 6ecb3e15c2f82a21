use crate::utils::error::ErrorCategory;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Faq {
    pub question: String,
    pub answer: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallToAction {
    pub title: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Service {
    pub id: String,
    pub title: String,
    pub slug: String,
    pub summary: String,
    pub description: String,
    #[serde(default)]
    pub hero_image: String,
    pub benefits: Vec<String>,
    pub deliverables: Vec<String>,
    #[serde(default)]
    pub faq: Vec<Faq>,
    pub cta: CallToAction,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metric {
    pub label: String,
    pub value: String,
    pub improvement: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Testimonial {
    pub quote: String,
    pub author_name: String,
    pub author_role: String,
    pub company: String,
    pub avatar: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaseStudy {
    pub id: String,
    pub title: String,
    pub slug: String,
    pub client: String,
    pub sector: String,
    pub year: u16,
    pub summary: String,
    pub hero_image: String,
    #[serde(default)]
    pub gallery: Vec<String>,
    pub problem: String,
    pub approach: String,
    pub results: Vec<String>,
    pub metrics: Vec<Metric>,
    pub tech: Vec<String>,
    pub testimonial: Testimonial,
}

/// 表單下拉選項：固定的封閉集合
pub trait FormOption: Sized + Copy + 'static {
    const ALL: &'static [Self];

    fn as_str(&self) -> &'static str;

    fn label(&self) -> &'static str;

    fn parse_option(value: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|option| option.as_str() == value)
    }

    fn expected_values() -> String {
        Self::ALL
            .iter()
            .map(|option| format!("'{}'", option.as_str()))
            .collect::<Vec<_>>()
            .join(" | ")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ServiceCategory {
    Websites,
    Apps,
    M365,
    Hosting,
    Marketing,
    Other,
}

impl FormOption for ServiceCategory {
    const ALL: &'static [Self] = &[
        ServiceCategory::Websites,
        ServiceCategory::Apps,
        ServiceCategory::M365,
        ServiceCategory::Hosting,
        ServiceCategory::Marketing,
        ServiceCategory::Other,
    ];

    fn as_str(&self) -> &'static str {
        match self {
            ServiceCategory::Websites => "websites",
            ServiceCategory::Apps => "apps",
            ServiceCategory::M365 => "m365",
            ServiceCategory::Hosting => "hosting",
            ServiceCategory::Marketing => "marketing",
            ServiceCategory::Other => "other",
        }
    }

    fn label(&self) -> &'static str {
        match self {
            ServiceCategory::Websites => "Custom Websites",
            ServiceCategory::Apps => "Mobile Apps",
            ServiceCategory::M365 => "Microsoft 365 Solutions",
            ServiceCategory::Hosting => "Cloud Hosting & DevOps",
            ServiceCategory::Marketing => "Digital Marketing",
            ServiceCategory::Other => "Other",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BudgetBand {
    #[serde(rename = "under-10k")]
    Under10k,
    #[serde(rename = "10k-25k")]
    From10kTo25k,
    #[serde(rename = "25k-50k")]
    From25kTo50k,
    #[serde(rename = "50k-100k")]
    From50kTo100k,
    #[serde(rename = "over-100k")]
    Over100k,
}

impl FormOption for BudgetBand {
    const ALL: &'static [Self] = &[
        BudgetBand::Under10k,
        BudgetBand::From10kTo25k,
        BudgetBand::From25kTo50k,
        BudgetBand::From50kTo100k,
        BudgetBand::Over100k,
    ];

    fn as_str(&self) -> &'static str {
        match self {
            BudgetBand::Under10k => "under-10k",
            BudgetBand::From10kTo25k => "10k-25k",
            BudgetBand::From25kTo50k => "25k-50k",
            BudgetBand::From50kTo100k => "50k-100k",
            BudgetBand::Over100k => "over-100k",
        }
    }

    fn label(&self) -> &'static str {
        match self {
            BudgetBand::Under10k => "Under $10,000",
            BudgetBand::From10kTo25k => "$10,000 - $25,000",
            BudgetBand::From25kTo50k => "$25,000 - $50,000",
            BudgetBand::From50kTo100k => "$50,000 - $100,000",
            BudgetBand::Over100k => "Over $100,000",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Timeline {
    #[serde(rename = "asap")]
    Asap,
    #[serde(rename = "1-3-months")]
    OneToThreeMonths,
    #[serde(rename = "3-6-months")]
    ThreeToSixMonths,
    #[serde(rename = "6-12-months")]
    SixToTwelveMonths,
    #[serde(rename = "flexible")]
    Flexible,
}

impl FormOption for Timeline {
    const ALL: &'static [Self] = &[
        Timeline::Asap,
        Timeline::OneToThreeMonths,
        Timeline::ThreeToSixMonths,
        Timeline::SixToTwelveMonths,
        Timeline::Flexible,
    ];

    fn as_str(&self) -> &'static str {
        match self {
            Timeline::Asap => "asap",
            Timeline::OneToThreeMonths => "1-3-months",
            Timeline::ThreeToSixMonths => "3-6-months",
            Timeline::SixToTwelveMonths => "6-12-months",
            Timeline::Flexible => "flexible",
        }
    }

    fn label(&self) -> &'static str {
        match self {
            Timeline::Asap => "ASAP",
            Timeline::OneToThreeMonths => "1-3 months",
            Timeline::ThreeToSixMonths => "3-6 months",
            Timeline::SixToTwelveMonths => "6-12 months",
            Timeline::Flexible => "Flexible",
        }
    }
}

/// Raw contact form input, exactly as the visitor typed it.
///
/// Missing fields deserialize to empty strings so that they surface as
/// field errors during validation instead of a decoding failure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub company: Option<String>,
    pub phone: Option<String>,
    pub service: String,
    pub budget: String,
    pub timeline: String,
    pub message: String,
}

impl ContactForm {
    /// Builds a form from an arbitrary JSON body, reporting wrongly typed
    /// fields as field errors. Missing fields stay empty so the regular
    /// validation rules report them.
    pub fn from_json_value(value: &Value) -> std::result::Result<Self, Vec<FieldError>> {
        let Some(object) = value.as_object() else {
            return Err(vec![FieldError::new(
                "form",
                format!("Expected object, received {}", json_type_name(value)),
            )]);
        };

        let mut errors = Vec::new();
        let mut required = |field: &str| -> String {
            match object.get(field) {
                None => String::new(),
                Some(Value::String(s)) => s.clone(),
                Some(other) => {
                    errors.push(type_mismatch(field, other));
                    String::new()
                }
            }
        };

        let name = required("name");
        let email = required("email");
        let service = required("service");
        let budget = required("budget");
        let timeline = required("timeline");
        let message = required("message");

        let mut optional = |field: &str| -> Option<String> {
            match object.get(field) {
                None | Some(Value::Null) => None,
                Some(Value::String(s)) => Some(s.clone()),
                Some(other) => {
                    errors.push(type_mismatch(field, other));
                    None
                }
            }
        };

        let company = optional("company");
        let phone = optional("phone");

        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(ContactForm {
            name,
            email,
            company,
            phone,
            service,
            budget,
            timeline,
            message,
        })
    }
}

fn type_mismatch(field: &str, value: &Value) -> FieldError {
    FieldError::new(
        field,
        format!("Expected string, received {}", json_type_name(value)),
    )
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// 已通過驗證的聯絡表單
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContactSubmission {
    pub name: String,
    pub email: String,
    pub company: Option<String>,
    pub phone: Option<String>,
    pub service: ServiceCategory,
    pub budget: BudgetBand,
    pub timeline: Timeline,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionState {
    Idle,
    Validating,
    Accepted,
    Rejected,
}

impl SubmissionState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, SubmissionState::Accepted | SubmissionState::Rejected)
    }
}

/// What the form boundary hands back to the visitor.
#[derive(Debug, Clone, Serialize)]
pub struct ContactResponse {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<FieldError>>,
    #[serde(skip)]
    pub state: SubmissionState,
}

impl ContactResponse {
    pub fn rejected(errors: Vec<FieldError>) -> Self {
        Self {
            success: false,
            message: "Please check your form data and try again.".to_string(),
            errors: Some(errors),
            state: SubmissionState::Rejected,
        }
    }

    /// `None` on success; otherwise whether the form was rejected or the
    /// accepted form could not be delivered.
    pub fn error_category(&self) -> Option<ErrorCategory> {
        match (self.success, self.state) {
            (true, _) => None,
            (false, SubmissionState::Rejected) => Some(ErrorCategory::Validation),
            (false, _) => Some(ErrorCategory::Dispatch),
        }
    }
}
