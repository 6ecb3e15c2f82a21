pub mod contact;
pub mod content;

pub use crate::domain::model::{CaseStudy, ContactForm, ContactResponse, ContactSubmission, Service};
pub use crate::domain::ports::Notifier;
pub use crate::utils::error::Result;
pub use contact::ContactHandler;
pub use content::ContentRepository;
