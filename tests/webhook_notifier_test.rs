use agency_site::adapters::{notifier_from_config, WebhookNotifier};
use agency_site::config::{ContactConfig, NotifierKind};
use agency_site::domain::model::ContactForm;
use agency_site::{ContactHandler, SiteError};
use httpmock::prelude::*;
use std::sync::Arc;
use std::time::Duration;

fn valid_form() -> ContactForm {
    ContactForm {
        name: "Jane Doe".to_string(),
        email: "jane@example.com".to_string(),
        company: Some("Acme Ltd".to_string()),
        phone: None,
        service: "apps".to_string(),
        budget: "25k-50k".to_string(),
        timeline: "1-3-months".to_string(),
        message: "We need an iOS and Android app.".to_string(),
    }
}

#[tokio::test]
async fn test_webhook_posts_submission_json() {
    let server = MockServer::start_async().await;

    let hook = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/hooks/contact")
                .json_body_partial(
                    r#"{
                        "event": "contact.submitted",
                        "submission": {
                            "name": "Jane Doe",
                            "email": "jane@example.com",
                            "company": "Acme Ltd",
                            "service": "apps",
                            "budget": "25k-50k",
                            "timeline": "1-3-months"
                        }
                    }"#,
                );
            then.status(202);
        })
        .await;

    let notifier =
        WebhookNotifier::new(server.url("/hooks/contact"), Duration::from_secs(5)).unwrap();
    let handler = ContactHandler::new(Arc::new(notifier));

    let response = handler.submit(valid_form()).await;

    assert!(response.success);
    hook.assert_async().await;
}

#[tokio::test]
async fn test_webhook_retries_then_reports_dispatch_error() {
    let server = MockServer::start_async().await;

    let hook = server
        .mock_async(|when, then| {
            when.method(POST).path("/hooks/contact");
            then.status(503);
        })
        .await;

    let notifier = WebhookNotifier::new(server.url("/hooks/contact"), Duration::from_secs(5))
        .unwrap()
        .with_retry(2, Duration::from_millis(10));
    let handler = ContactHandler::new(Arc::new(notifier));

    let err = handler.process(valid_form()).await.unwrap_err();

    assert!(matches!(err, SiteError::DispatchError { .. }));
    assert!(err.to_string().contains("after 3 attempt(s)"));
    hook.assert_hits_async(3).await;
}

#[tokio::test]
async fn test_rejected_form_never_calls_webhook() {
    let server = MockServer::start_async().await;

    let hook = server
        .mock_async(|when, then| {
            when.method(POST).path("/hooks/contact");
            then.status(200);
        })
        .await;

    let config = ContactConfig {
        notifier: NotifierKind::Webhook,
        webhook_url: Some(server.url("/hooks/contact")),
        ..ContactConfig::default()
    };
    let handler = ContactHandler::new(notifier_from_config(&config).unwrap());

    let form = ContactForm {
        email: "not-an-email".to_string(),
        ..valid_form()
    };
    let response = handler.submit(form).await;

    assert!(!response.success);
    assert_eq!(response.errors.map(|e| e.len()), Some(1));
    hook.assert_hits_async(0).await;
}

#[tokio::test]
async fn test_unreachable_webhook_is_dispatch_error() {
    // 沒有服務監聽的埠
    let notifier =
        WebhookNotifier::new("http://127.0.0.1:9/contact".to_string(), Duration::from_secs(1))
            .unwrap();
    let handler = ContactHandler::new(Arc::new(notifier));

    let response = handler.submit(valid_form()).await;

    assert!(!response.success);
    assert!(response.errors.is_none());
    assert_eq!(response.message, "Something went wrong. Please try again later.");
}
