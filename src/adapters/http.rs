use crate::core::{ContactHandler, ContentRepository};
use crate::domain::model::{CaseStudy, ContactForm, ContactResponse, FieldError, Service};
use crate::utils::error::{ErrorCategory, Result, SiteError};
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

#[derive(Clone)]
pub struct AppState {
    pub content: Arc<ContentRepository>,
    pub contact: ContactHandler,
}

impl AppState {
    pub fn new(content: ContentRepository, contact: ContactHandler) -> Self {
        Self {
            content: Arc::new(content),
            contact,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }
}

/// Lookup failures rendered as JSON; a missing slug becomes a 404.
pub struct ApiError(SiteError);

impl From<SiteError> for ApiError {
    fn from(err: SiteError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match self.0.category() {
            ErrorCategory::NotFound => StatusCode::NOT_FOUND,
            ErrorCategory::Validation => StatusCode::UNPROCESSABLE_ENTITY,
            ErrorCategory::Dispatch => StatusCode::BAD_GATEWAY,
            ErrorCategory::Configuration | ErrorCategory::System => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        let body = ApiResponse::<()> {
            success: false,
            data: None,
            error: Some(self.0.user_friendly_message()),
        };
        (status, Json(body)).into_response()
    }
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/api/health", get(health_check))
        .route("/api/services", get(list_services))
        .route("/api/services/:slug", get(get_service))
        .route("/api/case-studies", get(list_case_studies))
        .route("/api/case-studies/:slug", get(get_case_study))
        .route("/api/contact", post(submit_contact))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(
                    CorsLayer::new()
                        .allow_origin(Any)
                        .allow_methods(Any)
                        .allow_headers(Any),
                ),
        )
        .with_state(state)
}

pub async fn serve(address: &str, state: AppState) -> Result<()> {
    let app = create_router(state);

    tracing::info!("🚀 Starting server on {}", address);
    let listener = tokio::net::TcpListener::bind(address).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

async fn health_check() -> Json<ApiResponse<&'static str>> {
    Json(ApiResponse::ok("OK"))
}

async fn list_services(State(state): State<AppState>) -> Json<ApiResponse<Vec<Service>>> {
    Json(ApiResponse::ok(state.content.all_services().to_vec()))
}

async fn get_service(
    Path(slug): Path<String>,
    State(state): State<AppState>,
) -> std::result::Result<Json<ApiResponse<Service>>, ApiError> {
    let service = state.content.service_by_slug(&slug)?;
    Ok(Json(ApiResponse::ok(service.clone())))
}

async fn list_case_studies(State(state): State<AppState>) -> Json<ApiResponse<Vec<CaseStudy>>> {
    Json(ApiResponse::ok(state.content.all_case_studies().to_vec()))
}

async fn get_case_study(
    Path(slug): Path<String>,
    State(state): State<AppState>,
) -> std::result::Result<Json<ApiResponse<CaseStudy>>, ApiError> {
    let case_study = state.content.case_study_by_slug(&slug)?;
    Ok(Json(ApiResponse::ok(case_study.clone())))
}

async fn submit_contact(
    State(state): State<AppState>,
    body: std::result::Result<Json<Value>, JsonRejection>,
) -> (StatusCode, Json<ContactResponse>) {
    // 型別錯誤也要以欄位錯誤回報，不讓 axum 直接回純文字
    let response = match body {
        Ok(Json(value)) => match ContactForm::from_json_value(&value) {
            Ok(form) => state.contact.submit(form).await,
            Err(errors) => {
                tracing::info!("❌ Contact body has {} mistyped field(s)", errors.len());
                ContactResponse::rejected(errors)
            }
        },
        Err(rejection) => {
            tracing::info!("❌ Contact body rejected: {}", rejection.body_text());
            ContactResponse::rejected(vec![FieldError::new("form", rejection.body_text())])
        }
    };

    let status = match response.error_category() {
        None => StatusCode::OK,
        Some(ErrorCategory::Validation) => StatusCode::UNPROCESSABLE_ENTITY,
        Some(_) => StatusCode::BAD_GATEWAY,
    };
    (status, Json(response))
}
