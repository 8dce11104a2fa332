//! # HTTP Server
//!
//! Router and handlers for the public API: registration intake, the
//! reminder batch endpoint, email diagnostics, and the gated response
//! viewer with its live event stream.
//!
//! - **Version**: 1.2.0
//! - **Since**: 0.1.0
//! - **Toggleable**: false
//!
//! ## Changelog
//! - 1.2.0: Live insert stream for the response viewer
//! - 1.1.0: Reminder scheduling and email diagnostics endpoints
//! - 1.0.0: Registration intake and response viewer

use std::convert::Infallible;
use std::sync::Arc;

use anyhow::Result;
use axum::extract::{Query, State};
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::sse::{Event, KeepAlive, Sse};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::Utc;
use futures::Stream;
use log::{error, info, warn};
use serde::Serialize;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tokio_stream::wrappers::errors::BroadcastStreamRecvError;
use tokio_stream::wrappers::BroadcastStream;
use tokio_stream::StreamExt;

use crate::core::Config;
use crate::database::RegistrationStore;
use crate::features::get_service_version;
use crate::features::mailer::Mailer;
use crate::features::notifications::{build_test_email, NotifyPayload, RegistrationNotifier};
use crate::features::reminders::{ReminderScheduler, ReminderTemplates};
use crate::features::responses::{export_csv, export_filename, SessionStore};
use crate::http::protocol::{
    AckResponse, HealthResponse, LiveQuery, LoginRequest, LoginResponse, NotifyRequest,
    RegisterRequest, RegisterResponse, RegistrationList, ScheduleRemindersRequest,
    ScheduleRemindersResponse, TestEmailResponse,
};
use crate::registrations::{NewRegistration, Registration, Role};

/// Capacity of the live-insert broadcast channel. A viewer that falls
/// this far behind misses events rather than stalling intake.
pub const EVENT_CHANNEL_CAPACITY: usize = 256;

/// Shared state behind every handler.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn RegistrationStore>,
    pub mailer: Option<Arc<dyn Mailer>>,
    pub notifier: Arc<RegistrationNotifier>,
    pub scheduler: Option<Arc<ReminderScheduler>>,
    pub sessions: Arc<SessionStore>,
    pub events: broadcast::Sender<Registration>,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(
        config: Config,
        store: Arc<dyn RegistrationStore>,
        mailer: Option<Arc<dyn Mailer>>,
    ) -> Result<AppState> {
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        let notifier = Arc::new(RegistrationNotifier::new(
            mailer.clone(),
            config.notification_email.clone(),
            config.from_email.clone(),
        )?);
        let scheduler = match &mailer {
            Some(mailer) => Some(Arc::new(ReminderScheduler::new(
                store.clone(),
                mailer.clone(),
                Arc::new(ReminderTemplates::new()?),
                config.from_email.clone(),
            ))),
            None => None,
        };
        Ok(AppState {
            store,
            mailer,
            notifier,
            scheduler,
            sessions: Arc::new(SessionStore::new()),
            events,
            config: Arc::new(config),
        })
    }
}

/// Error payload in the `{error, hint?}` shape the dashboard expects.
#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    hint: Option<String>,
}

#[derive(Debug)]
pub struct HttpError {
    pub status: StatusCode,
    pub error: String,
    pub hint: Option<String>,
}

impl HttpError {
    pub fn bad_request(message: impl Into<String>) -> HttpError {
        HttpError {
            status: StatusCode::BAD_REQUEST,
            error: message.into(),
            hint: None,
        }
    }

    pub fn unauthorized(message: impl Into<String>) -> HttpError {
        HttpError {
            status: StatusCode::UNAUTHORIZED,
            error: message.into(),
            hint: None,
        }
    }

    /// Log the cause, expose only the public message.
    pub fn internal(cause: anyhow::Error, message: impl Into<String>) -> HttpError {
        let message = message.into();
        error!("{message}: {cause:#}");
        HttpError {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            error: message,
            hint: None,
        }
    }

    pub fn with_hint(mut self, hint: impl Into<String>) -> HttpError {
        self.hint = Some(hint.into());
        self
    }
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: self.error,
            hint: self.hint,
        };
        (self.status, Json(body)).into_response()
    }
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/healthz", get(healthz))
        .route("/api/register", post(register))
        .route("/api/notify", post(notify))
        .route("/api/schedule-reminders", post(schedule_reminders))
        .route("/api/test-email", get(test_email))
        .route("/api/responses/login", post(responses_login))
        .route("/api/responses/logout", post(responses_logout))
        .route("/api/responses", get(responses_list))
        .route("/api/responses/live", get(responses_live))
        .route("/api/responses/export", get(responses_export))
        .with_state(state)
}

/// Serve until the process receives an interrupt.
pub async fn run_server(listener: TcpListener, state: AppState) -> Result<()> {
    let app = build_router(state);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("failed to listen for shutdown signal: {e}");
    }
}

async fn healthz() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        service: env!("CARGO_PKG_NAME"),
        version: get_service_version(),
    })
}

async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> Result<Json<RegisterResponse>, HttpError> {
    let name = payload.name.trim();
    if name.is_empty() {
        return Err(HttpError::bad_request("name is required"));
    }
    let contact = payload.contact.trim();
    if contact.is_empty() {
        return Err(HttpError::bad_request("contact is required"));
    }
    let other_role = payload.other_role.as_deref().map(str::trim);
    if payload.role == Role::Other && other_role.unwrap_or("").is_empty() {
        return Err(HttpError::bad_request(
            "otherRole is required when role is 'other'",
        ));
    }

    let new = NewRegistration {
        name: name.to_string(),
        role: payload.role.stored_value(other_role),
        contact: contact.to_string(),
        comments: payload.comments.unwrap_or_default(),
        language: payload.language.unwrap_or_default().code().to_string(),
        created_at: Utc::now(),
    };

    let registration = state
        .store
        .insert(new)
        .await
        .map_err(|e| HttpError::internal(e, "Failed to store registration"))?;
    info!("stored registration {} from {}", registration.id, registration.name);

    // live viewers; send only errors when nobody is subscribed
    let _ = state.events.send(registration.clone());

    state.notifier.notify(&NotifyPayload::from(&registration)).await;

    Ok(Json(RegisterResponse {
        success: true,
        registration,
    }))
}

async fn notify(
    State(state): State<AppState>,
    Json(payload): Json<NotifyRequest>,
) -> Json<AckResponse> {
    state
        .notifier
        .notify(&NotifyPayload {
            name: payload.name,
            role: payload.role,
            contact: payload.contact,
            comments: payload.comments.unwrap_or_default(),
            language: payload.language.unwrap_or_else(|| "nl".to_string()),
        })
        .await;
    Json(AckResponse { success: true })
}

async fn schedule_reminders(
    State(state): State<AppState>,
    Json(payload): Json<ScheduleRemindersRequest>,
) -> Result<Json<ScheduleRemindersResponse>, HttpError> {
    let Some(scheduler) = state.scheduler.as_ref() else {
        return Err(HttpError::bad_request("RESEND_API_KEY is not configured")
            .with_hint("Please add RESEND_API_KEY to the service environment"));
    };
    let outcome = scheduler
        .run(payload.reminder_date)
        .await
        .map_err(|e| HttpError::internal(e, "Failed to fetch registrations"))?;
    Ok(Json(ScheduleRemindersResponse::from_outcome(outcome)))
}

async fn test_email(State(state): State<AppState>) -> Result<Json<TestEmailResponse>, HttpError> {
    info!("testing email configuration");
    let Some(mailer) = state.mailer.as_ref() else {
        return Err(HttpError::bad_request("RESEND_API_KEY is not configured")
            .with_hint("Please add RESEND_API_KEY to the service environment"));
    };
    let Some(destination) = state.config.notification_email.as_ref() else {
        return Err(HttpError::bad_request("NOTIFICATION_EMAIL is not configured")
            .with_hint("Please add NOTIFICATION_EMAIL to the service environment"));
    };

    let message = build_test_email(destination)
        .map_err(|e| HttpError::internal(e, "Failed to send email"))?;
    match mailer.send(&message).await {
        Ok(receipt) => Ok(Json(TestEmailResponse {
            success: true,
            message: "Test email sent successfully!".to_string(),
            email_id: receipt.id,
            sent_to: destination.clone(),
        })),
        Err(e) => Err(HttpError::internal(e, "Failed to send email")
            .with_hint("Check if the provider API key is valid and has permissions")),
    }
}

async fn responses_login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, HttpError> {
    match state.sessions.login(&payload.username, &payload.password) {
        Some(token) => {
            info!("response viewer login succeeded");
            Ok(Json(LoginResponse {
                success: true,
                token,
            }))
        }
        None => {
            warn!("response viewer login rejected");
            Err(HttpError::unauthorized("Invalid username or password"))
        }
    }
}

async fn responses_logout(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Json<AckResponse> {
    if let Some(token) = bearer_token(&headers) {
        state.sessions.logout(&token);
    }
    Json(AckResponse { success: true })
}

async fn responses_list(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<RegistrationList>, HttpError> {
    require_session(&state, &headers, None)?;
    let registrations = state
        .store
        .fetch_recent_first()
        .await
        .map_err(|e| HttpError::internal(e, "Failed to load registrations"))?;
    let total = registrations.len();
    Ok(Json(RegistrationList {
        registrations,
        total,
    }))
}

async fn responses_live(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<LiveQuery>,
) -> Result<Sse<impl Stream<Item = Result<Event, Infallible>>>, HttpError> {
    require_session(&state, &headers, query.token.as_deref())?;
    let stream = BroadcastStream::new(state.events.subscribe()).filter_map(|item| match item {
        Ok(registration) => match Event::default().event("registration").json_data(&registration)
        {
            Ok(event) => Some(Ok(event)),
            Err(e) => {
                error!("failed to encode registration event: {e}");
                None
            }
        },
        Err(BroadcastStreamRecvError::Lagged(skipped)) => {
            warn!("live viewer lagged, {skipped} events dropped");
            None
        }
    });
    Ok(Sse::new(stream).keep_alive(KeepAlive::default()))
}

async fn responses_export(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Response, HttpError> {
    require_session(&state, &headers, None)?;
    let registrations = state
        .store
        .fetch_recent_first()
        .await
        .map_err(|e| HttpError::internal(e, "Failed to load registrations"))?;
    let csv = export_csv(&registrations);
    let filename = export_filename(Utc::now());
    let response_headers = [
        (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{filename}\""),
        ),
    ];
    Ok((response_headers, csv).into_response())
}

fn bearer_token(headers: &HeaderMap) -> Option<String> {
    headers
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(|token| token.trim().to_string())
}

fn require_session(
    state: &AppState,
    headers: &HeaderMap,
    query_token: Option<&str>,
) -> Result<(), HttpError> {
    let token = bearer_token(headers).or_else(|| query_token.map(str::to_string));
    match token {
        Some(token) if state.sessions.validate(&token) => Ok(()),
        _ => Err(HttpError::unauthorized("a valid session token is required")),
    }
}
