//! # HTTP Module
//!
//! Public API surface: wire types and the axum server.
//!
//! - **Version**: 1.2.0
//! - **Since**: 0.1.0
//! - **Toggleable**: false

pub mod protocol;
pub mod server;

pub use protocol::{
    AckResponse, HealthResponse, LoginRequest, LoginResponse, NotifyRequest, RegisterRequest,
    RegisterResponse, RegistrationList, ScheduleRemindersRequest, ScheduleRemindersResponse,
    TestEmailResponse,
};
pub use server::{build_router, run_server, AppState, HttpError, EVENT_CHANNEL_CAPACITY};
