//! MailGate HTTP API
//!
//! Exposes the verification and activation flows over REST:
//!
//! - `GET /health` - liveness probe covering Redis and SMTP
//! - `POST /generate` - issue a verification code and mail it
//! - `POST /verify` - redeem a verification code
//! - `POST /generate-activation` - issue an activation link and mail it
//! - `POST /verify-activation` - redeem an activation token
//! - `POST /resend-activation` - resend an existing activation link
//!
//! Everything except `/health` sits behind the `x-api-key` header check.

pub mod app;
pub mod config;
pub mod dto;
pub mod errors;
pub mod middleware;
pub mod routes;

pub use app::{create_app, AppState};
pub use config::AppConfig;
