//! HTTP surface for cafe owner onboarding.
//!
//! Registration (email code, then phone code) and phone-based password
//! reset, served under `/api/v1/owners`.

pub mod app;
pub mod config;
pub mod dto;
pub mod handlers;
pub mod routes;
pub mod telemetry;

pub use app::{create_app, AppState};
