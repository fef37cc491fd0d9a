//! Booking Client - client for the restaurant reservation API
//!
//! Typed HTTP calls, a persisted login session and the stateful views that
//! drive them. Views render to a small [`view::Node`] tree which front ends
//! print as text or HTML.

pub mod api;
pub mod config;
pub mod error;
pub mod form;
pub mod http;
pub mod session;
pub mod ui;
pub mod view;

#[cfg(test)]
mod mock;

pub use api::BookingApi;
pub use config::ClientConfig;
pub use error::{ClientError, ClientResult};
pub use http::{HttpClient, NetworkHttpClient};
pub use session::{AuthSession, FileSessionStore, MemorySessionStore, SessionManager, SessionStore};
pub use ui::{App, AssumeYes, Confirm, Screen};

// Re-export shared types for convenience
pub use shared::{LoginResponse, UserInfo};
