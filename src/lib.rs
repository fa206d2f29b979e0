//! HTTP Echo Service Library
//!
//! A diagnostic endpoint that reflects inbound requests back to the
//! caller as structured JSON: headers, query arguments, form fields,
//! parsed JSON body, and the authenticated user injected by upstream
//! infrastructure.

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;

pub use config::schema::EchoConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
