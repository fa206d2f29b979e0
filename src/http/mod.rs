//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware stack)
//!     → request.rs (add request ID)
//!     → echo.rs (reflect request fields as JSON)
//!     → Send to client
//! ```

pub mod echo;
pub mod request;
pub mod server;

pub use request::{request_id, RequestId, RequestIdLayer, X_REQUEST_ID};
pub use server::HttpServer;
