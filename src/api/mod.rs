//! API Module
//!
//! HTTP handlers and routing for the flag service.
//!
//! # Endpoints
//! - `GET /health` - Health check endpoint
//! - `GET /stats` - Flag cache statistics
//! - `GET /features` - Snapshot of every flag for display contexts
//! - `GET /features/:name` - Evaluate a single flag
//! - `/admin/features...` - Flag administration, gated by `enable_admin`

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::{create_router, ADMIN_FLAG};
