//! API Module
//!
//! HTTP handlers and routing for the cache service. Route loaders read and
//! populate entries; content-mutation hooks invalidate by tag.
//!
//! # Endpoints
//! - `PUT /cache`, `DELETE /cache` - Store an entry / clear everything
//! - `GET /cache/:key`, `DELETE /cache/:key` - Read / delete one key
//! - `GET /cache/:key/exists` - Liveness check
//! - `POST /invalidate` - Tag invalidation
//! - `POST /cleanup` - Expiry sweep
//! - `GET /stats`, `GET /tags`, `GET /health` - Diagnostics

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
