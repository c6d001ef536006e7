//! API Module
//!
//! HTTP handlers and routing for the content cache REST API.
//!
//! # Endpoints
//! - `PUT /set` - Store a JSON value
//! - `GET /get/:key` - Retrieve a value by key
//! - `DELETE /del/:key` - Delete a key
//! - `POST /invalidate` - Delete keys matching a pattern
//! - `DELETE /clear` - Delete everything
//! - `GET|DELETE /content/*resource` - Read-through load and resource eviction
//! - `GET /stats` - Get cache statistics
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
