//! Request and Response models for the content cache API
//!
//! This module defines the DTOs (Data Transfer Objects) used for
//! serializing/deserializing HTTP request and response bodies.

pub mod requests;
pub mod responses;

// Re-export commonly used types
pub use requests::{InvalidateRequest, SetRequest};
pub use responses::{
    DeleteResponse, GetResponse, HealthResponse, InvalidateResponse, SetResponse, StatsResponse,
};
