//! Response models for the cache admin API
//!
//! This module defines the DTOs (Data Transfer Objects) used for
//! serializing HTTP response bodies. The response cache itself is
//! populated by the caching middleware, so there are no write-side
//! request DTOs.

pub mod responses;

// Re-export commonly used types
pub use responses::{
    CleanupResponse, ClearResponse, DeleteResponse, EntryInfoResponse, ErrorResponse,
    HealthResponse, KeysResponse, StatsResponse,
};
