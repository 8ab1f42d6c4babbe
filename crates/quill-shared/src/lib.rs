//! # Quill Shared
//!
//! View payloads and response envelopes exchanged with clients.
//! Kept free of domain and framework dependencies so a client can reuse it.

pub mod dto;
pub mod response;

pub use response::{ApiResponse, ErrorResponse, FieldErrors};
