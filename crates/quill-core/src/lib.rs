//! # Quill Core
//!
//! The domain layer of the Quill blog.
//! Entities, form validation, pagination and the request logic behind every
//! route live here, with zero infrastructure dependencies.

pub mod domain;
pub mod error;
pub mod forms;
pub mod pagination;
pub mod ports;
pub mod services;

pub use error::{DomainError, RepoError};
pub use pagination::{Page, PageRequest};
