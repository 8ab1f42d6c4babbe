//! In-process store used when no database is configured, and by the
//! service-level tests.

mod store;

pub use store::InMemoryStore;
