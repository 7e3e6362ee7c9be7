//! taskchain-store: `TaskStore` implementations.
//!
//! `RestTaskStore` talks to the remote PostgREST-style backend over HTTP;
//! `LocalTaskStore` is an in-memory stand-in with the same filtered-write
//! semantics, used by tests and the CLI's ephemeral local mode.

pub mod http;
pub mod local;
pub mod rest;

pub use http::{StoreHttpError, StoreHttpErrorKind};
pub use local::LocalTaskStore;
pub use rest::RestTaskStore;
