//! Remote client boundary for the gridbase hosted platform.
//!
//! This crate owns everything that talks to the wire so the entity crates
//! don't have to: connection configuration ([`ClientConfig`]), the
//! polymorphic [`FieldClient`] capability trait, structured errors, and the
//! reqwest-backed [`HttpFieldClient`].
//!
//! Entities hold an `Arc<dyn FieldClient>` — sharing a client across many
//! entities is cloning the Arc; owning one exclusively is constructing it
//! from a [`ClientConfig`].

mod config;
mod error;
mod http;
mod traits;

#[cfg(any(test, feature = "test-support"))]
pub mod testing;

pub use config::ClientConfig;
pub use error::{ClientError, Result};
pub use http::HttpFieldClient;
pub use traits::{
    DeleteFieldRequest, DeleteFieldResult, FieldAttributes, FieldClient, GetFieldRequest,
    PostFieldRequest, PutFieldRequest,
};
