//! Field entity for the gridbase hosted platform.
//!
//! A [`Field`] models one remote column definition as an addressable,
//! mutable record: an identity triple (application, table, field id), a
//! generic attribute store with identity aliasing, and a sync lifecycle
//! (`load`, `save`, `delete`, `clear`) against a remote client.
//!
//! A field with `fid() == -1` is a draft — it has no remote identity yet and
//! `save()` creates it; a field with a positive fid is persisted and
//! `save()` updates it in place. The whole entity snapshots to a portable
//! JSON envelope that also captures the client configuration it depends on.
//!
//! ```rust,ignore
//! let mut field = Field::new(FieldOptions::new().table_id("t1"));
//! field.set("name", "Status").set("type", "text");
//! field.save(None, None).await?;          // POST; fid assigned by the service
//! assert!(field.fid() > 0);
//! let envelope = field.to_json();         // portable snapshot
//! ```

mod alias;
mod error;
mod field;
mod lifecycle;
mod snapshot;

pub use error::{FieldError, Result};
pub use field::{Field, FieldOptions};
pub use snapshot::FieldSnapshot;
