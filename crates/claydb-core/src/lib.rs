//! ## Crate layout
//! - `value`: tagged value model (`Value`, `Record`), canonical comparison,
//!   dotted-path resolution, and JSON interop.
//! - `query`: the `Where` condition tree and the `Sort` specification.
//! - `model`: entity metadata, relation descriptors, and the registry with
//!   its relation resolution pass.
//! - `error`: shared error taxonomy for construction, registration, and
//!   persister operations.
//!
//! The persister backends and the repository layer live in the `claydb`
//! crate; this crate has no storage of its own.

mod error;

pub mod model;
pub mod query;
pub mod value;

pub use error::Error;
pub use model::{EntityField, EntityMetadata, FieldKind, ManyToOne, MetadataRegistry, OneToMany};
pub use query::{Direction, Sort, SortOrder, Where};
pub use value::{Record, Value};

/// Workspace version re-export for downstream tooling/tests.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
