//! ## Crate layout
//! - `persister`: the storage contract (`Persister`), the in-memory backend
//!   (`MemoryPersister`), and a call-recording test double (`MockPersister`).
//! - `repository`: `CrudRepository`, the per-entity CRUD façade with
//!   metadata-driven finder synthesis and name-based dispatch.
//!
//! The value model, query types, and entity metadata live in `claydb-core`,
//! re-exported here as [`core`].

pub mod persister;
pub mod repository;

pub use claydb_core as core;

pub use persister::{Persister, memory::MemoryPersister, mock::MockPersister};
pub use repository::{CallOutcome, CrudRepository};

pub mod prelude {
    pub use crate::{
        CallOutcome, CrudRepository, MemoryPersister, Persister,
        core::{
            Direction, EntityField, EntityMetadata, Error, FieldKind, ManyToOne,
            MetadataRegistry, OneToMany, Record, Sort, SortOrder, Value, Where,
        },
    };
}

/// Workspace version re-export for downstream tooling/tests.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
