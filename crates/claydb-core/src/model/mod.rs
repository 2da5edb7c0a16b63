mod entity;
mod field;
mod registry;
mod relation;

pub use entity::EntityMetadata;
pub use field::{EntityField, FieldKind};
pub use registry::MetadataRegistry;
pub use relation::{ManyToOne, OneToMany};
