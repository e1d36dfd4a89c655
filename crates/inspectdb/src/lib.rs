//! Generates Django model declarations from an existing database schema.
//!
//! The generator reads the catalog through an [`inspectdb_core::Driver`] and
//! emits one unmanaged model class per table, annotating every field whose
//! translation needed a guess or a rename.

mod field;
pub use field::{map_field_type, Field, MappedType};

mod inspect;
pub use inspect::inspect;

mod meta;

mod model_name;
pub use model_name::table_to_model;

mod normalize;
pub use normalize::{normalize_column_name, NormalizedName};

mod options;
pub use options::Options;

mod repr;

pub use inspectdb_core::{Error, Result};
