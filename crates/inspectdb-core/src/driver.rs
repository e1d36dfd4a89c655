mod capability;
pub use capability::Capability;

mod column_info;
pub use column_info::ColumnInfo;

mod constraint;
pub use constraint::{Constraint, Constraints};

mod field_type;
pub use field_type::FieldType;

mod relation;
pub use relation::{Relation, Relations};

mod table_info;
pub use table_info::{TableInfo, TableKind};

use crate::{Error, Result};

use std::{borrow::Cow, fmt::Debug};

/// A database backend that can be introspected.
pub trait Driver: Debug {
    /// Returns the URL the driver connects to.
    fn url(&self) -> Cow<'_, str>;

    /// Describes what the backend's catalog can tell the model generator.
    fn capability(&self) -> &'static Capability;

    /// Opens the single connection used for an introspection pass.
    fn connect(&self) -> Result<Box<dyn Connection>>;
}

/// An open connection able to answer catalog queries.
///
/// Only `table_list`, `table_description` and `field_type` are required.
/// Backends that cannot report relations or constraints leave the default
/// implementations in place, which report [`Error::not_supported`].
pub trait Connection: Debug {
    /// Lists every table and view visible on this connection.
    fn table_list(&mut self) -> Result<Vec<TableInfo>>;

    /// Describes the columns of `table`, in catalog order.
    fn table_description(&mut self, table: &str) -> Result<Vec<ColumnInfo>>;

    /// Maps each foreign-key column of `table` to the column and table it
    /// references.
    fn relations(&mut self, table: &str) -> Result<Relations> {
        let _ = table;
        Err(Error::not_supported("relations"))
    }

    /// Returns the constraints and indexes defined on `table`, keyed by name.
    fn constraints(&mut self, table: &str) -> Result<Constraints> {
        let _ = table;
        Err(Error::not_supported("constraints"))
    }

    /// Returns the column of `table`'s primary key, if it has one.
    ///
    /// The default implementation takes the first column of the first primary
    /// key constraint.
    fn primary_key_column(&mut self, table: &str) -> Result<Option<String>> {
        let constraints = self.constraints(table)?;

        Ok(constraints
            .values()
            .find(|constraint| constraint.primary_key)
            .and_then(|constraint| constraint.columns.first().cloned().flatten()))
    }

    /// Maps a column's native type to a model field type.
    ///
    /// Returns [`Error::unknown_field_type`] when the backend does not
    /// recognize the type.
    fn field_type(&self, column: &ColumnInfo) -> Result<FieldType>;
}
