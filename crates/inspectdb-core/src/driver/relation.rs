use indexmap::IndexMap;

/// Foreign keys of one table, keyed by the referencing column.
pub type Relations = IndexMap<String, Relation>;

/// The target of a foreign key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Relation {
    /// The referenced column.
    pub column: String,

    /// The referenced table.
    pub table: String,
}

impl Relation {
    pub fn new(column: impl Into<String>, table: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            table: table.into(),
        }
    }
}
