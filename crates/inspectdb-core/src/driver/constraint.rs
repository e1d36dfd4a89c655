use super::Relation;

use indexmap::IndexMap;

/// Constraints and indexes of one table, keyed by name, in catalog order.
pub type Constraints = IndexMap<String, Constraint>;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Constraint {
    /// Constrained columns in declaration order. `None` marks a member the
    /// catalog could not resolve to a column, such as an expression.
    pub columns: Vec<Option<String>>,

    /// True for the table's primary key.
    pub primary_key: bool,

    /// True when the combination of `columns` must be unique.
    pub unique: bool,

    /// The referenced column and table, for foreign key constraints.
    pub foreign_key: Option<Relation>,

    /// True when the constraint is backed by an index.
    pub index: bool,
}

impl Constraint {
    /// A unique constraint over the given columns.
    pub fn unique<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            columns: columns.into_iter().map(|c| Some(c.into())).collect(),
            unique: true,
            ..Self::default()
        }
    }

    /// A primary key constraint over the given columns.
    pub fn primary_key<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            primary_key: true,
            index: true,
            ..Self::unique(columns)
        }
    }
}
