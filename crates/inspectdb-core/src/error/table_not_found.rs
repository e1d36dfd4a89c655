use super::Error;

#[derive(Debug)]
pub(super) struct TableNotFound {
    table: Box<str>,
}

impl std::error::Error for TableNotFound {}

impl core::fmt::Display for TableNotFound {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "table `{}` does not exist", self.table)
    }
}

impl Error {
    /// Creates an error for a table the catalog does not know about.
    pub fn table_not_found(table: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::TableNotFound(TableNotFound {
            table: table.into().into(),
        }))
    }

    /// Returns `true` if this error is a table-not-found error.
    pub fn is_table_not_found(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::TableNotFound(_))
    }
}
