/// A table or view listed by the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableInfo {
    pub name: String,
    pub kind: TableKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TableKind {
    Table,
    View,
}

impl TableInfo {
    pub fn table(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: TableKind::Table,
        }
    }

    pub fn view(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: TableKind::View,
        }
    }

    pub fn is_view(&self) -> bool {
        self.kind == TableKind::View
    }
}
