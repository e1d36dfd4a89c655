use std::{fmt, sync::Arc};

type TableNameFilter = Arc<dyn Fn(&str) -> bool + Send + Sync>;

/// Configuration for one model generation pass.
#[derive(Clone)]
pub struct Options {
    /// Tables to introspect, in this order. When empty, every table in the
    /// database is introspected, sorted by name.
    pub tables: Vec<String>,

    /// Also introspect views when `tables` is empty.
    pub include_views: bool,

    /// Tables for which the filter returns false are skipped.
    pub table_name_filter: Option<TableNameFilter>,

    /// The module the generated code imports `models` from.
    pub db_module: String,
}

impl Options {
    /// Create a new Options with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Restrict generation to the given tables
    pub fn tables<I, S>(mut self, tables: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tables = tables.into_iter().map(Into::into).collect();
        self
    }

    /// Set whether views are introspected along with tables
    pub fn include_views(mut self, include_views: bool) -> Self {
        self.include_views = include_views;
        self
    }

    /// Skip tables for which `filter` returns false
    pub fn table_name_filter(
        mut self,
        filter: impl Fn(&str) -> bool + Send + Sync + 'static,
    ) -> Self {
        self.table_name_filter = Some(Arc::new(filter));
        self
    }

    /// Set the module `models` is imported from
    pub fn db_module(mut self, db_module: impl Into<String>) -> Self {
        self.db_module = db_module.into();
        self
    }

    pub(crate) fn accepts(&self, table: &str) -> bool {
        self.table_name_filter
            .as_ref()
            .map_or(true, |filter| filter(table))
    }
}

impl Default for Options {
    fn default() -> Self {
        Self {
            tables: vec![],
            include_views: false,
            table_name_filter: None,
            db_module: "django.db".to_string(),
        }
    }
}

impl fmt::Debug for Options {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Options")
            .field("tables", &self.tables)
            .field("include_views", &self.include_views)
            .field("table_name_filter", &self.table_name_filter.is_some())
            .field("db_module", &self.db_module)
            .finish()
    }
}
