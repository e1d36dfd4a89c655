mod ty;

use inspectdb_core::{
    bail,
    driver::{ColumnInfo, Constraint, Constraints, FieldType, Relation, Relations, TableInfo},
    err, Capability, Driver, Error, Result,
};
use percent_encoding::percent_decode_str;
use rusqlite::{Connection as RusqliteConnection, OptionalExtension};
use std::{
    borrow::Cow,
    path::{Path, PathBuf},
};
use url::Url;

/// Name given to the constraint synthesized from the table's primary key
/// columns.
const PRIMARY_KEY_CONSTRAINT: &str = "__primary__";

#[derive(Debug)]
pub enum Sqlite {
    File(PathBuf),
    InMemory,
}

impl Sqlite {
    /// Create a new SQLite driver with an arbitrary connection URL
    pub fn new(url: impl Into<String>) -> Result<Self> {
        let url_str = url.into();
        let url = Url::parse(&url_str).map_err(Error::driver)?;

        if url.scheme() != "sqlite" {
            return Err(Error::invalid_connection_url(format!(
                "connection URL does not have a `sqlite` scheme; url={}",
                url_str
            )));
        }

        if url.path() == ":memory:" {
            return Ok(Self::InMemory);
        }

        let path = percent_decode_str(url.path())
            .decode_utf8()
            .map_err(Error::driver)?;
        Ok(Self::File(PathBuf::from(path.into_owned())))
    }

    /// Create an in-memory SQLite database
    pub fn in_memory() -> Self {
        Self::InMemory
    }

    /// Open a SQLite database at the specified file path
    pub fn open<P: AsRef<Path>>(path: P) -> Self {
        Self::File(path.as_ref().to_path_buf())
    }
}

impl Driver for Sqlite {
    fn url(&self) -> Cow<'_, str> {
        match self {
            Sqlite::InMemory => Cow::Borrowed("sqlite::memory:"),
            Sqlite::File(path) => Cow::Owned(format!("sqlite:{}", path.display())),
        }
    }

    fn capability(&self) -> &'static Capability {
        &Capability::SQLITE
    }

    fn connect(&self) -> Result<Box<dyn inspectdb_core::Connection>> {
        let connection = match self {
            Sqlite::File(path) => Connection::open(path)?,
            Sqlite::InMemory => Connection::in_memory()?,
        };
        Ok(Box::new(connection))
    }
}

#[derive(Debug)]
pub struct Connection {
    connection: RusqliteConnection,
}

/// A row of `pragma_table_info`.
struct TableInfoRow {
    name: String,
    ty: String,
    not_null: bool,
    pk: u32,
}

impl Connection {
    pub fn in_memory() -> Result<Self> {
        let connection = RusqliteConnection::open_in_memory().map_err(Error::driver)?;
        Ok(Self { connection })
    }

    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            // Opening would create an empty database file.
            bail!("database file `{}` does not exist", path.display());
        }

        let connection = RusqliteConnection::open(path).map_err(|e| {
            Error::driver(e).context(err!("failed to open `{}`", path.display()))
        })?;
        Ok(Self { connection })
    }

    fn table_info(&self, table: &str) -> Result<Vec<TableInfoRow>> {
        let sql = r#"SELECT name, type, "notnull", pk FROM pragma_table_info(?1) ORDER BY cid"#;
        log::trace!("{sql}; table={table}");

        let mut stmt = self.connection.prepare_cached(sql).map_err(Error::driver)?;
        let rows = stmt
            .query_map([table], |row| {
                Ok(TableInfoRow {
                    name: row.get(0)?,
                    ty: row.get(1)?,
                    not_null: row.get(2)?,
                    pk: row.get(3)?,
                })
            })
            .map_err(Error::driver)?;

        rows.collect::<rusqlite::Result<_>>().map_err(Error::driver)
    }

    /// The column a foreign key without an explicit target column refers to.
    fn primary_key_of(&self, table: &str) -> Result<Option<String>> {
        let sql = "SELECT name FROM pragma_table_info(?1) WHERE pk = 1";
        log::trace!("{sql}; table={table}");

        self.connection
            .query_row(sql, [table], |row| row.get(0))
            .optional()
            .map_err(Error::driver)
    }

    fn index_columns(&self, index: &str) -> Result<Vec<Option<String>>> {
        let sql = "SELECT name FROM pragma_index_info(?1) ORDER BY seqno";
        log::trace!("{sql}; index={index}");

        let mut stmt = self.connection.prepare_cached(sql).map_err(Error::driver)?;
        let rows = stmt
            .query_map([index], |row| row.get(0))
            .map_err(Error::driver)?;

        rows.collect::<rusqlite::Result<_>>().map_err(Error::driver)
    }
}

impl inspectdb_core::Connection for Connection {
    fn table_list(&mut self) -> Result<Vec<TableInfo>> {
        let sql = "SELECT name, type FROM sqlite_master \
                   WHERE type IN ('table', 'view') AND name NOT LIKE 'sqlite\\_%' ESCAPE '\\' \
                   ORDER BY name";
        log::trace!("{sql}");

        let mut stmt = self.connection.prepare(sql).map_err(Error::driver)?;
        let rows = stmt
            .query_map([], |row| {
                let name: String = row.get(0)?;
                let ty: String = row.get(1)?;
                Ok(if ty == "view" {
                    TableInfo::view(name)
                } else {
                    TableInfo::table(name)
                })
            })
            .map_err(Error::driver)?;

        rows.collect::<rusqlite::Result<_>>().map_err(Error::driver)
    }

    fn table_description(&mut self, table: &str) -> Result<Vec<ColumnInfo>> {
        let rows = self.table_info(table)?;
        if rows.is_empty() {
            return Err(Error::table_not_found(table));
        }

        // Only a lone `INTEGER PRIMARY KEY` aliases the rowid.
        let pk_columns = rows.iter().filter(|row| row.pk > 0).count();

        Ok(rows
            .into_iter()
            .map(|row| {
                let auto_increment =
                    pk_columns == 1 && row.pk == 1 && row.ty.eq_ignore_ascii_case("integer");

                ColumnInfo {
                    internal_size: ty::field_size(&row.ty),
                    precision: None,
                    scale: None,
                    nullable: !row.not_null,
                    auto_increment,
                    name: row.name,
                    data_type: row.ty,
                }
            })
            .collect())
    }

    fn relations(&mut self, table: &str) -> Result<Relations> {
        let sql = r#"SELECT "from", "table", "to" FROM pragma_foreign_key_list(?1) ORDER BY id, seq"#;
        log::trace!("{sql}; table={table}");

        let foreign_keys: Vec<(String, String, Option<String>)> = {
            let mut stmt = self.connection.prepare_cached(sql).map_err(Error::driver)?;
            let rows = stmt
                .query_map([table], |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?)))
                .map_err(Error::driver)?;
            rows.collect::<rusqlite::Result<_>>().map_err(Error::driver)?
        };

        let mut relations = Relations::new();
        for (column, target_table, target_column) in foreign_keys {
            let target_column = match target_column {
                Some(target_column) => target_column,
                None => match self.primary_key_of(&target_table)? {
                    Some(target_column) => target_column,
                    None => continue,
                },
            };
            relations.insert(column, Relation::new(target_column, target_table));
        }

        Ok(relations)
    }

    fn constraints(&mut self, table: &str) -> Result<Constraints> {
        let mut constraints = Constraints::new();

        let mut pk_columns: Vec<_> = self
            .table_info(table)?
            .into_iter()
            .filter(|row| row.pk > 0)
            .map(|row| (row.pk, row.name))
            .collect();
        pk_columns.sort();
        if !pk_columns.is_empty() {
            constraints.insert(
                PRIMARY_KEY_CONSTRAINT.to_string(),
                Constraint::primary_key(pk_columns.into_iter().map(|(_, name)| name)),
            );
        }

        let sql = r#"SELECT name, "unique", origin FROM pragma_index_list(?1) ORDER BY seq"#;
        log::trace!("{sql}; table={table}");

        let indexes: Vec<(String, bool, String)> = {
            let mut stmt = self.connection.prepare_cached(sql).map_err(Error::driver)?;
            let rows = stmt
                .query_map([table], |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?)))
                .map_err(Error::driver)?;
            rows.collect::<rusqlite::Result<_>>().map_err(Error::driver)?
        };

        for (name, unique, origin) in indexes {
            // The primary key index is already covered above.
            if origin == "pk" {
                continue;
            }

            let columns = self.index_columns(&name)?;
            constraints.insert(
                name,
                Constraint {
                    columns,
                    unique,
                    index: true,
                    ..Constraint::default()
                },
            );
        }

        let sql = r#"SELECT id, "from", "table", "to" FROM pragma_foreign_key_list(?1) ORDER BY id, seq"#;
        log::trace!("{sql}; table={table}");

        let foreign_keys: Vec<(i64, String, String, Option<String>)> = {
            let mut stmt = self.connection.prepare_cached(sql).map_err(Error::driver)?;
            let rows = stmt
                .query_map([table], |row| {
                    Ok((row.get(0)?, row.get(1)?, row.get(2)?, row.get(3)?))
                })
                .map_err(Error::driver)?;
            rows.collect::<rusqlite::Result<_>>().map_err(Error::driver)?
        };

        for (id, column, target_table, target_column) in foreign_keys {
            let target_column = match target_column {
                Some(target_column) => target_column,
                None => self.primary_key_of(&target_table)?.unwrap_or_default(),
            };

            let constraint = constraints
                .entry(format!("fk_{id}"))
                .or_insert_with(|| Constraint {
                    foreign_key: Some(Relation::new(target_column, target_table)),
                    ..Constraint::default()
                });
            constraint.columns.push(Some(column));
        }

        Ok(constraints)
    }

    fn field_type(&self, column: &ColumnInfo) -> Result<FieldType> {
        ty::field_type(column)
    }
}
