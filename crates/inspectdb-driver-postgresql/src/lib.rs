mod ty;

use inspectdb_core::{
    driver::{ColumnInfo, Constraint, Constraints, FieldType, Relation, Relations, TableInfo},
    Capability, Driver, Error, Result,
};
use postgres::{Client, Config, NoTls};
use std::borrow::Cow;
use url::Url;

const TABLE_LIST: &str = "
    SELECT c.relname::text, c.relkind IN ('v', 'm')
    FROM pg_catalog.pg_class c
    JOIN pg_catalog.pg_namespace n ON n.oid = c.relnamespace
    WHERE c.relkind IN ('f', 'm', 'p', 'r', 'v')
        AND n.nspname NOT IN ('pg_catalog', 'pg_toast', 'information_schema')
        AND pg_catalog.pg_table_is_visible(c.oid)
    ORDER BY c.relname";

const TABLE_DESCRIPTION: &str = "
    SELECT
        a.attname::text,
        t.typname::text,
        information_schema._pg_char_max_length(t.oid, a.atttypmod)::int4,
        information_schema._pg_numeric_precision(t.oid, a.atttypmod)::int4,
        information_schema._pg_numeric_scale(t.oid, a.atttypmod)::int4,
        NOT a.attnotnull,
        a.attidentity != '' OR COALESCE(pg_catalog.pg_get_expr(ad.adbin, ad.adrelid), '') LIKE 'nextval(%'
    FROM pg_catalog.pg_attribute a
    JOIN pg_catalog.pg_class c ON c.oid = a.attrelid
    JOIN pg_catalog.pg_type t ON t.oid = a.atttypid
    LEFT JOIN pg_catalog.pg_attrdef ad ON ad.adrelid = a.attrelid AND ad.adnum = a.attnum
    WHERE c.relname = $1
        AND pg_catalog.pg_table_is_visible(c.oid)
        AND a.attnum > 0
        AND NOT a.attisdropped
    ORDER BY a.attnum";

const RELATIONS: &str = "
    SELECT a1.attname::text, c2.relname::text, a2.attname::text
    FROM pg_catalog.pg_constraint con
    JOIN pg_catalog.pg_class c1 ON con.conrelid = c1.oid
    JOIN pg_catalog.pg_class c2 ON con.confrelid = c2.oid
    JOIN pg_catalog.pg_attribute a1 ON c1.oid = a1.attrelid AND a1.attnum = con.conkey[1]
    JOIN pg_catalog.pg_attribute a2 ON c2.oid = a2.attrelid AND a2.attnum = con.confkey[1]
    WHERE c1.relname = $1
        AND con.contype = 'f'
        AND c1.relnamespace = c2.relnamespace
        AND pg_catalog.pg_table_is_visible(c1.oid)
    ORDER BY con.conname";

const CONSTRAINTS: &str = "
    SELECT
        con.conname::text,
        ARRAY(
            SELECT a.attname::text
            FROM unnest(con.conkey) WITH ORDINALITY AS k(attnum, ord)
            LEFT JOIN pg_catalog.pg_attribute a ON a.attrelid = con.conrelid AND a.attnum = k.attnum
            ORDER BY k.ord
        ),
        con.contype,
        fc.relname::text,
        fa.attname::text
    FROM pg_catalog.pg_constraint con
    JOIN pg_catalog.pg_class c ON c.oid = con.conrelid
    LEFT JOIN pg_catalog.pg_class fc ON fc.oid = con.confrelid
    LEFT JOIN pg_catalog.pg_attribute fa ON fa.attrelid = con.confrelid AND fa.attnum = con.confkey[1]
    WHERE c.relname = $1
        AND pg_catalog.pg_table_is_visible(c.oid)
    ORDER BY con.conname";

/// Indexes not already reported as constraints. Expression members have
/// attribute number 0 and come back as `NULL`.
const INDEXES: &str = "
    SELECT
        ic.relname::text,
        ARRAY(
            SELECT a.attname::text
            FROM unnest(idx.indkey::int2[]) WITH ORDINALITY AS k(attnum, ord)
            LEFT JOIN pg_catalog.pg_attribute a ON a.attrelid = idx.indrelid AND a.attnum = k.attnum
            ORDER BY k.ord
        ),
        idx.indisunique,
        idx.indisprimary
    FROM pg_catalog.pg_index idx
    JOIN pg_catalog.pg_class tc ON tc.oid = idx.indrelid
    JOIN pg_catalog.pg_class ic ON ic.oid = idx.indexrelid
    WHERE tc.relname = $1
        AND pg_catalog.pg_table_is_visible(tc.oid)
        AND NOT EXISTS (
            SELECT 1 FROM pg_catalog.pg_constraint con WHERE con.conindid = idx.indexrelid
        )
    ORDER BY ic.relname";

#[derive(Debug)]
pub struct PostgreSQL {
    config: Config,
    url: String,
}

impl PostgreSQL {
    /// Creates a driver for a `postgresql://` (or `postgres://`) URL.
    pub fn new(url: impl Into<String>) -> Result<Self> {
        let url_str = url.into();
        let url = Url::parse(&url_str).map_err(Error::driver)?;

        if !matches!(url.scheme(), "postgresql" | "postgres") {
            return Err(Error::invalid_connection_url(format!(
                "connection URL does not have a `postgresql` scheme; url={}",
                url_str
            )));
        }

        let host = url.host_str().ok_or_else(|| {
            Error::invalid_connection_url(format!(
                "missing host in connection URL; url={}",
                url_str
            ))
        })?;

        let dbname = url.path().trim_start_matches('/');
        if dbname.is_empty() {
            return Err(Error::invalid_connection_url(format!(
                "no database specified - missing path in connection URL; url={}",
                url_str
            )));
        }

        let mut config = Config::new();
        config.host(host);
        config.dbname(dbname);

        if let Some(port) = url.port() {
            config.port(port);
        }

        if !url.username().is_empty() {
            config.user(url.username());
        }

        if let Some(password) = url.password() {
            config.password(password);
        }

        Ok(Self::with_config(config, url_str))
    }

    /// Creates a driver from a [`postgres::Config`]. `url` is only used for
    /// display.
    pub fn with_config(config: Config, url: impl Into<String>) -> Self {
        Self {
            config,
            url: url.into(),
        }
    }
}

impl Driver for PostgreSQL {
    fn url(&self) -> Cow<'_, str> {
        Cow::Borrowed(&self.url)
    }

    fn capability(&self) -> &'static Capability {
        &Capability::POSTGRESQL
    }

    fn connect(&self) -> Result<Box<dyn inspectdb_core::Connection>> {
        let client = self
            .config
            .connect(NoTls)
            .map_err(|err| Error::driver(err).context("failed to connect to PostgreSQL"))?;
        Ok(Box::new(Connection { client }))
    }
}

pub struct Connection {
    client: Client,
}

impl std::fmt::Debug for Connection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Connection").finish_non_exhaustive()
    }
}

impl Connection {
    fn query(
        &mut self,
        sql: &str,
        params: &[&(dyn postgres::types::ToSql + Sync)],
    ) -> Result<Vec<postgres::Row>> {
        log::trace!("{}", sql.trim());
        self.client.query(sql, params).map_err(Error::driver)
    }
}

impl inspectdb_core::Connection for Connection {
    fn table_list(&mut self) -> Result<Vec<TableInfo>> {
        let rows = self.query(TABLE_LIST, &[])?;

        Ok(rows
            .iter()
            .map(|row| {
                let name: String = row.get(0);
                let is_view: bool = row.get(1);
                if is_view {
                    TableInfo::view(name)
                } else {
                    TableInfo::table(name)
                }
            })
            .collect())
    }

    fn table_description(&mut self, table: &str) -> Result<Vec<ColumnInfo>> {
        let rows = self.query(TABLE_DESCRIPTION, &[&table])?;
        if rows.is_empty() {
            return Err(Error::table_not_found(table));
        }

        rows.iter()
            .map(|row| {
                Ok(ColumnInfo {
                    name: row.get(0),
                    data_type: row.get(1),
                    internal_size: to_u32(row.get(2)),
                    precision: to_u32(row.get(3)),
                    scale: to_u32(row.get(4)),
                    nullable: row.get(5),
                    auto_increment: row.get(6),
                })
            })
            .collect()
    }

    fn relations(&mut self, table: &str) -> Result<Relations> {
        let rows = self.query(RELATIONS, &[&table])?;

        Ok(rows
            .iter()
            .map(|row| {
                let column: String = row.get(0);
                (column, Relation::new(row.get::<_, String>(2), row.get::<_, String>(1)))
            })
            .collect())
    }

    fn constraints(&mut self, table: &str) -> Result<Constraints> {
        let mut constraints = Constraints::new();

        for row in self.query(CONSTRAINTS, &[&table])? {
            let name: String = row.get(0);
            let columns: Vec<Option<String>> = row.get(1);
            let kind: i8 = row.get(2);
            let foreign_table: Option<String> = row.get(3);
            let foreign_column: Option<String> = row.get(4);

            let kind = kind as u8 as char;
            let foreign_key = match (kind, foreign_table, foreign_column) {
                ('f', Some(table), Some(column)) => Some(Relation::new(column, table)),
                _ => None,
            };

            constraints.insert(
                name,
                Constraint {
                    columns,
                    primary_key: kind == 'p',
                    unique: matches!(kind, 'p' | 'u'),
                    foreign_key,
                    index: matches!(kind, 'p' | 'u'),
                },
            );
        }

        for row in self.query(INDEXES, &[&table])? {
            let name: String = row.get(0);
            let columns: Vec<Option<String>> = row.get(1);

            constraints.insert(
                name,
                Constraint {
                    columns,
                    primary_key: row.get(3),
                    unique: row.get(2),
                    foreign_key: None,
                    index: true,
                },
            );
        }

        Ok(constraints)
    }

    fn field_type(&self, column: &ColumnInfo) -> Result<FieldType> {
        ty::field_type(column)
    }
}

/// Catalog sizes are `int4`; negative values mean "not applicable".
fn to_u32(value: Option<i32>) -> Option<u32> {
    value.and_then(|value| u32::try_from(value).ok())
}
