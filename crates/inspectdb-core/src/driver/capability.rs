#[derive(Debug)]
pub struct Capability {
    /// When true, the backend reports auto-incrementing integer columns with
    /// their own field type. When false, an integer `id` primary key may be an
    /// auto field the catalog cannot distinguish.
    pub can_introspect_autofield: bool,
}

impl Capability {
    /// SQLite capabilities.
    pub const SQLITE: Self = Self {
        // `INTEGER PRIMARY KEY` columns alias the rowid and are always
        // reported as auto fields.
        can_introspect_autofield: true,
    };

    /// PostgreSQL capabilities
    pub const POSTGRESQL: Self = Self {
        // Serial columns are detected through their `nextval(...)` default.
        can_introspect_autofield: true,
    };

    /// Capabilities of a backend whose catalog carries no auto-increment
    /// information.
    pub const MINIMAL: Self = Self {
        can_introspect_autofield: false,
    };
}
