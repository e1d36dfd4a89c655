/// One column of a table, as described by the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnInfo {
    /// The column name, exactly as stored in the database.
    pub name: String,

    /// The backend's native type, e.g. `varchar(30)` or `int4`.
    pub data_type: String,

    /// Declared size, such as the `N` of `VARCHAR(N)`.
    pub internal_size: Option<u32>,

    /// Numeric precision, when the catalog records one.
    pub precision: Option<u32>,

    /// Numeric scale, when the catalog records one.
    pub scale: Option<u32>,

    /// Whether the column accepts `NULL`.
    pub nullable: bool,

    /// True if the column is an integer the database increments with each
    /// insertion of a new row.
    pub auto_increment: bool,
}

impl ColumnInfo {
    /// Creates a non-nullable column with no size information.
    pub fn new(name: impl Into<String>, data_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            data_type: data_type.into(),
            internal_size: None,
            precision: None,
            scale: None,
            nullable: false,
            auto_increment: false,
        }
    }

    pub fn internal_size(mut self, size: u32) -> Self {
        self.internal_size = Some(size);
        self
    }

    pub fn precision(mut self, precision: u32, scale: u32) -> Self {
        self.precision = Some(precision);
        self.scale = Some(scale);
        self
    }

    pub fn nullable(mut self, nullable: bool) -> Self {
        self.nullable = nullable;
        self
    }

    pub fn auto_increment(mut self, auto_increment: bool) -> Self {
        self.auto_increment = auto_increment;
        self
    }
}
