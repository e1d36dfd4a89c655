use inspectdb_core::{
    driver::{ColumnInfo, FieldType},
    Error, Result,
};

/// Maps a declared SQLite column type to a field type.
///
/// SQLite accepts any type name, so the lookup is on the lowercased name
/// with any size suffix removed: `VARCHAR(30)` is looked up as `varchar`.
pub(crate) fn field_type(column: &ColumnInfo) -> Result<FieldType> {
    let key = column.data_type.to_lowercase();
    let key = key.split('(').next().unwrap_or_default().trim();

    let name = match key {
        "bool" | "boolean" => "BooleanField",
        "smallint" | "smallinteger" => "SmallIntegerField",
        "smallint unsigned" => "PositiveSmallIntegerField",
        "integer" if column.auto_increment => "AutoField",
        "int" | "integer" => "IntegerField",
        "bigint" => "BigIntegerField",
        "integer unsigned" => "PositiveIntegerField",
        "decimal" | "numeric" => "DecimalField",
        "real" | "double" | "double precision" | "float" => "FloatField",
        "text" => "TextField",
        "char" | "varchar" | "character varying" | "nvarchar" => "CharField",
        "blob" => "BinaryField",
        "date" => "DateField",
        "datetime" | "timestamp" => "DateTimeField",
        "time" => "TimeField",
        _ => return Err(Error::unknown_field_type(&column.data_type)),
    };

    Ok(FieldType::new(name))
}

/// The `N` of a declared type such as `varchar(N)`.
pub(crate) fn field_size(data_type: &str) -> Option<u32> {
    let (_, rest) = data_type.split_once('(')?;
    let (size, _) = rest.split_once(')')?;
    size.trim().parse().ok()
}
