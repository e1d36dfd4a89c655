use inspectdb_core::{
    driver::{ColumnInfo, FieldType},
    Error, Result,
};

/// Maps a PostgreSQL type name, as found in `pg_type.typname`, to a field
/// type.
pub(crate) fn field_type(column: &ColumnInfo) -> Result<FieldType> {
    let name = match column.data_type.as_str() {
        "int4" if column.auto_increment => "AutoField",
        "int8" if column.auto_increment => "BigAutoField",
        "bool" => "BooleanField",
        "bytea" => "BinaryField",
        "int2" => "SmallIntegerField",
        "int4" => "IntegerField",
        "int8" => "BigIntegerField",
        "text" => "TextField",
        "float4" | "float8" => "FloatField",
        "inet" => "GenericIPAddressField",
        "bpchar" | "varchar" => "CharField",
        "date" => "DateField",
        "time" | "timetz" => "TimeField",
        "timestamp" | "timestamptz" => "DateTimeField",
        "interval" => "DurationField",
        "numeric" => "DecimalField",
        "uuid" => "UUIDField",
        "json" | "jsonb" => "JSONField",
        other => return Err(Error::unknown_field_type(other)),
    };

    Ok(FieldType::new(name))
}
