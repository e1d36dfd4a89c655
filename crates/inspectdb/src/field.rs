use crate::repr::Repr;

use inspectdb_core::{
    driver::{ColumnInfo, FieldType},
    Connection, Result, Value,
};

use indexmap::IndexMap;
use std::fmt;

/// Used when the backend cannot map a column's type.
const FALLBACK_FIELD_TYPE: &str = "TextField";

/// Substituted for decimal precision the catalog does not report.
const GUESSED_MAX_DIGITS: u32 = 10;
const GUESSED_DECIMAL_PLACES: u32 = 5;

/// One field declaration of a generated model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    pub name: String,

    /// The field class. Names without a `.` are looked up in `models`.
    pub ty: String,

    /// Positional arguments, already rendered.
    pub args: Vec<String>,

    /// Keyword arguments, rendered in insertion order.
    pub params: IndexMap<String, Value>,

    /// Caveats, rendered as a trailing comment.
    pub notes: Vec<String>,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let module = if self.ty.contains('.') { "" } else { "models." };
        write!(f, "{} = {}{}(", self.name, module, self.ty)?;

        let args = self.args.iter().cloned();
        let params = self
            .params
            .iter()
            .map(|(key, value)| format!("{key}={}", Repr(value)));

        for (i, arg) in args.chain(params).enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            f.write_str(&arg)?;
        }
        f.write_str(")")?;

        if !self.notes.is_empty() {
            write!(f, "  # {}", self.notes.join(" "))?;
        }

        Ok(())
    }
}

/// A column type translated into a field type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MappedType {
    pub name: String,
    pub params: IndexMap<String, Value>,
    pub notes: Vec<String>,
}

/// Maps `column` of `table` to a field type using the backend's lookup,
/// filling in the size parameters the field type needs.
pub fn map_field_type(
    connection: &dyn Connection,
    table: &str,
    column: &ColumnInfo,
) -> Result<MappedType> {
    let mut notes = vec![];

    let FieldType { name, mut params } = match connection.field_type(column) {
        Ok(field_type) => field_type,
        Err(err) if err.is_unknown_field_type() => {
            log::debug!(
                "guessing {FALLBACK_FIELD_TYPE} for `{table}`.`{}`: {err}",
                column.name
            );
            notes.push("This field type is a guess.".to_string());
            FieldType::new(FALLBACK_FIELD_TYPE)
        }
        Err(err) => return Err(err),
    };

    match name.as_str() {
        "CharField" => {
            if let Some(size) = column.internal_size.filter(|size| *size > 0) {
                params.insert("max_length".to_string(), Value::from(size));
            }
        }
        "DecimalField" => {
            if column.precision.is_none() || column.scale.is_none() {
                notes.push(
                    "max_digits and decimal_places have been guessed, as this database \
                     handles decimal fields as float"
                        .to_string(),
                );
            }
            let max_digits = column.precision.unwrap_or(GUESSED_MAX_DIGITS);
            let decimal_places = column.scale.unwrap_or(GUESSED_DECIMAL_PLACES);
            params.insert("max_digits".to_string(), Value::from(max_digits));
            params.insert("decimal_places".to_string(), Value::from(decimal_places));
        }
        _ => {}
    }

    Ok(MappedType {
        name,
        params,
        notes,
    })
}
