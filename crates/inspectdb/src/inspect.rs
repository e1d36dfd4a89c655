use crate::{
    field::{map_field_type, Field},
    meta::meta_lines,
    model_name::table_to_model,
    normalize::normalize_column_name,
    repr::str_literal,
    Options,
};

use inspectdb_core::{
    driver::{ColumnInfo, Constraints, Relations},
    Capability, Connection, Driver, Result, Value,
};

use std::collections::{HashMap, HashSet};

const HEADER: &[&str] = &[
    "# This is an auto-generated Django model module.",
    "# You'll have to do the following manually to clean this up:",
    "#   * Rearrange models' order",
    "#   * Make sure each model has one field with primary_key=True",
    "#   * Make sure each ForeignKey has `on_delete` set to the desired behavior.",
    "#   * Remove `managed = False` lines if you wish to allow Django to create, modify, and delete the table",
    "# Feel free to rename the models, but don't rename db_table values or field names.",
];

/// Field an undeclared primary key is assumed to be.
const IMPLICIT_PK_NAME: &str = "id";
const IMPLICIT_PK_TYPE: &str = "AutoField";

/// Generates a model module for the database behind `driver`.
///
/// A single connection is opened for the pass and closed when it ends. A
/// table whose catalog data cannot be read is replaced by a comment naming
/// the error; any other failure aborts the pass.
pub fn inspect(driver: &dyn Driver, options: &Options) -> Result<Vec<String>> {
    log::debug!("opening connection for introspection pass");

    let mut connection = driver.connect()?;
    Inspect::new(driver.capability(), options).run(connection.as_mut())
}

/// State of one generation pass.
struct Inspect<'a> {
    capability: &'static Capability,
    options: &'a Options,

    /// Models emitted so far. References to these need no quoting.
    known_models: HashSet<String>,

    lines: Vec<String>,
}

/// Catalog data of one table, gathered before any line is emitted.
struct TableMetadata {
    relations: Relations,
    constraints: Constraints,
    primary_key_column: Option<String>,
    unique_columns: HashSet<String>,
    description: Vec<ColumnInfo>,
}

impl<'a> Inspect<'a> {
    fn new(capability: &'static Capability, options: &'a Options) -> Self {
        Self {
            capability,
            options,
            known_models: HashSet::new(),
            lines: vec![],
        }
    }

    fn run(mut self, connection: &mut dyn Connection) -> Result<Vec<String>> {
        self.lines.extend(HEADER.iter().map(|line| line.to_string()));
        self.lines
            .push(format!("from {} import models", self.options.db_module));

        let table_info = connection.table_list()?;

        let tables = if self.options.tables.is_empty() {
            let mut tables: Vec<String> = table_info
                .iter()
                .filter(|info| self.options.include_views || !info.is_view())
                .map(|info| info.name.clone())
                .collect();
            tables.sort();
            tables
        } else {
            self.options.tables.clone()
        };

        for table in &tables {
            if !self.options.accepts(table) {
                log::debug!("skipping `{table}`: rejected by table name filter");
                continue;
            }

            let metadata = match table_metadata(connection, table) {
                Ok(metadata) => metadata,
                Err(err) => {
                    log::warn!("unable to inspect table `{table}`: {err}");
                    self.lines.push(format!("# Unable to inspect table '{table}'"));
                    self.lines.push(format!("# The error was: {err}"));
                    continue;
                }
            };

            let is_view = table_info
                .iter()
                .any(|info| &info.name == table && info.is_view());

            self.model(connection, table, &metadata, is_view)?;
        }

        Ok(self.lines)
    }

    fn model(
        &mut self,
        connection: &mut dyn Connection,
        table: &str,
        metadata: &TableMetadata,
        is_view: bool,
    ) -> Result<()> {
        let model = table_to_model(table);
        log::debug!("generating model `{model}` for `{table}`");

        self.lines.push(String::new());
        self.lines.push(String::new());
        self.lines.push(format!("class {model}(models.Model):"));
        self.known_models.insert(model);

        let mut used_names = HashSet::new();
        let mut column_to_field_name = HashMap::new();

        for column in &metadata.description {
            let relation = metadata.relations.get(&column.name);

            let normalized = normalize_column_name(&column.name, &used_names, relation.is_some());
            used_names.insert(normalized.name.clone());
            column_to_field_name.insert(column.name.clone(), normalized.name.clone());

            let mut field = Field {
                name: normalized.name,
                ty: String::new(),
                args: vec![],
                params: normalized.params,
                notes: normalized.notes,
            };

            if metadata.primary_key_column.as_ref() == Some(&column.name) {
                field.params.insert("primary_key".to_string(), Value::Bool(true));
            } else if metadata.unique_columns.contains(&column.name) {
                field.params.insert("unique".to_string(), Value::Bool(true));
            }

            if let Some(relation) = relation {
                let target = if relation.table == table {
                    "self".to_string()
                } else {
                    table_to_model(&relation.table)
                };

                field.ty = "ForeignKey".to_string();
                field.args.push(if self.known_models.contains(&target) {
                    target
                } else {
                    str_literal(&target)
                });
                // The intended cascade behavior is not recorded in the catalog.
                field.args.push("models.DO_NOTHING".to_string());
            } else {
                let mapped = map_field_type(&*connection, table, column)?;
                field.ty = mapped.name;
                field.params.extend(mapped.params);
                field.notes.extend(mapped.notes);
            }

            if field.name == IMPLICIT_PK_NAME && is_bare_primary_key(&field) {
                if field.ty == IMPLICIT_PK_TYPE {
                    continue;
                }
                if field.ty == "IntegerField" && !self.capability.can_introspect_autofield {
                    field.notes.push("AutoField?".to_string());
                }
            }

            if column.nullable {
                field.params.insert("blank".to_string(), Value::Bool(true));
                field.params.insert("null".to_string(), Value::Bool(true));
            }

            self.lines.push(format!("    {field}"));
        }

        self.lines.extend(meta_lines(
            table,
            &metadata.constraints,
            &column_to_field_name,
            is_view,
        ));

        Ok(())
    }
}

fn is_bare_primary_key(field: &Field) -> bool {
    field.params.len() == 1 && field.params.get("primary_key") == Some(&Value::Bool(true))
}

fn table_metadata(connection: &mut dyn Connection, table: &str) -> Result<TableMetadata> {
    let relations = empty_if_not_supported(connection.relations(table))?;
    let constraints = empty_if_not_supported(connection.constraints(table))?;
    let primary_key_column = empty_if_not_supported(connection.primary_key_column(table))?;

    let unique_columns = constraints
        .values()
        .filter(|constraint| constraint.unique && constraint.columns.len() == 1)
        .filter_map(|constraint| constraint.columns[0].clone())
        .collect();

    let description = connection.table_description(table)?;

    Ok(TableMetadata {
        relations,
        constraints,
        primary_key_column,
        unique_columns,
        description,
    })
}

/// A backend that cannot answer a catalog query is treated as having nothing
/// to report.
fn empty_if_not_supported<T: Default>(result: Result<T>) -> Result<T> {
    match result {
        Err(err) if err.is_not_supported() => Ok(T::default()),
        result => result,
    }
}
