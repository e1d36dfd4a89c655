#![allow(dead_code)]

use inspectdb_core::{
    driver::{ColumnInfo, Constraint, Constraints, FieldType, Relation, Relations, TableInfo},
    Capability, Connection, Driver, Error, Result,
};

use std::{borrow::Cow, cell::Cell, collections::HashMap};

/// An in-memory catalog standing in for a database.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    tables: Vec<TableInfo>,
    columns: HashMap<String, Vec<ColumnInfo>>,
    relations: HashMap<String, Relations>,
    constraints: HashMap<String, Constraints>,
    broken: HashMap<String, String>,
    relations_unsupported: bool,
    constraints_unsupported: bool,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn table(mut self, name: &str, columns: Vec<ColumnInfo>) -> Self {
        self.tables.push(TableInfo::table(name));
        self.columns.insert(name.to_string(), columns);
        self
    }

    pub fn view(mut self, name: &str, columns: Vec<ColumnInfo>) -> Self {
        self.tables.push(TableInfo::view(name));
        self.columns.insert(name.to_string(), columns);
        self
    }

    /// `table.column` references `target_table.target_column`.
    pub fn foreign_key(
        mut self,
        table: &str,
        column: &str,
        target_table: &str,
        target_column: &str,
    ) -> Self {
        self.relations
            .entry(table.to_string())
            .or_default()
            .insert(column.to_string(), Relation::new(target_column, target_table));
        self
    }

    pub fn constraint(mut self, table: &str, name: &str, constraint: Constraint) -> Self {
        self.constraints
            .entry(table.to_string())
            .or_default()
            .insert(name.to_string(), constraint);
        self
    }

    /// Declares `id` as the primary key of `table`.
    pub fn primary_key(self, table: &str) -> Self {
        self.constraint(table, &format!("{table}_pkey"), Constraint::primary_key(["id"]))
    }

    /// Every catalog query about `table` fails with `message`.
    pub fn broken(mut self, table: &str, message: &str) -> Self {
        self.broken.insert(table.to_string(), message.to_string());
        self
    }

    pub fn without_relations(mut self) -> Self {
        self.relations_unsupported = true;
        self
    }

    pub fn without_constraints(mut self) -> Self {
        self.constraints_unsupported = true;
        self
    }

    fn check(&self, table: &str) -> Result<()> {
        match self.broken.get(table) {
            Some(message) => Err(Error::driver(std::io::Error::other(message.clone()))),
            None => Ok(()),
        }
    }
}

#[derive(Debug)]
pub struct MockDriver {
    catalog: Catalog,
    capability: &'static Capability,
    connects: Cell<usize>,
}

impl MockDriver {
    pub fn new(catalog: Catalog) -> Self {
        Self {
            catalog,
            capability: &Capability::SQLITE,
            connects: Cell::new(0),
        }
    }

    pub fn capability(mut self, capability: &'static Capability) -> Self {
        self.capability = capability;
        self
    }

    pub fn connects(&self) -> usize {
        self.connects.get()
    }
}

impl Driver for MockDriver {
    fn url(&self) -> Cow<'_, str> {
        Cow::Borrowed("mock::memory:")
    }

    fn capability(&self) -> &'static Capability {
        self.capability
    }

    fn connect(&self) -> Result<Box<dyn Connection>> {
        self.connects.set(self.connects.get() + 1);
        Ok(Box::new(MockConnection {
            catalog: self.catalog.clone(),
        }))
    }
}

#[derive(Debug)]
struct MockConnection {
    catalog: Catalog,
}

impl Connection for MockConnection {
    fn table_list(&mut self) -> Result<Vec<TableInfo>> {
        Ok(self.catalog.tables.clone())
    }

    fn table_description(&mut self, table: &str) -> Result<Vec<ColumnInfo>> {
        self.catalog.check(table)?;
        self.catalog
            .columns
            .get(table)
            .cloned()
            .ok_or_else(|| Error::table_not_found(table))
    }

    fn relations(&mut self, table: &str) -> Result<Relations> {
        if self.catalog.relations_unsupported {
            return Err(Error::not_supported("relations"));
        }
        self.catalog.check(table)?;
        Ok(self.catalog.relations.get(table).cloned().unwrap_or_default())
    }

    fn constraints(&mut self, table: &str) -> Result<Constraints> {
        if self.catalog.constraints_unsupported {
            return Err(Error::not_supported("constraints"));
        }
        self.catalog.check(table)?;
        Ok(self.catalog.constraints.get(table).cloned().unwrap_or_default())
    }

    fn field_type(&self, column: &ColumnInfo) -> Result<FieldType> {
        let name = match column.data_type.as_str() {
            "serial" => "AutoField",
            "bigserial" => "BigAutoField",
            "integer" => "IntegerField",
            "varchar" => "CharField",
            "text" => "TextField",
            "numeric" => "DecimalField",
            "boolean" => "BooleanField",
            "date" => "DateField",
            "json" => {
                return Ok(FieldType::new("django.contrib.postgres.fields.JSONField")
                    .param("default", "dict"))
            }
            other => return Err(Error::unknown_field_type(other)),
        };
        Ok(FieldType::new(name))
    }
}

/// An auto-incrementing primary key named `id`.
pub fn id() -> ColumnInfo {
    ColumnInfo::new("id", "serial")
}

/// Runs a full pass and drops the seven header lines and the import.
pub fn models(driver: &MockDriver, options: &inspectdb::Options) -> Vec<String> {
    let lines = inspectdb::inspect(driver, options).unwrap();
    assert_eq!(lines[7], "from django.db import models");
    lines[8..].to_vec()
}
