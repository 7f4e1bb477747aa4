//! Schema model for diagram generation.
//!
//! This module provides:
//! - Schema-qualified identifiers with case-insensitive semantics
//! - Tables with their columns in catalog-ordinal order
//! - Foreign key relationships between tables

mod identifier;

pub use identifier::{Identifier, SEPARATOR};

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// Column definition within a table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    /// Column name
    pub name: String,
    /// Declared SQL type, e.g. `nvarchar(50)`
    #[serde(rename = "type")]
    pub sql_type: String,
    /// Whether this column allows NULL values
    #[serde(default)]
    pub nullable: bool,
    /// Whether this column is part of the primary key
    #[serde(default, rename = "primary_key")]
    pub is_primary_key: bool,
}

impl Column {
    pub fn new(name: impl Into<String>, sql_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            sql_type: sql_type.into(),
            nullable: false,
            is_primary_key: false,
        }
    }

    /// Mark this column as part of the primary key
    pub fn primary_key(mut self) -> Self {
        self.is_primary_key = true;
        self
    }

    /// Mark this column as nullable
    pub fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }
}

/// A table and its columns
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Table {
    pub id: Identifier,
    /// Columns in catalog-ordinal order
    #[serde(default)]
    pub columns: Vec<Column>,
}

impl Table {
    pub fn new(id: Identifier, columns: Vec<Column>) -> Self {
        Self { id, columns }
    }

    /// Position of a column in catalog order (case-insensitive)
    pub fn column_position(&self, name: &str) -> Option<usize> {
        let name = name.to_lowercase();
        self.columns
            .iter()
            .position(|c| c.name.to_lowercase() == name)
    }

    /// Primary key columns in catalog order
    pub fn primary_key(&self) -> impl Iterator<Item = &Column> {
        self.columns.iter().filter(|c| c.is_primary_key)
    }

    /// Check structural consistency: every column must be named
    pub fn validate(&self) -> Result<()> {
        for (i, col) in self.columns.iter().enumerate() {
            if col.name.trim().is_empty() {
                return Err(Error::validation(format!(
                    "column {} of table '{}' has no name",
                    i + 1,
                    self.id
                )));
            }
        }
        Ok(())
    }
}

/// Foreign key relationship from a child column to a referenced column
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForeignKey {
    /// Constraint name, if known
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Table holding the FK column
    pub source_table: Identifier,
    /// FK column in the source table
    pub source_column: String,
    /// Referenced table
    pub target_table: Identifier,
    /// Referenced column, usually the PK
    pub target_column: String,
}

impl ForeignKey {
    pub fn new(
        source_table: Identifier,
        source_column: impl Into<String>,
        target_table: Identifier,
        target_column: impl Into<String>,
    ) -> Self {
        Self {
            name: None,
            source_table,
            source_column: source_column.into(),
            target_table,
            target_column: target_column.into(),
        }
    }

    /// Attach a constraint name
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}
