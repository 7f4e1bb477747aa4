//! File-backed catalog loaded from a JSON or YAML snapshot.
//!
//! A snapshot holds one or more databases:
//!
//! ```yaml
//! databases:
//!   - name: Shop
//!     tables:
//!       - id: dbo.Orders
//!         columns:
//!           - { name: OrderId, type: int, primary_key: true }
//!           - { name: CustomerId, type: int }
//!     foreign_keys:
//!       - name: FK_Orders_Customers
//!         source_table: dbo.Orders
//!         source_column: CustomerId
//!         target_table: dbo.Customers
//!         target_column: Id
//! ```

use crate::catalog::SchemaCatalog;
use crate::error::{Error, Result};
use crate::graph::GenerationOptions;
use crate::schema::{ForeignKey, Identifier, Table};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Serialization format of a snapshot file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapshotFormat {
    Json,
    Yaml,
}

impl SnapshotFormat {
    /// Detect format from file extension
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "json" => Some(SnapshotFormat::Json),
            "yaml" | "yml" => Some(SnapshotFormat::Yaml),
            _ => None,
        }
    }

    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|e| e.to_str())
            .and_then(Self::from_extension)
    }
}

/// Tables and foreign keys of one database
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DatabaseSnapshot {
    pub name: String,
    #[serde(default)]
    pub tables: Vec<Table>,
    #[serde(default)]
    pub foreign_keys: Vec<ForeignKey>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SnapshotCatalog {
    #[serde(default)]
    pub databases: Vec<DatabaseSnapshot>,
}

impl SnapshotCatalog {
    pub fn new(databases: Vec<DatabaseSnapshot>) -> Self {
        Self { databases }
    }

    /// Load a snapshot, picking the format from the file extension
    pub fn load(path: &Path) -> Result<Self> {
        let format = SnapshotFormat::from_path(path).ok_or_else(|| {
            Error::Catalog(format!(
                "cannot detect format of {}, use a .json, .yaml or .yml file",
                path.display()
            ))
        })?;
        let content = fs::read_to_string(path)
            .map_err(|e| Error::Catalog(format!("cannot read {}: {}", path.display(), e)))?;
        Self::parse(&content, format).map_err(|e| match e {
            Error::Catalog(msg) => Error::Catalog(format!("{}: {}", path.display(), msg)),
            other => other,
        })
    }

    pub fn parse(content: &str, format: SnapshotFormat) -> Result<Self> {
        match format {
            SnapshotFormat::Json => serde_json::from_str(content).map_err(|e| e.to_string()),
            SnapshotFormat::Yaml => serde_yaml_ng::from_str(content).map_err(|e| e.to_string()),
        }
        .map_err(Error::Catalog)
    }

    /// Look up a database by name (case-insensitive)
    pub fn database(&self, name: &str) -> Result<&DatabaseSnapshot> {
        let lower = name.to_lowercase();
        self.databases
            .iter()
            .find(|db| db.name.to_lowercase() == lower)
            .ok_or_else(|| Error::UnknownDatabase(name.to_string()))
    }
}

impl SchemaCatalog for SnapshotCatalog {
    fn databases(&self) -> Result<Vec<String>> {
        Ok(self.databases.iter().map(|db| db.name.clone()).collect())
    }

    fn tables(&self, options: &GenerationOptions) -> Result<Vec<Table>> {
        let db = self.database(options.database_name())?;
        Ok(db
            .tables
            .iter()
            .filter(|t| options.schema_filter().map_or(true, |s| t.id.in_schema(s)))
            .cloned()
            .collect())
    }

    fn foreign_keys(&self, database: &str, table: &Identifier) -> Result<Vec<ForeignKey>> {
        let db = self.database(database)?;
        Ok(db
            .foreign_keys
            .iter()
            .filter(|fk| fk.source_table == *table)
            .cloned()
            .collect())
    }
}
