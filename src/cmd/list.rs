//! Listing commands for browsing a catalog snapshot.

use crate::catalog::{SchemaCatalog, SnapshotCatalog};
use crate::graph::GenerationOptions;
use anyhow::Result;
use serde::Serialize;
use std::path::PathBuf;

#[derive(Debug, Serialize)]
struct TableEntry {
    id: String,
    columns: usize,
    primary_key: Vec<String>,
}

/// Run the databases command
pub fn databases(catalog: PathBuf, json: bool) -> Result<()> {
    let catalog = SnapshotCatalog::load(&catalog)?;
    let names = catalog.databases()?;

    if json {
        println!("{}", serde_json::to_string_pretty(&names)?);
    } else {
        for name in &names {
            println!("{}", name);
        }
    }
    Ok(())
}

/// Run the tables command
pub fn tables(catalog: PathBuf, database: String, schema: Option<String>, json: bool) -> Result<()> {
    let catalog = SnapshotCatalog::load(&catalog)?;
    let options = GenerationOptions::new(database, schema.as_deref(), None, false)?;
    let tables = catalog.tables(&options)?;

    if json {
        let entries: Vec<TableEntry> = tables
            .iter()
            .map(|t| TableEntry {
                id: t.id.to_string(),
                columns: t.columns.len(),
                primary_key: t.primary_key().map(|c| c.name.clone()).collect(),
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&entries)?);
    } else {
        for table in &tables {
            println!("{}", table.id);
        }
        eprintln!("\n{} tables in {}", tables.len(), options.database_name());
    }
    Ok(())
}
