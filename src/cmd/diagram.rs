//! Generate command implementation.

use crate::catalog::{SchemaCatalog, SnapshotCatalog};
use crate::config::Config;
use crate::graph::{DotGenerator, Layout};
use crate::schema::{ForeignKey, Identifier, Table};
use ahash::AHashSet;
use anyhow::{Context, Result};
use glob::{MatchOptions, Pattern};
use serde::Serialize;
use std::fs;
use std::path::PathBuf;

const MATCH_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: false,
    require_literal_separator: false,
    require_literal_leading_dot: false,
};

/// Summary printed with --json
#[derive(Debug, Serialize)]
struct Summary {
    database: String,
    output: String,
    tables: usize,
    columns: usize,
    relationships: usize,
    dangling_relationships: usize,
    simple_nodes: bool,
}

/// Run the generate command
#[allow(clippy::too_many_arguments)]
pub fn run(
    catalog: PathBuf,
    database: Option<String>,
    schema: Option<String>,
    tables: Option<String>,
    exclude_tables: Option<String>,
    simple: bool,
    exclude_pattern: Option<String>,
    hide_excluded: bool,
    layout: Option<String>,
    config: Option<PathBuf>,
    output: Option<PathBuf>,
    json: bool,
    quiet: bool,
) -> Result<()> {
    let mut config = match config {
        Some(ref path) => Config::load(path)
            .with_context(|| format!("Cannot load config: {}", path.display()))?,
        None => Config::default(),
    };

    // CLI flags override the config file
    if database.is_some() {
        config.generation.database = database;
    }
    if schema.is_some() {
        config.generation.schema = schema;
    }
    if exclude_pattern.is_some() {
        config.generation.exclude_pattern = exclude_pattern;
    }
    config.generation.hide_excluded |= hide_excluded;
    config.render.simple_nodes |= simple;
    if let Some(ref l) = layout {
        config.render.layout = l.parse::<Layout>().map_err(|e| anyhow::anyhow!("{}", e))?;
    }

    let options = config.generation_options()?;
    let include = parse_patterns(tables.as_deref())?;
    let exclude = parse_patterns(exclude_tables.as_deref())?;

    let catalog = SnapshotCatalog::load(&catalog)?;
    let database = options.database_name().to_string();

    if !quiet {
        eprintln!("Generating graph: {}", database);
    }

    let available = catalog.tables(&options)?;
    let selected = select_tables(available, &include, &exclude);
    if selected.is_empty() && !quiet {
        eprintln!("No tables selected; writing an empty graph.");
    }

    // Foreign keys are gathered per selected table, in selection order
    let mut foreign_keys: Vec<ForeignKey> = Vec::new();
    for table in &selected {
        foreign_keys.extend(catalog.foreign_keys(&database, &table.id)?);
    }

    let graph_name = config
        .render
        .graph_name
        .clone()
        .unwrap_or_else(|| database.clone());
    let simple_nodes = config.render.simple_nodes;
    let generator = DotGenerator::new(options)
        .with_layout(config.render.layout)
        .with_graph_name(graph_name);

    let dot = generator.generate(simple_nodes, &selected, &foreign_keys)?;

    match output {
        Some(ref path) => {
            fs::write(path, &dot)
                .with_context(|| format!("Cannot write output file: {}", path.display()))?;
            if !quiet {
                eprintln!("Graph written to: {}", path.display());
            }
        }
        None => print!("{}", dot),
    }

    let selected_ids: AHashSet<&Identifier> = selected.iter().map(|t| &t.id).collect();
    let summary = Summary {
        database,
        output: output
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "-".to_string()),
        tables: selected.len(),
        columns: selected.iter().map(|t| t.columns.len()).sum(),
        relationships: foreign_keys.len(),
        dangling_relationships: foreign_keys
            .iter()
            .filter(|fk| !selected_ids.contains(&fk.target_table))
            .count(),
        simple_nodes,
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else if !quiet {
        eprintln!(
            "\nGraph: {} tables, {} columns, {} relationships ({} to unselected tables)",
            summary.tables, summary.columns, summary.relationships, summary.dangling_relationships
        );
    }

    Ok(())
}

/// Parse a comma-separated list of glob patterns
fn parse_patterns(list: Option<&str>) -> Result<Vec<Pattern>> {
    list.map(|l| {
        l.split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|p| {
                Pattern::new(p).map_err(|e| anyhow::anyhow!("Invalid table pattern '{}': {}", p, e))
            })
            .collect::<Result<Vec<_>>>()
    })
    .unwrap_or_else(|| Ok(Vec::new()))
}

/// Keep tables matching any include pattern (all if none) and no exclude
/// pattern, in catalog order
fn select_tables(tables: Vec<Table>, include: &[Pattern], exclude: &[Pattern]) -> Vec<Table> {
    let matches = |patterns: &[Pattern], table: &Table| {
        let name = table.id.to_string();
        patterns.iter().any(|p| p.matches_with(&name, MATCH_OPTIONS))
    };

    tables
        .into_iter()
        .filter(|t| include.is_empty() || matches(include, t))
        .filter(|t| !matches(exclude, t))
        .collect()
}
