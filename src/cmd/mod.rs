mod diagram;
mod list;

use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use std::io;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "sql2gv")]
#[command(version)]
#[command(about = "Render database schemas as Graphviz diagrams", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate a Graphviz DOT document for selected tables
    Generate {
        /// Catalog snapshot (.json, .yaml or .yml)
        catalog: PathBuf,

        /// Database to read from the catalog
        #[arg(short, long)]
        database: Option<String>,

        /// Only tables in this schema
        #[arg(short, long)]
        schema: Option<String>,

        /// Only include tables matching these glob patterns (comma-separated, e.g. "dbo.Order*")
        #[arg(short, long)]
        tables: Option<String>,

        /// Exclude tables matching these glob patterns (comma-separated)
        #[arg(short = 'x', long)]
        exclude_tables: Option<String>,

        /// Render nodes as table names only, without columns
        #[arg(long)]
        simple: bool,

        /// Regex matched against column names (e.g. "Id$")
        #[arg(long)]
        exclude_pattern: Option<String>,

        /// Hide columns matching --exclude-pattern (key columns stay visible)
        #[arg(long)]
        hide_excluded: bool,

        /// Layout direction: lr (left-right) or tb (top-bottom)
        #[arg(long)]
        layout: Option<String>,

        /// YAML config file with generation and render settings
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Output .gv/.dot file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Print a JSON summary to stdout (requires --output)
        #[arg(long, requires = "output")]
        json: bool,

        /// Suppress status messages
        #[arg(short, long)]
        quiet: bool,
    },

    /// List the databases in a catalog snapshot
    Databases {
        /// Catalog snapshot (.json, .yaml or .yml)
        catalog: PathBuf,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// List the tables of a database in a catalog snapshot
    Tables {
        /// Catalog snapshot (.json, .yaml or .yml)
        catalog: PathBuf,

        /// Database to read from the catalog
        #[arg(short, long)]
        database: String,

        /// Only tables in this schema
        #[arg(short, long)]
        schema: Option<String>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Generate shell completion scripts
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

pub fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Commands::Generate {
            catalog,
            database,
            schema,
            tables,
            exclude_tables,
            simple,
            exclude_pattern,
            hide_excluded,
            layout,
            config,
            output,
            json,
            quiet,
        } => diagram::run(
            catalog,
            database,
            schema,
            tables,
            exclude_tables,
            simple,
            exclude_pattern,
            hide_excluded,
            layout,
            config,
            output,
            json,
            quiet,
        ),
        Commands::Databases { catalog, json } => list::databases(catalog, json),
        Commands::Tables {
            catalog,
            database,
            schema,
            json,
        } => list::tables(catalog, database, schema, json),
        Commands::Completions { shell } => {
            generate(shell, &mut Cli::command(), "sql2gv", &mut io::stdout());
            Ok(())
        }
    }
}
