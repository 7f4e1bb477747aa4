//! Graphviz DOT output for schema diagrams.

use crate::error::{Error, Result};
use crate::graph::options::{is_excluded, GenerationOptions};
use crate::graph::Layout;
use crate::schema::{Column, ForeignKey, Identifier, Table};
use ahash::{AHashMap, AHashSet};

const DEFAULT_GRAPH_NAME: &str = "schema";

/// Renders tables and foreign keys as a Graphviz `digraph`.
///
/// Output is a pure function of the inputs: nodes follow the table order,
/// edges follow the foreign key order, and nothing is sorted or merged.
#[derive(Debug, Clone)]
pub struct DotGenerator {
    options: GenerationOptions,
    layout: Layout,
    graph_name: String,
}

impl Default for DotGenerator {
    fn default() -> Self {
        Self::new(GenerationOptions::for_database(""))
    }
}

/// Generate a DOT document with default options (no columns hidden)
pub fn generate(
    render_simple_nodes: bool,
    tables: &[Table],
    foreign_keys: &[ForeignKey],
) -> Result<String> {
    DotGenerator::default().generate(render_simple_nodes, tables, foreign_keys)
}

impl DotGenerator {
    pub fn new(options: GenerationOptions) -> Self {
        Self {
            options,
            layout: Layout::default(),
            graph_name: DEFAULT_GRAPH_NAME.to_string(),
        }
    }

    pub fn with_layout(mut self, layout: Layout) -> Self {
        self.layout = layout;
        self
    }

    pub fn with_graph_name(mut self, name: impl Into<String>) -> Self {
        self.graph_name = name.into();
        self
    }

    /// Render the tables as nodes and the foreign keys as edges.
    ///
    /// Foreign keys may reference tables outside `tables`; such edges point
    /// at a node named by the target identifier. Fails with
    /// [`Error::Validation`] on duplicate table identifiers or unnamed
    /// columns, in which case no output is produced.
    pub fn generate(
        &self,
        render_simple_nodes: bool,
        tables: &[Table],
        foreign_keys: &[ForeignKey],
    ) -> Result<String> {
        validate_tables(tables)?;

        let keys = KeyColumns::new(foreign_keys);
        let batch: AHashMap<&Identifier, &Table> = tables.iter().map(|t| (&t.id, t)).collect();
        let mut output = String::new();

        // Header
        output.push_str(&format!("digraph {} {{\n", quote_id(&self.graph_name)));
        output.push_str("  graph [pad=\"0.5\", nodesep=\"1\", ranksep=\"1.5\"];\n");
        output.push_str(&format!("  rankdir={};\n", self.layout.rankdir()));
        if render_simple_nodes {
            output.push_str("  node [shape=box, style=rounded];\n");
        } else {
            output.push_str("  node [shape=none, margin=0];\n");
        }
        output.push_str("  edge [arrowtail=crow, arrowhead=tee, dir=both];\n");

        if !tables.is_empty() {
            output.push('\n');
        }

        for table in tables {
            let id = quote_id(&table.id.to_string());
            if render_simple_nodes {
                output.push_str(&format!("  {} [label={}];\n", id, id));
                continue;
            }

            let rows: Vec<(usize, &Column, bool)> = table
                .columns
                .iter()
                .enumerate()
                .filter(|(_, col)| {
                    col.is_primary_key
                        || keys.contains(&table.id, &col.name)
                        || !is_excluded(&col.name, &self.options)
                })
                .map(|(pos, col)| (pos, col, keys.is_referencing(&table.id, &col.name)))
                .collect();

            output.push_str(&format!("  {} [label=<{}>];\n", id, table_label(table, &rows)));
        }

        if !foreign_keys.is_empty() {
            output.push('\n');
        }

        // Endpoints in the batch use the table's own spelling so the edge
        // attaches to its node. FK endpoint rows are never hidden, so any
        // column found in a batch table has a port.
        let endpoint = |table: &Identifier, column: &str| match batch.get(table) {
            Some(t) => {
                let node = quote_id(&t.id.to_string());
                match t.column_position(column) {
                    Some(pos) if !render_simple_nodes => format!("{}:c{}", node, pos),
                    _ => node,
                }
            }
            None => quote_id(&table.to_string()),
        };

        for fk in foreign_keys {
            output.push_str(&format!(
                "  {} -> {}",
                endpoint(&fk.source_table, &fk.source_column),
                endpoint(&fk.target_table, &fk.target_column)
            ));
            match fk.name.as_deref().filter(|n| !n.is_empty()) {
                Some(name) => {
                    output.push_str(&format!(" [label={}];\n", quote_id(name)));
                }
                None => output.push_str(";\n"),
            }
        }

        output.push_str("}\n");
        Ok(output)
    }
}

fn validate_tables(tables: &[Table]) -> Result<()> {
    let mut seen: AHashSet<&Identifier> = AHashSet::with_capacity(tables.len());
    for table in tables {
        if !seen.insert(&table.id) {
            return Err(Error::validation(format!(
                "duplicate table identifier '{}'",
                table.id
            )));
        }
        table.validate()?;
    }
    Ok(())
}

/// Table/column pairs taking part in a foreign key of the batch
struct KeyColumns<'a> {
    referencing: AHashSet<(&'a Identifier, String)>,
    referenced: AHashSet<(&'a Identifier, String)>,
}

impl<'a> KeyColumns<'a> {
    fn new(foreign_keys: &'a [ForeignKey]) -> Self {
        let mut referencing = AHashSet::with_capacity(foreign_keys.len());
        let mut referenced = AHashSet::with_capacity(foreign_keys.len());
        for fk in foreign_keys {
            referencing.insert((&fk.source_table, fk.source_column.to_lowercase()));
            referenced.insert((&fk.target_table, fk.target_column.to_lowercase()));
        }
        Self {
            referencing,
            referenced,
        }
    }

    fn is_referencing(&self, table: &'a Identifier, column: &str) -> bool {
        self.referencing.contains(&(table, column.to_lowercase()))
    }

    fn contains(&self, table: &'a Identifier, column: &str) -> bool {
        let key = (table, column.to_lowercase());
        self.referencing.contains(&key) || self.referenced.contains(&key)
    }
}

/// Generate HTML-like table label for a detailed node
fn table_label(table: &Table, rows: &[(usize, &Column, bool)]) -> String {
    let mut html = String::new();

    html.push_str("<TABLE BORDER=\"0\" CELLBORDER=\"1\" CELLSPACING=\"0\" CELLPADDING=\"4\">");
    html.push_str(&format!(
        "<TR><TD BGCOLOR=\"#4a5568\"><FONT COLOR=\"white\"><B>{}</B></FONT></TD></TR>",
        escape_html(&table.id.to_string())
    ));

    for (pos, col, is_fk) in rows {
        let text = format!("{}:{}", escape_html(&col.name), escape_html(&col.sql_type));
        let cell = if col.is_primary_key {
            format!("🔑 <B>{}</B>", text)
        } else if *is_fk {
            format!("🔗 {}", text)
        } else {
            text
        };

        let null_marker = if col.nullable && !col.is_primary_key {
            " <FONT COLOR=\"#888888\">NULL</FONT>"
        } else {
            ""
        };

        html.push_str(&format!(
            "<TR><TD ALIGN=\"LEFT\" PORT=\"c{}\">{}{}</TD></TR>",
            pos, cell, null_marker
        ));
    }

    html.push_str("</TABLE>");
    html
}

/// Escape a string for use in DOT HTML labels
fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            // XML 1.0 has no character references for C0 controls other
            // than tab, newline and carriage return
            '\t' | '\n' | '\r' => out.push_str(&format!("&#{};", c as u32)),
            '\u{0}'..='\u{1f}' => out.push(char::REPLACEMENT_CHARACTER),
            c if c.is_control() => {
                out.push_str(&format!("&#{};", c as u32));
            }
            c => out.push(c),
        }
    }
    out
}

/// Quote a string as a DOT ID.
///
/// Qualified names always contain `.`, so IDs are quoted unconditionally.
/// Control characters other than newline and carriage return are written as
/// `\uXXXX`, so distinct names never collapse into one node.
fn quote_id(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            c if c.is_control() => out.push_str(&format!("\\u{:04X}", c as u32)),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}
