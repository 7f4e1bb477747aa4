//! Schema catalog sources.
//!
//! A catalog supplies the tables and foreign keys of a database. The
//! generator only depends on the shape of that data, so any source that can
//! produce [`Table`] and [`ForeignKey`] values can implement
//! [`SchemaCatalog`].

mod snapshot;

pub use snapshot::{DatabaseSnapshot, SnapshotCatalog, SnapshotFormat};

use crate::error::Result;
use crate::graph::GenerationOptions;
use crate::schema::{ForeignKey, Identifier, Table};

/// Source of schema metadata
pub trait SchemaCatalog {
    /// Names of the databases this catalog knows about
    fn databases(&self) -> Result<Vec<String>>;

    /// Tables of `options.database_name()`, restricted to the schema filter
    /// if one is set, in catalog order
    fn tables(&self, options: &GenerationOptions) -> Result<Vec<Table>>;

    /// Foreign keys declared on `table` (as the source side), in catalog order
    fn foreign_keys(&self, database: &str, table: &Identifier) -> Result<Vec<ForeignKey>>;
}
