//! Schema-qualified identifiers with SQL Server comparison semantics.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

/// Separator between the schema and object name in the canonical form
pub const SEPARATOR: char = '.';

/// A schema-qualified object name such as `dbo.Orders`.
///
/// Equality, hashing and ordering ignore case, matching the default
/// collation of SQL Server identifiers. The spelling as given is kept for
/// display.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Identifier {
    schema: String,
    name: String,
}

impl Identifier {
    /// Build an identifier from its two parts.
    ///
    /// Each part is trimmed and may be wrapped in one pair of `[...]` or
    /// `"..."` delimiters. Empty parts and parts containing the `.`
    /// separator are rejected.
    pub fn new(schema: &str, name: &str) -> Result<Self> {
        let schema = normalize_part(schema)
            .ok_or_else(|| invalid(schema, name, "schema name is empty"))?;
        let name =
            normalize_part(name).ok_or_else(|| invalid(&schema, name, "object name is empty"))?;

        if schema.contains(SEPARATOR) || name.contains(SEPARATOR) {
            return Err(invalid(&schema, &name, "embedded separator"));
        }

        Ok(Self { schema, name })
    }

    pub fn schema(&self) -> &str {
        &self.schema
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Case-insensitive comparison of the schema part only
    pub fn in_schema(&self, schema: &str) -> bool {
        self.schema.to_lowercase() == schema.trim().to_lowercase()
    }

    fn sort_key(&self) -> (String, String) {
        (self.schema.to_lowercase(), self.name.to_lowercase())
    }
}

fn normalize_part(part: &str) -> Option<String> {
    let trimmed = part.trim();
    let unwrapped = trimmed
        .strip_prefix('[')
        .and_then(|s| s.strip_suffix(']'))
        .or_else(|| trimmed.strip_prefix('"').and_then(|s| s.strip_suffix('"')))
        .unwrap_or(trimmed)
        .trim();

    if unwrapped.is_empty() {
        None
    } else {
        Some(unwrapped.to_string())
    }
}

fn invalid(schema: &str, name: &str, reason: &str) -> Error {
    Error::validation(format!(
        "malformed identifier '{}{}{}': {}",
        schema, SEPARATOR, name, reason
    ))
}

impl PartialEq for Identifier {
    fn eq(&self, other: &Self) -> bool {
        self.sort_key() == other.sort_key()
    }
}

impl Eq for Identifier {}

impl Hash for Identifier {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.sort_key().hash(state);
    }
}

impl PartialOrd for Identifier {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Identifier {
    fn cmp(&self, other: &Self) -> Ordering {
        self.sort_key().cmp(&other.sort_key())
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.schema, SEPARATOR, self.name)
    }
}

impl FromStr for Identifier {
    type Err = Error;

    /// Parse `schema.name`, optionally bracketed as `[schema].[name]`
    fn from_str(s: &str) -> Result<Self> {
        let mut parts = s.split(SEPARATOR);
        match (parts.next(), parts.next(), parts.next()) {
            (Some(schema), Some(name), None) => Identifier::new(schema, name),
            _ => Err(Error::validation(format!(
                "malformed identifier '{}': expected schema{}name",
                s, SEPARATOR
            ))),
        }
    }
}

impl TryFrom<String> for Identifier {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<Identifier> for String {
    fn from(id: Identifier) -> Self {
        id.to_string()
    }
}
