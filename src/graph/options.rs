//! Generation options and the column-name exclusion filter.

use crate::error::{Error, Result};
use regex::Regex;

/// Options for a single generation request.
///
/// Built once per request and never mutated. The exclusion pattern is
/// compiled here, so a bad pattern fails before any generation starts and
/// [`is_excluded`] never has to.
#[derive(Debug, Clone)]
pub struct GenerationOptions {
    database_name: String,
    schema_filter: Option<String>,
    exclusion: Option<Regex>,
    treat_excluded_as_hidden: bool,
}

impl GenerationOptions {
    pub fn new(
        database_name: impl Into<String>,
        schema_filter: Option<&str>,
        name_exclusion_pattern: Option<&str>,
        treat_excluded_as_hidden: bool,
    ) -> Result<Self> {
        let exclusion = name_exclusion_pattern
            .map(|p| {
                Regex::new(p).map_err(|e| {
                    Error::configuration(format!("invalid exclusion pattern '{}': {}", p, e))
                })
            })
            .transpose()?;

        let schema_filter = schema_filter
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string);

        Ok(Self {
            database_name: database_name.into(),
            schema_filter,
            exclusion,
            treat_excluded_as_hidden,
        })
    }

    /// Options with no schema filter and no exclusion pattern
    pub fn for_database(database_name: impl Into<String>) -> Self {
        Self {
            database_name: database_name.into(),
            schema_filter: None,
            exclusion: None,
            treat_excluded_as_hidden: false,
        }
    }

    pub fn database_name(&self) -> &str {
        &self.database_name
    }

    pub fn schema_filter(&self) -> Option<&str> {
        self.schema_filter.as_deref()
    }

    pub fn name_exclusion_pattern(&self) -> Option<&str> {
        self.exclusion.as_ref().map(Regex::as_str)
    }

    pub fn treat_excluded_as_hidden(&self) -> bool {
        self.treat_excluded_as_hidden
    }

    /// Whether the exclusion pattern matches anywhere in the column name
    pub fn matches_exclusion(&self, column_name: &str) -> bool {
        self.exclusion
            .as_ref()
            .is_some_and(|re| re.is_match(column_name))
    }
}

/// Decide whether a column is hidden from detailed node rendering.
///
/// The pattern is matched unanchored (`Regex::is_match`), so `Id$` catches
/// `OrderId` and `^Id$` only catches `Id`. Matching columns are hidden only
/// when `treat_excluded_as_hidden` is set.
pub fn is_excluded(column_name: &str, options: &GenerationOptions) -> bool {
    options.treat_excluded_as_hidden && options.matches_exclusion(column_name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_pattern_fails_at_construction() {
        let err = GenerationOptions::new("Shop", None, Some("(unclosed"), true).unwrap_err();
        assert!(matches!(err, Error::Configuration(_)));
        assert!(err.to_string().contains("(unclosed"));
    }

    #[test]
    fn test_suffix_pattern_is_partial_match() {
        let options = GenerationOptions::new("Shop", None, Some("Id$"), true).unwrap();
        assert!(is_excluded("OrderId", &options));
        assert!(is_excluded("Id", &options));
        assert!(!is_excluded("Notes", &options));
        assert!(!is_excluded("IdNumber", &options));
    }

    #[test]
    fn test_not_hidden_unless_flag_set() {
        let options = GenerationOptions::new("Shop", None, Some("Id$"), false).unwrap();
        assert!(options.matches_exclusion("OrderId"));
        assert!(!is_excluded("OrderId", &options));
    }

    #[test]
    fn test_no_pattern_excludes_nothing() {
        let options = GenerationOptions::for_database("Shop");
        assert!(!is_excluded("OrderId", &options));
        assert_eq!(options.name_exclusion_pattern(), None);
    }

    #[test]
    fn test_blank_schema_filter_is_ignored() {
        let options = GenerationOptions::new("Shop", Some("  "), None, false).unwrap();
        assert_eq!(options.schema_filter(), None);

        let options = GenerationOptions::new("Shop", Some(" sales "), None, false).unwrap();
        assert_eq!(options.schema_filter(), Some("sales"));
    }
}
