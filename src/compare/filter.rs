use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::error::{PgDriftError, Result};
use crate::schema::{SchemaObject, SchemaObjectKind};

/// Declarative object filter applied identically to both snapshot sides
/// before comparison.
///
/// Schema patterns use `*` as a wildcard (`pg_*`); `name_pattern` is a
/// regular expression matched against the unqualified object name. Empty
/// `included_schemas`/`included_kinds` mean "include everything".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ComparisonFilter {
    #[serde(default)]
    pub included_schemas: Vec<String>,
    #[serde(default)]
    pub excluded_schemas: Vec<String>,
    #[serde(default)]
    pub included_kinds: Vec<SchemaObjectKind>,
    #[serde(default)]
    pub name_pattern: Option<String>,
}

impl ComparisonFilter {
    /// Validate and compile the filter. Malformed patterns are rejected
    /// here, before any comparison begins.
    pub fn compile(&self) -> Result<CompiledFilter> {
        let included_schemas = self
            .included_schemas
            .iter()
            .map(|p| compile_schema_pattern(p))
            .collect::<Result<Vec<_>>>()?;
        let excluded_schemas = self
            .excluded_schemas
            .iter()
            .map(|p| compile_schema_pattern(p))
            .collect::<Result<Vec<_>>>()?;

        let name_pattern = match &self.name_pattern {
            Some(pattern) => Some(Regex::new(pattern).map_err(|source| {
                PgDriftError::InvalidFilterConfiguration {
                    message: format!("invalid object-name pattern '{}'", pattern),
                    source: Some(source),
                }
            })?),
            None => None,
        };

        let included_kinds = if self.included_kinds.is_empty() {
            None
        } else {
            Some(self.included_kinds.iter().copied().collect())
        };

        Ok(CompiledFilter {
            included_schemas,
            excluded_schemas,
            included_kinds,
            name_pattern,
        })
    }
}

/// Translate a `*`-wildcard schema pattern into an anchored regex
fn compile_schema_pattern(pattern: &str) -> Result<Regex> {
    if pattern.trim().is_empty() {
        return Err(PgDriftError::InvalidFilterConfiguration {
            message: "empty schema pattern".to_string(),
            source: None,
        });
    }
    let escaped = regex::escape(pattern).replace(r"\*", ".*");
    Regex::new(&format!("^{}$", escaped)).map_err(|source| {
        PgDriftError::InvalidFilterConfiguration {
            message: format!("invalid schema pattern '{}'", pattern),
            source: Some(source),
        }
    })
}

/// A validated filter ready to test objects against
pub struct CompiledFilter {
    included_schemas: Vec<Regex>,
    excluded_schemas: Vec<Regex>,
    included_kinds: Option<HashSet<SchemaObjectKind>>,
    name_pattern: Option<Regex>,
}

impl CompiledFilter {
    pub fn matches(&self, object: &SchemaObject) -> bool {
        let schema = object.schema_name();

        if !self.included_schemas.is_empty()
            && !self.included_schemas.iter().any(|r| r.is_match(schema))
        {
            return false;
        }
        if self.excluded_schemas.iter().any(|r| r.is_match(schema)) {
            return false;
        }
        if let Some(kinds) = &self.included_kinds {
            if !kinds.contains(&object.kind()) {
                return false;
            }
        }
        if let Some(pattern) = &self.name_pattern {
            if !pattern.is_match(object.object_name()) {
                return false;
            }
        }
        true
    }
}
