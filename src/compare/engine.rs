use chrono::Utc;
use std::collections::HashMap;
use tracing::{debug, info};

use crate::compare::attribute::AttributeDifference;
use crate::compare::comparator::ComparatorRegistry;
use crate::compare::filter::ComparisonFilter;
use crate::compare::normalize::definition_fingerprint;
use crate::compare::result::{ComparisonResult, ModifiedObject, ObjectRef};
use crate::error::{PgDriftError, Result};
use crate::schema::{ObjectIdentity, SchemaObject};

/// Identifies the instance/schema pair a comparison run is about
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComparisonTarget {
    pub source_instance: String,
    pub destination_instance: String,
    pub source_schema: String,
    pub destination_schema: String,
}

/// Orchestrates per-kind comparators across two snapshots.
///
/// The engine performs no I/O: both snapshots are pre-materialized, and
/// each invocation is a pure function of its inputs plus filter
/// configuration. Instances can be shared freely across concurrent runs.
pub struct ComparisonEngine {
    registry: ComparatorRegistry,
}

impl ComparisonEngine {
    pub fn new() -> Self {
        Self {
            registry: ComparatorRegistry::with_defaults(),
        }
    }

    pub fn with_registry(registry: ComparatorRegistry) -> Self {
        Self { registry }
    }

    /// Compare two snapshots and produce a categorized diff.
    ///
    /// An empty side is a valid input: it yields "everything missing" or
    /// "everything extra" rather than an error. A duplicate identity key on
    /// either side fails the run, since it signals a snapshot-collection
    /// defect rather than a legitimate diff outcome.
    pub fn compare(
        &self,
        target: &ComparisonTarget,
        source: &[SchemaObject],
        destination: &[SchemaObject],
        filter: Option<&ComparisonFilter>,
    ) -> Result<ComparisonResult> {
        // Malformed filters are rejected before any comparison begins
        let compiled = filter.map(|f| f.compile()).transpose()?;

        let source_filtered: Vec<&SchemaObject> = source
            .iter()
            .filter(|o| compiled.as_ref().map_or(true, |f| f.matches(o)))
            .collect();
        let destination_filtered: Vec<&SchemaObject> = destination
            .iter()
            .filter(|o| compiled.as_ref().map_or(true, |f| f.matches(o)))
            .collect();

        debug!(
            source_objects = source_filtered.len(),
            destination_objects = destination_filtered.len(),
            "snapshots filtered"
        );

        let source_map = build_identity_map(&source_filtered, "source")?;
        let destination_map = build_identity_map(&destination_filtered, "destination")?;

        let mut missing: Vec<ObjectIdentity> = Vec::new();
        let mut extra: Vec<ObjectIdentity> = Vec::new();
        let mut modified: Vec<(ObjectIdentity, Vec<AttributeDifference>)> = Vec::new();
        let mut matching_count = 0usize;

        for (identity, source_object) in &source_map {
            match destination_map.get(identity) {
                None => missing.push(identity.clone()),
                Some(destination_object) => {
                    let comparator = self.registry.get(identity.kind).ok_or_else(|| {
                        PgDriftError::UnregisteredKind {
                            kind: identity.kind.to_string(),
                        }
                    })?;
                    let differences = comparator.differences(source_object, destination_object);
                    if differences.is_empty() {
                        matching_count += 1;
                    } else {
                        if let (Some(a), Some(b)) = (
                            source_object.definition_text(),
                            destination_object.definition_text(),
                        ) {
                            debug!(
                                identity = %identity,
                                source_fingerprint = %definition_fingerprint(a),
                                destination_fingerprint = %definition_fingerprint(b),
                                differences = differences.len(),
                                "object modified"
                            );
                        }
                        modified.push((identity.clone(), differences));
                    }
                }
            }
        }

        for identity in destination_map.keys() {
            if !source_map.contains_key(identity) {
                extra.push(identity.clone());
            }
        }

        // Deterministic output across repeated runs on unchanged inputs,
        // ordered by (schema, name) with identity args breaking overload ties
        missing.sort_by(identity_order);
        extra.sort_by(identity_order);
        modified.sort_by(|(a, _), (b, _)| identity_order(a, b));

        let missing: Vec<ObjectRef> = missing.iter().map(object_ref).collect();
        let extra: Vec<ObjectRef> = extra.iter().map(object_ref).collect();
        let modified: Vec<ModifiedObject> = modified
            .into_iter()
            .map(|(identity, differences)| ModifiedObject {
                kind: identity.kind,
                fully_qualified_name: identity.fully_qualified_name(),
                differences,
            })
            .collect();

        info!(
            source_instance = %target.source_instance,
            destination_instance = %target.destination_instance,
            missing = missing.len(),
            extra = extra.len(),
            modified = modified.len(),
            matching = matching_count,
            "comparison complete"
        );

        Ok(ComparisonResult {
            source_instance: target.source_instance.clone(),
            destination_instance: target.destination_instance.clone(),
            source_schema: target.source_schema.clone(),
            destination_schema: target.destination_schema.clone(),
            compared_at: Utc::now(),
            missing,
            extra,
            modified,
            matching_count,
        })
    }
}

impl Default for ComparisonEngine {
    fn default() -> Self {
        Self::new()
    }
}

fn object_ref(identity: &ObjectIdentity) -> ObjectRef {
    ObjectRef {
        kind: identity.kind,
        fully_qualified_name: identity.fully_qualified_name(),
    }
}

fn identity_order(a: &ObjectIdentity, b: &ObjectIdentity) -> std::cmp::Ordering {
    a.schema
        .cmp(&b.schema)
        .then_with(|| a.name.cmp(&b.name))
        .then_with(|| a.identity_args.cmp(&b.identity_args))
}

/// Key one snapshot side by identity, failing on collisions
fn build_identity_map<'a>(
    objects: &[&'a SchemaObject],
    side: &str,
) -> Result<HashMap<ObjectIdentity, &'a SchemaObject>> {
    let mut map = HashMap::with_capacity(objects.len());
    for object in objects {
        let identity = object.identity();
        if map.insert(identity.clone(), *object).is_some() {
            return Err(PgDriftError::DuplicateIdentity {
                side: side.to_string(),
                identity: identity.to_string(),
            });
        }
    }
    Ok(map)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{ColumnSchema, SchemaObjectKind, TableSchema};

    fn table(schema: &str, name: &str, columns: &[(&str, &str)]) -> SchemaObject {
        SchemaObject::Table(TableSchema {
            schema_name: schema.to_string(),
            table_name: name.to_string(),
            owner: "postgres".to_string(),
            comment: None,
            columns: columns
                .iter()
                .map(|(name, data_type)| ColumnSchema {
                    name: name.to_string(),
                    data_type: data_type.to_string(),
                    nullable: true,
                    default: None,
                    comment: None,
                })
                .collect(),
        })
    }

    fn target() -> ComparisonTarget {
        ComparisonTarget {
            source_instance: "staging".to_string(),
            destination_instance: "production".to_string(),
            source_schema: "public".to_string(),
            destination_schema: "public".to_string(),
        }
    }

    #[test]
    fn test_empty_sides_are_valid() {
        let engine = ComparisonEngine::new();
        let objects = vec![table("public", "users", &[("id", "bigint")])];

        let result = engine.compare(&target(), &objects, &[], None).unwrap();
        assert_eq!(result.missing.len(), 1);
        assert_eq!(result.extra.len(), 0);

        let result = engine.compare(&target(), &[], &objects, None).unwrap();
        assert_eq!(result.missing.len(), 0);
        assert_eq!(result.extra.len(), 1);
        assert_eq!(result.extra[0].kind, SchemaObjectKind::Table);
    }

    #[test]
    fn test_duplicate_identity_fails_run() {
        let engine = ComparisonEngine::new();
        let duplicated = vec![
            table("public", "users", &[("id", "bigint")]),
            table("public", "users", &[("id", "uuid")]),
        ];
        let result = engine.compare(&target(), &duplicated, &[], None);
        assert!(matches!(
            result,
            Err(PgDriftError::DuplicateIdentity { ref side, .. }) if side == "source"
        ));
    }

    #[test]
    fn test_modified_and_matching_split() {
        let engine = ComparisonEngine::new();
        let source = vec![
            table("public", "users", &[("id", "bigint")]),
            table("public", "orders", &[("id", "bigint")]),
        ];
        let destination = vec![
            table("public", "users", &[("id", "bigint")]),
            table("public", "orders", &[("id", "uuid")]),
        ];

        let result = engine.compare(&target(), &source, &destination, None).unwrap();
        assert_eq!(result.matching_count, 1);
        assert_eq!(result.modified.len(), 1);
        assert_eq!(result.modified[0].fully_qualified_name, "public.orders");
    }

    #[test]
    fn test_output_is_sorted() {
        let engine = ComparisonEngine::new();
        let source = vec![
            table("public", "zebra", &[]),
            table("audit", "alpha", &[]),
            table("public", "beta", &[]),
        ];
        let result = engine.compare(&target(), &source, &[], None).unwrap();
        let names: Vec<_> = result
            .missing
            .iter()
            .map(|m| m.fully_qualified_name.as_str())
            .collect();
        assert_eq!(names, vec!["audit.alpha", "public.beta", "public.zebra"]);
    }

    // "app-ext.b" < "app.zz" as strings because '-' orders before '.', but
    // schema "app" precedes schema "app-ext" in tuple order
    #[test]
    fn test_sort_is_by_schema_then_name_not_qualified_string() {
        let engine = ComparisonEngine::new();
        let source = vec![
            table("app-ext", "b", &[]),
            table("app", "zz", &[]),
        ];
        let result = engine.compare(&target(), &source, &[], None).unwrap();
        let names: Vec<_> = result
            .missing
            .iter()
            .map(|m| m.fully_qualified_name.as_str())
            .collect();
        assert_eq!(names, vec!["app.zz", "app-ext.b"]);
    }

    #[test]
    fn test_filter_applies_to_both_sides() {
        let engine = ComparisonEngine::new();
        let source = vec![
            table("public", "users", &[]),
            table("audit", "events", &[]),
        ];
        let destination = vec![table("audit", "other_events", &[])];
        let filter = ComparisonFilter {
            included_schemas: vec!["public".to_string()],
            ..Default::default()
        };

        let result = engine
            .compare(&target(), &source, &destination, Some(&filter))
            .unwrap();
        assert_eq!(result.missing.len(), 1);
        assert_eq!(result.missing[0].fully_qualified_name, "public.users");
        assert_eq!(result.extra.len(), 0);
        assert_eq!(result.matching_count, 0);
    }

    #[test]
    fn test_invalid_filter_rejected_before_comparison() {
        let engine = ComparisonEngine::new();
        let filter = ComparisonFilter {
            name_pattern: Some("(bad".to_string()),
            ..Default::default()
        };
        let result = engine.compare(&target(), &[], &[], Some(&filter));
        assert!(matches!(
            result,
            Err(PgDriftError::InvalidFilterConfiguration { .. })
        ));
    }
}
