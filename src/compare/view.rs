use crate::compare::attribute::{push_if_differs, AttributeDifference};
use crate::compare::comparator::{kind_mismatch, StructuralComparator};
use crate::compare::normalize::normalize_definition;
use crate::schema::{SchemaObject, SchemaObjectKind};

/// Structural comparison for views and materialized views.
///
/// The defining query is the whole contract, so a normalized-text change is
/// breaking. Owner and comment are cosmetic. Plain and materialized views
/// are distinct kinds, so they never pair up under one identity key.
pub struct ViewComparator;

impl StructuralComparator for ViewComparator {
    fn kinds(&self) -> &'static [SchemaObjectKind] {
        &[SchemaObjectKind::View, SchemaObjectKind::MaterializedView]
    }

    fn differences(
        &self,
        source: &SchemaObject,
        destination: &SchemaObject,
    ) -> Vec<AttributeDifference> {
        let (a, b) = match (source, destination) {
            (SchemaObject::View(a), SchemaObject::View(b)) => (a, b),
            _ => return kind_mismatch(source, destination),
        };

        let mut differences = Vec::new();
        push_if_differs(
            &mut differences,
            "Definition",
            &normalize_definition(&a.definition),
            &normalize_definition(&b.definition),
            true,
        );
        differences
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::ViewSchema;

    fn user_stats(definition: &str) -> SchemaObject {
        SchemaObject::View(ViewSchema {
            schema_name: "public".to_string(),
            view_name: "user_stats".to_string(),
            owner: "postgres".to_string(),
            comment: None,
            definition: definition.to_string(),
            materialized: false,
        })
    }

    #[test]
    fn test_whitespace_only_change_is_equal() {
        let a = user_stats("SELECT count(*)\n  FROM users;");
        let b = user_stats("SELECT count(*) FROM users;");
        assert!(ViewComparator.is_equal(&a, &b));
    }

    #[test]
    fn test_query_change_is_breaking() {
        let a = user_stats("SELECT count(*) FROM users;");
        let b = user_stats("SELECT count(*) FROM users WHERE active;");

        let differences = ViewComparator.differences(&a, &b);
        assert_eq!(differences.len(), 1);
        assert_eq!(differences[0].attribute_name, "Definition");
        assert!(differences[0].breaking);
    }

    #[test]
    fn test_owner_change_is_cosmetic() {
        let a = user_stats("SELECT 1;");
        let b = SchemaObject::View(ViewSchema {
            schema_name: "public".to_string(),
            view_name: "user_stats".to_string(),
            owner: "deploy".to_string(),
            comment: Some("per-user rollup".to_string()),
            definition: "SELECT 1;".to_string(),
            materialized: false,
        });
        assert!(ViewComparator.is_equal(&a, &b));
    }
}
