use crate::compare::attribute::{push_if_differs, AttributeDifference};
use crate::compare::comparator::{kind_mismatch, StructuralComparator};
use crate::compare::normalize::normalize_definition;
use crate::schema::{SchemaObject, SchemaObjectKind};

/// Structural comparison for indexes.
///
/// The index definition, uniqueness, and primariness change what the index
/// enforces and are breaking; tablespace placement is non-breaking. Comment
/// is cosmetic.
pub struct IndexComparator;

impl StructuralComparator for IndexComparator {
    fn kinds(&self) -> &'static [SchemaObjectKind] {
        &[SchemaObjectKind::Index]
    }

    fn differences(
        &self,
        source: &SchemaObject,
        destination: &SchemaObject,
    ) -> Vec<AttributeDifference> {
        let (a, b) = match (source, destination) {
            (SchemaObject::Index(a), SchemaObject::Index(b)) => (a, b),
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
        push_if_differs(&mut differences, "Unique", &a.unique, &b.unique, true);
        push_if_differs(&mut differences, "Primary", &a.primary, &b.primary, true);
        push_if_differs(
            &mut differences,
            "Tablespace",
            a.tablespace.as_deref().unwrap_or("<default>"),
            b.tablespace.as_deref().unwrap_or("<default>"),
            false,
        );
        differences
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::IndexSchema;

    fn email_idx() -> IndexSchema {
        IndexSchema {
            schema_name: "public".to_string(),
            index_name: "accounts_email_idx".to_string(),
            table_name: "accounts".to_string(),
            comment: None,
            definition: "CREATE INDEX accounts_email_idx ON public.accounts USING btree (email)"
                .to_string(),
            unique: false,
            primary: false,
            tablespace: None,
        }
    }

    #[test]
    fn test_identical_indexes_are_equal() {
        let a = SchemaObject::Index(email_idx());
        let b = SchemaObject::Index(email_idx());
        assert!(IndexComparator.is_equal(&a, &b));
    }

    #[test]
    fn test_uniqueness_change_is_breaking() {
        let a = SchemaObject::Index(email_idx());
        let mut changed = email_idx();
        changed.unique = true;
        changed.definition =
            "CREATE UNIQUE INDEX accounts_email_idx ON public.accounts USING btree (email)"
                .to_string();
        let b = SchemaObject::Index(changed);

        let differences = IndexComparator.differences(&a, &b);
        assert_eq!(differences.len(), 2);
        assert_eq!(differences[0].attribute_name, "Definition");
        assert!(differences[0].breaking);
        assert_eq!(differences[1].attribute_name, "Unique");
        assert!(differences[1].breaking);
    }

    #[test]
    fn test_tablespace_change_is_non_breaking() {
        let a = SchemaObject::Index(email_idx());
        let mut moved = email_idx();
        moved.tablespace = Some("fast_ssd".to_string());
        let b = SchemaObject::Index(moved);

        let differences = IndexComparator.differences(&a, &b);
        assert_eq!(differences.len(), 1);
        assert_eq!(differences[0].attribute_name, "Tablespace");
        assert!(!differences[0].breaking);
        assert_eq!(differences[0].source_value.as_deref(), Some("<default>"));
        assert_eq!(differences[0].destination_value.as_deref(), Some("fast_ssd"));
    }
}
