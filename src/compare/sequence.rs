use crate::compare::attribute::{push_if_differs, AttributeDifference};
use crate::compare::comparator::{kind_mismatch, StructuralComparator};
use crate::schema::{SchemaObject, SchemaObjectKind};

/// Structural comparison for sequences.
///
/// Data type, increment, bounds, and cycle behavior affect the values a
/// sequence can hand out and are breaking; start value and cache size only
/// affect initialization and performance and are non-breaking. Owner and
/// comment are cosmetic.
pub struct SequenceComparator;

impl StructuralComparator for SequenceComparator {
    fn kinds(&self) -> &'static [SchemaObjectKind] {
        &[SchemaObjectKind::Sequence]
    }

    fn differences(
        &self,
        source: &SchemaObject,
        destination: &SchemaObject,
    ) -> Vec<AttributeDifference> {
        let (a, b) = match (source, destination) {
            (SchemaObject::Sequence(a), SchemaObject::Sequence(b)) => (a, b),
            _ => return kind_mismatch(source, destination),
        };

        let mut differences = Vec::new();
        push_if_differs(&mut differences, "DataType", &a.data_type, &b.data_type, true);
        push_if_differs(&mut differences, "Increment", &a.increment, &b.increment, true);
        push_if_differs(&mut differences, "MinValue", &a.min_value, &b.min_value, true);
        push_if_differs(&mut differences, "MaxValue", &a.max_value, &b.max_value, true);
        push_if_differs(&mut differences, "Cycle", &a.cycle, &b.cycle, true);
        push_if_differs(
            &mut differences,
            "StartValue",
            &a.start_value,
            &b.start_value,
            false,
        );
        push_if_differs(
            &mut differences,
            "CacheSize",
            &a.cache_size,
            &b.cache_size,
            false,
        );
        differences
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::SequenceSchema;

    fn order_seq() -> SequenceSchema {
        SequenceSchema {
            schema_name: "public".to_string(),
            sequence_name: "orders_id_seq".to_string(),
            owner: "postgres".to_string(),
            comment: None,
            data_type: "bigint".to_string(),
            start_value: 1,
            increment: 1,
            min_value: 1,
            max_value: i64::MAX,
            cache_size: 1,
            cycle: false,
        }
    }

    #[test]
    fn test_identical_sequences_are_equal() {
        let a = SchemaObject::Sequence(order_seq());
        let b = SchemaObject::Sequence(order_seq());
        assert!(SequenceComparator.is_equal(&a, &b));
    }

    #[test]
    fn test_increment_change_is_breaking() {
        let a = SchemaObject::Sequence(order_seq());
        let mut changed = order_seq();
        changed.increment = 10;
        let b = SchemaObject::Sequence(changed);

        let differences = SequenceComparator.differences(&a, &b);
        assert_eq!(differences.len(), 1);
        assert_eq!(differences[0].attribute_name, "Increment");
        assert!(differences[0].breaking);
    }

    #[test]
    fn test_cache_and_start_changes_are_non_breaking() {
        let a = SchemaObject::Sequence(order_seq());
        let mut changed = order_seq();
        changed.start_value = 1000;
        changed.cache_size = 50;
        let b = SchemaObject::Sequence(changed);

        let differences = SequenceComparator.differences(&a, &b);
        assert_eq!(differences.len(), 2);
        assert!(differences.iter().all(|d| !d.breaking));
        assert_eq!(differences[0].attribute_name, "StartValue");
        assert_eq!(differences[1].attribute_name, "CacheSize");
    }

    #[test]
    fn test_owner_is_cosmetic() {
        let a = SchemaObject::Sequence(order_seq());
        let mut changed = order_seq();
        changed.owner = "deploy".to_string();
        let b = SchemaObject::Sequence(changed);
        assert!(SequenceComparator.is_equal(&a, &b));
    }
}
