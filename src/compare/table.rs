use crate::compare::attribute::{push_if_differs, AttributeDifference};
use crate::compare::comparator::{kind_mismatch, StructuralComparator};
use crate::schema::{ColumnSchema, SchemaObject, SchemaObjectKind};

/// Structural comparison for tables.
///
/// A column added, removed, retyped, or with changed nullability is
/// breaking; a changed column default is non-breaking. Owner and comments
/// (table and column) are cosmetic.
pub struct TableComparator;

fn render_column(column: &ColumnSchema) -> String {
    let nullability = if column.nullable { "" } else { " NOT NULL" };
    format!("{} {}{}", column.name, column.data_type, nullability)
}

impl StructuralComparator for TableComparator {
    fn kinds(&self) -> &'static [SchemaObjectKind] {
        &[SchemaObjectKind::Table]
    }

    fn differences(
        &self,
        source: &SchemaObject,
        destination: &SchemaObject,
    ) -> Vec<AttributeDifference> {
        let (a, b) = match (source, destination) {
            (SchemaObject::Table(a), SchemaObject::Table(b)) => (a, b),
            _ => return kind_mismatch(source, destination),
        };

        let mut differences = Vec::new();

        // Source columns in declaration order: removed or changed
        for column in &a.columns {
            match b.columns.iter().find(|c| c.name == column.name) {
                None => {
                    differences.push(AttributeDifference::breaking(
                        "Columns",
                        Some(render_column(column)),
                        None,
                    ));
                }
                Some(other) => {
                    push_if_differs(
                        &mut differences,
                        &format!("Column {} Type", column.name),
                        &column.data_type,
                        &other.data_type,
                        true,
                    );
                    push_if_differs(
                        &mut differences,
                        &format!("Column {} Nullable", column.name),
                        &column.nullable,
                        &other.nullable,
                        true,
                    );
                    let source_default = column.default.as_deref().unwrap_or("<none>");
                    let destination_default = other.default.as_deref().unwrap_or("<none>");
                    push_if_differs(
                        &mut differences,
                        &format!("Column {} Default", column.name),
                        source_default,
                        destination_default,
                        false,
                    );
                }
            }
        }

        // Columns present only on the destination side
        for column in &b.columns {
            if !a.columns.iter().any(|c| c.name == column.name) {
                differences.push(AttributeDifference::breaking(
                    "Columns",
                    None,
                    Some(render_column(column)),
                ));
            }
        }

        differences
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::TableSchema;

    fn column(name: &str, data_type: &str, nullable: bool) -> ColumnSchema {
        ColumnSchema {
            name: name.to_string(),
            data_type: data_type.to_string(),
            nullable,
            default: None,
            comment: None,
        }
    }

    fn accounts(columns: Vec<ColumnSchema>) -> SchemaObject {
        SchemaObject::Table(TableSchema {
            schema_name: "public".to_string(),
            table_name: "accounts".to_string(),
            owner: "postgres".to_string(),
            comment: None,
            columns,
        })
    }

    #[test]
    fn test_identical_tables_are_equal() {
        let a = accounts(vec![column("id", "bigint", false), column("email", "text", true)]);
        let b = accounts(vec![column("id", "bigint", false), column("email", "text", true)]);
        assert!(TableComparator.is_equal(&a, &b));
    }

    // Scenario: column present in source, absent in destination
    #[test]
    fn test_missing_column_is_one_breaking_difference() {
        let a = accounts(vec![column("id", "bigint", false), column("email", "text", true)]);
        let b = accounts(vec![column("id", "bigint", false)]);

        let differences = TableComparator.differences(&a, &b);
        assert_eq!(differences.len(), 1);
        assert_eq!(differences[0].attribute_name, "Columns");
        assert!(differences[0].breaking);
        assert_eq!(differences[0].source_value.as_deref(), Some("email text"));
        assert_eq!(differences[0].destination_value, None);
    }

    #[test]
    fn test_type_and_nullability_changes_are_breaking() {
        let a = accounts(vec![column("balance", "numeric(12,2)", true)]);
        let b = accounts(vec![column("balance", "numeric(16,4)", false)]);

        let differences = TableComparator.differences(&a, &b);
        assert_eq!(differences.len(), 2);
        assert_eq!(differences[0].attribute_name, "Column balance Type");
        assert!(differences[0].breaking);
        assert_eq!(differences[1].attribute_name, "Column balance Nullable");
        assert!(differences[1].breaking);
    }

    #[test]
    fn test_default_change_is_non_breaking() {
        let mut with_default = column("created_at", "timestamptz", false);
        with_default.default = Some("now()".to_string());
        let a = accounts(vec![with_default]);
        let b = accounts(vec![column("created_at", "timestamptz", false)]);

        let differences = TableComparator.differences(&a, &b);
        assert_eq!(differences.len(), 1);
        assert_eq!(differences[0].attribute_name, "Column created_at Default");
        assert!(!differences[0].breaking);
        assert_eq!(differences[0].destination_value.as_deref(), Some("<none>"));
    }

    #[test]
    fn test_column_comment_is_cosmetic() {
        let mut commented = column("id", "bigint", false);
        commented.comment = Some("primary key".to_string());
        let a = accounts(vec![commented]);
        let b = accounts(vec![column("id", "bigint", false)]);
        assert!(TableComparator.is_equal(&a, &b));
    }

    #[test]
    fn test_symmetry_with_swapped_presence() {
        let a = accounts(vec![column("id", "bigint", false), column("email", "text", true)]);
        let b = accounts(vec![column("id", "bigint", false), column("phone", "text", true)]);

        let forward = TableComparator.differences(&a, &b);
        let backward = TableComparator.differences(&b, &a);
        assert_eq!(forward.len(), 2);
        assert_eq!(backward.len(), 2);

        let mut forward_swapped: Vec<_> = forward
            .iter()
            .map(|d| (d.attribute_name.clone(), d.destination_value.clone(), d.source_value.clone()))
            .collect();
        let mut backward_values: Vec<_> = backward
            .iter()
            .map(|d| (d.attribute_name.clone(), d.source_value.clone(), d.destination_value.clone()))
            .collect();
        forward_swapped.sort();
        backward_values.sort();
        assert_eq!(forward_swapped, backward_values);
    }
}
