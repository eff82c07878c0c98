use crate::compare::attribute::{push_if_differs, AttributeDifference};
use crate::compare::comparator::{kind_mismatch, StructuralComparator};
use crate::compare::normalize::normalize_definition;
use crate::schema::{SchemaObject, SchemaObjectKind};

/// Structural comparison for functions, procedures, aggregates, and window
/// functions.
///
/// Equality requires normalized definition text, language, volatility,
/// strict flag, and security-definer flag to match. Owner and comment are
/// cosmetic and never compared. Definition and language changes are
/// breaking; volatility, strictness, and security-definer changes are
/// advisory.
pub struct CallableComparator;

impl StructuralComparator for CallableComparator {
    fn kinds(&self) -> &'static [SchemaObjectKind] {
        &[
            SchemaObjectKind::Function,
            SchemaObjectKind::Procedure,
            SchemaObjectKind::Aggregate,
            SchemaObjectKind::Window,
        ]
    }

    fn differences(
        &self,
        source: &SchemaObject,
        destination: &SchemaObject,
    ) -> Vec<AttributeDifference> {
        let (a, b) = match (source, destination) {
            (SchemaObject::Callable(a), SchemaObject::Callable(b)) => (a, b),
            _ => return kind_mismatch(source, destination),
        };

        let mut differences = Vec::new();

        // Definition first, compared on normalized text
        push_if_differs(
            &mut differences,
            "Definition",
            &normalize_definition(&a.definition),
            &normalize_definition(&b.definition),
            true,
        );
        push_if_differs(&mut differences, "Language", &a.language, &b.language, true);
        push_if_differs(
            &mut differences,
            "Volatility",
            &a.volatility,
            &b.volatility,
            false,
        );
        push_if_differs(&mut differences, "Strict", &a.strict, &b.strict, false);
        push_if_differs(
            &mut differences,
            "SecurityDefiner",
            &a.security_definer,
            &b.security_definer,
            false,
        );

        differences
    }
}
