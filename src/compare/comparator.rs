use std::collections::HashMap;
use std::sync::Arc;

use crate::compare::attribute::AttributeDifference;
use crate::compare::callable::CallableComparator;
use crate::compare::index::IndexComparator;
use crate::compare::sequence::SequenceComparator;
use crate::compare::table::TableComparator;
use crate::compare::view::ViewComparator;
use crate::schema::{SchemaObject, SchemaObjectKind};

/// Strategy implementing structural equality and differencing for one or
/// more object kinds.
///
/// Implementations must be symmetric: `differences(a, b)` and
/// `differences(b, a)` contain the same attribute names with source and
/// destination values swapped.
pub trait StructuralComparator: Send + Sync {
    /// The kinds this strategy handles
    fn kinds(&self) -> &'static [SchemaObjectKind];

    /// Ordered field-level differences between two same-kind objects.
    /// Cosmetic attributes (owner, comment) are never reported.
    fn differences(
        &self,
        source: &SchemaObject,
        destination: &SchemaObject,
    ) -> Vec<AttributeDifference>;

    /// Structural equality: no tracked attribute differs
    fn is_equal(&self, source: &SchemaObject, destination: &SchemaObject) -> bool {
        self.differences(source, destination).is_empty()
    }
}

/// Comparator dispatch table keyed by object kind.
///
/// Adding a new comparable kind means registering one strategy here; the
/// engine itself never special-cases kinds.
pub struct ComparatorRegistry {
    comparators: HashMap<SchemaObjectKind, Arc<dyn StructuralComparator>>,
}

impl ComparatorRegistry {
    pub fn new() -> Self {
        Self {
            comparators: HashMap::new(),
        }
    }

    /// Registry with a strategy for every kind in `SchemaObjectKind`
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(Arc::new(CallableComparator));
        registry.register(Arc::new(TableComparator));
        registry.register(Arc::new(SequenceComparator));
        registry.register(Arc::new(ViewComparator));
        registry.register(Arc::new(IndexComparator));
        registry
    }

    /// Register a strategy for every kind it declares
    pub fn register(&mut self, comparator: Arc<dyn StructuralComparator>) {
        for kind in comparator.kinds() {
            self.comparators.insert(*kind, Arc::clone(&comparator));
        }
    }

    pub fn get(&self, kind: SchemaObjectKind) -> Option<&dyn StructuralComparator> {
        self.comparators.get(&kind).map(|c| c.as_ref())
    }
}

impl Default for ComparatorRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

/// Fallback difference for mismatched object variants.
///
/// Identity keys include the kind, so the engine never pairs objects of
/// different kinds; this guards direct comparator calls.
pub(crate) fn kind_mismatch(
    source: &SchemaObject,
    destination: &SchemaObject,
) -> Vec<AttributeDifference> {
    vec![AttributeDifference::breaking(
        "Kind",
        Some(source.kind().to_string()),
        Some(destination.kind().to_string()),
    )]
}
