pub mod attribute;
pub mod callable;
pub mod comparator;
pub mod engine;
pub mod filter;
pub mod index;
pub mod normalize;
pub mod result;
pub mod sequence;
pub mod table;
pub mod view;

pub use attribute::AttributeDifference;
pub use comparator::{ComparatorRegistry, StructuralComparator};
pub use engine::{ComparisonEngine, ComparisonTarget};
pub use filter::{ComparisonFilter, CompiledFilter};
pub use normalize::{definition_fingerprint, normalize_definition};
pub use result::{
    ComparisonResult, ComparisonSummary, ModifiedObject, ObjectRef, VersionedPayload,
    PAYLOAD_VERSION,
};
