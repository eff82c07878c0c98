use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::compare::attribute::AttributeDifference;
use crate::schema::SchemaObjectKind;

/// Version of the serialized result/filter payload schema persisted with
/// history records
pub const PAYLOAD_VERSION: u32 = 1;

/// Envelope for persisted JSON payloads so historical records stay
/// self-describing across schema changes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VersionedPayload<T> {
    pub version: u32,
    pub payload: T,
}

impl<T> VersionedPayload<T> {
    pub fn wrap(payload: T) -> Self {
        Self {
            version: PAYLOAD_VERSION,
            payload,
        }
    }
}

/// Reference to an object present on only one side
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectRef {
    pub kind: SchemaObjectKind,
    pub fully_qualified_name: String,
}

/// An object present on both sides with at least one tracked difference
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModifiedObject {
    pub kind: SchemaObjectKind,
    pub fully_qualified_name: String,
    pub differences: Vec<AttributeDifference>,
}

impl ModifiedObject {
    pub fn has_breaking_difference(&self) -> bool {
        self.differences.iter().any(|d| d.breaking)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonSummary {
    pub missing_objects: usize,
    pub extra_objects: usize,
    pub modified_objects: usize,
    pub matching_objects: usize,
}

impl ComparisonSummary {
    /// Number of distinct identity keys across the union of both sides
    pub fn total_objects(&self) -> usize {
        self.missing_objects + self.extra_objects + self.modified_objects + self.matching_objects
    }
}

/// Aggregated outcome of one comparison run. Produced once, never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonResult {
    pub source_instance: String,
    pub destination_instance: String,
    pub source_schema: String,
    pub destination_schema: String,
    pub compared_at: DateTime<Utc>,
    /// Objects present only on the source side, sorted by (schema, name)
    pub missing: Vec<ObjectRef>,
    /// Objects present only on the destination side, sorted by (schema, name)
    pub extra: Vec<ObjectRef>,
    /// Common objects with tracked differences, sorted by (schema, name)
    pub modified: Vec<ModifiedObject>,
    pub matching_count: usize,
}

impl ComparisonResult {
    pub fn summary(&self) -> ComparisonSummary {
        ComparisonSummary {
            missing_objects: self.missing.len(),
            extra_objects: self.extra.len(),
            modified_objects: self.modified.len(),
            matching_objects: self.matching_count,
        }
    }

    /// True when the two sides are structurally identical under the filter
    pub fn is_clean(&self) -> bool {
        self.missing.is_empty() && self.extra.is_empty() && self.modified.is_empty()
    }
}
