pub mod store;

pub use store::HistoryStore;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::compare::{ComparisonFilter, ComparisonResult, VersionedPayload};
use crate::error::{PgDriftError, Result};

/// Persisted record of one comparison run.
///
/// Created from a `ComparisonResult` plus the initiating actor; never
/// mutated after creation, only superseded by later runs. The full result
/// and filter configuration are kept as versioned JSON payloads so
/// historical runs can be re-inspected later.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonHistory {
    /// Assigned by the history store on insert
    pub id: Option<i64>,
    pub compared_at: DateTime<Utc>,
    pub source_instance: String,
    pub destination_instance: String,
    pub source_schema: String,
    pub destination_schema: String,
    pub performed_by: String,
    pub missing_count: i64,
    pub extra_count: i64,
    pub modified_count: i64,
    pub matching_count: i64,
    pub profile_name: String,
    pub result_snapshot_json: String,
    pub filter_config_json: String,
}

impl ComparisonHistory {
    /// Build a history record from a comparison result.
    ///
    /// Fails with `HistorySerialization` if either payload cannot be
    /// encoded; callers persisting history log that failure and skip the
    /// write without failing the comparison itself.
    pub fn from_result(
        result: &ComparisonResult,
        performed_by: &str,
        profile_name: &str,
        filter: &ComparisonFilter,
    ) -> Result<Self> {
        let result_snapshot_json = serde_json::to_string(&VersionedPayload::wrap(result))
            .map_err(|source| PgDriftError::HistorySerialization {
                what: "comparison result".to_string(),
                message: source.to_string(),
                source,
            })?;
        let filter_config_json = serde_json::to_string(&VersionedPayload::wrap(filter))
            .map_err(|source| PgDriftError::HistorySerialization {
                what: "filter configuration".to_string(),
                message: source.to_string(),
                source,
            })?;

        let summary = result.summary();
        Ok(Self {
            id: None,
            compared_at: result.compared_at,
            source_instance: result.source_instance.clone(),
            destination_instance: result.destination_instance.clone(),
            source_schema: result.source_schema.clone(),
            destination_schema: result.destination_schema.clone(),
            performed_by: performed_by.to_string(),
            missing_count: summary.missing_objects as i64,
            extra_count: summary.extra_objects as i64,
            modified_count: summary.modified_objects as i64,
            matching_count: summary.matching_objects as i64,
            profile_name: profile_name.to_string(),
            result_snapshot_json,
            filter_config_json,
        })
    }

    /// True when the other record covers the same (source instance,
    /// destination instance, source schema, destination schema, profile)
    /// tuple
    pub fn same_target(&self, other: &ComparisonHistory) -> bool {
        self.source_instance == other.source_instance
            && self.destination_instance == other.destination_instance
            && self.source_schema == other.source_schema
            && self.destination_schema == other.destination_schema
            && self.profile_name == other.profile_name
    }

    /// Coarse drift signal against the prior run for the same target tuple.
    ///
    /// Returns true iff the missing, extra, or modified count differs from
    /// `previous`; false when there is no prior record. This is count-based
    /// by design: two runs that modify different objects but produce equal
    /// counts report no drift. The persisted result payloads keep
    /// object-level re-diffing possible for consumers that need it.
    pub fn has_drift_from(&self, previous: Option<&ComparisonHistory>) -> bool {
        match previous {
            None => false,
            Some(prev) => {
                self.missing_count != prev.missing_count
                    || self.extra_count != prev.extra_count
                    || self.modified_count != prev.modified_count
            }
        }
    }
}
