use tokio_postgres::Client;
use tracing::warn;

use crate::compare::{ComparisonFilter, ComparisonResult};
use crate::error::{PgDriftError, Result};
use crate::history::ComparisonHistory;

/// PostgreSQL-backed store for comparison history records.
///
/// Lives in its own `pgdrift` schema on the instance designated for
/// auditing. Records are insert-only; later runs supersede earlier ones
/// rather than updating them.
pub struct HistoryStore<'a> {
    client: &'a Client,
}

impl<'a> HistoryStore<'a> {
    pub fn new(client: &'a Client) -> Self {
        Self { client }
    }

    /// Create the history schema and table if they don't exist
    pub async fn initialize(&self) -> Result<()> {
        self.client
            .execute("CREATE SCHEMA IF NOT EXISTS pgdrift", &[])
            .await
            .map_err(|e| PgDriftError::HistoryInitialization(e.to_string()))?;

        self.client
            .execute(
                r#"
                CREATE TABLE IF NOT EXISTS pgdrift.comparison_history (
                    id BIGINT GENERATED ALWAYS AS IDENTITY PRIMARY KEY,
                    compared_at TIMESTAMP WITH TIME ZONE NOT NULL,
                    source_instance TEXT NOT NULL,
                    destination_instance TEXT NOT NULL,
                    source_schema TEXT NOT NULL,
                    destination_schema TEXT NOT NULL,
                    performed_by TEXT NOT NULL,
                    missing_count BIGINT NOT NULL,
                    extra_count BIGINT NOT NULL,
                    modified_count BIGINT NOT NULL,
                    matching_count BIGINT NOT NULL,
                    profile_name TEXT NOT NULL,
                    result_snapshot JSONB NOT NULL,
                    filter_config JSONB NOT NULL
                )
                "#,
                &[],
            )
            .await
            .map_err(|e| PgDriftError::HistoryInitialization(e.to_string()))?;

        // Index for latest-prior lookups by target tuple
        self.client
            .execute(
                r#"
                CREATE INDEX IF NOT EXISTS idx_comparison_history_target
                ON pgdrift.comparison_history
                (source_instance, destination_instance, source_schema,
                 destination_schema, profile_name, compared_at DESC)
                "#,
                &[],
            )
            .await
            .map_err(|e| PgDriftError::HistoryInitialization(e.to_string()))?;

        Ok(())
    }

    /// Insert a history record and return its assigned id
    pub async fn record(&self, history: &ComparisonHistory) -> Result<i64> {
        let row = self
            .client
            .query_one(
                r#"
                INSERT INTO pgdrift.comparison_history
                (compared_at, source_instance, destination_instance,
                 source_schema, destination_schema, performed_by,
                 missing_count, extra_count, modified_count, matching_count,
                 profile_name, result_snapshot, filter_config)
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11,
                        $12::jsonb, $13::jsonb)
                RETURNING id
                "#,
                &[
                    &history.compared_at,
                    &history.source_instance,
                    &history.destination_instance,
                    &history.source_schema,
                    &history.destination_schema,
                    &history.performed_by,
                    &history.missing_count,
                    &history.extra_count,
                    &history.modified_count,
                    &history.matching_count,
                    &history.profile_name,
                    &history.result_snapshot_json,
                    &history.filter_config_json,
                ],
            )
            .await?;
        Ok(row.get(0))
    }

    /// Most recent record for the same target tuple as `history`, strictly
    /// before its `compared_at`
    pub async fn latest_prior(
        &self,
        history: &ComparisonHistory,
    ) -> Result<Option<ComparisonHistory>> {
        let rows = self
            .client
            .query(
                r#"
                SELECT id, compared_at, source_instance, destination_instance,
                       source_schema, destination_schema, performed_by,
                       missing_count, extra_count, modified_count, matching_count,
                       profile_name, result_snapshot::text, filter_config::text
                FROM pgdrift.comparison_history
                WHERE source_instance = $1
                  AND destination_instance = $2
                  AND source_schema = $3
                  AND destination_schema = $4
                  AND profile_name = $5
                  AND compared_at < $6
                ORDER BY compared_at DESC
                LIMIT 1
                "#,
                &[
                    &history.source_instance,
                    &history.destination_instance,
                    &history.source_schema,
                    &history.destination_schema,
                    &history.profile_name,
                    &history.compared_at,
                ],
            )
            .await?;

        Ok(rows.first().map(row_to_history))
    }

    /// Most recent records, newest first, optionally restricted to one
    /// profile
    pub async fn list_recent(
        &self,
        profile_name: Option<&str>,
        limit: i64,
    ) -> Result<Vec<ComparisonHistory>> {
        let rows = match profile_name {
            Some(profile) => {
                self.client
                    .query(
                        r#"
                        SELECT id, compared_at, source_instance, destination_instance,
                               source_schema, destination_schema, performed_by,
                               missing_count, extra_count, modified_count, matching_count,
                               profile_name, result_snapshot::text, filter_config::text
                        FROM pgdrift.comparison_history
                        WHERE profile_name = $1
                        ORDER BY compared_at DESC
                        LIMIT $2
                        "#,
                        &[&profile, &limit],
                    )
                    .await?
            }
            None => {
                self.client
                    .query(
                        r#"
                        SELECT id, compared_at, source_instance, destination_instance,
                               source_schema, destination_schema, performed_by,
                               missing_count, extra_count, modified_count, matching_count,
                               profile_name, result_snapshot::text, filter_config::text
                        FROM pgdrift.comparison_history
                        ORDER BY compared_at DESC
                        LIMIT $1
                        "#,
                        &[&limit],
                    )
                    .await?
            }
        };

        Ok(rows.iter().map(row_to_history).collect())
    }

    /// Persist a comparison result as history, reporting whether the run
    /// drifted from the prior run for the same target tuple.
    ///
    /// Serialization failure is logged and the write skipped; the
    /// comparison result remains valid for the caller either way, so this
    /// returns `Ok(None)` rather than an error in that case.
    pub async fn record_result(
        &self,
        result: &ComparisonResult,
        performed_by: &str,
        profile_name: &str,
        filter: &ComparisonFilter,
    ) -> Result<Option<RecordedRun>> {
        let mut history = match skip_failed_serialization(ComparisonHistory::from_result(
            result,
            performed_by,
            profile_name,
            filter,
        ))? {
            Some(history) => history,
            None => return Ok(None),
        };

        let previous = self.latest_prior(&history).await?;
        let drifted = history.has_drift_from(previous.as_ref());
        let id = self.record(&history).await?;
        history.id = Some(id);

        Ok(Some(RecordedRun {
            history,
            previous,
            drifted,
        }))
    }
}

/// A serialization failure downgrades to a skipped write; the comparison
/// result stays valid for the caller. Any other failure propagates.
fn skip_failed_serialization(
    built: Result<ComparisonHistory>,
) -> Result<Option<ComparisonHistory>> {
    match built {
        Ok(history) => Ok(Some(history)),
        Err(err @ PgDriftError::HistorySerialization { .. }) => {
            warn!(error = %err, "skipping history write");
            Ok(None)
        }
        Err(err) => Err(err),
    }
}

/// Outcome of persisting one comparison run
#[derive(Debug)]
pub struct RecordedRun {
    pub history: ComparisonHistory,
    pub previous: Option<ComparisonHistory>,
    pub drifted: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compare::ComparisonResult;
    use chrono::Utc;

    fn history() -> ComparisonHistory {
        let result = ComparisonResult {
            source_instance: "staging".to_string(),
            destination_instance: "production".to_string(),
            source_schema: "public".to_string(),
            destination_schema: "public".to_string(),
            compared_at: Utc::now(),
            missing: vec![],
            extra: vec![],
            modified: vec![],
            matching_count: 3,
        };
        ComparisonHistory::from_result(&result, "ops", "staging-vs-prod", &Default::default())
            .unwrap()
    }

    fn serialization_error() -> PgDriftError {
        let source = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        PgDriftError::HistorySerialization {
            what: "comparison result".to_string(),
            message: source.to_string(),
            source,
        }
    }

    #[test]
    fn test_built_history_passes_through() {
        let history = skip_failed_serialization(Ok(history())).unwrap();
        assert!(history.is_some());
    }

    #[test]
    fn test_serialization_failure_skips_the_write() {
        let outcome = skip_failed_serialization(Err(serialization_error())).unwrap();
        assert!(outcome.is_none());
    }

    #[test]
    fn test_other_failures_still_propagate() {
        let result = skip_failed_serialization(Err(PgDriftError::Internal("boom".to_string())));
        assert!(matches!(result, Err(PgDriftError::Internal(_))));
    }
}

fn row_to_history(row: &tokio_postgres::Row) -> ComparisonHistory {
    ComparisonHistory {
        id: Some(row.get(0)),
        compared_at: row.get(1),
        source_instance: row.get(2),
        destination_instance: row.get(3),
        source_schema: row.get(4),
        destination_schema: row.get(5),
        performed_by: row.get(6),
        missing_count: row.get(7),
        extra_count: row.get(8),
        modified_count: row.get(9),
        matching_count: row.get(10),
        profile_name: row.get(11),
        result_snapshot_json: row.get(12),
        filter_config_json: row.get(13),
    }
}
