use tracing::{debug, info};

#[cfg(feature = "cli")]
use owo_colors::OwoColorize;

use crate::compare::{ComparisonEngine, ComparisonFilter, ComparisonResult, ComparisonTarget};
use crate::db::{connect_with_url, CatalogCollector, DatabaseConfig};
use crate::error::Result;
use crate::history::{store::RecordedRun, HistoryStore};

/// Everything needed to run one comparison, resolved from the profile and
/// CLI overrides before this module is reached
#[derive(Debug, Clone)]
pub struct CompareRequest {
    pub source_url: String,
    pub destination_url: String,
    pub source_schema: String,
    pub destination_schema: String,
    pub filter: Option<ComparisonFilter>,
    pub profile_name: String,
    pub performed_by: String,
    /// Skip the history write entirely
    pub record: bool,
    /// History store location; defaults to the destination instance
    pub history_url: Option<String>,
}

#[derive(Debug)]
pub struct CompareOutcome {
    pub result: ComparisonResult,
    /// None when recording was skipped or the history write was not possible
    pub recorded: Option<RecordedRun>,
    /// Wall-clock time for collection, comparison, and recording
    pub elapsed: std::time::Duration,
}

pub async fn execute_compare(request: CompareRequest) -> Result<CompareOutcome> {
    let started = std::time::Instant::now();
    let source_config = DatabaseConfig::from_url(&request.source_url)?;
    let destination_config = DatabaseConfig::from_url(&request.destination_url)?;

    info!(
        source = %source_config.redacted(),
        destination = %destination_config.redacted(),
        "starting comparison"
    );

    let source_client = crate::db::connection::connect(&source_config).await?;
    let destination_client = crate::db::connection::connect(&destination_config).await?;

    let source_objects = CatalogCollector::new(&source_client)
        .collect_schema(&request.source_schema)
        .await?;
    let destination_objects = CatalogCollector::new(&destination_client)
        .collect_schema(&request.destination_schema)
        .await?;
    debug!(
        source_objects = source_objects.len(),
        destination_objects = destination_objects.len(),
        "snapshots collected"
    );

    let target = ComparisonTarget {
        source_instance: source_config.redacted(),
        destination_instance: destination_config.redacted(),
        source_schema: request.source_schema.clone(),
        destination_schema: request.destination_schema.clone(),
    };
    let engine = ComparisonEngine::new();
    let result = engine.compare(
        &target,
        &source_objects,
        &destination_objects,
        request.filter.as_ref(),
    )?;

    let recorded = if request.record {
        let filter = request.filter.clone().unwrap_or_default();
        match &request.history_url {
            Some(url) => {
                let history_client = connect_with_url(url).await?;
                let store = HistoryStore::new(&history_client);
                store.initialize().await?;
                store
                    .record_result(
                        &result,
                        &request.performed_by,
                        &request.profile_name,
                        &filter,
                    )
                    .await?
            }
            None => {
                // History lives on the destination instance by default
                let store = HistoryStore::new(&destination_client);
                store.initialize().await?;
                store
                    .record_result(
                        &result,
                        &request.performed_by,
                        &request.profile_name,
                        &filter,
                    )
                    .await?
            }
        }
    } else {
        None
    };

    Ok(CompareOutcome {
        result,
        recorded,
        elapsed: started.elapsed(),
    })
}

#[cfg(feature = "cli")]
fn completion_note(outcome: &CompareOutcome) -> String {
    let summary = outcome.result.summary();
    format!(
        "Compared {} objects in {}",
        summary.total_objects(),
        crate::logging::format_duration(outcome.elapsed)
    )
}

#[cfg(feature = "cli")]
pub fn print_compare_summary(outcome: &CompareOutcome) {
    use crate::logging::output;

    let result = &outcome.result;
    let summary = result.summary();

    output::header(format!(
        "Comparison: {} ({}) vs {} ({})",
        result.source_instance,
        result.source_schema,
        result.destination_instance,
        result.destination_schema
    ));

    if result.is_clean() {
        output::success(format!(
            "Schemas match ({} objects compared)",
            summary.matching_objects
        ));
    } else {
        if !result.missing.is_empty() {
            output::subheader(format!("Missing on destination ({})", result.missing.len()));
            for object in &result.missing {
                println!("  {} {} {}", "-".red(), object.kind, object.fully_qualified_name);
            }
        }

        if !result.extra.is_empty() {
            output::subheader(format!("Extra on destination ({})", result.extra.len()));
            for object in &result.extra {
                println!("  {} {} {}", "+".green(), object.kind, object.fully_qualified_name);
            }
        }

        if !result.modified.is_empty() {
            output::subheader(format!("Modified ({})", result.modified.len()));
            for object in &result.modified {
                let marker = if object.has_breaking_difference() {
                    "!".red().to_string()
                } else {
                    "~".yellow().to_string()
                };
                println!("  {} {} {}", marker, object.kind, object.fully_qualified_name);
                for difference in &object.differences {
                    println!("      {}", difference);
                }
            }
        }

        println!();
        output::warning(format!(
            "{} missing, {} extra, {} modified, {} matching",
            summary.missing_objects,
            summary.extra_objects,
            summary.modified_objects,
            summary.matching_objects
        ));
    }

    match &outcome.recorded {
        Some(run) => {
            if run.drifted {
                output::warning("Drift detected against the previous run for this target");
            } else if run.previous.is_some() {
                output::info("No drift against the previous run for this target");
            } else {
                output::info("First recorded run for this target");
            }
        }
        None => output::info("Run was not recorded to history"),
    }

    output::info(completion_note(outcome));
}

#[cfg(all(test, feature = "cli"))]
mod tests {
    use super::*;
    use chrono::Utc;
    use std::time::Duration;

    #[test]
    fn test_completion_note_includes_totals_and_duration() {
        let outcome = CompareOutcome {
            result: ComparisonResult {
                source_instance: "staging".to_string(),
                destination_instance: "production".to_string(),
                source_schema: "public".to_string(),
                destination_schema: "public".to_string(),
                compared_at: Utc::now(),
                missing: vec![],
                extra: vec![],
                modified: vec![],
                matching_count: 42,
            },
            recorded: None,
            elapsed: Duration::from_millis(1250),
        };

        let note = completion_note(&outcome);
        assert_eq!(note, "Compared 42 objects in 1.250s");
    }
}
