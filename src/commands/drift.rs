use crate::db::connect_with_url;
use crate::error::Result;
use crate::history::{ComparisonHistory, HistoryStore};

/// Drift verdict for a profile, derived from its two most recent runs
#[derive(Debug)]
pub struct DriftStatus {
    pub latest: Option<ComparisonHistory>,
    pub previous: Option<ComparisonHistory>,
    pub drifted: bool,
}

/// Compare the latest recorded run for a profile against the run before it
pub async fn execute_drift(connection_string: &str, profile_name: &str) -> Result<DriftStatus> {
    let client = connect_with_url(connection_string).await?;
    let store = HistoryStore::new(&client);
    store.initialize().await?;

    let mut recent = store.list_recent(Some(profile_name), 2).await?;
    let latest = if recent.is_empty() {
        None
    } else {
        Some(recent.remove(0))
    };
    let previous = recent.pop();

    let drifted = match &latest {
        Some(latest) => latest.has_drift_from(previous.as_ref()),
        None => false,
    };

    Ok(DriftStatus {
        latest,
        previous,
        drifted,
    })
}

#[cfg(feature = "cli")]
pub fn print_drift_summary(status: &DriftStatus, profile_name: &str) {
    use crate::logging::output;

    match (&status.latest, &status.previous) {
        (None, _) => {
            output::info(format!("No runs recorded for profile '{}'", profile_name));
        }
        (Some(latest), None) => {
            output::info(format!(
                "Only one run recorded for profile '{}' (at {}); nothing to compare against",
                profile_name, latest.compared_at
            ));
        }
        (Some(latest), Some(previous)) => {
            if status.drifted {
                output::warning(format!(
                    "Drift detected for '{}': {} missing / {} extra / {} modified (was {} / {} / {})",
                    profile_name,
                    latest.missing_count,
                    latest.extra_count,
                    latest.modified_count,
                    previous.missing_count,
                    previous.extra_count,
                    previous.modified_count
                ));
            } else {
                output::success(format!(
                    "No drift for '{}' between {} and {}",
                    profile_name, previous.compared_at, latest.compared_at
                ));
            }
        }
    }
}
