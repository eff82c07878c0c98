use crate::db::connect_with_url;
use crate::error::Result;
use crate::history::{ComparisonHistory, HistoryStore};

/// Fetch the most recent comparison runs, newest first
pub async fn execute_history(
    connection_string: &str,
    profile_name: Option<&str>,
    limit: i64,
) -> Result<Vec<ComparisonHistory>> {
    let client = connect_with_url(connection_string).await?;
    let store = HistoryStore::new(&client);
    store.initialize().await?;
    store.list_recent(profile_name, limit).await
}

#[cfg(feature = "cli")]
pub fn print_history_summary(records: &[ComparisonHistory]) {
    use crate::logging::output;

    if records.is_empty() {
        output::info("No comparison runs recorded yet");
        return;
    }

    output::header("Comparison history");
    println!(
        "{:<22}  {:<20}  {:<12}  {:>7}  {:>5}  {:>8}  {:>8}",
        "compared at", "profile", "by", "missing", "extra", "modified", "matching"
    );
    for record in records {
        println!(
            "{:<22}  {:<20}  {:<12}  {:>7}  {:>5}  {:>8}  {:>8}",
            record.compared_at.format("%Y-%m-%d %H:%M:%SZ"),
            record.profile_name,
            record.performed_by,
            record.missing_count,
            record.extra_count,
            record.modified_count,
            record.matching_count
        );
    }
}
