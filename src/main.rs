use std::process::ExitCode;

use pgdrift::cli::{Cli, Commands};
use pgdrift::commands::{
    execute_compare, execute_drift, execute_history, execute_init, print_compare_summary,
    print_drift_summary, print_history_summary, print_init_summary, CompareRequest,
};
use pgdrift::config::PgDriftConfig;
use pgdrift::error::{format_error_chain, suggest_fix, PgDriftError, Result};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse_args();

    if let Err(e) = pgdrift::logging::init(cli.verbose.unwrap_or(0)) {
        eprintln!("Failed to initialize logging: {}", e);
        return ExitCode::FAILURE;
    }

    match run(cli).await {
        Ok(exit_code) => exit_code,
        Err(err) => {
            pgdrift::log_error!(err);
            pgdrift::logging::output::error(format_error_chain(&err));
            if let Some(suggestion) = suggest_fix(&err) {
                eprintln!("\n{}", suggestion);
            }
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<ExitCode> {
    match cli.command {
        Commands::Init => {
            let result = execute_init()?;
            print_init_summary(&result);
            Ok(ExitCode::SUCCESS)
        }

        Commands::Compare {
            profile,
            source,
            destination,
            source_schema,
            destination_schema,
            json,
            no_record,
        } => {
            let config = PgDriftConfig::load_from_file()?.unwrap_or_default();
            let request = resolve_compare_request(
                &config,
                profile,
                source,
                destination,
                source_schema,
                destination_schema,
                no_record,
            )?;

            let outcome = execute_compare(request).await?;
            if json {
                println!("{}", serde_json::to_string_pretty(&outcome.result).map_err(
                    |e| PgDriftError::Internal(format!("failed to render result: {}", e)),
                )?);
            } else {
                print_compare_summary(&outcome);
            }

            // Breaking differences fail the run so CI can gate on it
            let breaking = outcome
                .result
                .modified
                .iter()
                .any(|object| object.has_breaking_difference());
            if !outcome.result.missing.is_empty() || breaking {
                Ok(ExitCode::from(2))
            } else {
                Ok(ExitCode::SUCCESS)
            }
        }

        Commands::History {
            profile,
            limit,
            connection_string,
        } => {
            let config = PgDriftConfig::load_from_file()?.unwrap_or_default();
            let url = resolve_history_url(&config, connection_string, profile.as_deref())?;
            let records = execute_history(&url, profile.as_deref(), limit).await?;
            print_history_summary(&records);
            Ok(ExitCode::SUCCESS)
        }

        Commands::Drift {
            profile,
            connection_string,
        } => {
            let config = PgDriftConfig::load_from_file()?.unwrap_or_default();
            let url = resolve_history_url(&config, connection_string, Some(&profile))?;
            let status = execute_drift(&url, &profile).await?;
            print_drift_summary(&status, &profile);

            if status.drifted {
                Ok(ExitCode::from(1))
            } else {
                Ok(ExitCode::SUCCESS)
            }
        }
    }
}

/// Merge a named profile with CLI overrides; CLI values win
fn resolve_compare_request(
    config: &PgDriftConfig,
    profile_name: Option<String>,
    source: Option<String>,
    destination: Option<String>,
    source_schema: Option<String>,
    destination_schema: Option<String>,
    no_record: bool,
) -> Result<CompareRequest> {
    let profile = match &profile_name {
        Some(name) => Some(config.profile(name)?),
        None => None,
    };

    let source_url = source
        .or_else(|| profile.map(|p| p.source.clone()))
        .ok_or_else(|| {
            PgDriftError::Configuration(
                "no source connection: pass --source or name a profile".to_string(),
            )
        })?;
    let destination_url = destination
        .or_else(|| profile.map(|p| p.destination.clone()))
        .ok_or_else(|| {
            PgDriftError::Configuration(
                "no destination connection: pass --destination or name a profile".to_string(),
            )
        })?;
    let source_schema = source_schema
        .or_else(|| profile.map(|p| p.source_schema.clone()))
        .ok_or_else(|| {
            PgDriftError::Configuration(
                "no schema to compare: pass --source-schema or name a profile".to_string(),
            )
        })?;
    let destination_schema = destination_schema
        .or_else(|| profile.and_then(|p| p.destination_schema.clone()))
        .unwrap_or_else(|| source_schema.clone());

    Ok(CompareRequest {
        source_url,
        destination_url,
        source_schema,
        destination_schema,
        filter: profile.and_then(|p| p.filter.clone()),
        profile_name: profile_name.unwrap_or_else(|| "ad-hoc".to_string()),
        performed_by: config.performed_by(),
        record: !no_record,
        history_url: config.history_connection_string.clone(),
    })
}

/// History lives on the configured store, falling back to the profile's
/// destination instance
fn resolve_history_url(
    config: &PgDriftConfig,
    cli_url: Option<String>,
    profile_name: Option<&str>,
) -> Result<String> {
    if let Some(url) = cli_url {
        return Ok(url);
    }
    if let Some(url) = &config.history_connection_string {
        return Ok(url.clone());
    }
    if let Some(name) = profile_name {
        return Ok(config.profile(name)?.destination.clone());
    }
    Err(PgDriftError::Configuration(
        "no history store: pass --connection-string, set history_connection_string, \
         or name a profile"
            .to_string(),
    ))
}
