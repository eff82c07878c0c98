use std::path::{Path, PathBuf};

use crate::config::PgDriftConfig;
use crate::error::Result;

#[derive(Debug)]
pub struct InitResult {
    pub path: PathBuf,
    /// True when pgdrift.toml already existed and the sample was written
    /// alongside it instead
    pub existing_config: bool,
}

/// Write a sample configuration file into the current directory
pub fn execute_init() -> Result<InitResult> {
    let config_path = Path::new("pgdrift.toml");
    if config_path.exists() {
        let path = PgDriftConfig::write_sample_config(Path::new("pgdrift.toml.example"))?;
        return Ok(InitResult {
            path,
            existing_config: true,
        });
    }

    let path = PgDriftConfig::write_sample_config(config_path)?;
    Ok(InitResult {
        path,
        existing_config: false,
    })
}

#[cfg(feature = "cli")]
pub fn print_init_summary(result: &InitResult) {
    use crate::logging::output;

    if result.existing_config {
        output::warning(format!(
            "pgdrift.toml already exists; wrote sample to {}",
            result.path.display()
        ));
    } else {
        output::success(format!("Wrote {}", result.path.display()));
        output::info("Edit the connection URLs, then run: pgdrift compare staging-vs-prod");
    }
}
