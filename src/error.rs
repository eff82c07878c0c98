use std::path::PathBuf;
use thiserror::Error;

/// Main error type for pgdrift
#[derive(Error, Debug)]
pub enum PgDriftError {
    // Filter Errors
    #[error("Invalid filter configuration: {message}")]
    InvalidFilterConfiguration {
        message: String,
        #[source]
        source: Option<regex::Error>,
    },

    // Comparison Errors
    #[error("Duplicate identity key on {side} side: {identity}")]
    DuplicateIdentity {
        side: String,
        identity: String,
    },

    #[error("No comparator registered for object kind {kind}")]
    UnregisteredKind {
        kind: String,
    },

    // History Errors
    #[error("Failed to serialize {what} for history persistence: {message}")]
    HistorySerialization {
        what: String,
        message: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to initialize history tables: {0}")]
    HistoryInitialization(String),

    // Database Connection Errors
    #[error("Failed to connect to database: {message}")]
    DatabaseConnection {
        message: String,
        #[source]
        source: tokio_postgres::Error,
    },

    #[error("Database error: {message}")]
    Database {
        message: String,
        #[source]
        source: tokio_postgres::Error,
    },

    #[error("Invalid connection string: {0}")]
    InvalidConnectionString(String),

    // Collector Errors
    #[error("Failed to collect {kind} objects from schema {schema}: {message}")]
    Collection {
        kind: String,
        schema: String,
        message: String,
        #[source]
        source: Option<tokio_postgres::Error>,
    },

    // Configuration Errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Failed to load configuration from {path}: {message}")]
    ConfigLoad {
        path: PathBuf,
        message: String,
    },

    #[error("Unknown comparison profile: {name}")]
    UnknownProfile {
        name: String,
        available: Vec<String>,
    },

    // General Errors
    #[error("Internal error: {0}")]
    Internal(String),

    #[error("{0}")]
    Other(String),
}

impl From<tokio_postgres::Error> for PgDriftError {
    fn from(err: tokio_postgres::Error) -> Self {
        // Check if it's a connection error by examining the error message
        if err.to_string().contains("connect") {
            PgDriftError::DatabaseConnection {
                message: err.to_string(),
                source: err,
            }
        } else {
            PgDriftError::Database {
                message: err.to_string(),
                source: err,
            }
        }
    }
}

impl From<std::io::Error> for PgDriftError {
    fn from(err: std::io::Error) -> Self {
        PgDriftError::Other(err.to_string())
    }
}

/// Result type alias for pgdrift operations
pub type Result<T> = std::result::Result<T, PgDriftError>;

/// Helper function to format error with all its causes
pub fn format_error_chain(err: &PgDriftError) -> String {
    use std::error::Error;

    let mut output = format!("Error: {}", err);

    let mut current_err: &dyn Error = err;
    while let Some(source) = current_err.source() {
        output.push_str(&format!("\n  Caused by: {}", source));
        current_err = source;
    }

    output
}

/// Helper function to suggest fixes for common errors
pub fn suggest_fix(err: &PgDriftError) -> Option<String> {
    match err {
        PgDriftError::DatabaseConnection { .. } => Some(
            "Suggestions:\n\
             - Check if PostgreSQL is running on both instances\n\
             - Verify the connection strings in pgdrift.toml\n\
             - Try: psql <your-connection-string> to test the connection".to_string()
        ),
        PgDriftError::InvalidConnectionString(_) => Some(
            "Connection string should be in format:\n\
             postgres://[user[:password]@][host][:port][/dbname]".to_string()
        ),
        PgDriftError::InvalidFilterConfiguration { .. } => Some(
            "Filter schema patterns use '*' as a wildcard (e.g. 'pg_*');\n\
             object-name filters are regular expressions.".to_string()
        ),
        PgDriftError::DuplicateIdentity { side, identity } => Some(
            format!("Snapshot for the {} side contains '{}' twice.\n\
                    - This indicates a defect in snapshot collection, not a schema diff\n\
                    - Re-collect the snapshot and compare again", side, identity)
        ),
        PgDriftError::UnknownProfile { name, available } => Some(
            if available.is_empty() {
                format!("Profile '{}' is not defined in pgdrift.toml.\n\
                        - Run 'pgdrift init' to generate a sample configuration", name)
            } else {
                format!("Profile '{}' is not defined in pgdrift.toml.\n\
                        - Available profiles: {}", name, available.join(", "))
            }
        ),
        _ => None,
    }
}
