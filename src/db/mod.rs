pub mod collector;
pub mod connection;

pub use collector::CatalogCollector;
pub use connection::{connect_with_url, DatabaseConfig};
