//! Configuration model loaded from external sources.

use serde::Deserialize;

#[derive(Clone, Debug, Deserialize)]
/// Settings for the HTTP server and its database.
pub struct ServerConfig {
    pub address: String,
    pub port: u16,
    pub database_url: String,
    /// Insert the demo teams and members on start-up when the database is empty.
    #[serde(default)]
    pub seed_sample_data: bool,
}
