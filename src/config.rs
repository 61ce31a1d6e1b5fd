//! Application configuration.
//!
//! Configuration comes from environment variables, deserialized into a
//! type-safe struct with the `envy` crate. A `.env` file is honored when
//! present.

use serde::Deserialize;

/// Runtime configuration.
///
/// # Environment Variables
///
/// - `DATABASE_URL` (required): PostgreSQL connection string
/// - `SERVER_PORT` (optional): HTTP server port, defaults to 3000
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub database_url: String,

    #[serde(default = "default_port")]
    pub server_port: u16,
}

fn default_port() -> u16 {
    3000
}

impl Config {
    /// Load configuration from the process environment.
    ///
    /// Loads `.env` first when one exists, then deserializes the environment.
    /// Field names map to upper-case variables: `database_url` -> `DATABASE_URL`.
    ///
    /// # Errors
    ///
    /// Returns an error if a required variable is missing or a value cannot
    /// be parsed into its field type.
    pub fn from_env() -> Result<Self, envy::Error> {
        dotenvy::dotenv().ok();

        envy::from_env::<Config>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn port_defaults_when_unset() {
        let config: Config = envy::from_iter(vec![(
            "DATABASE_URL".to_string(),
            "postgres://localhost/ledgerbook".to_string(),
        )])
        .unwrap();

        assert_eq!(config.server_port, 3000);
        assert_eq!(config.database_url, "postgres://localhost/ledgerbook");
    }

    #[test]
    fn port_parses_when_set() {
        let config: Config = envy::from_iter(vec![
            (
                "DATABASE_URL".to_string(),
                "postgres://localhost/ledgerbook".to_string(),
            ),
            ("SERVER_PORT".to_string(), "8080".to_string()),
        ])
        .unwrap();

        assert_eq!(config.server_port, 8080);
    }

    #[test]
    fn missing_database_url_is_an_error() {
        let result = envy::from_iter::<_, Config>(vec![]);
        assert!(result.is_err());
    }
}
