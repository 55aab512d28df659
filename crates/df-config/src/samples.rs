//! Sample input locations read by the `run` command.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

fn default_database() -> PathBuf {
    PathBuf::from("data/chinook.db")
}

fn default_movies() -> PathBuf {
    PathBuf::from("movies.json")
}

fn default_people() -> PathBuf {
    PathBuf::from("person.xml")
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SampleConfig {
    /// SQLite database holding the `genres` table.
    #[serde(default = "default_database")]
    pub database: PathBuf,

    /// JSON array of movie objects.
    #[serde(default = "default_movies")]
    pub movies: PathBuf,

    /// XML document of `person` elements.
    #[serde(default = "default_people")]
    pub people: PathBuf,
}

impl Default for SampleConfig {
    fn default() -> Self {
        Self {
            database: default_database(),
            movies: default_movies(),
            people: default_people(),
        }
    }
}

impl SampleConfig {
    /// Reject empty sample paths.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` naming the first empty field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (field, path) in [
            ("samples.database", &self.database),
            ("samples.movies", &self.movies),
            ("samples.people", &self.people),
        ] {
            if path.as_os_str().is_empty() {
                return Err(ConfigError::InvalidValue {
                    field: field.to_string(),
                    reason: "path must not be empty".to_string(),
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn defaults_are_the_bundled_samples() {
        let config = SampleConfig::default();
        assert_eq!(config.database, PathBuf::from("data/chinook.db"));
        assert_eq!(config.movies, PathBuf::from("movies.json"));
        assert_eq!(config.people, PathBuf::from("person.xml"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn empty_path_is_rejected() {
        let config = SampleConfig {
            people: PathBuf::new(),
            ..SampleConfig::default()
        };

        let err = config.validate().unwrap_err();
        assert!(
            matches!(&err, ConfigError::InvalidValue { field, .. } if field == "samples.people"),
            "unexpected error: {err}"
        );
    }
}
