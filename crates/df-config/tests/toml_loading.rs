//! Integration tests for TOML configuration loading.
//!
//! Uses `figment::Jail` for sandboxed working directories and env vars.

use std::path::PathBuf;

use df_config::{ConfigError, DfxConfig};
use figment::{
    Figment, Jail,
    providers::{Env, Format, Serialized, Toml},
};
use pretty_assertions::assert_eq;

#[test]
fn loads_samples_from_toml() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[samples]
database = "/srv/chinook.db"
movies = "fixtures/movies.json"
people = "fixtures/person.xml"
"#,
        )?;

        let config: DfxConfig = Figment::from(Serialized::defaults(DfxConfig::default()))
            .merge(Toml::file("config.toml"))
            .extract()?;

        assert_eq!(config.samples.database, PathBuf::from("/srv/chinook.db"));
        assert_eq!(config.samples.movies, PathBuf::from("fixtures/movies.json"));
        assert_eq!(config.samples.people, PathBuf::from("fixtures/person.xml"));
        Ok(())
    });
}

#[test]
fn partial_table_keeps_other_defaults() {
    Jail::expect_with(|jail| {
        jail.create_file("config.toml", "[samples]\nmovies = \"films.json\"\n")?;

        let config: DfxConfig = Figment::from(Serialized::defaults(DfxConfig::default()))
            .merge(Toml::file("config.toml"))
            .extract()?;

        assert_eq!(config.samples.movies, PathBuf::from("films.json"));
        assert_eq!(config.samples.database, PathBuf::from("data/chinook.db"));
        assert_eq!(config.samples.people, PathBuf::from("person.xml"));
        Ok(())
    });
}

#[test]
fn env_var_overrides_toml() {
    Jail::expect_with(|jail| {
        jail.set_env("DFX_SAMPLES__DATABASE", "from-env.db");
        jail.create_file(
            "config.toml",
            r#"
[samples]
database = "from-toml.db"
people = "toml-people.xml"
"#,
        )?;

        let config: DfxConfig = Figment::from(Serialized::defaults(DfxConfig::default()))
            .merge(Toml::file("config.toml"))
            .merge(Env::prefixed("DFX_").split("__"))
            .extract()?;

        assert_eq!(config.samples.database, PathBuf::from("from-env.db"));
        assert_eq!(config.samples.people, PathBuf::from("toml-people.xml"));
        Ok(())
    });
}

/// Figment ignores unknown keys, so a typo'd variable leaves the default in place.
#[test]
fn typo_env_var_silently_ignored() {
    Jail::expect_with(|jail| {
        jail.set_env("DFX_SAMPLES__MOVEIS", "typo.json");

        let config = DfxConfig::load().expect("config loads");
        assert_eq!(config.samples.movies, PathBuf::from("movies.json"));
        Ok(())
    });
}

#[test]
fn project_file_is_picked_up_by_load() {
    Jail::expect_with(|jail| {
        std::fs::create_dir(jail.directory().join(".dfx")).expect(".dfx should create");
        jail.create_file(".dfx/config.toml", "[samples]\npeople = \"staff.xml\"\n")?;

        let config = DfxConfig::load().expect("config loads");
        assert_eq!(config.samples.people, PathBuf::from("staff.xml"));
        Ok(())
    });
}

#[test]
fn malformed_toml_is_a_figment_error() {
    Jail::expect_with(|jail| {
        std::fs::create_dir(jail.directory().join(".dfx")).expect(".dfx should create");
        jail.create_file(".dfx/config.toml", "[samples\nmovies = ")?;

        let err = DfxConfig::load().expect_err("malformed TOML should fail");
        assert!(matches!(err, ConfigError::Figment(_)), "{err}");
        Ok(())
    });
}
