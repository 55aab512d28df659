//! `.env` values flow through figment's full provider chain.
//!
//! `dotenvy` writes straight into the process environment and `figment::Jail`
//! only restores variables set through `Jail::set_env`, so every `.env`
//! scenario runs inside this single test, ordered so earlier steps never see
//! variables loaded by later ones.

use std::path::PathBuf;

use df_config::DfxConfig;
use figment::Jail;
use pretty_assertions::assert_eq;

#[test]
fn dotenv_layers_under_process_env() {
    Jail::expect_with(|jail| {
        // No .env yet: defaults apply.
        let config = DfxConfig::load_with_dotenv().expect("config loads without .env");
        assert_eq!(config.samples.movies, PathBuf::from("movies.json"));
        assert_eq!(config.samples.people, PathBuf::from("person.xml"));

        jail.set_env("DFX_SAMPLES__PEOPLE", "from-env.xml");
        jail.create_file(
            ".env",
            "DFX_SAMPLES__MOVIES=dotenv-movies.json\n\
             DFX_SAMPLES__DATABASE=dotenv.db\n\
             DFX_SAMPLES__PEOPLE=from-dotenv.xml\n",
        )?;

        let config = DfxConfig::load_with_dotenv().expect("config loads with .env");
        assert_eq!(config.samples.movies, PathBuf::from("dotenv-movies.json"));
        assert_eq!(config.samples.database, PathBuf::from("dotenv.db"));
        assert_eq!(config.samples.people, PathBuf::from("from-env.xml"));
        Ok(())
    });
}
