//! Runtime settings shared by the server and the admin tool.

use crate::DEFAULT_LEAGUE_YEAR;
use crate::memory_store::MemoryStore;
use crate::store::LeagueStore;
use anyhow::Result;
use clap::Args;

/// League settings. Every option can also be given through the environment or a `.env` file.
#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct LeagueConfig {
    /// Postgres connection string. Without one, data is kept in memory only
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    pub database_url: Option<String>,

    /// The season the league is running
    #[arg(long, default_value_t = DEFAULT_LEAGUE_YEAR, env = "LEAGUE_YEAR")]
    pub league_year: u32,

    /// Key the commissioner enters to record results and edit scoring
    #[arg(long, env = "COMMISSIONER_KEY", hide_env_values = true)]
    pub commissioner_key: Option<String>,
}

impl LeagueConfig {
    /// Open the store the configuration points at.
    ///
    /// # Errors
    /// Returns an error if the database cannot be reached, or if a database URL
    /// is set but database support was not compiled in.
    pub fn open_store(&self) -> Result<Box<dyn LeagueStore>> {
        match &self.database_url {
            #[cfg(feature = "database")]
            Some(url) => {
                let store = crate::db_util::PgStore::connect(url)?;
                log::info!("Connected to database.");
                Ok(Box::new(store))
            }
            #[cfg(not(feature = "database"))]
            Some(_) => Err(anyhow::anyhow!(
                "DATABASE_URL is set but this build has no database support (enable the `database` feature)."
            )),
            None => {
                log::warn!("DATABASE_URL is not set, league data will only be kept in memory.");
                Ok(Box::new(MemoryStore::new()))
            }
        }
    }
}

/// Load variables from a `.env` file in the working directory, if present.
pub fn load_dotenv() {
    if let Err(e) = dotenvy::dotenv()
        && !e.not_found()
    {
        log::warn!("Could not read .env file: {e}");
    }
}
