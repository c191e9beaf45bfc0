use figment::providers::{Env, Serialized};
use figment::Figment;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::LazyLock;

/// Runtime configuration, overridable through `PAD_`-prefixed environment
/// variables (e.g. `PAD_DATA_DIR=/var/lib/sqlitepad`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Address the HTTP server binds to.
    pub listen_addr: String,
    /// Directory scanned for `*.db` files; also where new databases land.
    pub data_dir: PathBuf,
    /// Bundled sample-case database.
    pub sample_db: PathBuf,
    /// Bundled ERD image for the sample case.
    pub sample_erd: PathBuf,
    pub loglevel: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            listen_addr: "0.0.0.0:8000".to_string(),
            data_dir: PathBuf::from("."),
            sample_db: PathBuf::from("assets/stream.db"),
            sample_erd: PathBuf::from("assets/OnlineMediaSubscription.png"),
            loglevel: "info".to_string(),
        }
    }
}

pub static CONFIG: LazyLock<Config> = LazyLock::new(|| {
    Figment::from(Serialized::defaults(Config::default()))
        .merge(Env::prefixed("PAD_"))
        .extract()
        .expect("invalid configuration")
});
