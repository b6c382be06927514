use ::config as config_rs;
use anyhow::{Context, Result};
use config_rs::{ConfigBuilder, builder::DefaultState};
use serde::de::DeserializeOwned;

/// Layered loader: optional config file named by `FILE_VAR`, then `APP_*`
/// environment variables (`__` separates nested keys) on top.
pub trait EnvConfig: Sized + DeserializeOwned {
    const PREFIX: &'static str = "APP";
    const SEPARATOR: &'static str = "__";
    const FILE_VAR: &'static str = "TODO_SERVICE_CONFIG";

    fn validate(&self) -> Result<()> {
        Ok(())
    }

    fn sources() -> ConfigBuilder<DefaultState> {
        let mut builder = config_rs::Config::builder();
        if let Ok(path) = std::env::var(Self::FILE_VAR) {
            builder = builder.add_source(config_rs::File::with_name(&path).required(true));
        }
        builder.add_source(
            config_rs::Environment::with_prefix(Self::PREFIX)
                .prefix_separator("_")
                .separator(Self::SEPARATOR)
                .try_parsing(true),
        )
    }

    fn from_env() -> Result<Self> {
        let _ = dotenvy::dotenv();

        let settings = Self::sources()
            .build()
            .context("failed to read config sources")?;

        let cfg = settings
            .try_deserialize::<Self>()
            .context("failed to deserialize config")?;

        cfg.validate()?;
        Ok(cfg)
    }
}
