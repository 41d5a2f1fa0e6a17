use anyhow::Result;
use config::Config;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub logging: LoggingConfig,
    pub transform: TransformConfig,
    pub session: SessionConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
}

/// Settings for the XML response transform filter.
#[derive(Debug, Clone, Deserialize)]
pub struct TransformConfig {
    pub enabled: bool,
    /// Content types eligible for transformation.
    pub content_types: Vec<String>,
}

/// Settings for the per-session serialization filter.
#[derive(Debug, Clone, Deserialize)]
pub struct SessionConfig {
    pub enabled: bool,
    pub cookie_name: String,
    pub header_name: String,
}

impl Settings {
    /// ## Summary
    /// Loads configuration from `.env` file and environment variables into a `Settings`.
    /// Environment variables take precedence over `.env` file values.
    ///
    /// ## Errors
    /// Returns an error if building the configuration or deserializing it fails.
    pub fn load() -> Result<Self> {
        Ok(Config::builder()
            .set_default("logging.level", "debug")?
            .set_default("transform.enabled", true)?
            .set_default(
                "transform.content_types",
                vec!["text/xml", "application/xml"],
            )?
            .set_default("session.enabled", true)?
            .set_default("session.cookie_name", "QSESSION")?
            .set_default("session.header_name", "X-Session-Id")?
            // Env file
            .add_source(
                config::Environment::default()
                    .convert_case(config::Case::Snake)
                    .separator("_")
                    .ignore_empty(true)
                    .try_parsing(true),
            )
            // TOML file
            .add_source(config::File::with_name("config.toml").required(false))
            .build()?
            .try_deserialize::<Settings>()?)
    }

    /// ## Summary
    /// Loads configuration, first reading a `.env` file if one exists.
    ///
    /// ## Errors
    /// Returns an error if configuration loading fails. A missing `.env`
    /// file is not an error.
    pub fn load_with_dotenv() -> Result<Self> {
        // Missing .env is fine; other IO errors are not.
        match dotenvy::dotenv() {
            Ok(_) => {}
            Err(e) if e.not_found() => {}
            Err(e) => return Err(e.into()),
        }
        Self::load()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_load() {
        let settings = Settings::load().expect("defaults should load");
        assert!(settings.transform.enabled);
        assert_eq!(settings.session.cookie_name, "QSESSION");
        assert!(
            settings
                .transform
                .content_types
                .iter()
                .any(|ct| ct == "application/xml")
        );
    }
}
