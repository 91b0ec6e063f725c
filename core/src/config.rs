use crate::*;

impl GameConfig {
    /// Parse a config from a TOML table, missing keys fall back to [`GameConfig::default`].
    ///
    /// ```toml
    /// width = 16
    /// height = 16
    /// mines = 40
    /// placer = "random"
    /// seed = 7
    /// ```
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let config: GameConfig =
            toml::from_str(source).map_err(|err| GameError::Config(err.message().to_owned()))?;
        config.validate()?;
        log::debug!("Loaded config: {:?}", config);
        Ok(config)
    }

    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string(self).map_err(|err| GameError::Config(err.to_string()))
    }
}
