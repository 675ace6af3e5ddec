use crate::error::{RegenError, Result};
use bon::Builder;
use serde::{Deserialize, Serialize};
use std::{env, fs, path::Path, path::PathBuf};
use tracing::{debug, error, info, trace};

/// Name of the configuration file searched for by [`GeneratorConfig::discover`].
pub const CONFIG_FILE_NAME: &str = "regen.toml";

/// Upper bound substituted for `*`, `+` and `{n,}`.
pub const DEFAULT_REPEAT_CAP: u32 = 10;

/// Same default `regex-syntax` uses.
pub const DEFAULT_NEST_LIMIT: u32 = 250;

/// What happens to captured group values between two `generate()` calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum CapturePolicy {
    /// Every call starts with an empty capture store.
    #[default]
    Reset,
    /// Captures accumulate across calls, so a backreference that runs before
    /// its group can pick up the value from an earlier call.
    Persist,
}

/// Settings for parsing a pattern and generating from it
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, Builder)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Repetition count used in place of an unbounded upper bound
    #[builder(default = DEFAULT_REPEAT_CAP)]
    pub repeat_cap: u32,

    #[builder(default)]
    pub capture_policy: CapturePolicy,

    /// Fixed seed for the random source. `None` seeds from the OS.
    pub seed: Option<u64>,

    #[builder(default)]
    pub case_insensitive: bool,

    #[builder(default)]
    pub dot_matches_new_line: bool,

    #[builder(default)]
    pub ignore_whitespace: bool,

    /// Maximum nesting depth accepted by the parser, which also bounds the
    /// recursion depth of generation.
    #[builder(default = DEFAULT_NEST_LIMIT)]
    pub nest_limit: u32,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            repeat_cap: DEFAULT_REPEAT_CAP,
            capture_policy: CapturePolicy::default(),
            seed: None,
            case_insensitive: false,
            dot_matches_new_line: false,
            ignore_whitespace: false,
            nest_limit: DEFAULT_NEST_LIMIT,
        }
    }
}

impl GeneratorConfig {
    /// Loads configuration from an explicit TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<GeneratorConfig> {
        let path = path.as_ref();
        info!("Loading generator configuration from {:?}", path);

        let contents = fs::read_to_string(path).map_err(|e| {
            error!("Failed to read configuration file: {}", e);
            RegenError::from(e)
        })?;
        debug!("Configuration file size: {} bytes", contents.len());

        let config: GeneratorConfig = toml::from_str(&contents).map_err(|e| {
            error!("Failed to parse TOML configuration: {}", e);
            RegenError::toml(path, e)
        })?;
        config.validate()?;

        debug!(
            "Configuration loaded: repeat_cap={}, capture_policy={:?}, seeded={}",
            config.repeat_cap,
            config.capture_policy,
            config.seed.is_some()
        );
        Ok(config)
    }

    /// Searches for `regen.toml` from the current directory up to the root.
    /// Falls back to defaults when there is none.
    pub fn discover() -> Result<GeneratorConfig> {
        match Self::find_config_file()? {
            Some(path) => Self::load(path),
            None => {
                debug!("No {} found, using default configuration", CONFIG_FILE_NAME);
                Ok(GeneratorConfig::default())
            }
        }
    }

    fn find_config_file() -> Result<Option<PathBuf>> {
        let current_dir = env::current_dir()?;
        debug!("Starting config file search from: {:?}", current_dir);

        for path in current_dir.ancestors() {
            let config_path = path.join(CONFIG_FILE_NAME);
            trace!("Checking for config at: {:?}", config_path);
            if config_path.is_file() {
                info!("Found configuration file at: {:?}", config_path);
                return Ok(Some(config_path));
            }
        }
        Ok(None)
    }

    /// Renders the configuration in the same format [`GeneratorConfig::load`] reads.
    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string(self)?)
    }

    pub fn validate(&self) -> Result<()> {
        if self.repeat_cap == 0 {
            return Err(RegenError::config("repeat_cap must be at least 1"));
        }
        if self.nest_limit == 0 {
            return Err(RegenError::config("nest_limit must be at least 1"));
        }
        Ok(())
    }
}
