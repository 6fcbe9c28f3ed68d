//! Layered configuration for the catalogue backend.
//!
//! Sources, later ones overriding earlier ones:
//! 1. Bundled defaults (include_str! from heritage.toml)
//! 2. `~/.config/heritage/heritage.toml`
//! 3. `./heritage.toml` (or an explicit path)
//! 4. `HERITAGE_*` environment variables, `__` between nested keys
//!
//! The resulting value is built once at startup and handed to the components
//! that need it; nothing below the binary reads the environment.

use derive_getters::Getters;
use heritage_error::{ConfigError, HeritageResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, instrument};

const DEFAULT_CONFIG: &str = include_str!("../../../heritage.toml");

/// Where collection files live.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Getters, derive_setters::Setters)]
#[setters(prefix = "with_", into)]
pub struct StoreConfig {
    /// Directory holding one `<collection>.json` file per collection
    data_dir: PathBuf,
}

/// Media ingestion settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Getters, derive_setters::Setters)]
#[setters(prefix = "with_", into)]
pub struct MediaConfig {
    /// Directory receiving variant files
    output_dir: PathBuf,
    /// Storage-relative prefix used in returned paths
    public_prefix: String,
    /// Lossy WEBP quality, 0 to 100
    quality: f32,
    /// Largest upload accepted by the caller
    max_upload_bytes: usize,
}

/// Log output settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters, derive_setters::Setters)]
#[setters(prefix = "with_", into)]
pub struct LogConfig {
    /// Filter directive used when `RUST_LOG` is unset
    level: String,
    /// Emit JSON lines instead of human-readable output
    json: bool,
}

/// Top-level configuration.
///
/// # Example
///
/// ```no_run
/// use heritage_core::HeritageConfig;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let config = HeritageConfig::load()?;
/// println!("collections in {}", config.store().data_dir().display());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Getters, derive_setters::Setters)]
#[setters(prefix = "with_")]
pub struct HeritageConfig {
    /// Document store settings
    store: StoreConfig,
    /// Media pipeline settings
    media: MediaConfig,
    /// Logging settings
    log: LogConfig,
    /// Base URL prepended to relative media paths when exposing them
    #[serde(default, skip_serializing_if = "Option::is_none")]
    public_base_url: Option<String>,
}

impl HeritageConfig {
    /// The bundled defaults alone.
    pub fn bundled() -> Result<Self, ConfigError> {
        config::Config::builder()
            .add_source(config::File::from_str(
                DEFAULT_CONFIG,
                config::FileFormat::Toml,
            ))
            .build()
            .and_then(|c| c.try_deserialize())
            .map_err(|e| ConfigError::new(format!("Bundled configuration is invalid: {}", e)))
    }

    /// Load with the full precedence chain, reading `./heritage.toml` if present.
    #[instrument]
    pub fn load() -> HeritageResult<Self> {
        Self::load_from(None)
    }

    /// Load with the full precedence chain, substituting `path` for `./heritage.toml`.
    ///
    /// An explicit path must exist; the implicit files are optional.
    #[instrument]
    pub fn load_from(path: Option<&Path>) -> HeritageResult<Self> {
        debug!("Loading configuration with precedence: env > file > home dir > bundled defaults");

        let mut builder = config::Config::builder().add_source(config::File::from_str(
            DEFAULT_CONFIG,
            config::FileFormat::Toml,
        ));

        if let Some(home) = dirs::home_dir() {
            let home_config = home.join(".config/heritage/heritage.toml");
            builder = builder.add_source(config::File::from(home_config).required(false));
        }

        builder = match path {
            Some(path) => builder.add_source(config::File::from(path).required(true)),
            None => builder.add_source(config::File::with_name("heritage").required(false)),
        };

        builder = builder.add_source(
            config::Environment::with_prefix("HERITAGE")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config: Self = builder
            .build()
            .map_err(|e| ConfigError::new(format!("Failed to build configuration: {}", e)))?
            .try_deserialize()
            .map_err(|e| ConfigError::new(format!("Failed to parse configuration: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    /// Check value ranges the type system cannot express.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let quality = self.media.quality;
        if !(0.0..=100.0).contains(&quality) {
            return Err(ConfigError::new(format!(
                "media.quality must be within 0..=100, got {}",
                quality
            )));
        }
        if self.media.max_upload_bytes == 0 {
            return Err(ConfigError::new("media.max_upload_bytes must be positive"));
        }
        if self.media.public_prefix.trim_matches('/').is_empty() {
            return Err(ConfigError::new("media.public_prefix must not be empty"));
        }
        Ok(())
    }
}
