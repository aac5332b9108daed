//! Runtime configuration.
//!
//! Sources, later ones winning:
//!
//! 1. built-in defaults;
//! 2. `<home>/config.yaml`, if present;
//! 3. environment variables (a `.env` file in the working directory is
//!    loaded into the environment first).
//!
//! | Variable                  | Default                       | Description                         |
//! |---------------------------|-------------------------------|-------------------------------------|
//! | `FLIGHTCALL_HOME`         | `.flightcall`                 | Saved flight plan and cache buckets |
//! | `FLIGHTCALL_DISPATCH_URL` | SimBrief fetcher endpoint     | Flight-plan source                  |
//! | `FLIGHTCALL_ASSET_ORIGIN` | unset                         | Base URL of the pre-cached assets   |
//! | `FLIGHTCALL_TTS`          | `espeak`                      | Text-to-speech program              |
//! | `FLIGHTCALL_VOICE`        | first voice the engine offers | Voice name                          |

use std::path::{Path, PathBuf};

use reqwest::Url;
use serde::Deserialize;

use crate::adapters::live::filesystem::LiveFileSystem;
use crate::dispatch::DEFAULT_DISPATCH_URL;
use crate::ports::filesystem::FileSystem;

const DEFAULT_HOME: &str = ".flightcall";
const DEFAULT_TTS: &str = "espeak";
const CONFIG_FILE: &str = "config.yaml";

/// Effective configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Directory holding the saved plan and the cache.
    pub home: PathBuf,
    /// Flight-plan endpoint.
    pub dispatch_url: String,
    /// Base URL the asset manifest is resolved against.
    pub asset_origin: Option<String>,
    /// Text-to-speech program.
    pub tts_program: String,
    /// Preferred voice.
    pub voice: Option<String>,
}

/// Optional overrides read from `config.yaml`.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct FileConfig {
    dispatch_url: Option<String>,
    asset_origin: Option<String>,
    tts_program: Option<String>,
    voice: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            home: PathBuf::from(DEFAULT_HOME),
            dispatch_url: DEFAULT_DISPATCH_URL.to_string(),
            asset_origin: None,
            tts_program: DEFAULT_TTS.to_string(),
            voice: None,
        }
    }
}

impl AppConfig {
    /// Loads the configuration from `.env`, the config file and the environment.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed.
    pub fn load() -> Result<Self, String> {
        let _ = dotenvy::dotenv();
        Self::from_lookup(&LiveFileSystem, |key| std::env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary variable lookup, reading
    /// the config file through `fs`.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed.
    pub fn from_lookup(
        fs: &dyn FileSystem,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, String> {
        let var = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let mut config = Self::default();
        if let Some(home) = var("FLIGHTCALL_HOME") {
            config.home = PathBuf::from(home);
        }

        let file = read_file_config(fs, &config.home.join(CONFIG_FILE))?;
        config.dispatch_url =
            var("FLIGHTCALL_DISPATCH_URL").or(file.dispatch_url).unwrap_or(config.dispatch_url);
        config.asset_origin = var("FLIGHTCALL_ASSET_ORIGIN").or(file.asset_origin);
        config.tts_program = var("FLIGHTCALL_TTS").or(file.tts_program).unwrap_or(config.tts_program);
        config.voice = var("FLIGHTCALL_VOICE").or(file.voice);
        Ok(config)
    }

    /// Directory holding the cache buckets.
    #[must_use]
    pub fn cache_dir(&self) -> PathBuf {
        self.home.join("cache")
    }

    /// Host of the dispatch endpoint, used to route its requests network-first.
    ///
    /// An unparseable endpoint yields an empty host, which matches nothing.
    #[must_use]
    pub fn dispatch_host(&self) -> String {
        Url::parse(&self.dispatch_url)
            .ok()
            .and_then(|url| url.host_str().map(|host| host.trim_start_matches("www.").to_string()))
            .unwrap_or_default()
    }
}

fn read_file_config(fs: &dyn FileSystem, path: &Path) -> Result<FileConfig, String> {
    if !fs.exists(path) {
        return Ok(FileConfig::default());
    }
    let contents = fs
        .read_to_string(path)
        .map_err(|e| format!("Failed to read config file {}: {e}", path.display()))?;
    serde_yaml::from_str(&contents)
        .map_err(|e| format!("Failed to parse config file {}: {e}", path.display()))
}
