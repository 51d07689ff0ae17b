//! Run settings: endpoints, destination protocol, and pacing.
//!
//! Resolved from environment variables, then `~/.config/shelf-sync/settings.toml`,
//! then built-in defaults. CLI flags are applied on top by the caller.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tokio::time::Duration;

use crate::error::SyncError;

pub const DEFAULT_PRICECHARTING_URL: &str = "https://www.pricecharting.com";
pub const DEFAULT_BACKLOGGERY_URL: &str = "https://backloggery.com";
pub const DEFAULT_MAX_PAGES: usize = 500;
pub const DEFAULT_SUBMIT_DELAY: Duration = Duration::from_millis(1000);
pub const DEFAULT_LOGIN_TIMEOUT: Duration = Duration::from_millis(5000);

const ENV_PRICECHARTING_URL: &str = "PRICECHARTING_URL";
const ENV_BACKLOGGERY_URL: &str = "BACKLOGGERY_URL";
const ENV_PROTOCOL: &str = "BACKLOGGERY_PROTOCOL";
const ENV_USERNAME: &str = "BACKLOGGERY_USERNAME";

/// How the existing Backloggery library is read.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LibraryProtocol {
    /// Unauthenticated JSON endpoint.
    #[default]
    Api,
    /// Logged-in HTML listing pages.
    Ui,
}

impl std::fmt::Display for LibraryProtocol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Api => write!(f, "api"),
            Self::Ui => write!(f, "ui"),
        }
    }
}

impl std::str::FromStr for LibraryProtocol {
    type Err = SyncError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "api" => Ok(Self::Api),
            "ui" | "web" => Ok(Self::Ui),
            other => Err(SyncError::Config(format!(
                "Unknown library protocol '{other}' (expected 'api' or 'ui')"
            ))),
        }
    }
}

/// Fully resolved settings for one run.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub pricecharting_url: String,
    pub backloggery_url: String,
    pub protocol: LibraryProtocol,
    pub username: Option<String>,
    /// Ceiling on pages followed by either paginated fetch.
    pub max_pages: usize,
    /// Pause between add-game submissions.
    pub submit_delay: Duration,
    /// How long a login may take to leave the login page.
    pub login_timeout: Duration,
    pub dedupe: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            pricecharting_url: DEFAULT_PRICECHARTING_URL.to_string(),
            backloggery_url: DEFAULT_BACKLOGGERY_URL.to_string(),
            protocol: LibraryProtocol::default(),
            username: None,
            max_pages: DEFAULT_MAX_PAGES,
            submit_delay: DEFAULT_SUBMIT_DELAY,
            login_timeout: DEFAULT_LOGIN_TIMEOUT,
            dedupe: false,
        }
    }
}

/// Where a setting's value came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SettingSource {
    EnvVar(&'static str),
    ConfigFile,
    Default,
}

impl std::fmt::Display for SettingSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EnvVar(var) => write!(f, "env ${}", var),
            Self::ConfigFile => write!(f, "config file"),
            Self::Default => write!(f, "default"),
        }
    }
}

/// Provenance of each overridable field.
#[derive(Debug)]
pub struct SettingSources {
    pub pricecharting_url: SettingSource,
    pub backloggery_url: SettingSource,
    pub protocol: SettingSource,
    pub username: SettingSource,
}

/// TOML file format.
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct SettingsFile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pricecharting: Option<PriceChartingSection>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub backloggery: Option<BackloggerySection>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sync: Option<SyncSection>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct PriceChartingSection {
    pub base_url: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct BackloggerySection {
    pub base_url: Option<String>,
    pub protocol: Option<LibraryProtocol>,
    pub username: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct SyncSection {
    pub max_pages: Option<usize>,
    pub submit_delay_ms: Option<u64>,
    pub login_timeout_ms: Option<u64>,
    pub dedupe: Option<bool>,
}

impl Settings {
    /// Load from the process environment and the default settings file.
    pub fn load() -> Result<Self, SyncError> {
        let file = match settings_path() {
            Some(path) => read_settings_file(&path)?,
            None => None,
        };
        Self::resolve(file.as_ref(), |var| std::env::var(var).ok())
    }

    /// Resolve settings from an already-parsed file and an environment lookup.
    pub fn resolve(
        file: Option<&SettingsFile>,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, SyncError> {
        let defaults = Self::default();
        let pc = file.and_then(|f| f.pricecharting.as_ref());
        let bl = file.and_then(|f| f.backloggery.as_ref());
        let sync = file.and_then(|f| f.sync.as_ref());

        let protocol = match env(ENV_PROTOCOL) {
            Some(raw) => raw.parse()?,
            None => bl.and_then(|b| b.protocol).unwrap_or(defaults.protocol),
        };

        let max_pages = sync
            .and_then(|s| s.max_pages)
            .unwrap_or(defaults.max_pages);
        if max_pages == 0 {
            return Err(SyncError::Config("sync.max_pages must be at least 1".to_string()));
        }

        Ok(Self {
            pricecharting_url: env(ENV_PRICECHARTING_URL)
                .or_else(|| pc.and_then(|p| p.base_url.clone()))
                .unwrap_or(defaults.pricecharting_url),
            backloggery_url: env(ENV_BACKLOGGERY_URL)
                .or_else(|| bl.and_then(|b| b.base_url.clone()))
                .unwrap_or(defaults.backloggery_url),
            protocol,
            username: env(ENV_USERNAME)
                .or_else(|| bl.and_then(|b| b.username.clone()))
                .filter(|u| !u.is_empty()),
            max_pages,
            submit_delay: sync
                .and_then(|s| s.submit_delay_ms)
                .map(Duration::from_millis)
                .unwrap_or(defaults.submit_delay),
            login_timeout: sync
                .and_then(|s| s.login_timeout_ms)
                .map(Duration::from_millis)
                .unwrap_or(defaults.login_timeout),
            dedupe: sync.and_then(|s| s.dedupe).unwrap_or(defaults.dedupe),
        })
    }

    /// Apply CLI overrides on top of resolved settings.
    pub fn with_overrides(
        mut self,
        username: Option<String>,
        protocol: Option<LibraryProtocol>,
        dedupe: bool,
    ) -> Self {
        if let Some(u) = username {
            self.username = Some(u);
        }
        if let Some(p) = protocol {
            self.protocol = p;
        }
        if dedupe {
            self.dedupe = true;
        }
        self
    }

    /// Settings in file form, omitting values that equal the defaults.
    pub fn to_file(&self) -> SettingsFile {
        let defaults = Self::default();
        let differs = |a: &str, b: &str| (a != b).then(|| a.to_string());

        SettingsFile {
            pricecharting: differs(&self.pricecharting_url, &defaults.pricecharting_url)
                .map(|base_url| PriceChartingSection {
                    base_url: Some(base_url),
                }),
            backloggery: Some(BackloggerySection {
                base_url: differs(&self.backloggery_url, &defaults.backloggery_url),
                protocol: Some(self.protocol),
                username: self.username.clone(),
            }),
            sync: Some(SyncSection {
                max_pages: (self.max_pages != defaults.max_pages).then_some(self.max_pages),
                submit_delay_ms: (self.submit_delay != defaults.submit_delay)
                    .then(|| self.submit_delay.as_millis() as u64),
                login_timeout_ms: (self.login_timeout != defaults.login_timeout)
                    .then(|| self.login_timeout.as_millis() as u64),
                dedupe: self.dedupe.then_some(true),
            }),
        }
    }
}

/// Path to the settings file: `~/.config/shelf-sync/settings.toml`.
pub fn settings_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("shelf-sync").join("settings.toml"))
}

/// Read and parse a settings file. A missing file is not an error; a
/// malformed one is.
pub fn read_settings_file(path: &Path) -> Result<Option<SettingsFile>, SyncError> {
    let content = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e.into()),
    };
    toml::from_str(&content)
        .map(Some)
        .map_err(|e| SyncError::Config(format!("Invalid {}: {}", path.display(), e)))
}

/// Write settings to `path`, creating parent directories as needed.
pub fn save_to_file(settings: &Settings, path: &Path) -> Result<(), SyncError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let toml_str = toml::to_string_pretty(&settings.to_file())
        .map_err(|e| SyncError::Config(format!("Failed to serialize settings: {}", e)))?;

    let tmp = path.with_extension("toml.tmp");
    std::fs::write(&tmp, toml_str)?;
    std::fs::rename(&tmp, path)?;
    Ok(())
}

/// Determine where each overridable field is coming from.
pub fn setting_sources() -> SettingSources {
    let file = settings_path()
        .and_then(|p| read_settings_file(&p).ok())
        .flatten();
    sources_for(file.as_ref(), |var| std::env::var(var).ok())
}

fn sources_for(
    file: Option<&SettingsFile>,
    env: impl Fn(&str) -> Option<String>,
) -> SettingSources {
    let bl = file.and_then(|f| f.backloggery.as_ref());
    let pick = |var: &'static str, in_file: bool| {
        if env(var).is_some() {
            SettingSource::EnvVar(var)
        } else if in_file {
            SettingSource::ConfigFile
        } else {
            SettingSource::Default
        }
    };

    SettingSources {
        pricecharting_url: pick(
            ENV_PRICECHARTING_URL,
            file.and_then(|f| f.pricecharting.as_ref())
                .and_then(|p| p.base_url.as_ref())
                .is_some(),
        ),
        backloggery_url: pick(
            ENV_BACKLOGGERY_URL,
            bl.and_then(|b| b.base_url.as_ref()).is_some(),
        ),
        protocol: pick(ENV_PROTOCOL, bl.and_then(|b| b.protocol).is_some()),
        username: pick(ENV_USERNAME, bl.and_then(|b| b.username.as_ref()).is_some()),
    }
}

#[cfg(test)]
#[path = "tests/settings_tests.rs"]
mod tests;
