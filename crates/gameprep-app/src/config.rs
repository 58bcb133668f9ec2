// Configuration loading and parsing (scout.toml).

use gameprep_baseball::{HomeTeam, SeasonFilter};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

const CONFIG_DIR: &str = "config";
const DEFAULTS_DIR: &str = "defaults";
const SCOUT_FILE: &str = "scout.toml";

fn scout_path(base_dir: &Path) -> PathBuf {
    base_dir.join(CONFIG_DIR).join(SCOUT_FILE)
}

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("failed to parse config file {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("validation error for field `{field}`: {message}")]
    ValidationError { field: String, message: String },

    #[error("failed to initialize config from defaults: {message}")]
    DefaultsCopyError { message: String },
}

// ---------------------------------------------------------------------------
// Top-level assembled Config
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct Config {
    pub team: TeamConfig,
    pub data: DataConfig,
    pub season: SeasonFilter,
    pub small_sample_pitches: usize,
    pub llm: LlmConfig,
}

impl Config {
    pub fn home_team(&self) -> HomeTeam {
        HomeTeam::new(self.team.name.clone(), &self.team.marker)
    }
}

// ---------------------------------------------------------------------------
// scout.toml structs
// ---------------------------------------------------------------------------

/// Raw deserialization target for the entire scout.toml file.
#[derive(Debug, Clone, Deserialize)]
struct ScoutFile {
    team: TeamConfig,
    data: DataConfig,
    #[serde(default)]
    analysis: AnalysisSection,
    #[serde(default)]
    llm: LlmConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TeamConfig {
    pub name: String,
    pub marker: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DataConfig {
    pub pitches: String,
}

#[derive(Debug, Clone, Deserialize)]
struct AnalysisSection {
    #[serde(default = "default_season")]
    season: String,
    #[serde(default = "default_small_sample")]
    small_sample_pitches: usize,
}

impl Default for AnalysisSection {
    fn default() -> Self {
        Self {
            season: default_season(),
            small_sample_pitches: default_small_sample(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LlmConfig {
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            model: default_model(),
            max_tokens: default_max_tokens(),
        }
    }
}

fn default_season() -> String {
    "all".into()
}

fn default_small_sample() -> usize {
    30
}

fn default_model() -> String {
    gameprep_llm::DEFAULT_MODEL.into()
}

fn default_max_tokens() -> u32 {
    gameprep_llm::DEFAULT_MAX_TOKENS
}

// ---------------------------------------------------------------------------
// Loading logic
// ---------------------------------------------------------------------------

/// Load and validate `config/scout.toml` relative to `base_dir`.
///
/// Does not copy defaults; `load_config()` does that first.
pub fn load_config_from(base_dir: &Path) -> Result<Config, ConfigError> {
    let path = scout_path(base_dir);
    let text = read_file(&path)?;
    let file: ScoutFile = toml::from_str(&text).map_err(|e| ConfigError::ParseError {
        path: path.clone(),
        source: e,
    })?;

    let season = file
        .analysis
        .season
        .parse::<SeasonFilter>()
        .map_err(|e| ConfigError::ValidationError {
            field: "analysis.season".into(),
            message: e.to_string(),
        })?;

    let config = Config {
        team: file.team,
        data: file.data,
        season,
        small_sample_pitches: file.analysis.small_sample_pitches,
        llm: file.llm,
    };

    validate(&config)?;

    Ok(config)
}

/// Make sure `config/scout.toml` exists, seeding it from
/// `defaults/scout.toml` on first run.
///
/// Returns the path written, or `None` when the user's file was already
/// there. Only `scout.toml` is ever copied, so `.example` templates sitting
/// next to it in `defaults/` stay where they are.
pub fn ensure_scout_config(base_dir: &Path) -> Result<Option<PathBuf>, ConfigError> {
    let target = scout_path(base_dir);
    if target.is_file() {
        return Ok(None);
    }

    let source = base_dir.join(DEFAULTS_DIR).join(SCOUT_FILE);
    if !source.is_file() {
        return Err(ConfigError::DefaultsCopyError {
            message: format!(
                "no {CONFIG_DIR}/{SCOUT_FILE} or {DEFAULTS_DIR}/{SCOUT_FILE} in {}; \
                 pass --config-dir pointing at a scouting setup",
                base_dir.display()
            ),
        });
    }

    let config_dir = base_dir.join(CONFIG_DIR);
    fs::create_dir_all(&config_dir).map_err(|e| ConfigError::DefaultsCopyError {
        message: format!("failed to create {}: {e}", config_dir.display()),
    })?;
    fs::copy(&source, &target).map_err(|e| ConfigError::DefaultsCopyError {
        message: format!("failed to copy {} to {}: {e}", source.display(), target.display()),
    })?;

    info!("Seeded {} from {}", target.display(), source.display());
    Ok(Some(target))
}

/// Seed `config/scout.toml` if needed, then load.
pub fn load_config(base_dir: &Path) -> Result<Config, ConfigError> {
    ensure_scout_config(base_dir)?;
    load_config_from(base_dir)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn read_file(path: &Path) -> Result<String, ConfigError> {
    fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
        path: path.to_path_buf(),
    })
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

fn validate(config: &Config) -> Result<(), ConfigError> {
    let required: &[(&str, &str)] = &[
        ("team.name", config.team.name.as_str()),
        ("team.marker", config.team.marker.as_str()),
        ("data.pitches", config.data.pitches.as_str()),
        ("llm.model", config.llm.model.as_str()),
    ];
    for (name, val) in required {
        if val.trim().is_empty() {
            return Err(ConfigError::ValidationError {
                field: name.to_string(),
                message: "must not be empty".into(),
            });
        }
    }

    if config.small_sample_pitches == 0 {
        return Err(ConfigError::ValidationError {
            field: "analysis.small_sample_pitches".into(),
            message: "must be > 0".into(),
        });
    }

    if config.llm.max_tokens == 0 {
        return Err(ConfigError::ValidationError {
            field: "llm.max_tokens".into(),
            message: "must be > 0".into(),
        });
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
