use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;
use tracing::warn;

pub const DEFAULT_BASE_URL: &str = "https://reqres.in/api";
pub const DEFAULT_PER_PAGE: u32 = 12;
pub const DEFAULT_DEBOUNCE_MS: u64 = 300;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub base_url: String,
    pub per_page: u32,
    pub debounce_ms: u64,
    pub seed: Option<u64>,
    pub no_tui: bool,
    pub search: Option<String>,
    pub http: HttpConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HttpConfig {
    pub connect_timeout_ms: u64,
    pub request_timeout_ms: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            connect_timeout_ms: 5_000,
            request_timeout_ms: 30_000,
        }
    }
}

/// Optional overrides read from the config file. Everything is
/// optional; missing keys fall through to env vars and defaults.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct FileConfig {
    pub base_url: Option<String>,
    pub per_page: Option<u32>,
    pub debounce_ms: Option<u64>,
    pub http: Option<PartialHttpConfig>,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct PartialHttpConfig {
    pub connect_timeout_ms: Option<u64>,
    pub request_timeout_ms: Option<u64>,
}

impl AppConfig {
    /// Resolution order: CLI flag > env var > config file > default.
    pub fn from_cli(cli: crate::Cli) -> Result<Self> {
        let file_cfg = load_global_config().unwrap_or_default();

        let base_url = cli
            .base_url
            .or_else(|| std::env::var("UDASH_BASE_URL").ok())
            .or(file_cfg.base_url)
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let per_page = cli
            .per_page
            .or_else(|| {
                std::env::var("UDASH_PER_PAGE")
                    .ok()
                    .and_then(|s| s.parse().ok())
            })
            .or(file_cfg.per_page)
            .unwrap_or(DEFAULT_PER_PAGE);
        let debounce_ms = file_cfg.debounce_ms.unwrap_or(DEFAULT_DEBOUNCE_MS);
        let http = resolve_http(file_cfg.http);

        Ok(Self {
            base_url,
            per_page,
            debounce_ms,
            seed: cli.seed,
            no_tui: cli.no_tui,
            search: cli.search,
            http,
        })
    }
}

pub fn resolve_http(partial: Option<PartialHttpConfig>) -> HttpConfig {
    let defaults = HttpConfig::default();
    match partial {
        Some(p) => HttpConfig {
            connect_timeout_ms: p.connect_timeout_ms.unwrap_or(defaults.connect_timeout_ms),
            request_timeout_ms: p.request_timeout_ms.unwrap_or(defaults.request_timeout_ms),
        },
        None => defaults,
    }
}

/// Load a config file; a missing file is not an error and yields the
/// empty overrides.
pub fn load_config_at(path: &Path) -> Result<FileConfig> {
    if !path.exists() {
        return Ok(FileConfig::default());
    }
    let content =
        fs::read_to_string(path).with_context(|| format!("read config file {}", path.display()))?;
    let cfg: FileConfig = toml::from_str(&content)
        .with_context(|| format!("parse config file {}", path.display()))?;
    Ok(cfg)
}

fn load_global_config() -> Option<FileConfig> {
    let path = dirs::config_dir()?.join("udash").join("config.toml");
    match load_config_at(&path) {
        Ok(cfg) => Some(cfg),
        Err(e) => {
            warn!("ignoring config file {}: {e:#}", path.display());
            None
        }
    }
}
