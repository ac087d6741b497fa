use std::env;
use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;
use std::time::Duration;
use url::Url;
use crate::error::{AppError, Result};

pub const DEFAULT_FRONT_PAGE_URL: &str = "https://ground.news";
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.0-flash-exp";
pub const DEFAULT_OPENROUTER_MODEL: &str = "deepseek/deepseek-chat-v3-0324";

/// Which LLM backend answers extraction prompts.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LlmProvider {
    Gemini { api_key: String, model: String },
    OpenRouter {
        api_key: String,
        model: String,
        /// Sent as `HTTP-Referer` / `X-Title` for OpenRouter attribution.
        site_url: Option<String>,
        site_name: Option<String>,
    },
}

#[derive(Clone, Debug)]
pub struct Config {
    pub server_addr: SocketAddr,
    pub llm: LlmProvider,
    /// Base URL of a headless rendering service. `None` falls back to a plain HTTP fetch.
    pub renderer_url: Option<String>,
    pub front_page_url: String,
    pub top_articles: usize,
    /// `None` disables the per-request timeout.
    pub request_timeout: Option<Duration>,
}

impl Config {
    pub fn load() -> Result<Self> {
        // Load environment variables from .env file if it exists
        dotenv::dotenv().ok();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        // Load server configuration with defaults
        let host = var("HOST").unwrap_or_else(|| "127.0.0.1".to_string());
        let port = var("PORT").unwrap_or_else(|| "5001".to_string());
        let port = port.parse::<u16>().map_err(|e| AppError::ConfigError(format!("Invalid port: {}", e)))?;
        let ip = IpAddr::from_str(&host).map_err(|e| AppError::ConfigError(format!("Invalid host address: {}", e)))?;

        let server_addr = SocketAddr::new(ip, port);

        let provider = var("LLM_PROVIDER").unwrap_or_else(|| "gemini".to_string());
        let llm = match provider.to_ascii_lowercase().as_str() {
            "gemini" => LlmProvider::Gemini {
                api_key: require(&var, "GEMINI_API_KEY")?,
                model: var("GEMINI_MODEL").unwrap_or_else(|| DEFAULT_GEMINI_MODEL.to_string()),
            },
            "openrouter" => LlmProvider::OpenRouter {
                api_key: require(&var, "OPENROUTER_API_KEY")?,
                model: var("OPENROUTER_MODEL").unwrap_or_else(|| DEFAULT_OPENROUTER_MODEL.to_string()),
                site_url: var("OPENROUTER_SITE_URL"),
                site_name: var("OPENROUTER_SITE_NAME"),
            },
            other => {
                return Err(AppError::ConfigError(format!("Unknown LLM provider: {}", other)));
            }
        };

        let top_articles = match var("TOP_ARTICLES") {
            Some(raw) => raw
                .parse::<usize>()
                .ok()
                .filter(|n| *n > 0)
                .ok_or_else(|| AppError::ConfigError(format!("Invalid TOP_ARTICLES: {}", raw)))?,
            None => 3,
        };

        let timeout_secs = match var("REQUEST_TIMEOUT_SECS") {
            Some(raw) => raw
                .parse::<u64>()
                .map_err(|e| AppError::ConfigError(format!("Invalid REQUEST_TIMEOUT_SECS: {}", e)))?,
            None => 300,
        };

        let renderer_url = var("RENDERER_URL").map(|raw| checked_url("RENDERER_URL", raw)).transpose()?;
        let front_page_url = checked_url(
            "FRONT_PAGE_URL",
            var("FRONT_PAGE_URL").unwrap_or_else(|| DEFAULT_FRONT_PAGE_URL.to_string()),
        )?;

        Ok(Config {
            server_addr,
            llm,
            renderer_url,
            front_page_url,
            top_articles,
            request_timeout: (timeout_secs > 0).then(|| Duration::from_secs(timeout_secs)),
        })
    }
}

fn require(var: &impl Fn(&str) -> Option<String>, key: &str) -> Result<String> {
    var(key).ok_or_else(|| AppError::ConfigError(format!("{} must be set", key)))
}

fn checked_url(key: &str, raw: String) -> Result<String> {
    Url::parse(&raw).map_err(|e| AppError::ConfigError(format!("Invalid {}: {}", key, e)))?;
    Ok(raw)
}
