use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;

use openai_api_rs::v1::common::GPT4_O;

/// Free plan upload limit; override per pricing tier with `QUOTE_MAX_FILES`.
pub const DEFAULT_MAX_FILES: usize = 1;

pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 25 * 1024 * 1024;

pub const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub openai_api_key: String,
    pub openai_org_id: Option<String>,
    pub openai_model: String,
    pub openai_base_url: String,
    pub max_files: usize,
    pub max_upload_bytes: usize,
    pub bind_addr: SocketAddr,
    pub feedback_log_path: Option<PathBuf>,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, String> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from any key lookup, treating blank values as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, String>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let openai_api_key =
            get("OPENAI_API_KEY").ok_or_else(|| "OPENAI_API_KEY: not set".to_string())?;

        let max_files = match get("QUOTE_MAX_FILES") {
            Some(raw) => parse_positive("QUOTE_MAX_FILES", &raw)?,
            None => DEFAULT_MAX_FILES,
        };

        let max_upload_bytes = match get("QUOTE_MAX_UPLOAD_BYTES") {
            Some(raw) => parse_positive("QUOTE_MAX_UPLOAD_BYTES", &raw)?,
            None => DEFAULT_MAX_UPLOAD_BYTES,
        };

        let bind_raw = get("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = bind_raw
            .parse::<SocketAddr>()
            .map_err(|e| format!("BIND_ADDR: {}", e))?;

        Ok(Self {
            openai_api_key,
            openai_org_id: get("OPENAI_ORG_ID"),
            openai_model: get("OPENAI_MODEL").unwrap_or_else(|| GPT4_O.to_string()),
            openai_base_url: get("OPENAI_BASE_URL")
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or_else(|| DEFAULT_OPENAI_BASE_URL.to_string()),
            max_files,
            max_upload_bytes,
            bind_addr,
            feedback_log_path: get("FEEDBACK_LOG_PATH").map(PathBuf::from),
        })
    }
}

fn parse_positive(key: &str, raw: &str) -> Result<usize, String> {
    match raw.trim().parse::<usize>() {
        Ok(0) => Err(format!("{}: must be greater than zero", key)),
        Ok(n) => Ok(n),
        Err(e) => Err(format!("{}: {}", key, e)),
    }
}
