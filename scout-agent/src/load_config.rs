//! Loads and adapts a static YAML config — including environment secret
//! injection — into the runnable agent configuration.
//!
//! This module is the only place where untrusted YAML is parsed and mapped to
//! typed internal structs. Secrets never live in the file: the backend token
//! is named by env var and read here, and `BACKEND_URL` in the environment
//! overrides the configured backend URL.

use anyhow::Result;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{error, info};

use scout_agent_core::backend::BACKEND_URL_PLACEHOLDER;

const DEFAULT_CONNECTORS: &[&str] = &["github", "huggingface", "arxiv", "benchmarks", "blogs"];
const DEFAULT_AUTH_TOKEN_ENV: &str = "AGENT_AUTH_TOKEN";

/// Fully resolved agent configuration (file + environment).
#[derive(Debug)]
pub struct AgentConfig {
    pub output_dir: PathBuf,
    pub csv_file: String,
    pub connectors: Vec<String>,
    pub backend_url: String,
    pub auth_token: String,
}

#[derive(Debug, Deserialize)]
struct RawConfig {
    output_dir: PathBuf,
    #[serde(default = "default_csv_file")]
    csv_file: String,
    #[serde(default)]
    connectors: Vec<String>,
    #[serde(default)]
    backend: BackendSection,
}

#[derive(Debug, Default, Deserialize)]
struct BackendSection {
    url: Option<String>,
    auth_token_env: Option<String>,
}

fn default_csv_file() -> String {
    "models.csv".to_string()
}

/// Loads a static YAML config file (no secrets) and injects required env vars
/// for the backend URL and bearer token.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<AgentConfig> {
    let path_ref = path.as_ref();
    info!(config_path = ?path_ref, "Loading configuration from file");

    let config_content = match fs::read_to_string(path_ref) {
        Ok(content) => content,
        Err(e) => {
            error!(error = ?e, config_path = ?path_ref, "Failed to read config file");
            return Err(anyhow::anyhow!(
                "Failed to read config file {:?}: {}",
                path_ref,
                e
            ));
        }
    };

    let raw: RawConfig = match serde_yaml::from_str(&config_content) {
        Ok(conf) => {
            info!(config_path = ?path_ref, "Parsed config YAML successfully");
            conf
        }
        Err(e) => {
            error!(error = ?e, config_path = ?path_ref, "Failed to parse config YAML");
            return Err(anyhow::anyhow!("Failed to parse config YAML: {e}"));
        }
    };

    let connectors = if raw.connectors.is_empty() {
        DEFAULT_CONNECTORS.iter().map(|s| s.to_string()).collect()
    } else {
        raw.connectors
    };

    // Environment beats file; the placeholder means "transmission disabled".
    let backend_url = std::env::var("BACKEND_URL")
        .ok()
        .or(raw.backend.url)
        .unwrap_or_else(|| BACKEND_URL_PLACEHOLDER.to_string());

    let token_env = raw
        .backend
        .auth_token_env
        .unwrap_or_else(|| DEFAULT_AUTH_TOKEN_ENV.to_string());
    let auth_token = std::env::var(&token_env).unwrap_or_default();
    if auth_token.is_empty() && backend_url != BACKEND_URL_PLACEHOLDER {
        info!(
            token_env,
            "Backend configured but no auth token in environment; requests will be unauthenticated"
        );
    }

    Ok(AgentConfig {
        output_dir: raw.output_dir,
        csv_file: raw.csv_file,
        connectors,
        backend_url,
        auth_token,
    })
}
