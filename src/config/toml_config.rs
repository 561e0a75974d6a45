use crate::config::{ProviderKind, ServiceConfig};
use crate::domain::model::SchemaVariant;
use crate::utils::error::{PlannerError, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

static ENV_VAR: Lazy<Regex> = Lazy::new(|| Regex::new(r"\$\{([^}]+)\}").expect("env pattern is valid"));

/// On-disk configuration. Every field is optional; whatever is present
/// overrides the flag/environment value.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    pub server: Option<ServerSection>,
    pub completion: Option<CompletionSection>,
    pub plan: Option<PlanSection>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServerSection {
    pub host: Option<String>,
    pub port: Option<u16>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CompletionSection {
    pub provider: Option<ProviderKind>,
    pub endpoint: Option<String>,
    pub model: Option<String>,
    pub timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlanSection {
    pub schema_variant: Option<SchemaVariant>,
}

impl TomlConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed = Self::substitute_env_vars(content);

        toml::from_str(&processed).map_err(|e| PlannerError::Config {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replace `${VAR}` with the environment value; unset variables stay verbatim.
    fn substitute_env_vars(content: &str) -> String {
        ENV_VAR
            .replace_all(content, |caps: &regex::Captures| {
                let var_name = &caps[1];
                std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
            })
            .to_string()
    }

    pub fn apply_to(&self, config: &mut ServiceConfig) {
        if let Some(server) = &self.server {
            if let Some(host) = &server.host {
                config.host = host.clone();
            }
            if let Some(port) = server.port {
                config.port = port;
            }
        }

        if let Some(completion) = &self.completion {
            if let Some(provider) = completion.provider {
                config.provider = provider;
            }
            if let Some(endpoint) = &completion.endpoint {
                config.ollama_endpoint = endpoint.clone();
            }
            if let Some(model) = &completion.model {
                config.model = model.clone();
            }
            if let Some(timeout) = completion.timeout_seconds {
                config.timeout_seconds = timeout;
            }
        }

        if let Some(variant) = self.plan.as_ref().and_then(|p| p.schema_variant) {
            config.schema_variant = variant;
        }
    }
}
