pub mod toml_config;

use crate::core::ConfigProvider;
use crate::domain::model::SchemaVariant;
use crate::utils::error::Result;
use crate::utils::validation::{validate_non_empty_string, validate_range, validate_url, Validate};
use clap::{Parser, ValueEnum};
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const DEFAULT_OLLAMA_ENDPOINT: &str = "http://localhost:11434";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    /// Ollama-compatible `/api/generate` endpoint.
    Ollama,
    /// Static sample plan, no model involved.
    Mock,
}

#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "fitness-planner")]
#[command(about = "HTTP service that turns fitness preferences into an AI-generated workout plan")]
pub struct ServiceConfig {
    #[arg(long, env = "FITNESS_HOST", default_value = "0.0.0.0")]
    pub host: String,

    #[arg(long, env = "FITNESS_PORT", default_value = "8000")]
    pub port: u16,

    #[arg(long, env = "COMPLETION_PROVIDER", value_enum, default_value = "ollama")]
    pub provider: ProviderKind,

    #[arg(long, env = "OLLAMA_ENDPOINT", default_value = DEFAULT_OLLAMA_ENDPOINT)]
    pub ollama_endpoint: String,

    #[arg(long, env = "OLLAMA_MODEL", default_value = "llama3")]
    pub model: String,

    #[arg(long, env = "COMPLETION_TIMEOUT_SECONDS", default_value = "120")]
    pub timeout_seconds: u64,

    #[arg(long, env = "WORKOUT_SCHEMA_VARIANT", value_enum, default_value = "days")]
    pub schema_variant: SchemaVariant,

    /// Optional TOML file whose values override flags and environment
    #[arg(long)]
    pub config: Option<String>,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON lines")]
    pub log_json: bool,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
            provider: ProviderKind::Ollama,
            ollama_endpoint: DEFAULT_OLLAMA_ENDPOINT.to_string(),
            model: "llama3".to_string(),
            timeout_seconds: 120,
            schema_variant: SchemaVariant::Days,
            config: None,
            verbose: false,
            log_json: false,
        }
    }
}

impl ServiceConfig {
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}

impl ConfigProvider for ServiceConfig {
    fn model(&self) -> &str {
        &self.model
    }

    fn schema_variant(&self) -> SchemaVariant {
        self.schema_variant
    }
}

impl Validate for ServiceConfig {
    fn validate(&self) -> Result<()> {
        validate_non_empty_string("host", &self.host)?;
        validate_range("port", self.port, 1, u16::MAX)?;
        validate_range("timeout_seconds", self.timeout_seconds, 1, 600)?;

        if self.provider == ProviderKind::Ollama {
            validate_url("ollama_endpoint", &self.ollama_endpoint)?;
            validate_non_empty_string("model", &self.model)?;
        }

        Ok(())
    }
}
