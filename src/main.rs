use anyhow::Context;
use clap::Parser;
use fitness_planner::app::{router, server};
use fitness_planner::config::toml_config::TomlConfig;
use fitness_planner::utils::{logger, validation::Validate};
use fitness_planner::{MockCompletion, OllamaClient, ProviderKind, ServiceConfig, WorkoutPlanner};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let mut config = ServiceConfig::parse();

    if config.log_json {
        logger::init_json_logger(config.verbose);
    } else {
        logger::init_service_logger(config.verbose);
    }

    tracing::info!("Starting fitness-planner");

    if let Some(path) = config.config.clone() {
        tracing::info!("📁 Loading configuration from: {}", path);
        let file = TomlConfig::from_file(&path)
            .with_context(|| format!("failed to load config file '{}'", path))?;
        file.apply_to(&mut config);
    }

    if config.verbose {
        tracing::debug!("Service config: {:?}", config);
    }

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e);
        std::process::exit(1);
    }

    let listener = server::bind(&config.bind_address()).await?;

    match config.provider {
        ProviderKind::Ollama => {
            tracing::info!(
                "🤖 Using completion endpoint {} (model: {}, schema: {})",
                config.ollama_endpoint,
                config.model,
                config.schema_variant
            );
            let client = OllamaClient::new(&config.ollama_endpoint, config.request_timeout())?;
            let planner = WorkoutPlanner::from_config(client, &config);
            server::serve(listener, router(planner)).await?;
        }
        ProviderKind::Mock => {
            tracing::warn!("🧪 Serving sample plans, no model is called");
            let planner =
                WorkoutPlanner::from_config(MockCompletion::new(config.schema_variant), &config);
            server::serve(listener, router(planner)).await?;
        }
    }

    Ok(())
}
