use clap::Parser;
use rodman_feats::api::{self, AppState};
use rodman_feats::core::ConfigProvider;
use rodman_feats::utils::logger::{self, LogFormat};
use rodman_feats::utils::validation::Validate;
use rodman_feats::{build_engine, CliConfig, TomlConfig};

async fn serve(config: &(impl ConfigProvider + Validate)) -> anyhow::Result<()> {
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    let engine = build_engine(config)?;
    let app = api::router(AppState::new(engine), config.static_dir());

    let addr = format!("{}:{}", config.host(), config.port());
    tracing::info!("🐛 Rodman Historic Feats API listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    let format = if cli.json_logs {
        LogFormat::Json
    } else {
        LogFormat::Compact
    };
    logger::init_logger(format, cli.verbose);

    match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from {}", path);
            let config = TomlConfig::from_file(path)?;
            serve(&config).await
        }
        None => {
            if cli.verbose {
                tracing::debug!("CLI config: {:?}", cli);
            }
            serve(&cli).await
        }
    }
}
