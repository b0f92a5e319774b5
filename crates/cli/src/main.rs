mod logging;

use anyhow::{Context, Result};
use sha2::{Digest, Sha256};
use tracing::{debug, error, info, warn};

use aaxconv_core::{
    config_dir_from_env, load_config, load_secrets, secrets_dir_from_env, validate_config, Config,
    ConversionPlanner, FfmpegTranscoder, FfprobeProber, PlannerSettings, SanitizedConfig,
};

/// Application version
const VERSION: &str = env!("CARGO_PKG_VERSION");

#[tokio::main]
async fn main() {
    // Logging depends on the config, so config errors go to stderr directly
    let config = match startup_config() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Fatal error: {:#}", e);
            std::process::exit(1);
        }
    };

    logging::init(&config.logging);
    if config.logging.format.is_custom() {
        warn!("Unrecognized 'logging.format', using 'full'. Supported formats: full, compact, json.");
    }

    if let Err(e) = run(config).await {
        error!("Fatal error: {:#}", e);
        std::process::exit(1);
    }
}

fn startup_config() -> Result<Config> {
    let config_dir = config_dir_from_env();
    let config = load_config(&config_dir)
        .with_context(|| format!("Failed to load config from {:?}", config_dir))?;
    validate_config(&config).context("Configuration validation failed")?;
    Ok(config)
}

async fn run(config: Config) -> Result<()> {
    info!("aaxconv {} starting", VERSION);

    let config_json = serde_json::to_string(&config).unwrap_or_default();
    let config_hash = format!("{:x}", Sha256::digest(config_json.as_bytes()));
    info!("Configuration loaded successfully (hash {})", &config_hash[..16]);
    debug!(
        "Configuration: {}",
        serde_json::to_string(&SanitizedConfig::from(&config)).unwrap_or_default()
    );

    let secrets_dir = secrets_dir_from_env();
    let secrets = load_secrets(&secrets_dir)
        .with_context(|| format!("Failed to load secrets from {:?}", secrets_dir))?;
    info!("Secrets loaded successfully");

    let prober = FfprobeProber::new(config.ffprobe.clone());
    let transcoder = FfmpegTranscoder::new(config.ffmpeg.clone());
    let planner = ConversionPlanner::new(
        PlannerSettings::from(&config),
        prober,
        transcoder,
        secrets.activation_bytes,
    );

    let report = planner.run().await.context("Conversion run failed")?;
    info!("{}", report.summary());
    if let Some(elapsed) = report.elapsed_ms() {
        debug!("Run finished in {} ms", elapsed);
    }

    Ok(())
}
