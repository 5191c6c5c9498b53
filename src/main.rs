use anp_etl::utils::{logger, report, validation::Validate};
use anp_etl::{CliConfig, EtlEngine, GlpPipeline, LocalStorage};
use clap::Parser;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let config = CliConfig::parse();

    let format = if config.log_json {
        logger::LogFormat::Json
    } else {
        logger::LogFormat::Compact
    };
    logger::init_logger(config.verbose, format);

    tracing::info!("Starting anp-etl CLI");
    tracing::debug!("CLI config: {:?}", config);

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        report::exit_with(&e);
    }

    let storage = if config.dry_run {
        LocalStorage::new(config.download_dir.clone())
    } else {
        LocalStorage::create(config.download_dir.clone()).unwrap_or_else(|e| report::exit_with(&e))
    };

    let dry_run = config.dry_run;
    let json = config.json;
    let monitor_enabled = config.monitor;
    if monitor_enabled {
        tracing::info!("🔍 System monitoring enabled");
    }

    let pipeline = GlpPipeline::new(storage, config);

    if dry_run {
        report::print_plan(&pipeline.planned_targets());
        return Ok(());
    }

    let engine = EtlEngine::new_with_monitoring(pipeline, monitor_enabled);

    match engine.run().await {
        Ok(outcome) => {
            if json {
                report::print_json(&outcome)?;
            } else {
                report::print_outcome(&outcome);
            }
        }
        Err(e) => report::exit_with(&e),
    }

    Ok(())
}
