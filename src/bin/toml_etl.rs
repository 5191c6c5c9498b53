use anp_etl::core::ConfigProvider;
use anp_etl::utils::{logger, report, validation::Validate};
use anp_etl::{EtlEngine, GlpPipeline, LocalStorage, TomlConfig};
use clap::Parser;

#[derive(Parser)]
#[command(name = "toml-etl")]
#[command(about = "Run the ANP GLP download from a TOML configuration file")]
struct Args {
    /// Path to TOML configuration file
    #[arg(short, long, default_value = "anp-etl.toml")]
    config: String,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Override monitoring setting from config
    #[arg(long)]
    monitor: Option<bool>,

    /// Show what would be fetched without executing
    #[arg(long)]
    dry_run: bool,

    /// Print the run summary as JSON
    #[arg(long)]
    json: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    logger::init_cli_logger(args.verbose);

    tracing::info!("🚀 Starting TOML-based ETL tool");
    tracing::info!("📁 Loading configuration from: {}", args.config);

    let config = match TomlConfig::from_file(&args.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Failed to load config file '{}': {}", args.config, e);
            eprintln!("💡 Make sure the file exists and is valid TOML format");
            std::process::exit(1);
        }
    };

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        report::exit_with(&e);
    }

    tracing::info!("✅ Configuration loaded and validated successfully");
    display_config_summary(&config, &args);

    let monitor_enabled = args.monitor.unwrap_or_else(|| config.monitoring_enabled());

    if args.dry_run {
        let pipeline = GlpPipeline::new(LocalStorage::new(config.download_dir()), config);
        report::print_plan(&pipeline.planned_targets());
        return Ok(());
    }

    let storage =
        LocalStorage::create(config.download_dir()).unwrap_or_else(|e| report::exit_with(&e));
    let pipeline = GlpPipeline::new(storage, config);
    let engine = EtlEngine::new_with_monitoring(pipeline, monitor_enabled);

    match engine.run().await {
        Ok(outcome) => {
            if args.json {
                report::print_json(&outcome)?;
            } else {
                report::print_outcome(&outcome);
            }
        }
        Err(e) => report::exit_with(&e),
    }

    Ok(())
}

fn display_config_summary(config: &TomlConfig, args: &Args) {
    println!("📋 Configuration Summary:");
    println!("  Source: {}", config.base_url());
    println!(
        "  Range: {}..={} ({} semesters per year)",
        config.start_year(),
        config.end_year(),
        config.semesters_per_year()
    );
    println!("  Download directory: {}", config.download_dir());
    if config.consolidate_enabled() {
        println!("  Output: {}", config.output_file());
    } else {
        println!("  Output: consolidation disabled");
    }
    if let Some(timeout) = config.request_timeout() {
        println!("  Request timeout: {:?}", timeout);
    }

    if args.dry_run {
        println!("  🔍 DRY RUN MODE ENABLED");
    }

    println!();
}
