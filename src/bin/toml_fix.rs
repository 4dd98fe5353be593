use clap::Parser;
use rectfix::config::toml_config::TomlConfig;
use rectfix::core::rewrite::{rewrite_line, RewriteOptions};
use rectfix::core::ConfigProvider;
use rectfix::utils::{logger, validation::Validate};
use rectfix::{FixEngine, LocalStorage, RectFixPipeline};

#[derive(Parser)]
#[command(name = "toml-fix")]
#[command(about = "Rect fix tool with TOML job configuration support")]
struct Args {
    /// Path to TOML configuration file
    #[arg(short, long, default_value = "rectfix.toml")]
    config: String,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Override monitoring setting from config
    #[arg(long)]
    monitor: Option<bool>,

    /// Override the scale factor from config
    #[arg(long)]
    scale: Option<f64>,

    /// Dry run - analyze the input without writing output
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    logger::init_cli_logger(args.verbose);

    tracing::info!("🚀 Starting TOML-based rect fix tool");
    tracing::info!("📁 Loading configuration from: {}", args.config);

    let mut config = match TomlConfig::from_file(&args.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Failed to load config file '{}': {}", args.config, e);
            eprintln!("💡 Make sure the file exists and is valid TOML format");
            std::process::exit(1);
        }
    };

    if let Some(scale) = args.scale {
        config.transform.scale = Some(scale);
        tracing::info!("🔧 Scale factor overridden to: {}", scale);
    }

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    tracing::info!("✅ Configuration loaded and validated successfully");

    display_config_summary(&config, &args);

    if args.dry_run {
        tracing::info!("🔍 DRY RUN MODE - No output will be written");
        perform_dry_run(&config)?;
        return Ok(());
    }

    let monitor_enabled = args.monitor.unwrap_or_else(|| config.monitoring_enabled());

    if monitor_enabled {
        tracing::info!("🔍 System monitoring enabled");
    }

    let write_to_stdout = config.output_path() == "-";

    let storage = LocalStorage::new(".");
    let pipeline = RectFixPipeline::new(storage, config);

    let engine = FixEngine::new_with_monitoring(pipeline, monitor_enabled);

    match engine.run().await {
        Ok(destination) => {
            tracing::info!("✅ Rect fix completed successfully!");
            tracing::info!("📁 Output written to: {}", destination);
            if !write_to_stdout {
                println!("✅ Rect fix completed successfully!");
                println!("📁 Output written to: {}", destination);
            }
        }
        Err(e) => {
            tracing::error!(
                "❌ Rect fix failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 Suggestion: {}", e.recovery_suggestion());

            let exit_code = match e.severity() {
                rectfix::utils::error::ErrorSeverity::Low => 0,
                rectfix::utils::error::ErrorSeverity::Medium => 2,
                rectfix::utils::error::ErrorSeverity::High => 1,
                rectfix::utils::error::ErrorSeverity::Critical => 3,
            };

            if exit_code > 0 {
                std::process::exit(exit_code);
            }
        }
    }

    Ok(())
}

fn display_config_summary(config: &TomlConfig, args: &Args) {
    println!("📋 Configuration Summary:");
    println!("  Job: {} v{}", config.job.name, config.job.version);
    println!("  Input: {}", config.source.path);
    println!("  Output: {}", config.output_path());
    println!("  Scale: {}", config.scale());
    println!("  Marker: {}", config.marker());
    println!("  On malformed: {}", ConfigProvider::on_malformed(config));

    if let Some(report) = config.report_path() {
        println!("  Report: {}", report);
    }

    if args.dry_run {
        println!("  🔍 DRY RUN MODE ENABLED");
    }

    println!();
}

fn perform_dry_run(config: &TomlConfig) -> anyhow::Result<()> {
    println!("🔍 Dry Run Analysis:");
    println!();

    let content = std::fs::read_to_string(&config.source.path)?;
    let total = content.lines().count();
    let matching = content
        .lines()
        .filter(|l| l.contains(config.marker()))
        .count();

    println!("📄 Input Analysis:");
    println!("  File: {}", config.source.path);
    println!("  Lines: {}", total);
    println!("  Lines matching '{}': {}", config.marker(), matching);

    let opts = RewriteOptions {
        scale: config.scale(),
        marker: config.marker().to_string(),
    };

    // Preview the first matching line so the scale choice can be sanity-checked.
    if let Some((number, line)) = content
        .lines()
        .enumerate()
        .map(|(i, l)| (i + 1, l))
        .find(|(_, l)| l.contains(config.marker()))
    {
        println!();
        println!("⚙️ Preview (line {}):", number);
        println!("  before: {}", line);
        match rewrite_line(number, line, &opts) {
            Ok(Some(rewritten)) => println!("  after:  {}", rewritten),
            Ok(None) => {}
            Err(e) => println!("  ⚠️ would fail: {}", e),
        }
    }

    println!();
    println!("✅ Dry run analysis complete. Use --verbose for more details during actual run.");

    Ok(())
}
