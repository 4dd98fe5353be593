use clap::Parser;
use rectfix::utils::{logger, validation::Validate};
use rectfix::{CliConfig, FixEngine, LocalStorage, RectFixPipeline};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = CliConfig::parse();

    if config.log_json {
        logger::init_json_logger(config.verbose);
    } else {
        logger::init_cli_logger(config.verbose);
    }

    tracing::info!("Starting rectfix CLI");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    let monitor_enabled = config.monitor;
    if monitor_enabled {
        tracing::info!("🔍 System monitoring enabled");
    }

    let write_to_stdout = config.output == "-";

    let storage = LocalStorage::new(".");
    let pipeline = RectFixPipeline::new(storage, config);

    let engine = FixEngine::new_with_monitoring(pipeline, monitor_enabled);

    match engine.run().await {
        Ok(destination) => {
            tracing::info!("✅ Rect fix completed successfully!");
            tracing::info!("📁 Output written to: {}", destination);
            // Keep stdout clean when it carries the transformed document.
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
