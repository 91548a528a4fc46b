use clap::Parser;
use word_annotator::utils::{logger, validation::Validate};
use word_annotator::{AnnotationEngine, AnnotationPipeline, CliConfig, LocalStorage, NlpToolkit};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = CliConfig::parse();

    // 初始化日誌
    if config.log_json {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(config.verbose);
    }

    tracing::info!("Starting word-annotator CLI");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(e.exit_code());
    }

    let monitor_enabled = config.monitor;
    if monitor_enabled {
        tracing::info!("🔍 System monitoring enabled");
    }

    let toolkit = match NlpToolkit::builtin() {
        Ok(toolkit) => toolkit,
        Err(e) => {
            eprintln!("❌ Failed to load the built-in lexicon: {}", e);
            std::process::exit(e.exit_code());
        }
    };

    let storage = LocalStorage::current_dir();
    let pipeline = AnnotationPipeline::new(storage, config, toolkit);
    let engine = AnnotationEngine::new_with_monitoring(pipeline, monitor_enabled);

    match engine.run().await {
        Ok(summary) => {
            tracing::info!("✅ Annotation completed successfully!");
            println!("✅ Annotation completed: {} words read", summary.records_read);
            for path in summary.output_paths() {
                println!("📁 {}", path);
            }
            if !summary.dropped.is_empty() {
                println!("⚠️ {} items skipped", summary.dropped.len());
            }
        }
        Err(e) => {
            tracing::error!(
                "❌ Annotation failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());

            std::process::exit(e.exit_code());
        }
    }

    Ok(())
}
