use clap::Parser;
use geojson_etl::utils::logger;
use geojson_etl::{EtlEngine, LocalStorage, StopsConfig, StopsPipeline};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let config = StopsConfig::parse();

    logger::init_cli_logger(config.verbose);
    tracing::debug!("CLI config: {:?}", config);

    let pipeline = StopsPipeline::new(LocalStorage::current_dir(), config);
    let engine = EtlEngine::new(pipeline);

    match engine.run().await {
        Ok(summary) => {
            if summary.skipped > 0 {
                tracing::info!("Skipped {} rows (invalid or duplicate)", summary.skipped);
            }
            println!(
                "✅ Wrote {} stations → {}",
                summary.features, summary.output_path
            );
        }
        Err(e) => {
            tracing::error!("❌ Conversion failed: {} (Category: {:?})", e, e.category());
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());
            eprintln!("❌ {}", e.user_friendly_message());
            std::process::exit(e.exit_code());
        }
    }
}
