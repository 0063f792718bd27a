use clap::Parser;
use geojson_etl::utils::logger;
use geojson_etl::{EtlEngine, LocalStorage, ShapesConfig, ShapesPipeline};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let config = ShapesConfig::parse();

    // 初始化日誌
    logger::init_cli_logger(config.verbose);
    tracing::debug!("CLI config: {:?}", config);

    let pipeline = ShapesPipeline::new(LocalStorage::current_dir(), config);
    let engine = EtlEngine::new(pipeline);

    match engine.run().await {
        Ok(summary) => {
            println!(
                "Wrote {} shapes to {}",
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
