use clap::Parser;
use geojson_etl::utils::{logger, validation::Validate};
use geojson_etl::{EtlEngine, LocalStorage, SupermarketPipeline, SupermarketsConfig};

#[derive(Parser, Debug)]
#[command(name = "supermarkets")]
#[command(about = "Export the Firestore supermarkets layer as a GeoJSON FeatureCollection")]
struct Args {
    /// Optional TOML configuration file; compiled-in defaults otherwise
    #[arg(short, long)]
    config: Option<String>,

    /// Override the output file
    #[arg(short, long)]
    output: Option<String>,

    #[arg(long)]
    project_id: Option<String>,

    /// collection/document path, e.g. map_layers/Supermarkets
    #[arg(long)]
    document_path: Option<String>,

    /// Firestore REST base URL
    #[arg(long)]
    base_url: Option<String>,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Emit logs as JSON lines
    #[arg(long)]
    json_logs: bool,
}

fn load_config(args: &Args) -> geojson_etl::Result<SupermarketsConfig> {
    let mut config = match &args.config {
        Some(path) => SupermarketsConfig::from_file(path)?,
        None => SupermarketsConfig::default(),
    };

    // 套用命令列覆蓋設定
    if let Some(output) = &args.output {
        config.load.output_path = output.clone();
    }
    if let Some(project_id) = &args.project_id {
        config.source.project_id = project_id.clone();
    }
    if let Some(document_path) = &args.document_path {
        config.source.document_path = document_path.clone();
    }
    if let Some(base_url) = &args.base_url {
        config.source.base_url = base_url.clone();
    }

    config.validate()?;
    Ok(config)
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let args = Args::parse();

    if args.json_logs {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(args.verbose);
    }

    let config = match load_config(&args) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("❌ Configuration failed: {}", e);
            eprintln!("❌ {}", e.user_friendly_message());
            std::process::exit(e.exit_code());
        }
    };
    tracing::debug!("Config: {:?}", config);

    let pipeline = SupermarketPipeline::new(LocalStorage::current_dir(), config);
    let engine = EtlEngine::new(pipeline);

    match engine.run().await {
        Ok(summary) => {
            println!(
                "Wrote {} features to {}",
                summary.features, summary.output_path
            );
        }
        Err(e) => {
            tracing::error!("❌ Export failed: {} (Category: {:?})", e, e.category());
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());
            eprintln!("{}", e.user_friendly_message());
            std::process::exit(e.exit_code());
        }
    }
}
