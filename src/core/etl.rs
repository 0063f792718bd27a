use crate::core::Pipeline;
use crate::utils::error::Result;

/// Outcome of one run, used for the final status line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EtlSummary {
    pub output_path: String,
    pub records: usize,
    pub features: usize,
    pub skipped: usize,
}

pub struct EtlEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> EtlEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    /// 依序執行 extract → transform → load；任何階段失敗都不會寫出檔案
    pub async fn run(&self) -> Result<EtlSummary> {
        tracing::info!("Starting ETL process...");

        tracing::debug!("Extracting data...");
        let raw_data = self.pipeline.extract().await?;
        let records = raw_data.len();
        tracing::info!("Extracted {} records", records);

        tracing::debug!("Transforming data...");
        let result = self.pipeline.transform(raw_data).await?;
        let features = result.collection.features.len();
        let skipped = result.skipped;
        if skipped > 0 {
            tracing::info!("Built {} features ({} records skipped)", features, skipped);
        } else {
            tracing::info!("Built {} features", features);
        }

        tracing::debug!("Loading data...");
        let output_path = self.pipeline.load(result).await?;
        tracing::info!("📁 Output saved to: {}", output_path);

        Ok(EtlSummary {
            output_path,
            records,
            features,
            skipped,
        })
    }
}
