use crate::config::StopsConfig;
use crate::core::csv_source;
use crate::core::stops::assemble_stations;
use crate::core::{Pipeline, Record, Storage, TransformResult};
use crate::utils::error::Result;

const STOPS_ENTRY: &str = "stops.txt";

pub struct StopsPipeline<S: Storage> {
    pub(crate) storage: S,
    pub(crate) config: StopsConfig,
}

impl<S: Storage> StopsPipeline<S> {
    pub fn new(storage: S, config: StopsConfig) -> Self {
        Self { storage, config }
    }
}

#[async_trait::async_trait]
impl<S: Storage> Pipeline for StopsPipeline<S> {
    async fn extract(&self) -> Result<Vec<Record>> {
        tracing::debug!("Reading stops from: {}", self.config.input_path);
        let bytes = self.storage.read_file(&self.config.input_path).await?;
        let bytes = csv_source::unwrap_feed(bytes, STOPS_ENTRY)?;
        csv_source::read_records_with_comments(&bytes, Some(b'#'))
    }

    async fn transform(&self, data: Vec<Record>) -> Result<TransformResult> {
        Ok(assemble_stations(data))
    }

    async fn load(&self, result: TransformResult) -> Result<String> {
        let data = serde_json::to_vec_pretty(&result.collection)?;
        self.storage
            .write_file(&self.config.output_path, &data)
            .await?;
        Ok(self.config.output_path.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::pipelines::mock_storage::MockStorage;
    use crate::core::etl::EtlEngine;

    #[tokio::test]
    async fn test_engine_run_dedupes_and_writes_pretty_json() {
        let storage = MockStorage::default();
        storage
            .put_file(
                "public/data/stops.txt",
                b"stop_id,stop_code,stop_name,stop_desc,stop_lat,stop_lon\n\
                  # exported 2024-05-01\n\
                  8220IR0132,,Dublin Connolly(Irish Rail),,53.3531,-6.2460\n\
                  8220IR0132,,Dublin Connolly,,53.3531,-6.2460\n\
                  8220IR0025,,Tara Street,,53.3470,-6.2541\n\
                  8220IR9999,,Nowhere,,,\n",
            )
            .await;

        let engine = EtlEngine::new(StopsPipeline::new(storage.clone(), StopsConfig::default()));
        let summary = engine.run().await.unwrap();

        assert_eq!(summary.output_path, "public/data/rail_stations.geojson");
        assert_eq!(summary.records, 4);
        assert_eq!(summary.features, 2);
        assert_eq!(summary.skipped, 2);

        let written = storage
            .get_file("public/data/rail_stations.geojson")
            .await
            .unwrap();
        let text = String::from_utf8(written).unwrap();
        assert!(text.contains("\n  \"features\""));
        assert!(text.contains("Dublin Connolly (Irish Rail)"));
    }
}
