use crate::config::ShapesConfig;
use crate::core::csv_source;
use crate::core::shapes::{assemble_shapes, ShapePoint};
use crate::core::{Pipeline, Record, Storage, TransformResult};
use crate::utils::error::Result;

const SHAPES_ENTRY: &str = "shapes.txt";

/// GTFS shapes.txt → 每個 shape_id 一條 LineString
pub struct ShapesPipeline<S: Storage> {
    pub(crate) storage: S,
    pub(crate) config: ShapesConfig,
}

impl<S: Storage> ShapesPipeline<S> {
    pub fn new(storage: S, config: ShapesConfig) -> Self {
        Self { storage, config }
    }
}

#[async_trait::async_trait]
impl<S: Storage> Pipeline for ShapesPipeline<S> {
    async fn extract(&self) -> Result<Vec<Record>> {
        tracing::debug!("Reading shapes from: {}", self.config.input_path);
        let bytes = self.storage.read_file(&self.config.input_path).await?;
        let bytes = csv_source::unwrap_feed(bytes, SHAPES_ENTRY)?;
        csv_source::read_records(&bytes)
    }

    async fn transform(&self, data: Vec<Record>) -> Result<TransformResult> {
        // 任何一列格式錯誤都中止整次轉換
        let points = data
            .iter()
            .map(ShapePoint::from_record)
            .collect::<Result<Vec<_>>>()?;

        Ok(TransformResult {
            collection: assemble_shapes(points),
            skipped: 0,
        })
    }

    async fn load(&self, result: TransformResult) -> Result<String> {
        let data = serde_json::to_vec(&result.collection)?;
        self.storage
            .write_file(&self.config.output_path, &data)
            .await?;
        Ok(self.config.output_path.clone())
    }
}
