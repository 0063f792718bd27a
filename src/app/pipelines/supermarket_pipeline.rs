use crate::adapters::http::FirestoreClient;
use crate::config::SupermarketsConfig;
use crate::core::firestore;
use crate::core::points::assemble_points;
use crate::core::{Pipeline, Record, Storage, TransformResult};
use crate::utils::error::{EtlError, Result};
use serde_json::Value;

/// Firestore 文件中的超市陣列 → GeoJSON Point
pub struct SupermarketPipeline<S: Storage> {
    pub(crate) storage: S,
    pub(crate) config: SupermarketsConfig,
    pub(crate) client: FirestoreClient,
}

impl<S: Storage> SupermarketPipeline<S> {
    pub fn new(storage: S, config: SupermarketsConfig) -> Self {
        let client = FirestoreClient::new(
            config.source.base_url.clone(),
            config.timeout(),
            config.source.user_agent.clone(),
        );
        Self {
            storage,
            config,
            client,
        }
    }
}

#[async_trait::async_trait]
impl<S: Storage> Pipeline for SupermarketPipeline<S> {
    async fn extract(&self) -> Result<Vec<Record>> {
        let source = &self.config.source;
        tracing::info!("🚀 Fetching {}", self.config.document_url());

        let document = self
            .client
            .fetch_document(&source.project_id, &source.document_path)
            .await?;

        // 欄位不存在時視為空陣列
        let decoded = firestore::decode_document_field(&document, &source.array_field)?
            .unwrap_or_else(|| Value::Array(Vec::new()));

        let Value::Array(items) = decoded else {
            return Err(EtlError::UnexpectedShapeError {
                field: source.array_field.clone(),
                expected: "an array".to_string(),
            });
        };

        let mut records = Vec::with_capacity(items.len());
        for (index, item) in items.into_iter().enumerate() {
            match Record::from_value(item) {
                Some(record) => records.push(record),
                None => tracing::debug!("Skipping non-object element {}", index),
            }
        }

        Ok(records)
    }

    async fn transform(&self, data: Vec<Record>) -> Result<TransformResult> {
        let result = assemble_points(data);
        if result.skipped > 0 {
            tracing::warn!(
                "{} elements had no usable latitude/longitude",
                result.skipped
            );
        }
        Ok(result)
    }

    async fn load(&self, result: TransformResult) -> Result<String> {
        let data = if self.config.load.pretty {
            serde_json::to_vec_pretty(&result.collection)?
        } else {
            serde_json::to_vec(&result.collection)?
        };

        let output_path = self.config.output_path();
        self.storage.write_file(output_path, &data).await?;
        Ok(output_path.to_string())
    }
}
