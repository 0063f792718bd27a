pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use adapters::storage::LocalStorage;
pub use app::pipelines::{ShapesPipeline, StopsPipeline, SupermarketPipeline};
pub use config::{ShapesConfig, StopsConfig, SupermarketsConfig};
pub use core::etl::{EtlEngine, EtlSummary};
pub use domain::model::{Feature, FeatureCollection, Geometry, Record, TransformResult};
pub use utils::error::{EtlError, Result};
