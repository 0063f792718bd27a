pub mod csv_source;
pub mod etl;
pub mod firestore;
pub mod points;
pub mod shapes;
pub mod stops;

pub use crate::domain::model::{Record, TransformResult};
pub use crate::domain::ports::{Pipeline, Storage};
pub use crate::utils::error::Result;
