pub mod gtfs;
pub mod supermarkets;

pub use gtfs::{ShapesConfig, StopsConfig};
pub use supermarkets::SupermarketsConfig;
