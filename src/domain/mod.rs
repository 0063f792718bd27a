// Domain layer: records, GeoJSON model and the ports the pipelines depend on.

pub mod model;
pub mod ports;
