#[cfg(feature = "cli")]
use clap::Parser;

#[derive(Debug, Clone)]
#[cfg_attr(feature = "cli", derive(Parser))]
#[cfg_attr(feature = "cli", command(name = "gtfs-shapes"))]
#[cfg_attr(
    feature = "cli",
    command(about = "Convert GTFS shapes.txt into GeoJSON LineStrings, one per shape_id")
)]
pub struct ShapesConfig {
    /// shapes.txt, or a GTFS zip feed containing it
    #[cfg_attr(feature = "cli", arg(default_value = "shapes.txt"))]
    pub input_path: String,

    #[cfg_attr(feature = "cli", arg(default_value = "shapes.geojson"))]
    pub output_path: String,

    #[cfg_attr(feature = "cli", arg(short, long, help = "Enable verbose output"))]
    pub verbose: bool,
}

impl Default for ShapesConfig {
    fn default() -> Self {
        Self {
            input_path: "shapes.txt".to_string(),
            output_path: "shapes.geojson".to_string(),
            verbose: false,
        }
    }
}

#[derive(Debug, Clone)]
#[cfg_attr(feature = "cli", derive(Parser))]
#[cfg_attr(feature = "cli", command(name = "gtfs-stops"))]
#[cfg_attr(
    feature = "cli",
    command(about = "Convert GTFS stops.txt into de-duplicated GeoJSON station points")
)]
pub struct StopsConfig {
    /// stops.txt, or a GTFS zip feed containing it
    #[cfg_attr(feature = "cli", arg(default_value = "public/data/stops.txt"))]
    pub input_path: String,

    #[cfg_attr(feature = "cli", arg(default_value = "public/data/rail_stations.geojson"))]
    pub output_path: String,

    #[cfg_attr(feature = "cli", arg(short, long, help = "Enable verbose output"))]
    pub verbose: bool,
}

impl Default for StopsConfig {
    fn default() -> Self {
        Self {
            input_path: "public/data/stops.txt".to_string(),
            output_path: "public/data/rail_stations.geojson".to_string(),
            verbose: false,
        }
    }
}
