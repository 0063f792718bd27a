use geojson_etl::{EtlEngine, EtlError, LocalStorage, ShapesConfig, ShapesPipeline};
use serde_json::{json, Value};
use std::io::Write;
use std::process::Command;
use tempfile::TempDir;
use zip::write::{SimpleFileOptions, ZipWriter};

const SHAPES_TXT: &str = "\
shape_id,shape_pt_lat,shape_pt_lon,shape_pt_sequence,shape_dist_traveled
60-1-b12-1.1.O,53.3498,-6.2603,10,0
60-1-b12-1.1.O,53.3501,-6.2610,2,120.5
60-1-b12-1.1.O,53.3505,-6.2620,1.5,250.1
60-2-b12-1.1.I,53.4000,-6.3000,1,0
60-1-b12-1.1.O,53.3510,-6.2630,1,300.0
";

fn config(dir: &TempDir, input: &str, output: &str) -> ShapesConfig {
    ShapesConfig {
        input_path: dir.path().join(input).to_str().unwrap().to_string(),
        output_path: dir.path().join(output).to_str().unwrap().to_string(),
        verbose: false,
    }
}

fn coordinates(feature: &Value) -> Vec<(f64, f64)> {
    feature["geometry"]["coordinates"]
        .as_array()
        .unwrap()
        .iter()
        .map(|pair| (pair[0].as_f64().unwrap(), pair[1].as_f64().unwrap()))
        .collect()
}

#[tokio::test]
async fn test_end_to_end_shapes_conversion() {
    let temp_dir = TempDir::new().unwrap();
    std::fs::write(temp_dir.path().join("shapes.txt"), SHAPES_TXT).unwrap();

    let config = config(&temp_dir, "shapes.txt", "out/shapes.geojson");
    let output = config.output_path.clone();
    let engine = EtlEngine::new(ShapesPipeline::new(LocalStorage::current_dir(), config));

    let summary = engine.run().await.unwrap();
    assert_eq!(summary.output_path, output);
    assert_eq!(summary.records, 5);
    assert_eq!(summary.features, 2);

    let value: Value = serde_json::from_slice(&std::fs::read(&output).unwrap()).unwrap();
    assert_eq!(value["type"], json!("FeatureCollection"));

    let features = value["features"].as_array().unwrap();
    assert_eq!(features.len(), 2);
    assert_eq!(features[0]["properties"], json!({"shape_id": "60-1-b12-1.1.O"}));
    assert_eq!(features[0]["geometry"]["type"], json!("LineString"));
    assert_eq!(
        coordinates(&features[0]),
        vec![
            (-6.2630, 53.3510),
            (-6.2620, 53.3505),
            (-6.2610, 53.3501),
            (-6.2603, 53.3498),
        ]
    );
    assert_eq!(features[1]["properties"], json!({"shape_id": "60-2-b12-1.1.I"}));
    assert_eq!(coordinates(&features[1]).len(), 1);
}

#[tokio::test]
async fn test_shapes_from_zip_feed() {
    let temp_dir = TempDir::new().unwrap();
    let feed_path = temp_dir.path().join("google_transit.zip");

    let mut zip = ZipWriter::new(std::fs::File::create(&feed_path).unwrap());
    zip.start_file("stops.txt", SimpleFileOptions::default()).unwrap();
    zip.write_all(b"stop_id,stop_name,stop_lat,stop_lon\n").unwrap();
    zip.start_file("shapes.txt", SimpleFileOptions::default()).unwrap();
    zip.write_all(SHAPES_TXT.as_bytes()).unwrap();
    zip.finish().unwrap();

    let config = config(&temp_dir, "google_transit.zip", "shapes.geojson");
    let engine = EtlEngine::new(ShapesPipeline::new(LocalStorage::current_dir(), config));

    let summary = engine.run().await.unwrap();
    assert_eq!(summary.features, 2);
}

#[tokio::test]
async fn test_bad_sequence_writes_nothing() {
    let temp_dir = TempDir::new().unwrap();
    std::fs::write(
        temp_dir.path().join("shapes.txt"),
        "shape_id,shape_pt_lat,shape_pt_lon,shape_pt_sequence\nA,1,2,one\n",
    )
    .unwrap();

    let config = config(&temp_dir, "shapes.txt", "shapes.geojson");
    let output = config.output_path.clone();
    let engine = EtlEngine::new(ShapesPipeline::new(LocalStorage::current_dir(), config));

    let err = engine.run().await.unwrap_err();
    assert!(matches!(err, EtlError::InvalidSequenceError { .. }));
    assert!(!std::path::Path::new(&output).exists());
}

#[test]
fn test_binary_uses_default_paths() {
    let temp_dir = TempDir::new().unwrap();
    std::fs::write(temp_dir.path().join("shapes.txt"), SHAPES_TXT).unwrap();

    let output = Command::new(env!("CARGO_BIN_EXE_gtfs-shapes"))
        .current_dir(temp_dir.path())
        .output()
        .unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Wrote 2 shapes to shapes.geojson"));

    let written = std::fs::read_to_string(temp_dir.path().join("shapes.geojson")).unwrap();
    assert!(!written.contains('\n'));
}

#[test]
fn test_binary_missing_input_exits_non_zero() {
    let temp_dir = TempDir::new().unwrap();

    let output = Command::new(env!("CARGO_BIN_EXE_gtfs-shapes"))
        .current_dir(temp_dir.path())
        .args(["missing.txt", "out.geojson"])
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    assert!(!temp_dir.path().join("out.geojson").exists());
}
