use crate::domain::model::{
    coerce_f64, feature, feature_collection, point_geometry, Record, TransformResult,
};
use regex::Regex;
use serde_json::{Map, Value};
use std::collections::HashSet;
use std::sync::OnceLock;

pub const STOP_ID: &str = "stop_id";
pub const STOP_NAME: &str = "stop_name";
pub const STOP_LAT: &str = "stop_lat";
pub const STOP_LON: &str = "stop_lon";

fn paren_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(\S)\(").unwrap())
}

fn whitespace_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\s+").unwrap())
}

/// "Heuston(Luas)  Stop " -> "Heuston (Luas) Stop"
pub fn clean_name(raw: &str) -> String {
    let spaced = paren_re().replace_all(raw, "$1 (");
    whitespace_re().replace_all(&spaced, " ").trim().to_string()
}

fn text_column<'a>(record: &'a Record, key: &str) -> &'a str {
    record.get(key).and_then(Value::as_str).unwrap_or("").trim()
}

/// One Point per distinct station. Stops are keyed by `stop_id`, or by
/// their rounded position when the id is blank; the first row wins.
pub fn assemble_stations(records: Vec<Record>) -> TransformResult {
    let mut seen: HashSet<String> = HashSet::new();
    let mut features = Vec::new();
    let mut skipped = 0;

    for record in records {
        let coordinates = record
            .get(STOP_LAT)
            .and_then(coerce_f64)
            .zip(record.get(STOP_LON).and_then(coerce_f64));
        let Some((latitude, longitude)) = coordinates else {
            skipped += 1;
            continue;
        };

        let id = text_column(&record, STOP_ID);
        let key = if id.is_empty() {
            format!("{:.6},{:.6}", longitude, latitude)
        } else {
            id.to_string()
        };
        if !seen.insert(key) {
            tracing::debug!("Skipping duplicate stop {}", id);
            skipped += 1;
            continue;
        }

        // 空字串欄位不輸出
        let mut properties = Map::new();
        if !id.is_empty() {
            properties.insert("id".to_string(), Value::String(id.to_string()));
        }
        let name = clean_name(text_column(&record, STOP_NAME));
        if !name.is_empty() {
            properties.insert("name".to_string(), Value::String(name));
        }

        features.push(feature(properties, point_geometry(longitude, latitude)));
    }

    TransformResult {
        collection: feature_collection(features),
        skipped,
    }
}
