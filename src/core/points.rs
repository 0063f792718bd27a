use crate::domain::model::{
    coerce_f64, feature, feature_collection, point_geometry, Feature, Record, TransformResult,
};

pub const LATITUDE: &str = "latitude";
pub const LONGITUDE: &str = "longitude";

/// Builds a Point feature from a record carrying `latitude`/`longitude`.
/// Returns `None` when either coordinate is missing or not numeric.
pub fn point_feature(record: Record) -> Option<Feature> {
    let latitude = record.get(LATITUDE).and_then(coerce_f64)?;
    let longitude = record.get(LONGITUDE).and_then(coerce_f64)?;

    let properties = record
        .data
        .into_iter()
        .filter(|(key, _)| key != LATITUDE && key != LONGITUDE)
        .collect();

    Some(feature(properties, point_geometry(longitude, latitude)))
}

/// 座標無法轉換的元素直接略過，只計數不報錯
pub fn assemble_points(records: Vec<Record>) -> TransformResult {
    let mut features = Vec::with_capacity(records.len());
    let mut skipped = 0;

    for (index, record) in records.into_iter().enumerate() {
        match point_feature(record) {
            Some(feature) => features.push(feature),
            None => {
                tracing::debug!("Skipping element {} without usable coordinates", index);
                skipped += 1;
            }
        }
    }

    TransformResult {
        collection: feature_collection(features),
        skipped,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn records(value: serde_json::Value) -> Vec<Record> {
        value
            .as_array()
            .unwrap()
            .iter()
            .cloned()
            .filter_map(Record::from_value)
            .collect()
    }

    fn properties(feature: &Feature) -> &serde_json::Map<String, serde_json::Value> {
        feature.properties.as_ref().unwrap()
    }

    #[test]
    fn test_valid_element_becomes_point_without_coordinate_properties() {
        let result = assemble_points(records(json!([
            {"name": "Tesco Express", "latitude": 53.34, "longitude": -6.26, "chain": "Tesco"}
        ])));

        assert_eq!(result.skipped, 0);
        assert_eq!(result.collection.features.len(), 1);

        let feature = &result.collection.features[0];
        assert_eq!(feature.geometry, Some(point_geometry(-6.26, 53.34)));
        assert_eq!(
            serde_json::Value::Object(properties(feature).clone()),
            json!({"name": "Tesco Express", "chain": "Tesco"})
        );
    }

    #[test]
    fn test_unusable_coordinates_are_skipped() {
        let result = assemble_points(records(json!([
            {"name": "bad", "latitude": "not-a-number", "longitude": -6.0},
            {"name": "missing", "longitude": -6.0},
            {"name": "wrong type", "latitude": [53.0], "longitude": -6.0},
            {"name": "null", "latitude": null, "longitude": -6.0},
            {"name": "good", "latitude": "53.1", "longitude": "-6.1"}
        ])));

        assert_eq!(result.skipped, 4);
        assert_eq!(result.collection.features.len(), 1);
        assert_eq!(properties(&result.collection.features[0])["name"], json!("good"));
        assert_eq!(
            result.collection.features[0].geometry,
            Some(point_geometry(-6.1, 53.1))
        );
    }

    #[test]
    fn test_output_keeps_input_order() {
        let result = assemble_points(records(json!([
            {"id": 1, "latitude": 1, "longitude": 1},
            {"id": 2, "latitude": "x", "longitude": 1},
            {"id": 3, "latitude": 3, "longitude": 3},
            {"id": 4, "latitude": 4, "longitude": 4}
        ])));

        let ids: Vec<i64> = result
            .collection
            .features
            .iter()
            .map(|f| properties(f)["id"].as_i64().unwrap())
            .collect();
        assert_eq!(ids, vec![1, 3, 4]);
    }
}
