use crate::utils::error::{EtlError, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// 一列輸入資料（CSV 一行或陣列中的一個元素）
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub data: Map<String, Value>,
}

impl Record {
    pub fn new(data: Map<String, Value>) -> Self {
        Self { data }
    }

    /// Returns `None` for anything that is not a JSON object.
    pub fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Object(data) => Some(Self { data }),
            _ => None,
        }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.data.get(key)
    }

    pub fn require(&self, key: &str) -> Result<&Value> {
        self.data.get(key).ok_or_else(|| EtlError::MissingColumnError {
            column: key.to_string(),
        })
    }

    pub fn require_str(&self, key: &str) -> Result<&str> {
        match self.require(key)? {
            Value::String(s) => Ok(s.as_str()),
            other => Err(EtlError::TypeMismatchError {
                column: key.to_string(),
                expected: "a string".to_string(),
                value: other.to_string(),
            }),
        }
    }

    /// Parses a column as `f64`, accepting both JSON numbers and numeric strings.
    pub fn require_f64(&self, key: &str) -> Result<f64> {
        let value = self.require(key)?;
        coerce_f64(value).ok_or_else(|| EtlError::InvalidNumberError {
            column: key.to_string(),
            value: match value {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            },
        })
    }
}

/// 寬鬆的數值轉換：數字或可解析的字串，且必須是有限值
pub fn coerce_f64(value: &Value) -> Option<f64> {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }?;
    parsed.is_finite().then_some(parsed)
}

pub use geojson::{Feature, FeatureCollection, Geometry, JsonObject};

/// GeoJSON 座標順序固定為 [經度, 緯度]
pub fn point_geometry(longitude: f64, latitude: f64) -> Geometry {
    Geometry::new(geojson::Value::Point(vec![longitude, latitude]))
}

pub fn line_string_geometry(coordinates: Vec<[f64; 2]>) -> Geometry {
    let positions = coordinates.into_iter().map(|c| c.to_vec()).collect();
    Geometry::new(geojson::Value::LineString(positions))
}

pub fn feature(properties: JsonObject, geometry: Geometry) -> Feature {
    Feature {
        bbox: None,
        geometry: Some(geometry),
        id: None,
        properties: Some(properties),
        foreign_members: None,
    }
}

pub fn feature_collection(features: Vec<Feature>) -> FeatureCollection {
    FeatureCollection {
        bbox: None,
        features,
        foreign_members: None,
    }
}

#[derive(Debug, Clone)]
pub struct TransformResult {
    pub collection: FeatureCollection,
    /// Elements dropped by a lossy policy (bad coordinates, duplicates).
    pub skipped: usize,
}
