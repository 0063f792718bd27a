use crate::domain::model::{
    feature, feature_collection, line_string_geometry, FeatureCollection, Record,
};
use crate::utils::error::{EtlError, Result};
use serde_json::{Map, Value};
use std::cmp::Ordering;
use std::collections::hash_map::Entry;
use std::collections::HashMap;

pub const SHAPE_ID: &str = "shape_id";
pub const SHAPE_PT_LAT: &str = "shape_pt_lat";
pub const SHAPE_PT_LON: &str = "shape_pt_lon";
pub const SHAPE_PT_SEQUENCE: &str = "shape_pt_sequence";

/// `shape_pt_sequence` parsed as an integer when possible, else as a float.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SequenceKey {
    Integer(i64),
    Float(f64),
}

impl SequenceKey {
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        if let Ok(value) = raw.parse::<i64>() {
            return Some(SequenceKey::Integer(value));
        }
        raw.parse::<f64>()
            .ok()
            .filter(|value| !value.is_nan())
            .map(SequenceKey::Float)
    }

    /// Exact numeric ordering across both representations.
    pub fn compare(&self, other: &Self) -> Ordering {
        match (*self, *other) {
            (SequenceKey::Integer(a), SequenceKey::Integer(b)) => a.cmp(&b),
            (SequenceKey::Float(a), SequenceKey::Float(b)) => a.total_cmp(&b),
            (SequenceKey::Integer(a), SequenceKey::Float(b)) => compare_int_float(a, b),
            (SequenceKey::Float(a), SequenceKey::Integer(b)) => compare_int_float(b, a).reverse(),
        }
    }
}

// 不能把 i64 轉成 f64 再比，超過 2^53 會失真
fn compare_int_float(int: i64, float: f64) -> Ordering {
    const TWO_POW_63: f64 = 9_223_372_036_854_775_808.0;

    if float >= TWO_POW_63 {
        return Ordering::Less;
    }
    if float < -TWO_POW_63 {
        return Ordering::Greater;
    }

    // |floor| <= 2^63 且為整數值，轉 i128 沒有誤差
    let floor = float.floor();
    match (int as i128).cmp(&(floor as i128)) {
        Ordering::Equal if float > floor => Ordering::Less,
        ordering => ordering,
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ShapePoint {
    pub shape_id: String,
    pub latitude: f64,
    pub longitude: f64,
    pub sequence: SequenceKey,
}

impl ShapePoint {
    pub fn from_record(record: &Record) -> Result<Self> {
        let shape_id = record.require_str(SHAPE_ID)?.to_string();
        let latitude = record.require_f64(SHAPE_PT_LAT)?;
        let longitude = record.require_f64(SHAPE_PT_LON)?;
        let raw_sequence = record.require_str(SHAPE_PT_SEQUENCE)?;
        let sequence =
            SequenceKey::parse(raw_sequence).ok_or_else(|| EtlError::InvalidSequenceError {
                shape_id: shape_id.clone(),
                value: raw_sequence.to_string(),
            })?;

        Ok(Self {
            shape_id,
            latitude,
            longitude,
            sequence,
        })
    }
}

/// Groups points by `shape_id` (first-seen order) and emits one LineString
/// per shape, ordered by sequence. Equal sequences keep their input order.
pub fn assemble_shapes(points: Vec<ShapePoint>) -> FeatureCollection {
    let mut order: Vec<String> = Vec::new();
    let mut groups: HashMap<String, Vec<ShapePoint>> = HashMap::new();

    for point in points {
        match groups.entry(point.shape_id.clone()) {
            Entry::Occupied(mut entry) => entry.get_mut().push(point),
            Entry::Vacant(entry) => {
                order.push(entry.key().clone());
                entry.insert(vec![point]);
            }
        }
    }

    let features = order
        .into_iter()
        .filter_map(|shape_id| {
            let mut group = groups.remove(&shape_id)?;
            group.sort_by(|a, b| a.sequence.compare(&b.sequence));

            let coordinates = group
                .iter()
                .map(|point| [point.longitude, point.latitude])
                .collect();

            let mut properties = Map::new();
            properties.insert(SHAPE_ID.to_string(), Value::String(shape_id));
            Some(feature(properties, line_string_geometry(coordinates)))
        })
        .collect();

    feature_collection(features)
}
