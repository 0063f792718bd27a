use crate::domain::model::Record;
use crate::utils::error::{EtlError, Result};
use serde_json::{Map, Value};
use std::io::{Cursor, Read};

const ZIP_MAGIC: &[u8] = b"PK\x03\x04";
const UTF8_BOM: char = '\u{feff}';

/// GTFS feeds are usually distributed as zip archives.
pub fn is_zip(bytes: &[u8]) -> bool {
    bytes.starts_with(ZIP_MAGIC)
}

/// Reads one member of a zip archive, matched by file name in any directory.
pub fn read_archive_entry(bytes: &[u8], name: &str) -> Result<Vec<u8>> {
    let mut archive = zip::ZipArchive::new(Cursor::new(bytes))?;

    let entry_name = archive
        .file_names()
        .find(|entry| entry.rsplit('/').next() == Some(name))
        .map(str::to_string)
        .ok_or_else(|| EtlError::MissingArchiveEntryError {
            name: name.to_string(),
        })?;

    tracing::debug!("Reading '{}' from zip archive", entry_name);
    let mut file = archive.by_name(&entry_name)?;
    let mut data = Vec::new();
    file.read_to_end(&mut data)?;
    Ok(data)
}

/// Returns the bytes of `entry` when `bytes` is a zip archive, otherwise `bytes` itself.
pub fn unwrap_feed(bytes: Vec<u8>, entry: &str) -> Result<Vec<u8>> {
    if is_zip(&bytes) {
        read_archive_entry(&bytes, entry)
    } else {
        Ok(bytes)
    }
}

pub fn read_records(bytes: &[u8]) -> Result<Vec<Record>> {
    read_records_with_comments(bytes, None)
}

/// 以標頭列為欄位名稱，每一列轉成一筆 Record（值一律保留為字串）
pub fn read_records_with_comments(bytes: &[u8], comment: Option<u8>) -> Result<Vec<Record>> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .comment(comment)
        .from_reader(bytes);

    let headers: Vec<String> = reader
        .headers()?
        .iter()
        .map(|h| h.trim_start_matches(UTF8_BOM).trim().to_string())
        .collect();

    let mut records = Vec::new();
    for row in reader.records() {
        let row = row?;
        // 欄位不足的列只保留存在的欄位，缺漏留給取值時報錯
        let data: Map<String, Value> = headers
            .iter()
            .zip(row.iter())
            .map(|(name, field)| (name.clone(), Value::String(field.to_string())))
            .collect();
        records.push(Record::new(data));
    }

    tracing::debug!("Parsed {} CSV rows with {} columns", records.len(), headers.len());
    Ok(records)
}
