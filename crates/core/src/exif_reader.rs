use anyhow::{Context, Result};
use chrono::{DateTime, Local, NaiveDateTime, TimeZone};
use exif::{In, Reader, Tag, Value};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// EXIF DateTimeOriginal (tag 36867), interpreted as local wall time.
pub fn read_date_taken(path: &Path) -> Result<Option<DateTime<Local>>> {
    let file = File::open(path)
        .with_context(|| format!("EXIF読み込み対象を開けませんでした: {}", path.display()))?;
    let mut buf = BufReader::new(file);
    let exif = Reader::new()
        .read_from_container(&mut buf)
        .with_context(|| format!("EXIFを解析できませんでした: {}", path.display()))?;

    let Some(field) = exif.get_field(Tag::DateTimeOriginal, In::PRIMARY) else {
        return Ok(None);
    };

    let raw = match &field.value {
        Value::Ascii(values) => values
            .first()
            .map(|v| String::from_utf8_lossy(v).to_string()),
        _ => None,
    };

    Ok(raw.as_deref().and_then(parse_date))
}

/// Swallows every read failure; the caller falls back to filesystem times.
pub fn date_taken(path: &Path) -> Option<DateTime<Local>> {
    match read_date_taken(path) {
        Ok(date) => date,
        Err(err) => {
            log::debug!("撮影日時なし: {err:#}");
            None
        }
    }
}

fn parse_date(input: &str) -> Option<DateTime<Local>> {
    let normalized = input.trim().trim_end_matches('\0');

    let candidates = [
        "%Y:%m:%d %H:%M:%S",
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%dT%H:%M:%S",
    ];

    for fmt in candidates {
        if let Ok(naive) = NaiveDateTime::parse_from_str(normalized, fmt) {
            if let Some(local) = Local.from_local_datetime(&naive).earliest() {
                return Some(local);
            }
        }
    }

    None
}
