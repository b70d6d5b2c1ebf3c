use anyhow::{Context, Result};
use chrono::{DateTime, Local, TimeZone, Utc};
use std::fs::File;
use std::io::{BufReader, Read, Seek};
use std::path::Path;

/// Seconds between 1904-01-01T00:00:00Z (QuickTime epoch) and the Unix epoch.
const QUICKTIME_EPOCH_OFFSET: i64 = 2_082_844_800;

/// Lookup of the "media encoded" timestamp of a video container.
pub trait MediaDateSource {
    fn media_encoded(&self, path: &Path) -> Option<DateTime<Local>>;
}

/// Reads `moov/mvhd` creation time from QuickTime / ISO-BMFF files
/// (`.mov`, `.mp4`).
#[derive(Debug, Clone, Copy, Default)]
pub struct ContainerMediaDate;

impl MediaDateSource for ContainerMediaDate {
    fn media_encoded(&self, path: &Path) -> Option<DateTime<Local>> {
        match read_media_encoded(path) {
            Ok(date) => date,
            Err(err) => {
                log::debug!("動画作成日時なし: {err:#}");
                None
            }
        }
    }
}

pub fn read_media_encoded(path: &Path) -> Result<Option<DateTime<Local>>> {
    let file = File::open(path)
        .with_context(|| format!("動画ファイルを開けませんでした: {}", path.display()))?;
    let size = file
        .metadata()
        .with_context(|| format!("動画ファイル情報を取得できませんでした: {}", path.display()))?
        .len();
    let seconds = read_mvhd_creation(BufReader::new(file), size)
        .with_context(|| format!("動画コンテナを解析できませんでした: {}", path.display()))?;
    Ok(seconds.and_then(quicktime_to_local))
}

/// `mvhd` creation time in seconds since 1904; zero means the encoder left
/// it unset.
pub fn read_mvhd_creation<R: Read + Seek>(reader: R, size: u64) -> Result<Option<u64>> {
    let mp4 = mp4::Mp4Reader::read_header(reader, size)?;
    let creation_time = mp4.moov.mvhd.creation_time;
    Ok(Some(creation_time).filter(|s| *s != 0))
}

fn quicktime_to_local(seconds: u64) -> Option<DateTime<Local>> {
    let unix = i64::try_from(seconds)
        .ok()?
        .checked_sub(QUICKTIME_EPOCH_OFFSET)?;
    Utc.timestamp_opt(unix, 0)
        .single()
        .map(|utc| utc.with_timezone(&Local))
}
