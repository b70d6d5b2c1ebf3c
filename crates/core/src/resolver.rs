use crate::config::VideoFallback;
use crate::exif_reader::date_taken;
use crate::metadata::{CandidateDates, DateSource, ResolvedDate};
use crate::video_reader::MediaDateSource;
use anyhow::{Context, Result};
use chrono::{DateTime, Local};
use std::fs;
use std::path::Path;

/// Earliest of the EXIF date taken, the creation time and the modification
/// time. Unreadable EXIF is skipped; unreadable filesystem metadata is not.
pub fn resolve_generic_date(path: &Path) -> Result<ResolvedDate> {
    let mut dates = CandidateDates::default();
    dates.push_opt(date_taken(path), DateSource::ExifDateTaken);
    push_file_times(path, &mut dates)?;

    dates
        .earliest()
        .with_context(|| format!("日時を取得できませんでした: {}", path.display()))
}

/// The container's media-encoded time alone; the fallback policy only runs
/// when the lookup comes back empty.
pub fn resolve_video_date(
    path: &Path,
    source: &dyn MediaDateSource,
    fallback: VideoFallback,
) -> Result<ResolvedDate> {
    if let Some(date) = source.media_encoded(path) {
        return Ok(ResolvedDate::new(date, DateSource::MediaEncoded));
    }

    match fallback {
        VideoFallback::CurrentTime => Ok(ResolvedDate::now()),
        VideoFallback::FileTimes => {
            let mut dates = CandidateDates::default();
            push_file_times(path, &mut dates)?;
            Ok(dates.earliest().unwrap_or_else(ResolvedDate::now))
        }
    }
}

fn push_file_times(path: &Path, dates: &mut CandidateDates) -> Result<()> {
    let meta = fs::metadata(path)
        .with_context(|| format!("ファイル情報を取得できませんでした: {}", path.display()))?;

    // Some filesystems have no birth time.
    dates.push_opt(
        meta.created().ok().map(DateTime::<Local>::from),
        DateSource::FileCreated,
    );
    dates.push_opt(
        meta.modified().ok().map(DateTime::<Local>::from),
        DateSource::FileModified,
    );
    Ok(())
}
