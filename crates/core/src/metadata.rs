use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum DateSource {
    ExifDateTaken,
    MediaEncoded,
    FileCreated,
    FileModified,
    CurrentTime,
    FixedLabel,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct ResolvedDate {
    pub date: DateTime<Local>,
    pub source: DateSource,
}

impl ResolvedDate {
    pub fn new(date: DateTime<Local>, source: DateSource) -> Self {
        Self { date, source }
    }

    pub fn now() -> Self {
        Self::new(Local::now(), DateSource::CurrentTime)
    }
}

/// Every timestamp successfully read for one file, in insertion order.
#[derive(Debug, Clone, Default)]
pub struct CandidateDates {
    values: Vec<ResolvedDate>,
}

impl CandidateDates {
    pub fn push(&mut self, date: DateTime<Local>, source: DateSource) {
        self.values.push(ResolvedDate::new(date, source));
    }

    pub fn push_opt(&mut self, date: Option<DateTime<Local>>, source: DateSource) {
        if let Some(date) = date {
            self.push(date, source);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Ties keep the earlier-inserted source, so embedded metadata wins over
    /// a filesystem time carrying the same instant.
    pub fn earliest(&self) -> Option<ResolvedDate> {
        self.values.iter().copied().reduce(|best, candidate| {
            if candidate.date < best.date {
                candidate
            } else {
                best
            }
        })
    }
}
