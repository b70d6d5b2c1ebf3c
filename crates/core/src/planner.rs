use crate::config::{CollisionPolicy, RenameMode, VideoFallback};
use crate::metadata::DateSource;
use crate::naming::{
    build_labeled_name, build_stamped_name, extension_with_dot, generate_suffix,
    validate_label, LabelError, DEFAULT_SUFFIX_LEN,
};
use crate::resolver::{resolve_generic_date, resolve_video_date};
use crate::video_reader::{ContainerMediaDate, MediaDateSource};
use anyhow::{Context, Result};
use chrono::{DateTime, Local};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

const VIDEO_EXTENSIONS: &[&str] = &["mov", "mp4"];
const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png"];
const COMPANION_SOURCE_EXTENSIONS: &[&str] = &["jpg", "jpeg"];
const COMPANION_EXTENSION: &str = "mov";

#[derive(Debug, Clone)]
pub struct RenameOptions {
    pub directory: PathBuf,
    pub mode: RenameMode,
    pub special_date: Option<String>,
    pub suffix_len: usize,
    pub video_fallback: VideoFallback,
    pub collision: CollisionPolicy,
}

impl RenameOptions {
    pub fn new(directory: impl Into<PathBuf>, mode: RenameMode) -> Self {
        Self {
            directory: directory.into(),
            mode,
            special_date: None,
            suffix_len: DEFAULT_SUFFIX_LEN,
            video_fallback: VideoFallback::default(),
            collision: CollisionPolicy::default(),
        }
    }

    pub fn validate(&self) -> Result<(), OptionsError> {
        if !self.directory.is_dir() {
            return Err(OptionsError::MissingDirectory(self.directory.clone()));
        }
        if self.suffix_len == 0 {
            return Err(OptionsError::EmptySuffix);
        }
        match (self.mode, self.special_date.as_deref()) {
            (RenameMode::Special, None) => Err(OptionsError::MissingSpecialDate),
            (RenameMode::Special, Some(label)) => validate_label(label).map_err(Into::into),
            _ => Ok(()),
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum OptionsError {
    #[error("対象フォルダが存在しません: {}", .0.display())]
    MissingDirectory(PathBuf),
    #[error("サフィックス長は1以上を指定してください")]
    EmptySuffix,
    #[error("specialモードには日付ラベル (--date) が必要です")]
    MissingSpecialDate,
    #[error(transparent)]
    InvalidLabel(#[from] LabelError),
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CompanionRename {
    pub original_path: PathBuf,
    pub target_path: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenameCandidate {
    pub original_path: PathBuf,
    pub target_path: PathBuf,
    pub source: DateSource,
    pub date: Option<DateTime<Local>>,
    pub suffix: String,
    pub companion: Option<CompanionRename>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct RenameStats {
    pub scanned_entries: usize,
    pub skipped_dirs: usize,
    pub skipped_unmatched: usize,
    pub planned: usize,
    pub companions: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenamePlan {
    pub directory: PathBuf,
    pub mode: RenameMode,
    pub collision: CollisionPolicy,
    pub candidates: Vec<RenameCandidate>,
    pub stats: RenameStats,
}

pub fn generate_plan(options: &RenameOptions) -> Result<RenamePlan> {
    generate_plan_with(options, &ContainerMediaDate, &mut rand::thread_rng())
}

pub fn generate_plan_with<R: Rng + ?Sized>(
    options: &RenameOptions,
    media: &dyn MediaDateSource,
    rng: &mut R,
) -> Result<RenamePlan> {
    options.validate()?;

    let mut stats = RenameStats::default();
    let files = list_regular_files(&options.directory, &mut stats)?;

    let mut claimed_companions = HashSet::<PathBuf>::new();
    let mut candidates = Vec::new();

    for path in &files {
        if !matches_mode(options.mode, path) {
            stats.skipped_unmatched += 1;
            continue;
        }

        let suffix = generate_suffix(rng, options.suffix_len);
        let extension = extension_with_dot(path);
        let (file_name, resolved) = match options.mode {
            RenameMode::Special => {
                let label = options.special_date.as_deref().unwrap_or_default();
                (build_labeled_name(label, &suffix, &extension), None)
            }
            RenameMode::Video => {
                let resolved = resolve_video_date(path, media, options.video_fallback)?;
                (
                    build_stamped_name(&resolved.date, &suffix, &extension),
                    Some(resolved),
                )
            }
            RenameMode::Image => {
                let resolved = resolve_generic_date(path)?;
                (
                    build_stamped_name(&resolved.date, &suffix, &extension),
                    Some(resolved),
                )
            }
        };

        let target_path = options.directory.join(&file_name);
        let companion = match (options.mode, resolved) {
            (RenameMode::Image, Some(resolved))
                if has_extension(path, COMPANION_SOURCE_EXTENSIONS) =>
            {
                find_companion(path, &files, &claimed_companions).map(|original| {
                    claimed_companions.insert(original.clone());
                    let target = options.directory.join(build_stamped_name(
                        &resolved.date,
                        &suffix,
                        &extension_with_dot(&original),
                    ));
                    CompanionRename {
                        original_path: original,
                        target_path: target,
                    }
                })
            }
            _ => None,
        };

        if companion.is_some() {
            stats.companions += 1;
        }
        stats.planned += 1;
        candidates.push(RenameCandidate {
            original_path: path.clone(),
            target_path,
            source: resolved.map_or(DateSource::FixedLabel, |r| r.source),
            date: resolved.map(|r| r.date),
            suffix,
            companion,
        });
    }

    Ok(RenamePlan {
        directory: options.directory.clone(),
        mode: options.mode,
        collision: options.collision,
        candidates,
        stats,
    })
}

/// Immediate children only, read once and sorted by file name.
fn list_regular_files(root: &Path, stats: &mut RenameStats) -> Result<Vec<PathBuf>> {
    let mut out = Vec::new();
    for entry in WalkDir::new(root)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        let entry =
            entry.with_context(|| format!("フォルダ走査に失敗しました: {}", root.display()))?;
        stats.scanned_entries += 1;
        let path = entry.path();
        if !path.is_file() {
            stats.skipped_dirs += 1;
            continue;
        }
        out.push(path.to_path_buf());
    }
    Ok(out)
}

fn matches_mode(mode: RenameMode, path: &Path) -> bool {
    match mode {
        RenameMode::Video => has_extension(path, VIDEO_EXTENSIONS),
        RenameMode::Image => has_extension(path, IMAGE_EXTENSIONS),
        RenameMode::Special => true,
    }
}

fn has_extension(path: &Path, allowed: &[&str]) -> bool {
    path.extension()
        .map(|ext| {
            let ext = ext.to_string_lossy();
            allowed.iter().any(|a| ext.eq_ignore_ascii_case(a))
        })
        .unwrap_or(false)
}

/// Same-stem `.mov` next to a still image; an exact lowercase match wins
/// over other spellings of the extension.
fn find_companion(
    image: &Path,
    files: &[PathBuf],
    claimed: &HashSet<PathBuf>,
) -> Option<PathBuf> {
    let stem = image.file_stem()?;
    let mut matches: Vec<&PathBuf> = files
        .iter()
        .filter(|p| p.file_stem() == Some(stem))
        .filter(|p| has_extension(p, &[COMPANION_EXTENSION]))
        .filter(|p| !claimed.contains(*p))
        .collect();
    matches.sort_by_key(|p| p.extension().map_or(true, |e| e != COMPANION_EXTENSION));
    matches.first().map(|p| (*p).clone())
}
