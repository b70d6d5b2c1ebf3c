use crate::naming::DEFAULT_SUFFIX_LEN;
use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum RenameMode {
    Video,
    Image,
    Special,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum VideoFallback {
    #[default]
    CurrentTime,
    FileTimes,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum CollisionPolicy {
    #[default]
    Fail,
    Skip,
    Overwrite,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{kind}の値が不正です: {value} (候補: {expected})")]
pub struct ParseEnumError {
    kind: &'static str,
    value: String,
    expected: String,
}

fn parse_choice<T: Copy>(
    kind: &'static str,
    input: &str,
    choices: &[(&'static str, T)],
) -> Result<T, ParseEnumError> {
    let normalized = input.trim().to_ascii_lowercase();
    choices
        .iter()
        .find(|(name, _)| *name == normalized)
        .map(|(_, value)| *value)
        .ok_or_else(|| ParseEnumError {
            kind,
            value: input.to_string(),
            expected: choices
                .iter()
                .map(|(name, _)| *name)
                .collect::<Vec<_>>()
                .join(" / "),
        })
}

fn choice_name<T: Copy + PartialEq>(value: T, choices: &[(&'static str, T)]) -> &'static str {
    choices
        .iter()
        .find(|(_, v)| *v == value)
        .map(|(name, _)| *name)
        .unwrap_or_default()
}

impl RenameMode {
    const CHOICES: &'static [(&'static str, Self)] = &[
        ("video", Self::Video),
        ("image", Self::Image),
        ("special", Self::Special),
    ];
}

impl fmt::Display for RenameMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(choice_name(*self, Self::CHOICES))
    }
}

impl FromStr for RenameMode {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_choice("モード", s, Self::CHOICES)
    }
}

impl VideoFallback {
    const CHOICES: &'static [(&'static str, Self)] = &[
        ("current-time", Self::CurrentTime),
        ("file-times", Self::FileTimes),
    ];
}

impl fmt::Display for VideoFallback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(choice_name(*self, Self::CHOICES))
    }
}

impl FromStr for VideoFallback {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_choice("動画フォールバック", s, Self::CHOICES)
    }
}

impl CollisionPolicy {
    const CHOICES: &'static [(&'static str, Self)] = &[
        ("fail", Self::Fail),
        ("skip", Self::Skip),
        ("overwrite", Self::Overwrite),
    ];
}

impl fmt::Display for CollisionPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(choice_name(*self, Self::CHOICES))
    }
}

impl FromStr for CollisionPolicy {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_choice("衝突時動作", s, Self::CHOICES)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct AppConfig {
    pub default_mode: Option<RenameMode>,
    pub suffix_len: usize,
    pub video_fallback: VideoFallback,
    pub on_collision: CollisionPolicy,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            default_mode: None,
            suffix_len: DEFAULT_SUFFIX_LEN,
            video_fallback: VideoFallback::default(),
            on_collision: CollisionPolicy::default(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppPaths {
    pub config_dir: PathBuf,
    pub config_path: PathBuf,
}

pub fn app_paths() -> Result<AppPaths> {
    let proj = ProjectDirs::from("com", "stamp", "stamp-renamer")
        .context("OS標準設定ディレクトリを取得できませんでした")?;
    let config_dir = proj.config_dir().to_path_buf();
    Ok(AppPaths {
        config_path: config_dir.join("config.toml"),
        config_dir,
    })
}

pub fn load_config() -> Result<AppConfig> {
    let paths = app_paths()?;
    if !paths.config_path.exists() {
        return Ok(AppConfig::default());
    }
    load_config_from(&paths.config_path)
}

pub fn load_config_from(path: &Path) -> Result<AppConfig> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("設定ファイルを読めませんでした: {}", path.display()))?;

    let config = toml::from_str::<AppConfig>(&raw)
        .with_context(|| format!("設定ファイルのパースに失敗しました: {}", path.display()))?;
    Ok(config)
}

pub fn save_config(config: &AppConfig) -> Result<PathBuf> {
    let paths = app_paths()?;
    fs::create_dir_all(&paths.config_dir).with_context(|| {
        format!(
            "設定ディレクトリを作成できませんでした: {}",
            paths.config_dir.display()
        )
    })?;
    save_config_to(config, &paths.config_path)?;
    Ok(paths.config_path)
}

pub fn save_config_to(config: &AppConfig, path: &Path) -> Result<()> {
    let body = toml::to_string_pretty(config).context("設定のシリアライズに失敗しました")?;
    fs::write(path, body)
        .with_context(|| format!("設定ファイルを書き込めませんでした: {}", path.display()))?;
    Ok(())
}
