//! 설정 파일 로드/저장 (JSON)

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// 설정 저장 에러
#[derive(Debug)]
pub enum ConfigError {
    /// 파일/디렉토리 쓰기 실패
    IoError(std::io::Error),
    /// 직렬화 실패
    SerializeError(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::IoError(e) => write!(f, "설정 파일 저장 실패: {}", e),
            ConfigError::SerializeError(s) => write!(f, "직렬화 실패: {}", s),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::IoError(e)
    }
}

/// 타자 연습 설정
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct PracticeConfig {
    /// 한 판 제한 시간 (초)
    #[serde(default = "default_round_seconds")]
    pub round_seconds: u64,
    /// 올바른 키 하나당 점수
    #[serde(default = "default_points_per_key")]
    pub points_per_key: u32,
    /// 단어 완료 보너스
    #[serde(default = "default_word_bonus")]
    pub word_bonus: u32,
    /// 키 순위에 포함되기 위한 최소 시도 횟수
    #[serde(default = "default_min_attempts")]
    pub min_attempts: u32,
    /// 순위 표시 개수
    #[serde(default = "default_ranking_size")]
    pub ranking_size: usize,
    /// 단어 목록 파일 경로
    #[serde(default = "default_terms_path")]
    pub terms_path: String,
    /// 출제 분류 (없으면 전체)
    #[serde(default)]
    pub category: Option<String>,
    /// 출제 레벨 (없으면 전체)
    #[serde(default)]
    pub level: Option<u32>,
}

fn default_round_seconds() -> u64 {
    30
}

fn default_points_per_key() -> u32 {
    10
}

fn default_word_bonus() -> u32 {
    50
}

fn default_min_attempts() -> u32 {
    5
}

fn default_ranking_size() -> usize {
    3
}

fn default_terms_path() -> String {
    "questions.json".to_string()
}

impl Default for PracticeConfig {
    fn default() -> Self {
        Self {
            round_seconds: default_round_seconds(),
            points_per_key: default_points_per_key(),
            word_bonus: default_word_bonus(),
            min_attempts: default_min_attempts(),
            ranking_size: default_ranking_size(),
            terms_path: default_terms_path(),
            category: None,
            level: None,
        }
    }
}

/// 설정 파일 경로: ~/.config/kanatype/config.json
pub fn config_path() -> PathBuf {
    let home = std::env::var("HOME")
        .ok()
        .map(PathBuf::from)
        .filter(|p| p.is_absolute() && p.is_dir())
        .unwrap_or_else(|| PathBuf::from("/var/tmp"));
    home.join(".config").join("kanatype").join("config.json")
}

/// 기본 경로에서 설정 로드
pub fn load_config() -> PracticeConfig {
    load_config_from(config_path())
}

/// 설정 파일 로드 (파일 없거나 파싱 실패 시 기본값)
pub fn load_config_from(path: impl AsRef<Path>) -> PracticeConfig {
    let path = path.as_ref();
    match fs::read_to_string(path) {
        Ok(content) => serde_json::from_str(&content).unwrap_or_else(|e| {
            log::warn!("설정 파일 파싱 실패, 기본값 사용 ({}): {}", path.display(), e);
            PracticeConfig::default()
        }),
        Err(_) => PracticeConfig::default(),
    }
}

/// 설정 파일 저장
pub fn save_config(config: &PracticeConfig, path: impl AsRef<Path>) -> Result<(), ConfigError> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(config)
        .map_err(|e| ConfigError::SerializeError(e.to_string()))?;
    fs::write(path, json)?;
    Ok(())
}
