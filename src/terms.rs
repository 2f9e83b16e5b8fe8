//! 출제 단어 목록 (JSON)
//!
//! 라운드마다 목표 히라가나 문자열을 공급합니다.
//!
//! # 파일 형식
//! ```json
//! [
//!   { "term": "がっこう", "explanation": "school", "category": "basic", "level": 1 },
//!   { "term": "漢字", "reading": "かんじ", "level": 2 }
//! ]
//! ```

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

/// 단어 목록 로드 에러
#[derive(Debug)]
pub enum TermError {
    /// 파일 읽기 실패
    IoError(std::io::Error),
    /// JSON 파싱 실패
    ParseError(String),
}

impl std::fmt::Display for TermError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TermError::IoError(e) => write!(f, "단어 파일 읽기 오류: {}", e),
            TermError::ParseError(s) => write!(f, "단어 JSON 파싱 오류: {}", s),
        }
    }
}

impl std::error::Error for TermError {}

impl From<std::io::Error> for TermError {
    fn from(e: std::io::Error) -> Self {
        TermError::IoError(e)
    }
}

/// 출제 단어
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Term {
    /// 화면에 보여줄 단어
    pub term: String,
    /// 히라가나 읽기 (없으면 term 자체가 히라가나)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reading: Option<String>,
    /// 안내용 로마자 (입력 판정에는 쓰지 않음)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub roman: Option<String>,
    /// 복습 목록에 보여줄 설명
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<u32>,
}

impl Term {
    /// 히라가나만으로 된 단어 생성
    pub fn new(term: impl Into<String>) -> Self {
        Self {
            term: term.into(),
            reading: None,
            roman: None,
            explanation: None,
            category: None,
            level: None,
        }
    }

    /// 입력 목표 문자열
    pub fn target(&self) -> &str {
        self.reading.as_deref().unwrap_or(&self.term)
    }
}

/// JSON 파일에서 단어 목록 로드
pub fn load_terms(path: impl AsRef<Path>) -> Result<Vec<Term>, TermError> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);
    serde_json::from_reader(reader).map_err(|e| TermError::ParseError(e.to_string()))
}

/// JSON 문자열에서 단어 목록 로드
pub fn parse_terms(json_str: &str) -> Result<Vec<Term>, TermError> {
    serde_json::from_str(json_str).map_err(|e| TermError::ParseError(e.to_string()))
}

/// 분류/레벨 조건으로 거름 (None이면 조건 없음)
pub fn filter_terms(terms: Vec<Term>, category: Option<&str>, level: Option<u32>) -> Vec<Term> {
    terms
        .into_iter()
        .filter(|t| category.map_or(true, |c| t.category.as_deref() == Some(c)))
        .filter(|t| level.map_or(true, |l| t.level == Some(l)))
        .collect()
}

/// 라운드마다 단어를 공급하는 쪽
pub trait TermSource {
    /// 다음 단어 (없으면 None)
    fn next_term(&mut self) -> Option<Term>;
}

/// 라운드마다 단어를 섞어서 내주는 목록
/// 끝에 도달하면 다시 섞어서 처음부터 시작
/// 목표 문자열이 비어 있는 단어는 출제하지 않음
#[derive(Debug, Clone)]
pub struct TermDeck {
    terms: Vec<Term>,
    position: usize,
    /// None이면 섞지 않고 주어진 순서대로
    rng: Option<StdRng>,
}

impl TermDeck {
    /// 무작위로 섞는 목록
    pub fn new(terms: Vec<Term>) -> Self {
        Self::build(terms, Some(StdRng::from_entropy()))
    }

    /// 시드를 고정해 섞는 목록 (재현 가능한 출제 순서)
    pub fn with_seed(terms: Vec<Term>, seed: u64) -> Self {
        Self::build(terms, Some(StdRng::seed_from_u64(seed)))
    }

    /// 섞지 않고 주어진 순서대로 돌아가는 목록
    pub fn in_order(terms: Vec<Term>) -> Self {
        Self::build(terms, None)
    }

    fn build(terms: Vec<Term>, rng: Option<StdRng>) -> Self {
        let terms: Vec<Term> = terms
            .into_iter()
            .filter(|t| {
                let keep = !t.target().is_empty();
                if !keep {
                    log::warn!("목표 문자열이 빈 단어 제외: {:?}", t.term);
                }
                keep
            })
            .collect();
        let mut deck = Self {
            terms,
            position: 0,
            rng,
        };
        deck.shuffle();
        deck
    }

    fn shuffle(&mut self) {
        if let Some(rng) = self.rng.as_mut() {
            self.terms.shuffle(rng);
        }
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }
}

impl TermSource for TermDeck {
    fn next_term(&mut self) -> Option<Term> {
        if self.terms.is_empty() {
            return None;
        }
        if self.position >= self.terms.len() {
            self.shuffle();
            self.position = 0;
        }
        let term = self.terms[self.position].clone();
        self.position += 1;
        Some(term)
    }
}
