//! 히라가나 문자열 -> 세그먼트 분할기
//!
//! 입력 판정의 단위인 세그먼트(히라가나 단위 + 허용 로마자 패턴)로 나눕니다.
//! 촉음(っ)과 발음(ん)처럼 주변 글자에 따라 패턴이 달라지는 경우도 여기서 처리하고,
//! 입력 판정 단계에서는 주변 글자를 보지 않습니다.

use crate::core::kana_table::{
    blocks_short_nasal, is_doubling_consonant, lookup, GEMINATE_MARK, NASAL, NASAL_DOUBLED,
    NASAL_SHORT,
};

/// 히라가나 한 단위와 허용되는 로마자 패턴
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    /// 원문 단위 (1~3글자)
    pub unit: String,
    /// 허용 패턴 (비어 있지 않음, 첫 번째가 대표 표기)
    pub patterns: Vec<String>,
}

impl Segment {
    fn new(unit: impl Into<String>, patterns: Vec<String>) -> Self {
        Self {
            unit: unit.into(),
            patterns,
        }
    }

    /// 대표 표기 (안내 표시용)
    pub fn primary(&self) -> &str {
        self.patterns.first().map(String::as_str).unwrap_or("")
    }

    /// 패턴 중 하나와 정확히 일치하는지 확인
    pub fn accepts(&self, input: &str) -> bool {
        self.patterns.iter().any(|p| p == input)
    }

    /// 입력이 어떤 패턴의 진접두사인지 확인
    pub fn is_strict_prefix(&self, input: &str) -> bool {
        self.patterns
            .iter()
            .any(|p| p.len() > input.len() && p.starts_with(input))
    }

    /// ん 세그먼트가 n/nn 둘 다 허용하는 상태인지 확인
    pub fn is_ambiguous_nasal(&self) -> bool {
        self.accepts(NASAL_SHORT) && self.accepts(NASAL_DOUBLED)
    }
}

/// 히라가나 문자열을 세그먼트 목록으로 분할
///
/// 각 위치에서 긴 매칭부터 시도:
/// 1. っ + 요음 2글자
/// 2. っ + 1글자
/// 3. 요음 2글자
/// 4. 1글자
/// 5. 테이블에 없는 문자는 그대로 통과 (자기 자신이 패턴)
pub fn segment(target: &str) -> Vec<Segment> {
    let chars: Vec<char> = target.chars().collect();
    let mut segments = Vec::with_capacity(chars.len());
    let mut i = 0;

    while i < chars.len() {
        if chars[i] == GEMINATE_MARK {
            if let Some((seg, consumed)) = match_geminate(&chars[i + 1..]) {
                segments.push(seg);
                i += 1 + consumed;
                continue;
            }
        }

        if i + 1 < chars.len() {
            let two: String = chars[i..i + 2].iter().collect();
            let patterns = lookup(&two);
            if !patterns.is_empty() {
                segments.push(Segment::new(two, to_owned_patterns(patterns)));
                i += 2;
                continue;
            }
        }

        let one = chars[i].to_string();
        let patterns = lookup(&one);
        if patterns.is_empty() {
            log::debug!("패턴 없는 문자 그대로 통과: {:?}", chars[i]);
            segments.push(Segment::new(one, vec![identity_pattern(chars[i])]));
        } else {
            segments.push(Segment::new(one, to_owned_patterns(patterns)));
        }
        i += 1;
    }

    resolve_nasals(&mut segments);
    segments
}

/// っ 뒤의 단위를 찾아 자음을 겹친 세그먼트 생성
/// 반환: (세그먼트, っ 뒤에서 소비한 글자 수)
fn match_geminate(rest: &[char]) -> Option<(Segment, usize)> {
    for len in [2, 1] {
        if rest.len() < len {
            continue;
        }
        let unit: String = rest[..len].iter().collect();
        let patterns = lookup(&unit);
        if patterns.is_empty() {
            continue;
        }
        let doubled = double_initial(patterns);
        if doubled.is_empty() {
            // 모음/장음 기호처럼 겹칠 자음이 없으면 っ 단독 처리
            return None;
        }
        let mut full = String::with_capacity(unit.len() + GEMINATE_MARK.len_utf8());
        full.push(GEMINATE_MARK);
        full.push_str(&unit);
        return Some((Segment::new(full, doubled), len));
    }
    None
}

/// 각 패턴의 첫 자음을 겹침 (kya -> kkya)
fn double_initial(patterns: &[&str]) -> Vec<String> {
    patterns
        .iter()
        .filter_map(|p| {
            let first = p.chars().next().filter(|&c| is_doubling_consonant(c))?;
            let mut doubled = String::with_capacity(p.len() + 1);
            doubled.push(first);
            doubled.push_str(p);
            Some(doubled)
        })
        .collect()
}

/// ん의 허용 패턴을 다음 세그먼트의 대표 표기로 결정
/// - 마지막: n, nn
/// - 다음이 모음/n/y로 시작: nn만 (n 단독이면 다음 글자와 구분 불가)
/// - 그 외 자음: n, nn
fn resolve_nasals(segments: &mut [Segment]) {
    for i in 0..segments.len() {
        if !is_nasal_unit(&segments[i].unit) {
            continue;
        }
        let short_allowed = match segments.get(i + 1) {
            Some(next) => !next.primary().chars().next().is_some_and(blocks_short_nasal),
            None => true,
        };
        segments[i].patterns = if short_allowed {
            vec![NASAL_SHORT.to_string(), NASAL_DOUBLED.to_string()]
        } else {
            vec![NASAL_DOUBLED.to_string()]
        };
    }
}

fn is_nasal_unit(unit: &str) -> bool {
    let mut chars = unit.chars();
    chars.next() == Some(NASAL) && chars.next().is_none()
}

fn to_owned_patterns(patterns: &[&str]) -> Vec<String> {
    patterns.iter().map(|p| p.to_string()).collect()
}

/// 통과 문자의 패턴: 입력 키가 소문자로 정규화되므로 소문자로 맞춤
fn identity_pattern(c: char) -> String {
    let mut lower = c.to_lowercase();
    match (lower.next(), lower.next()) {
        (Some(l), None) => l.to_string(),
        _ => c.to_string(),
    }
}
