//! 키 입력 판정 상태 기계
//!
//! 상태는 불변 스냅샷이며, 키 하나를 처리할 때마다 새 스냅샷을 돌려줍니다.
//! 상태: (세그먼트 인덱스, 입력 중인 문자열). 초기 상태 (0, ""),
//! 인덱스가 세그먼트 개수와 같으면 종료 상태입니다.

use crate::core::kana_table::{NASAL_DOUBLED, NASAL_SHORT};
use crate::core::segmenter::{segment, Segment};

/// 한 단어(목표 문자열)에 대한 입력 진행 상태
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypingState {
    segments: Vec<Segment>,
    segment_index: usize,
    partial_input: String,
    completed_romaji: String,
}

impl TypingState {
    /// 히라가나 목표 문자열로 초기 상태 생성
    pub fn new(target: &str) -> Self {
        Self::from_segments(segment(target))
    }

    /// 이미 분할된 세그먼트로 초기 상태 생성
    pub fn from_segments(segments: Vec<Segment>) -> Self {
        Self {
            segments,
            segment_index: 0,
            partial_input: String::new(),
            completed_romaji: String::new(),
        }
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn segment_index(&self) -> usize {
        self.segment_index
    }

    /// 현재 세그먼트에 대해 입력된 문자열
    pub fn partial_input(&self) -> &str {
        &self.partial_input
    }

    /// 완료된 세그먼트에서 실제로 입력한 패턴을 이어붙인 문자열
    pub fn completed_romaji(&self) -> &str {
        &self.completed_romaji
    }

    /// 현재 입력 중인 세그먼트 (종료 상태면 None)
    pub fn current_segment(&self) -> Option<&Segment> {
        self.segments.get(self.segment_index)
    }

    /// 모든 세그먼트 입력 완료 여부
    pub fn is_complete(&self) -> bool {
        self.segment_index >= self.segments.len()
    }

    /// 마지막 세그먼트의 ん이 짧은 표기 n으로 대기 중인지 확인
    pub fn has_pending_nasal(&self) -> bool {
        self.segment_index + 1 == self.segments.len() && self.is_nasal_deferred()
    }

    fn is_nasal_deferred(&self) -> bool {
        self.partial_input == NASAL_SHORT
            && self
                .current_segment()
                .is_some_and(Segment::is_ambiguous_nasal)
    }

    /// 현재 세그먼트를 주어진 패턴으로 완료한 새 상태
    fn complete_with(&self, pattern: &str) -> Self {
        let mut completed_romaji = String::with_capacity(self.completed_romaji.len() + pattern.len());
        completed_romaji.push_str(&self.completed_romaji);
        completed_romaji.push_str(pattern);
        Self {
            segments: self.segments.clone(),
            segment_index: self.segment_index + 1,
            partial_input: String::new(),
            completed_romaji,
        }
    }

    /// 입력 중 문자열만 바꾼 새 상태
    fn with_partial(&self, partial_input: String) -> Self {
        Self {
            segments: self.segments.clone(),
            segment_index: self.segment_index,
            partial_input,
            completed_romaji: self.completed_romaji.clone(),
        }
    }
}

/// 키 입력 처리 결과
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyResult {
    /// 올바른 입력 여부
    pub is_correct: bool,
    /// 이번 호출에서 세그먼트가 하나 이상 완료되었는지
    pub is_segment_complete: bool,
    /// 단어 전체 완료 여부
    pub is_word_complete: bool,
    /// 키가 이 단어에서 소비되었는지
    /// 끝의 ん이 n으로 확정되면서 다음 키를 쓰지 않은 경우 false
    pub key_consumed: bool,
    /// 새 상태 (오입력이면 이전 상태 그대로)
    pub state: TypingState,
}

impl KeyResult {
    fn correct(state: TypingState, is_segment_complete: bool) -> Self {
        let is_word_complete = state.is_complete();
        Self {
            is_correct: true,
            is_segment_complete,
            is_word_complete,
            key_consumed: true,
            state,
        }
    }

    fn miss(state: &TypingState) -> Self {
        Self {
            is_correct: false,
            is_segment_complete: false,
            is_word_complete: state.is_complete(),
            key_consumed: false,
            state: state.clone(),
        }
    }
}

/// 키를 소문자 한 글자로 정규화
pub fn normalize_key(key: char) -> char {
    let mut lower = key.to_lowercase();
    match (lower.next(), lower.next()) {
        (Some(c), None) => c,
        _ => key,
    }
}

/// 키 하나를 처리하여 새 상태 반환
///
/// 판정 순서:
/// 0. ん이 n으로 대기 중이면 (nn도 허용) 지연 확정 규칙 적용
/// 1. 패턴과 완전 일치 -> 세그먼트 완료 (단, nn이 가능한 n은 대기)
/// 2. 패턴의 접두사 -> 입력 중
/// 3. 불일치 -> 상태 변화 없이 오입력
///
/// 지연 확정: n 다음 키가 n이면 nn으로 완료, 아니면 n으로 완료하고
/// 같은 키를 다음 세그먼트에 다시 적용합니다. 한 번의 키 입력이
/// 세그먼트 두 개를 진행시킬 수 있습니다.
pub fn process_key(state: &TypingState, key: char) -> KeyResult {
    let key = normalize_key(key);

    let Some(segment) = state.current_segment() else {
        return KeyResult::miss(state);
    };

    if state.is_nasal_deferred() {
        return resolve_deferred_nasal(state, key);
    }

    let mut candidate = String::with_capacity(state.partial_input.len() + key.len_utf8());
    candidate.push_str(&state.partial_input);
    candidate.push(key);

    if segment.accepts(&candidate) {
        if candidate == NASAL_SHORT && segment.accepts(NASAL_DOUBLED) {
            return KeyResult::correct(state.with_partial(candidate), false);
        }
        return KeyResult::correct(state.complete_with(&candidate), true);
    }

    if segment.is_strict_prefix(&candidate) {
        return KeyResult::correct(state.with_partial(candidate), false);
    }

    KeyResult::miss(state)
}

fn resolve_deferred_nasal(state: &TypingState, key: char) -> KeyResult {
    let mut doubled = String::from(NASAL_SHORT);
    doubled.push(key);
    if doubled == NASAL_DOUBLED {
        return KeyResult::correct(state.complete_with(NASAL_DOUBLED), true);
    }

    let advanced = state.complete_with(NASAL_SHORT);
    if advanced.is_complete() {
        // 단어 끝: n으로 완료, 키는 이 단어에서 쓰이지 않음
        return KeyResult {
            is_correct: false,
            is_segment_complete: true,
            is_word_complete: true,
            key_consumed: false,
            state: advanced,
        };
    }

    // 같은 키로 다음 세그먼트 재판정
    let next = process_key(&advanced, key);
    if !next.is_correct {
        // 원래 웹 버전은 n 확정 상태를 돌려주지만 여기서는 일부러 n 대기 상태를 유지
        return KeyResult::miss(state);
    }
    KeyResult {
        is_segment_complete: true,
        ..next
    }
}

/// 끝의 ん이 n으로 대기 중이면 n으로 확정
/// 대기 중이 아니면 None
pub fn resolve_pending(state: &TypingState) -> Option<KeyResult> {
    if !state.has_pending_nasal() {
        return None;
    }
    Some(KeyResult::correct(state.complete_with(NASAL_SHORT), true))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn type_all(state: &TypingState, keys: &str) -> KeyResult {
        let mut result = KeyResult::miss(state);
        let mut current = state.clone();
        for c in keys.chars() {
            result = process_key(&current, c);
            assert!(result.is_correct, "{:?} 입력 실패 ({})", c, keys);
            current = result.state.clone();
        }
        result
    }

    #[test]
    fn test_initial_state() {
        let state = TypingState::new("かな");
        assert_eq!(state.segment_index(), 0);
        assert_eq!(state.partial_input(), "");
        assert_eq!(state.completed_romaji(), "");
        assert!(!state.is_complete());
    }

    #[test]
    fn test_partial_input() {
        let state = TypingState::new("か");
        let result = process_key(&state, 'k');
        assert!(result.is_correct);
        assert!(!result.is_segment_complete);
        assert!(!result.is_word_complete);
        assert_eq!(result.state.partial_input(), "k");
    }

    #[test]
    fn test_segment_complete() {
        let state = TypingState::new("かな");
        let result = type_all(&state, "ka");
        assert!(result.is_segment_complete);
        assert!(!result.is_word_complete);
        assert_eq!(result.state.segment_index(), 1);
        assert_eq!(result.state.completed_romaji(), "ka");
    }

    #[test]
    fn test_word_complete() {
        let result = type_all(&TypingState::new("かな"), "kana");
        assert!(result.is_word_complete);
        assert!(result.state.is_complete());
        assert_eq!(result.state.completed_romaji(), "kana");
    }

    #[test]
    fn test_variant_spelling_recorded() {
        let result = type_all(&TypingState::new("しゃしん"), "syashinn");
        assert!(result.is_word_complete);
        assert_eq!(result.state.completed_romaji(), "syashinn");
    }

    #[test]
    fn test_rejection_keeps_state() {
        let state = TypingState::new("し");
        let typed = process_key(&state, 's').state;
        let result = process_key(&typed, 'a');
        assert!(!result.is_correct);
        assert!(!result.is_segment_complete);
        assert_eq!(result.state, typed);
    }

    #[test]
    fn test_uppercase_key_normalized() {
        let result = type_all(&TypingState::new("か"), "KA");
        assert!(result.is_word_complete);
    }

    #[test]
    fn test_terminal_state_rejects() {
        let done = type_all(&TypingState::new("あ"), "a").state;
        let result = process_key(&done, 'a');
        assert!(!result.is_correct);
        assert!(result.is_word_complete);
        assert_eq!(result.state, done);
    }

    #[test]
    fn test_empty_target_is_complete() {
        let state = TypingState::new("");
        assert!(state.is_complete());
        let result = process_key(&state, 'a');
        assert!(!result.is_correct);
        assert!(result.is_word_complete);
    }

    #[test]
    fn test_nasal_short_is_deferred() {
        let state = TypingState::new("かんじ");
        let result = type_all(&state, "kan");
        assert!(!result.is_segment_complete);
        assert_eq!(result.state.segment_index(), 1);
        assert_eq!(result.state.partial_input(), "n");
    }

    #[test]
    fn test_nasal_doubled() {
        let result = type_all(&TypingState::new("かんじ"), "kannji");
        assert!(result.is_word_complete);
        assert_eq!(result.state.completed_romaji(), "kannji");
    }

    #[test]
    fn test_nasal_redispatch() {
        let state = type_all(&TypingState::new("かんじ"), "kan").state;
        let result = process_key(&state, 'j');
        assert!(result.is_correct);
        assert!(result.is_segment_complete);
        assert!(!result.is_word_complete);
        assert_eq!(result.state.segment_index(), 2);
        assert_eq!(result.state.partial_input(), "j");
        assert_eq!(result.state.completed_romaji(), "kan");
    }

    #[test]
    fn test_nasal_redispatch_completes_next_segment() {
        // ん + 1글자 패턴 세그먼트: 한 번의 키로 두 세그먼트 완료
        let state = type_all(&TypingState::new("ん!"), "n").state;
        let result = process_key(&state, '!');
        assert!(result.is_correct);
        assert!(result.is_word_complete);
        assert_eq!(result.state.completed_romaji(), "n!");
    }

    #[test]
    fn test_nasal_redispatch_miss_keeps_pending() {
        let state = type_all(&TypingState::new("かんじ"), "kan").state;
        let result = process_key(&state, 'x');
        assert!(!result.is_correct);
        assert_eq!(result.state, state);
        assert_eq!(result.state.partial_input(), "n");
    }

    #[test]
    fn test_nasal_before_vowel_requires_doubled() {
        let state = type_all(&TypingState::new("きんえん"), "kin").state;
        assert_eq!(state.partial_input(), "n");
        assert_eq!(state.segment_index(), 1);

        // n 다음 e는 ん을 완료하지 않음
        let result = process_key(&state, 'e');
        assert!(!result.is_correct);
        assert_eq!(result.state.segment_index(), 1);

        let result = type_all(&state, "nen");
        assert_eq!(result.state.segment_index(), 3);
    }

    #[test]
    fn test_trailing_nasal_doubled() {
        let result = type_all(&TypingState::new("ほん"), "honn");
        assert!(result.is_word_complete);
        assert_eq!(result.state.completed_romaji(), "honn");
    }

    #[test]
    fn test_trailing_nasal_short_with_next_key() {
        let state = type_all(&TypingState::new("ほん"), "hon").state;
        assert!(state.has_pending_nasal());
        let result = process_key(&state, 'k');
        assert!(!result.is_correct);
        assert!(!result.key_consumed);
        assert!(result.is_segment_complete);
        assert!(result.is_word_complete);
        assert_eq!(result.state.completed_romaji(), "hon");
    }

    #[test]
    fn test_resolve_pending() {
        let state = type_all(&TypingState::new("ほん"), "hon").state;
        let result = resolve_pending(&state).unwrap();
        assert!(result.is_word_complete);
        assert_eq!(result.state.completed_romaji(), "hon");

        // 대기 중이 아니면 None
        assert!(resolve_pending(&TypingState::new("ほん")).is_none());
        let mid = type_all(&TypingState::new("かんじ"), "kan").state;
        assert!(resolve_pending(&mid).is_none());
    }

    #[test]
    fn test_geminate_input() {
        let result = type_all(&TypingState::new("がっこう"), "gakkou");
        assert!(result.is_word_complete);
        let result = type_all(&TypingState::new("まっち"), "macchi");
        assert!(result.is_word_complete);
    }

    #[test]
    fn test_normalize_key() {
        assert_eq!(normalize_key('A'), 'a');
        assert_eq!(normalize_key('a'), 'a');
        assert_eq!(normalize_key('-'), '-');
    }
}
