//! 타자 연습 세션
//!
//! 단어 공급, 점수, 키 통계를 하나의 상태로 묶습니다.
//! 시간 제한은 호출 측에서 확인하고, 시간이 끝나면 `summary()`로 결과를 얻습니다.

use crate::config::PracticeConfig;
use crate::core::display::{project, Projection};
use crate::core::matcher::{normalize_key, process_key, resolve_pending, KeyResult, TypingState};
use crate::stats::{KeyRank, KeyStats};
use crate::terms::{Term, TermSource};

/// 빈 단어를 연속으로 건너뛸 수 있는 최대 횟수
const MAX_SKIPPED_TERMS: usize = 1000;

/// 한 단어 진행 중 상태
#[derive(Debug, Clone)]
pub struct Round {
    pub term: Term,
    pub state: TypingState,
}

impl Round {
    pub fn new(term: Term) -> Self {
        let state = TypingState::new(term.target());
        Self { term, state }
    }
}

/// 키 하나 처리 결과
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PressOutcome {
    pub is_correct: bool,
    /// 이번 키로 완료된 단어 수
    pub words_completed: u32,
    /// 이번 키로 얻은 점수
    pub points: u32,
}

/// 세션 종료 결과
#[derive(Debug, Clone)]
pub struct Summary {
    pub score: u32,
    pub words_completed: u32,
    pub best_keys: Vec<KeyRank>,
    pub worst_keys: Vec<KeyRank>,
    /// 출제된 단어 (중복 제거, 출제 순)
    pub reviewed_terms: Vec<Term>,
}

/// 타자 연습 세션
pub struct Session<S: TermSource> {
    source: S,
    config: PracticeConfig,
    round: Option<Round>,
    score: u32,
    words_completed: u32,
    stats: KeyStats,
    used_terms: Vec<Term>,
}

impl<S: TermSource> Session<S> {
    /// 세션 생성 후 첫 단어 출제
    pub fn new(source: S, config: PracticeConfig) -> Self {
        let mut session = Self {
            source,
            config,
            round: None,
            score: 0,
            words_completed: 0,
            stats: KeyStats::new(),
            used_terms: Vec::new(),
        };
        session.next_round();
        session
    }

    /// 출제할 단어가 남아 있는지
    pub fn is_active(&self) -> bool {
        self.round.is_some()
    }

    pub fn current_round(&self) -> Option<&Round> {
        self.round.as_ref()
    }

    pub fn projection(&self) -> Option<Projection> {
        self.round.as_ref().map(|r| project(&r.state))
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn stats(&self) -> &KeyStats {
        &self.stats
    }

    /// 키 하나 처리
    pub fn press(&mut self, key: char) -> PressOutcome {
        let Some(round) = self.round.as_ref() else {
            return PressOutcome::default();
        };

        let typed = normalize_key(key);
        // 오답은 입력했어야 할 대표 키에 기록
        let expected = project(&round.state).next_expected().unwrap_or(typed);
        let result = process_key(&round.state, key);

        if !result.key_consumed && result.is_word_complete && result.is_segment_complete {
            // 끝의 ん이 n으로 확정됨: 단어 완료 후 같은 키를 다음 단어에 적용
            let mut outcome = self.finish_word(result);
            let replayed = self.press(key);
            outcome.is_correct = replayed.is_correct;
            outcome.words_completed += replayed.words_completed;
            outcome.points += replayed.points;
            return outcome;
        }

        if !result.is_correct {
            self.stats.record(expected, false);
            return PressOutcome::default();
        }
        self.stats.record(typed, true);

        let mut outcome = PressOutcome {
            is_correct: true,
            words_completed: 0,
            points: self.config.points_per_key,
        };
        self.score += self.config.points_per_key;

        if result.is_word_complete {
            let finished = self.finish_word(result);
            outcome.words_completed += finished.words_completed;
            outcome.points += finished.points;
        } else if let Some(round) = self.round.as_mut() {
            round.state = result.state;
        }
        outcome
    }

    /// 줄 끝(Enter): 끝의 ん이 n으로 대기 중이면 확정
    pub fn finish_line(&mut self) -> PressOutcome {
        let pending = self
            .round
            .as_ref()
            .and_then(|round| resolve_pending(&round.state));
        match pending {
            Some(result) => self.finish_word(result),
            None => PressOutcome::default(),
        }
    }

    /// 결과 요약
    pub fn summary(&self) -> Summary {
        let mut reviewed_terms: Vec<Term> = Vec::new();
        for term in &self.used_terms {
            if !reviewed_terms.contains(term) {
                reviewed_terms.push(term.clone());
            }
        }
        Summary {
            score: self.score,
            words_completed: self.words_completed,
            best_keys: self
                .stats
                .best(self.config.min_attempts, self.config.ranking_size),
            worst_keys: self
                .stats
                .worst(self.config.min_attempts, self.config.ranking_size),
            reviewed_terms,
        }
    }

    fn finish_word(&mut self, result: KeyResult) -> PressOutcome {
        if let Some(round) = self.round.as_ref() {
            log::debug!(
                "단어 완료: {} ({})",
                round.term.term,
                result.state.completed_romaji()
            );
        }
        self.score += self.config.word_bonus;
        self.words_completed += 1;
        self.next_round();
        PressOutcome {
            is_correct: true,
            words_completed: 1,
            points: self.config.word_bonus,
        }
    }

    /// 다음 단어 출제
    /// 목표 문자열이 빈 단어는 시작부터 완료 상태라 건너뜀
    fn next_round(&mut self) {
        self.round = None;
        for _ in 0..MAX_SKIPPED_TERMS {
            let Some(term) = self.source.next_term() else {
                return;
            };
            let round = Round::new(term);
            if round.state.is_complete() {
                log::warn!("입력할 글자가 없는 단어 건너뜀: {:?}", round.term.term);
                continue;
            }
            self.used_terms.push(round.term.clone());
            self.round = Some(round);
            return;
        }
        log::error!("출제 가능한 단어를 찾지 못했습니다");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::terms::TermDeck;

    fn session(terms: &[&str]) -> Session<TermDeck> {
        let deck = TermDeck::in_order(terms.iter().map(|t| Term::new(*t)).collect());
        Session::new(deck, PracticeConfig::default())
    }

    fn press_all(session: &mut Session<TermDeck>, keys: &str) -> Vec<PressOutcome> {
        keys.chars().map(|c| session.press(c)).collect()
    }

    #[test]
    fn test_scoring() {
        let mut s = session(&["かな", "いぬ"]);
        press_all(&mut s, "kana");
        // 키 4개 x 10 + 보너스 50
        assert_eq!(s.score(), 90);
        assert_eq!(s.current_round().unwrap().term.term, "いぬ");
    }

    #[test]
    fn test_miss_recorded_against_expected_key() {
        let mut s = session(&["か"]);
        let outcome = s.press('x');
        assert!(!outcome.is_correct);
        assert_eq!(outcome.points, 0);
        assert_eq!(s.stats().get('k').unwrap().miss, 1);
        assert_eq!(s.score(), 0);

        s.press('k');
        assert_eq!(s.stats().get('k').unwrap().correct, 1);
    }

    #[test]
    fn test_variant_spelling_recorded_against_typed_keys() {
        // し를 대표 표기 si가 아닌 shi로 입력
        let mut s = session(&["しか"]);
        let outcomes = press_all(&mut s, "shika");
        assert!(outcomes.iter().all(|o| o.is_correct));
        for key in ['s', 'h', 'i', 'k', 'a'] {
            let count = s.stats().get(key).unwrap();
            assert_eq!((count.correct, count.miss), (1, 0), "{}", key);
        }
    }

    #[test]
    fn test_doubled_nasal_recorded_as_n() {
        let mut s = session(&["かんじ"]);
        press_all(&mut s, "kannji");
        assert_eq!(s.stats().get('n').unwrap().correct, 2);
        assert!(s.stats().get('z').is_none());
        assert_eq!(s.stats().get('j').unwrap().correct, 1);
    }

    /// 빈 단어를 그대로 내주는 공급원
    struct FixedSource(Vec<Term>);

    impl TermSource for FixedSource {
        fn next_term(&mut self) -> Option<Term> {
            if self.0.is_empty() {
                None
            } else {
                Some(self.0.remove(0))
            }
        }
    }

    #[test]
    fn test_empty_target_skipped() {
        let source = FixedSource(vec![Term::new(""), Term::new("あ"), Term::new("い")]);
        let mut s = Session::new(source, PracticeConfig::default());
        assert_eq!(s.current_round().unwrap().term.term, "あ");
        let outcome = s.press('a');
        assert!(outcome.is_correct);
        assert_eq!(outcome.words_completed, 1);
        assert_eq!(s.current_round().unwrap().term.term, "い");
        assert_eq!(s.summary().reviewed_terms.len(), 2);
    }

    #[test]
    fn test_only_empty_targets() {
        let source = FixedSource(vec![Term::new(""), Term::new("")]);
        let s = Session::new(source, PracticeConfig::default());
        assert!(!s.is_active());
    }

    #[test]
    fn test_trailing_nasal_replays_key() {
        let mut s = session(&["ほん", "かさ"]);
        press_all(&mut s, "hon");
        let outcome = s.press('k');
        assert!(outcome.is_correct);
        assert_eq!(outcome.words_completed, 1);
        // ほん 완료 후 k가 かさ의 첫 입력으로 처리됨
        let round = s.current_round().unwrap();
        assert_eq!(round.term.term, "かさ");
        assert_eq!(round.state.partial_input(), "k");
        assert_eq!(s.score(), 30 + 50 + 10);
    }

    #[test]
    fn test_finish_line_resolves_pending_nasal() {
        let mut s = session(&["ほん", "かさ"]);
        press_all(&mut s, "hon");
        let outcome = s.finish_line();
        assert_eq!(outcome.words_completed, 1);
        assert_eq!(s.current_round().unwrap().term.term, "かさ");

        // 대기 중이 아니면 아무 일도 없음
        assert_eq!(s.finish_line(), PressOutcome::default());
    }

    #[test]
    fn test_empty_source() {
        let mut s = session(&[]);
        assert!(!s.is_active());
        assert_eq!(s.press('a'), PressOutcome::default());
        assert!(s.projection().is_none());
    }

    #[test]
    fn test_summary() {
        let mut s = session(&["あ"]);
        // あ가 반복 출제됨
        press_all(&mut s, "aaaaa");
        press_all(&mut s, "x");
        let summary = s.summary();
        assert_eq!(summary.words_completed, 5);
        assert_eq!(summary.reviewed_terms.len(), 1);
        assert_eq!(summary.best_keys.len(), 1);
        assert_eq!(summary.best_keys[0].key, 'a');
        assert_eq!(summary.worst_keys[0].miss, 1);
        assert_eq!(summary.score, 5 * 10 + 5 * 50);
    }
}
