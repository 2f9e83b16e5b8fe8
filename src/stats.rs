//! 키별 정확도 통계
//!
//! 입력해야 했던 키 기준으로 정답/오답 횟수를 모으고,
//! 라운드 종료 후 잘 친 키와 자주 틀린 키 순위를 계산합니다.

use std::cmp::Ordering;
use std::collections::BTreeMap;

/// 키 하나의 정답/오답 횟수
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KeyCount {
    pub correct: u32,
    pub miss: u32,
}

impl KeyCount {
    pub fn total(&self) -> u32 {
        self.correct + self.miss
    }

    /// 정확도 (0.0 ~ 1.0), 시도가 없으면 0
    pub fn accuracy(&self) -> f64 {
        match self.total() {
            0 => 0.0,
            total => f64::from(self.correct) / f64::from(total),
        }
    }
}

/// 순위 항목
#[derive(Debug, Clone, PartialEq)]
pub struct KeyRank {
    pub key: char,
    pub accuracy: f64,
    pub miss: u32,
    pub total: u32,
}

/// 키별 통계 수집기
#[derive(Debug, Clone, Default)]
pub struct KeyStats {
    counts: BTreeMap<char, KeyCount>,
}

impl KeyStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// 입력 결과 기록
    pub fn record(&mut self, key: char, correct: bool) {
        let count = self.counts.entry(key).or_default();
        if correct {
            count.correct += 1;
        } else {
            count.miss += 1;
        }
    }

    pub fn get(&self, key: char) -> Option<KeyCount> {
        self.counts.get(&key).copied()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// 정확도 높은 순 상위 n개 (시도 횟수 min_attempts 이상만)
    pub fn best(&self, min_attempts: u32, n: usize) -> Vec<KeyRank> {
        let mut ranks = self.ranks(min_attempts);
        ranks.sort_by(|a, b| cmp_f64(b.accuracy, a.accuracy));
        ranks.truncate(n);
        ranks
    }

    /// 오답 많은 순 상위 n개, 오답 수가 같으면 정확도 낮은 순
    pub fn worst(&self, min_attempts: u32, n: usize) -> Vec<KeyRank> {
        let mut ranks = self.ranks(min_attempts);
        ranks.sort_by(|a, b| {
            b.miss
                .cmp(&a.miss)
                .then_with(|| cmp_f64(a.accuracy, b.accuracy))
        });
        ranks.truncate(n);
        ranks
    }

    fn ranks(&self, min_attempts: u32) -> Vec<KeyRank> {
        self.counts
            .iter()
            .filter(|(_, count)| count.total() >= min_attempts)
            .map(|(&key, count)| KeyRank {
                key,
                accuracy: count.accuracy(),
                miss: count.miss,
                total: count.total(),
            })
            .collect()
    }
}

fn cmp_f64(a: f64, b: f64) -> Ordering {
    a.partial_cmp(&b).unwrap_or(Ordering::Equal)
}
