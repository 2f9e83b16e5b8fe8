//! 입력 상태 -> 화면 표시용 문자열

use crate::core::matcher::TypingState;
use crate::core::segmenter::Segment;

/// 완료 / 입력 중 / 남은 부분으로 나눈 로마자 표시
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Projection {
    pub completed: String,
    pub current: String,
    pub remaining: String,
}

impl Projection {
    /// 다음에 입력해야 할 대표 키 (안내/통계용)
    pub fn next_expected(&self) -> Option<char> {
        self.remaining.chars().next()
    }
}

/// 상태에서 표시용 문자열 생성
/// 남은 부분은 현재 세그먼트의 대표 표기에서 입력한 만큼 뺀 나머지와
/// 이후 세그먼트들의 대표 표기를 이어붙인 것
pub fn project(state: &TypingState) -> Projection {
    let completed = state.completed_romaji().to_string();
    let Some(segment) = state.current_segment() else {
        return Projection {
            completed,
            ..Projection::default()
        };
    };

    let current = state.partial_input().to_string();
    let primary = segment.primary();
    // 대표 표기와 다른 변형을 입력 중이면 접두사가 맞지 않을 수 있음
    let mut remaining = primary
        .strip_prefix(current.as_str())
        .or_else(|| primary.get(current.len()..))
        .unwrap_or("")
        .to_string();

    for seg in &state.segments()[state.segment_index() + 1..] {
        remaining.push_str(seg.primary());
    }

    Projection {
        completed,
        current,
        remaining,
    }
}

/// 전체 대표 표기 (단어 전체 안내용)
pub fn full_romaji(segments: &[Segment]) -> String {
    segments.iter().map(Segment::primary).collect()
}
