//! 히라가나 로마자 입력 판정 엔진
//!
//! 패턴 테이블 -> 세그먼트 분할 -> 키 입력 판정 -> 표시 문자열 순으로 동작합니다.
//! 엔진은 상태를 갖지 않으며 모든 전이는 스냅샷을 받아 새 스냅샷을 돌려줍니다.

pub mod display;
pub mod kana_table;
pub mod matcher;
pub mod segmenter;
