//! 히라가나 단위 -> 로마자 입력 패턴 테이블
//!
//! 한 단위에 여러 표기가 허용됩니다 (예: し -> si, shi).
//! 순서는 표시 우선순위이며, 첫 번째 패턴이 화면에 안내되는 대표 표기입니다.

use std::collections::HashMap;

use lazy_static::lazy_static;

/// 촉음 (작은 っ) - 단독 조회하지 않고 다음 단위와 결합
pub const GEMINATE_MARK: char = 'っ';
/// 발음 (ん)
pub const NASAL: char = 'ん';

/// ん의 짧은 표기
pub const NASAL_SHORT: &str = "n";
/// ん의 겹친 표기
pub const NASAL_DOUBLED: &str = "nn";

lazy_static! {
    static ref KANA_TABLE: HashMap<&'static str, &'static [&'static str]> = {
        let entries: &[(&'static str, &'static [&'static str])] = &[
            // 요음 (2글자)
            ("きゃ", &["kya"]), ("きゅ", &["kyu"]), ("きょ", &["kyo"]),
            ("しゃ", &["sha", "sya"]), ("しゅ", &["shu", "syu"]), ("しょ", &["sho", "syo"]),
            ("ちゃ", &["cha", "tya", "cya"]), ("ちゅ", &["chu", "tyu", "cyu"]), ("ちょ", &["cho", "tyo", "cyo"]),
            ("にゃ", &["nya"]), ("にゅ", &["nyu"]), ("にょ", &["nyo"]),
            ("ひゃ", &["hya"]), ("ひゅ", &["hyu"]), ("ひょ", &["hyo"]),
            ("みゃ", &["mya"]), ("みゅ", &["myu"]), ("みょ", &["myo"]),
            ("りゃ", &["rya"]), ("りゅ", &["ryu"]), ("りょ", &["ryo"]),
            ("ぎゃ", &["gya"]), ("ぎゅ", &["gyu"]), ("ぎょ", &["gyo"]),
            ("じゃ", &["ja", "jya", "zya"]), ("じゅ", &["ju", "jyu", "zyu"]), ("じょ", &["jo", "jyo", "zyo"]),
            ("びゃ", &["bya"]), ("びゅ", &["byu"]), ("びょ", &["byo"]),
            ("ぴゃ", &["pya"]), ("ぴゅ", &["pyu"]), ("ぴょ", &["pyo"]),
            // 외래음
            ("ふぁ", &["fa"]), ("ふぃ", &["fi"]), ("ふぇ", &["fe"]), ("ふぉ", &["fo"]),
            ("てぃ", &["thi", "ti"]), ("でぃ", &["dhi", "di"]),
            ("うぃ", &["wi"]), ("うぇ", &["we"]),

            // 모음
            ("あ", &["a"]), ("い", &["i"]), ("う", &["u"]), ("え", &["e"]), ("お", &["o"]),
            // 자음 + 모음
            ("か", &["ka"]), ("き", &["ki"]), ("く", &["ku"]), ("け", &["ke"]), ("こ", &["ko"]),
            ("さ", &["sa"]), ("し", &["si", "shi"]), ("す", &["su"]), ("せ", &["se"]), ("そ", &["so"]),
            ("た", &["ta"]), ("ち", &["ti", "chi"]), ("つ", &["tu", "tsu"]), ("て", &["te"]), ("と", &["to"]),
            ("な", &["na"]), ("に", &["ni"]), ("ぬ", &["nu"]), ("ね", &["ne"]), ("の", &["no"]),
            ("は", &["ha"]), ("ひ", &["hi"]), ("ふ", &["hu", "fu"]), ("へ", &["he"]), ("ほ", &["ho"]),
            ("ま", &["ma"]), ("み", &["mi"]), ("む", &["mu"]), ("め", &["me"]), ("も", &["mo"]),
            ("や", &["ya"]), ("ゆ", &["yu"]), ("よ", &["yo"]),
            ("ら", &["ra"]), ("り", &["ri"]), ("る", &["ru"]), ("れ", &["re"]), ("ろ", &["ro"]),
            ("わ", &["wa"]), ("を", &["wo"]),
            // 짧은 표기는 세그먼트 분할 시 다음 단위를 보고 결정
            ("ん", &[NASAL_DOUBLED]),
            // 탁음/반탁음
            ("が", &["ga"]), ("ぎ", &["gi"]), ("ぐ", &["gu"]), ("げ", &["ge"]), ("ご", &["go"]),
            ("ざ", &["za"]), ("じ", &["zi", "ji"]), ("ず", &["zu"]), ("ぜ", &["ze"]), ("ぞ", &["zo"]),
            ("だ", &["da"]), ("ぢ", &["di"]), ("づ", &["du", "dzu"]), ("で", &["de"]), ("ど", &["do"]),
            ("ば", &["ba"]), ("び", &["bi"]), ("ぶ", &["bu"]), ("べ", &["be"]), ("ぼ", &["bo"]),
            ("ぱ", &["pa"]), ("ぴ", &["pi"]), ("ぷ", &["pu"]), ("ぺ", &["pe"]), ("ぽ", &["po"]),

            // 작은 글자
            ("ぁ", &["xa", "la"]), ("ぃ", &["xi", "li"]), ("ぅ", &["xu", "lu"]), ("ぇ", &["xe", "le"]), ("ぉ", &["xo", "lo"]),
            ("ゃ", &["xya", "lya"]), ("ゅ", &["xyu", "lyu"]), ("ょ", &["xyo", "lyo"]),
            ("っ", &["xtu", "ltu", "xtsu", "ltsu"]),

            // 기호
            ("ー", &["-"]),
        ];
        entries.iter().copied().collect()
    };
}

/// 히라가나 단위(1~2글자)의 로마자 패턴 조회
/// 매핑에 없는 단위는 빈 슬라이스 반환 (호출 측에서 그대로 통과 처리)
pub fn lookup(unit: &str) -> &'static [&'static str] {
    KANA_TABLE.get(unit).copied().unwrap_or(&[])
}

/// 촉음 뒤에서 겹칠 수 있는 자음인지 확인 (모음을 제외한 소문자 알파벳)
pub fn is_doubling_consonant(c: char) -> bool {
    c.is_ascii_lowercase() && !matches!(c, 'a' | 'i' | 'u' | 'e' | 'o')
}

/// ん 뒤에 오면 짧은 표기 n을 막는 첫 글자인지 확인 (모음, n, y)
pub fn blocks_short_nasal(c: char) -> bool {
    matches!(c, 'a' | 'i' | 'u' | 'e' | 'o' | 'n' | 'y')
}
