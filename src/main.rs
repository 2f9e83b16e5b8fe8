//! kanatype - 히라가나 로마자 타자 연습 (터미널)
//!
//! 사용법: kanatype [설정 파일 경로]
//! 한 줄을 입력하면 각 글자를 키 입력으로 처리합니다.

use std::io::{self, BufRead, Write};
use std::process::ExitCode;
use std::time::{Duration, Instant};

use kanatype::config::{load_config, load_config_from};
use kanatype::session::{Session, Summary};
use kanatype::stats::KeyRank;
use kanatype::terms::{filter_terms, load_terms, TermDeck};

fn main() -> ExitCode {
    // 로깅 초기화 (error/warn만 출력)
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    // 설정 로드
    let config = match std::env::args().nth(1) {
        Some(path) => load_config_from(path),
        None => load_config(),
    };

    let terms = match load_terms(&config.terms_path) {
        Ok(terms) => terms,
        Err(e) => {
            log::error!("단어 목록 로드 실패 ({}): {}", config.terms_path, e);
            return ExitCode::FAILURE;
        }
    };
    let deck = TermDeck::new(filter_terms(terms, config.category.as_deref(), config.level));
    if deck.is_empty() {
        log::error!("조건에 맞는 단어가 없습니다");
        return ExitCode::FAILURE;
    }
    log::info!("출제 단어 {}개", deck.len());

    let time_limit = Duration::from_secs(config.round_seconds);
    let mut session = Session::new(deck, config);
    let started = Instant::now();

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    while session.is_active() && started.elapsed() < time_limit {
        print_prompt(&session, time_limit.saturating_sub(started.elapsed()));

        let Some(Ok(line)) = lines.next() else {
            break;
        };
        if started.elapsed() >= time_limit {
            break;
        }
        for key in line.chars() {
            let outcome = session.press(key);
            if !outcome.is_correct {
                println!("  ✗ {}", key);
            }
        }
        session.finish_line();
    }

    if session.stats().is_empty() {
        println!();
        println!("입력 기록이 없습니다");
        return ExitCode::SUCCESS;
    }
    print_summary(&session.summary());
    ExitCode::SUCCESS
}

fn print_prompt(session: &Session<TermDeck>, left: Duration) {
    let (Some(round), Some(projection)) = (session.current_round(), session.projection()) else {
        return;
    };
    println!();
    println!("[{}s] 점수 {}", left.as_secs(), session.score());
    println!("{}", round.term.term);
    if let Some(roman) = &round.term.roman {
        // 단어 목록에 적힌 참고 표기 (판정은 세그먼트 패턴 기준)
        println!("({})", roman);
    }
    println!(
        "{}{}|{}",
        projection.completed, projection.current, projection.remaining
    );
    print!("> ");
    let _ = io::stdout().flush();
}

fn print_summary(summary: &Summary) {
    println!();
    println!("최종 점수: {} (단어 {}개)", summary.score, summary.words_completed);
    print_ranks("잘 친 키", &summary.best_keys, |r| {
        format!("{}%", (r.accuracy * 100.0).round())
    });
    print_ranks("자주 틀린 키", &summary.worst_keys, |r| format!("{} Miss", r.miss));

    println!("복습:");
    for term in &summary.reviewed_terms {
        match &term.explanation {
            Some(explanation) => println!("  {} - {}", term.term, explanation),
            None => println!("  {}", term.term),
        }
    }
}

fn print_ranks(title: &str, ranks: &[KeyRank], value: impl Fn(&KeyRank) -> String) {
    println!("{}:", title);
    if ranks.is_empty() {
        println!("  데이터 부족");
        return;
    }
    for rank in ranks {
        println!("  {} {}", rank.key.to_ascii_uppercase(), value(rank));
    }
}
