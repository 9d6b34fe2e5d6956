//! 하루 한 번 실행되는 김치 프리미엄 수집.
//!
//! 흐름: 오늘 기록 확인 → (있으면) 건너뜀 → (없으면) 시세 조회, 계산, 기록.
//! 같은 날 여러 번 실행해도 기록은 하나만 남습니다.

use std::path::Path;
use std::time::Instant;

use chrono::NaiveDate;
use kimchi_core::{Clock, PremiumRecord};
use kimchi_data::GoldQuoteSource;

use super::premium::compute_premium;
use super::price_log::{append_record, is_already_logged};
use crate::{CollectionOutcome, Result};

/// 일별 수집 실행
///
/// 에러를 밖으로 던지지 않고 `CollectionOutcome::Failed`로 보고합니다.
/// 실패하면 로그 파일은 변경되지 않습니다.
pub async fn run_daily_collection<S, C>(source: &S, clock: &C, log_path: &Path) -> CollectionOutcome
where
    S: GoldQuoteSource + ?Sized,
    C: Clock + ?Sized,
{
    let start = Instant::now();
    let today = clock.today();
    let today_str = clock.today_string();

    tracing::info!(date = %today_str, path = %log_path.display(), "김치 프리미엄 수집 시작");

    let outcome = match collect(source, today, &today_str, log_path).await {
        Ok(Some(record)) => CollectionOutcome::Written(record),
        Ok(None) => {
            tracing::info!("오늘 데이터가 이미 존재합니다. 수집을 중단합니다.");
            CollectionOutcome::Skipped
        }
        Err(e) => {
            if e.is_data_quality_fault() {
                tracing::warn!("비정상 시세로 계산할 수 없습니다. 원본 페이지를 확인하세요.");
            }
            tracing::error!("수집 실패: {}", e);
            CollectionOutcome::Failed(e)
        }
    };

    outcome.log_summary(start.elapsed());
    outcome
}

async fn collect<S>(
    source: &S,
    today: NaiveDate,
    today_str: &str,
    log_path: &Path,
) -> Result<Option<PremiumRecord>>
where
    S: GoldQuoteSource + ?Sized,
{
    if is_already_logged(log_path, today_str)? {
        return Ok(None);
    }

    let premium = compute_premium(source).await?;
    let record = PremiumRecord::from_premium(today, &premium);
    append_record(log_path, &record)?;

    Ok(Some(record))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::test_support::StaticQuotes;
    use crate::CollectorError;
    use kimchi_core::CoreError;
    use kimchi_core::FixedClock;
    use rust_decimal_macros::dec;
    use tempfile::TempDir;

    fn clock(day: u32) -> FixedClock {
        FixedClock(NaiveDate::from_ymd_opt(2025, 6, day).unwrap())
    }

    fn quotes() -> StaticQuotes {
        StaticQuotes::new(dec!(150000.00), dec!(3345.00), dec!(1399.00))
    }

    #[tokio::test]
    async fn test_write_then_skip_same_day() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("log.csv");
        let source = quotes();

        let first = run_daily_collection(&source, &clock(1), &path).await;
        assert!(first.is_written());
        assert_eq!(first.record().unwrap().premium_percent.round_dp(2), dec!(-0.30));

        let second = run_daily_collection(&source, &clock(1), &path).await;
        assert!(second.is_skipped());

        // 두 번째 실행은 시세를 조회하지 않음
        assert_eq!(source.calls().len(), 3);
        assert_eq!(std::fs::read_to_string(&path).unwrap().lines().count(), 2);
    }

    #[tokio::test]
    async fn test_next_day_appends() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("log.csv");
        let source = quotes();

        run_daily_collection(&source, &clock(1), &path).await;
        let next = run_daily_collection(&source, &clock(2), &path).await;

        assert!(next.is_written());
        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content.lines().count(), 3);
        assert!(content.lines().nth(2).unwrap().starts_with("2025-06-02,"));
    }

    #[tokio::test]
    async fn test_failure_leaves_log_untouched() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("log.csv");
        let source = quotes().failing_on("exchange_rate");

        let outcome = run_daily_collection(&source, &clock(1), &path).await;

        match outcome {
            CollectionOutcome::Failed(e) => {
                assert_eq!(e.to_string(), "환율 정보를 찾을 수 없습니다.")
            }
            other => panic!("expected failure, got {:?}", other),
        }
        assert!(!path.exists());
    }

    #[tokio::test]
    async fn test_zero_exchange_rate_is_data_quality_failure() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("log.csv");
        let source = StaticQuotes::new(dec!(150000.00), dec!(3345.00), dec!(0));

        match run_daily_collection(&source, &clock(1), &path).await {
            CollectionOutcome::Failed(e) => {
                assert!(e.is_data_quality_fault());
                assert!(!e.is_quote_error());
                assert!(matches!(e, CollectorError::Core(CoreError::DivisionByZero(_))));
            }
            other => panic!("expected failure, got {:?}", other),
        }
        assert!(!path.exists());
    }

    #[tokio::test]
    async fn test_unreadable_log_is_failure() {
        let dir = TempDir::new().unwrap();
        // 디렉토리를 로그 경로로 지정
        let outcome = run_daily_collection(&quotes(), &clock(1), dir.path()).await;
        assert!(outcome.is_failed());
    }
}
