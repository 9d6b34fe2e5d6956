//! 일별 수집 결과.

use std::time::Duration;

use kimchi_core::{DecimalExt, PremiumRecord, RECORD_DECIMAL_PLACES};

use crate::error::CollectorError;

/// 하루 한 번 실행되는 수집의 결과
#[derive(Debug)]
pub enum CollectionOutcome {
    /// 새 기록을 추가함
    Written(PremiumRecord),
    /// 오늘 기록이 이미 있어 건너뜀
    Skipped,
    /// 실패 (아무것도 기록되지 않음)
    Failed(CollectorError),
}

impl CollectionOutcome {
    pub fn is_written(&self) -> bool {
        matches!(self, Self::Written(_))
    }

    pub fn is_skipped(&self) -> bool {
        matches!(self, Self::Skipped)
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed(_))
    }

    /// 추가된 기록
    pub fn record(&self) -> Option<&PremiumRecord> {
        match self {
            Self::Written(record) => Some(record),
            _ => None,
        }
    }

    /// 결과 이름 (WRITE / SKIP / FAILED)
    pub fn label(&self) -> &'static str {
        match self {
            Self::Written(_) => "WRITE",
            Self::Skipped => "SKIP",
            Self::Failed(_) => "FAILED",
        }
    }

    /// 결과 요약 로그 출력
    pub fn log_summary(&self, elapsed: Duration) {
        let elapsed = format!("{:.1}s", elapsed.as_secs_f64());
        let dp = RECORD_DECIMAL_PLACES;

        match self {
            Self::Written(record) => tracing::info!(
                outcome = self.label(),
                date = %record.date,
                domestic = %record.domestic_price.to_fixed(dp),
                premium = %record.premium_absolute.to_fixed(dp),
                premium_percent = %record.premium_percent.to_signed_percent_string(),
                elapsed = elapsed,
                "수집 완료"
            ),
            Self::Skipped => tracing::info!(outcome = self.label(), elapsed = elapsed, "수집 건너뜀"),
            Self::Failed(e) => tracing::error!(
                outcome = self.label(),
                error = %e,
                retryable = e.is_quote_error(),
                elapsed = elapsed,
                "수집 실패"
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kimchi_data::DataError;

    #[test]
    fn test_labels() {
        assert_eq!(CollectionOutcome::Skipped.label(), "SKIP");
        assert!(CollectionOutcome::Skipped.record().is_none());

        let failed = CollectionOutcome::Failed(
            DataError::QuoteUnavailable("환율 정보를 찾을 수 없습니다.".to_string()).into(),
        );
        assert!(failed.is_failed());
        assert_eq!(failed.label(), "FAILED");
    }
}
