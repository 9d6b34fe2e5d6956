//! 날짜 기준 주입.
//!
//! "오늘"을 벽시계에서 직접 읽지 않고 `Clock`을 통해 얻어
//! 테스트에서 임의의 날짜를 재현할 수 있게 합니다.

use chrono::{Local, NaiveDate};

use super::record::DATE_FORMAT;

/// 현재 날짜 제공자.
pub trait Clock: Send + Sync {
    /// 로컬 기준 오늘 날짜.
    fn today(&self) -> NaiveDate;

    /// 로그에 기록되는 형식의 오늘 날짜 (`YYYY-MM-DD`).
    fn today_string(&self) -> String {
        self.today().format(DATE_FORMAT).to_string()
    }
}

/// 시스템 로컬 시간대를 따르는 시계.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalClock;

impl Clock for LocalClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// 고정된 날짜를 반환하는 시계.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_clock() {
        let clock = FixedClock(NaiveDate::from_ymd_opt(2025, 1, 2).unwrap());
        assert_eq!(clock.today_string(), "2025-01-02");
    }

    #[test]
    fn test_local_clock_matches_chrono() {
        let today = LocalClock.today();
        assert!((Local::now().date_naive() - today).num_days().abs() <= 1);
    }
}
