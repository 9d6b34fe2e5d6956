//! 금 김치 프리미엄 일별 수집기.
//!
//! 이 crate는 하루 한 번 실행되는 수집 바이너리를 제공합니다:
//! - 국내 금, 국제 금, 원/달러 환율 조회 후 김치 프리미엄 계산
//! - CSV 로그에 날짜별 한 행 추가 (같은 날 재실행 시 건너뜀)
//! - 최근 N개월 차트 데이터 내보내기

pub mod config;
pub mod error;
pub mod modules;
pub mod outcome;

pub use config::CollectorConfig;
pub use error::{CollectorError, Result};
pub use outcome::CollectionOutcome;
