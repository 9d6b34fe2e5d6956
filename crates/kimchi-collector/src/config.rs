//! 환경변수 기반 설정 모듈.

use std::path::PathBuf;
use std::time::Duration;

use kimchi_data::{
    ExtractionStrategy, NaverGoldQuotes, NaverQuoteFetcher, QuoteTarget, QuoteTargets,
    DEFAULT_NUMBER_PATTERN, NAVER_PRICE_CLASS, NAVER_PRICE_TAG,
};

use crate::error::CollectorError;
use crate::Result;

/// 기본 로그 파일 경로
pub const DEFAULT_LOG_PATH: &str = "data/kimchi_gold_price_log.csv";

/// 기본 HTTP 요청 타임아웃 (초)
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// 기본 차트 기간 (개월)
pub const DEFAULT_CHART_MONTHS: u32 = 12;

/// Collector 전체 설정
#[derive(Debug, Clone)]
pub struct CollectorConfig {
    /// 일별 기록 CSV 경로
    pub log_path: PathBuf,
    /// 시세 수집 설정
    pub quote: QuoteConfig,
    /// 차트 설정
    pub chart: ChartConfig,
}

/// 시세 수집 설정
#[derive(Debug, Clone)]
pub struct QuoteConfig {
    /// HTTP 요청 타임아웃 (초, 0이면 무제한)
    pub request_timeout_secs: u64,
    /// 시세 페이지
    pub targets: QuoteTargets,
    /// 가격 요소 태그
    pub price_tag: String,
    /// 가격 요소 CSS 클래스 (네이버 배포 때마다 바뀔 수 있음)
    pub price_class: String,
}

/// 차트 설정
#[derive(Debug, Clone)]
pub struct ChartConfig {
    /// 최근 N개월 (1개월 = 30일)
    pub months: u32,
}

impl CollectorConfig {
    /// 환경변수에서 설정 로드
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// 임의의 키-값 조회 함수로 설정 로드
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = QuoteTargets::naver();

        let config = Self {
            log_path: lookup("KIMCHI_LOG_PATH")
                .filter(|v| !v.trim().is_empty())
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_LOG_PATH)),
            quote: QuoteConfig {
                request_timeout_secs: parse_or(
                    &lookup,
                    "KIMCHI_REQUEST_TIMEOUT_SECS",
                    DEFAULT_REQUEST_TIMEOUT_SECS,
                ),
                targets: QuoteTargets {
                    domestic_gold: target_or(
                        &lookup,
                        "KIMCHI_DOMESTIC_URL",
                        defaults.domestic_gold,
                    ),
                    international_gold: target_or(
                        &lookup,
                        "KIMCHI_INTERNATIONAL_URL",
                        defaults.international_gold,
                    ),
                    exchange_rate: target_or(&lookup, "KIMCHI_FX_URL", defaults.exchange_rate),
                },
                price_tag: string_or(&lookup, "KIMCHI_PRICE_TAG", NAVER_PRICE_TAG),
                price_class: string_or(&lookup, "KIMCHI_PRICE_CLASS", NAVER_PRICE_CLASS),
            },
            chart: ChartConfig {
                months: parse_or(&lookup, "KIMCHI_CHART_MONTHS", DEFAULT_CHART_MONTHS),
            },
        };

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.chart.months == 0 {
            return Err(CollectorError::Config(
                "KIMCHI_CHART_MONTHS는 1 이상이어야 합니다".to_string(),
            ));
        }

        for target in [
            &self.quote.targets.domestic_gold,
            &self.quote.targets.international_gold,
            &self.quote.targets.exchange_rate,
        ] {
            if !target.url.starts_with("http://") && !target.url.starts_with("https://") {
                return Err(CollectorError::Config(format!(
                    "시세 URL은 http(s)여야 합니다: {}",
                    target.url
                )));
            }
        }

        self.quote.extraction_strategy()?;
        Ok(())
    }

    /// 설정대로 네이버 시세 소스 생성
    pub fn quote_source(&self) -> Result<NaverGoldQuotes> {
        let fetcher = NaverQuoteFetcher::with_timeout(self.quote.request_timeout())?
            .with_strategy(self.quote.extraction_strategy()?);
        Ok(NaverGoldQuotes::new(fetcher, self.quote.targets.clone()))
    }
}

impl QuoteConfig {
    /// 요청 타임아웃을 Duration으로 반환 (0이면 None)
    pub fn request_timeout(&self) -> Option<Duration> {
        (self.request_timeout_secs > 0).then(|| Duration::from_secs(self.request_timeout_secs))
    }

    /// 설정된 태그/클래스로 추출 전략 생성
    pub fn extraction_strategy(&self) -> Result<ExtractionStrategy> {
        ExtractionStrategy::new(&self.price_tag, &self.price_class, DEFAULT_NUMBER_PATTERN)
            .map_err(|e| CollectorError::Config(e.to_string()))
    }
}

/// 값을 파싱 (실패 시 기본값 사용)
fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> T
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    lookup(key)
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

/// 비어 있지 않은 문자열 (없으면 기본값)
fn string_or<F>(lookup: &F, key: &str, default: &str) -> String
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| default.to_string())
}

/// URL만 덮어쓰고 실패 메시지는 유지
fn target_or<F>(lookup: &F, key: &str, default: QuoteTarget) -> QuoteTarget
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key).map(|v| v.trim().to_string()) {
        Some(url) if !url.is_empty() => QuoteTarget {
            url,
            failure_message: default.failure_message,
        },
        _ => default,
    }
}
