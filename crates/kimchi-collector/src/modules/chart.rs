//! 최근 N개월 김치 프리미엄 차트 데이터.
//!
//! 로그에서 최근 기간만 골라 세 개의 패널 시계열을 만듭니다.
//! - 김치 프리미엄 (%)
//! - 국내 금 가격 vs 국제 금 원화 환산가 (원/g)
//! - 원/달러 환율
//!
//! 로그 옆에 세 패널을 세로로 쌓은 `kimchi_gold_price_recent_{N}months.png`와
//! 같은 시계열의 `kimchi_gold_price_recent_{N}months.csv`를 저장하고
//! 패널별 요약을 로그로 남깁니다.

use std::fmt;
use std::path::{Path, PathBuf};

use chrono::{Days, NaiveDate};
use rust_decimal::Decimal;
use serde::Serialize;

use kimchi_core::{Clock, CoreError, DecimalExt, PremiumRecord, RECORD_DECIMAL_PLACES};

use super::plot::draw_recent_chart;
use super::price_log::read_records;
use crate::CollectorError;

/// 한 달을 30일로 계산
pub const DAYS_PER_MONTH: u64 = 30;

/// 차트 생성 에러
#[derive(Debug)]
pub enum ChartError {
    /// 로그 파일 없음
    LogMissing(PathBuf),
    /// 기간 내 데이터 없음
    EmptyWindow(u32),
    /// 로그 읽기/내보내기 실패
    Log(CollectorError),
    /// 이미지 렌더링 실패
    Render(String),
}

impl fmt::Display for ChartError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LogMissing(path) => write!(f, "로그 파일이 없습니다: {}", path.display()),
            Self::EmptyWindow(months) => write!(f, "최근 {}개월 데이터가 없습니다", months),
            Self::Log(e) => write!(f, "{}", e),
            Self::Render(msg) => write!(f, "차트 렌더링 실패: {}", msg),
        }
    }
}

impl std::error::Error for ChartError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Log(e) => Some(e),
            _ => None,
        }
    }
}

impl From<CollectorError> for ChartError {
    fn from(err: CollectorError) -> Self {
        Self::Log(err)
    }
}

impl From<csv::Error> for ChartError {
    fn from(err: csv::Error) -> Self {
        Self::Log(err.into())
    }
}

/// 차트 한 점 (세 패널 공통 x축)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChartRow {
    #[serde(rename = "날짜")]
    pub date: NaiveDate,
    #[serde(rename = "김치프리미엄(%)")]
    pub premium_percent: Decimal,
    #[serde(rename = "국내금(원/g)")]
    pub domestic_price: Decimal,
    #[serde(rename = "국제금 환산(원/g)")]
    pub international_local_per_gram: Decimal,
    #[serde(rename = "환율(원/달러)")]
    pub exchange_rate: Decimal,
}

impl TryFrom<&PremiumRecord> for ChartRow {
    type Error = CoreError;

    fn try_from(record: &PremiumRecord) -> Result<Self, Self::Error> {
        Ok(Self {
            date: record.date,
            premium_percent: record.premium_percent,
            domestic_price: record.domestic_price,
            international_local_per_gram: record
                .international_local_per_gram()?
                .round_half_up(RECORD_DECIMAL_PLACES),
            exchange_rate: record.exchange_rate,
        })
    }
}

/// 패널 시계열 요약
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeriesSummary {
    pub name: &'static str,
    pub min: Decimal,
    pub max: Decimal,
    pub latest: Decimal,
}

impl SeriesSummary {
    fn from_series(name: &'static str, values: impl Iterator<Item = Decimal>) -> Option<Self> {
        let mut summary: Option<Self> = None;
        for v in values {
            summary = Some(match summary {
                None => Self {
                    name,
                    min: v,
                    max: v,
                    latest: v,
                },
                Some(s) => Self {
                    name,
                    min: s.min.min(v),
                    max: s.max.max(v),
                    latest: v,
                },
            });
        }
        summary
    }
}

/// 차트 생성 결과
#[derive(Debug, Clone)]
pub struct ChartReport {
    pub months: u32,
    pub window_start: NaiveDate,
    pub rows: Vec<ChartRow>,
    pub output_path: PathBuf,
    pub image_path: PathBuf,
}

impl ChartReport {
    /// 패널별 요약 (프리미엄, 국내 금, 국제 금 환산, 환율)
    pub fn summaries(&self) -> Vec<SeriesSummary> {
        [
            SeriesSummary::from_series(
                "김치프리미엄(%)",
                self.rows.iter().map(|r| r.premium_percent),
            ),
            SeriesSummary::from_series("국내금(원/g)", self.rows.iter().map(|r| r.domestic_price)),
            SeriesSummary::from_series(
                "국제금 환산(원/g)",
                self.rows.iter().map(|r| r.international_local_per_gram),
            ),
            SeriesSummary::from_series("환율(원/달러)", self.rows.iter().map(|r| r.exchange_rate)),
        ]
        .into_iter()
        .flatten()
        .collect()
    }

    /// 요약 로그 출력
    pub fn log_summary(&self) {
        let first = self.rows.first().map(|r| r.date.to_string()).unwrap_or_default();
        let last = self.rows.last().map(|r| r.date.to_string()).unwrap_or_default();

        tracing::info!(
            months = self.months,
            window_start = %self.window_start,
            points = self.rows.len(),
            first = %first,
            last = %last,
            output = %self.output_path.display(),
            image = %self.image_path.display(),
            "최근 {}개월 차트 저장",
            self.months
        );

        for s in self.summaries() {
            tracing::info!(
                series = s.name,
                min = %s.min.to_grouped(RECORD_DECIMAL_PLACES),
                max = %s.max.to_grouped(RECORD_DECIMAL_PLACES),
                latest = %s.latest.to_grouped(RECORD_DECIMAL_PLACES),
                "패널 요약"
            );
        }
    }
}

/// 기간 시작일 (`today - months * 30일`)
///
/// 날짜 범위를 벗어나면 `NaiveDate::MIN` (전체 기록).
pub fn window_start(today: NaiveDate, months: u32) -> NaiveDate {
    today
        .checked_sub_days(Days::new(u64::from(months) * DAYS_PER_MONTH))
        .unwrap_or(NaiveDate::MIN)
}

/// 기간 내 기록만 날짜순으로 선택
pub fn select_window(records: &[PremiumRecord], start: NaiveDate) -> Vec<ChartRow> {
    let mut rows: Vec<ChartRow> = records
        .iter()
        .filter(|r| r.date >= start)
        .filter_map(|r| match ChartRow::try_from(r) {
            Ok(row) => Some(row),
            Err(e) => {
                tracing::warn!(date = %r.date, error = %e, "차트에서 제외");
                None
            }
        })
        .collect();
    rows.sort_by_key(|r| r.date);
    rows
}

/// 차트 데이터 파일 경로 (로그와 같은 디렉토리)
pub fn chart_output_path(log_path: &Path, months: u32) -> PathBuf {
    log_path.with_file_name(format!("kimchi_gold_price_recent_{}months.csv", months))
}

/// 차트 이미지 경로 (로그와 같은 디렉토리)
pub fn chart_image_path(log_path: &Path, months: u32) -> PathBuf {
    log_path.with_file_name(format!("kimchi_gold_price_recent_{}months.png", months))
}

/// 최근 `months`개월 차트를 만들어 저장합니다.
pub fn render_recent_chart<C>(log_path: &Path, clock: &C, months: u32) -> Result<ChartReport, ChartError>
where
    C: Clock + ?Sized,
{
    if !log_path.is_file() {
        return Err(ChartError::LogMissing(log_path.to_path_buf()));
    }

    let records = read_records(log_path)?;
    let start = window_start(clock.today(), months);
    let rows = select_window(&records, start);

    if rows.is_empty() {
        return Err(ChartError::EmptyWindow(months));
    }

    let output_path = chart_output_path(log_path, months);
    let mut writer = csv::Writer::from_path(&output_path)?;
    for row in &rows {
        writer.serialize(row)?;
    }
    writer.flush().map_err(CollectorError::from)?;

    let image_path = chart_image_path(log_path, months);
    draw_recent_chart(&image_path, &rows, months)?;

    let report = ChartReport {
        months,
        window_start: start,
        rows,
        output_path,
        image_path,
    };
    report.log_summary();

    Ok(report)
}
