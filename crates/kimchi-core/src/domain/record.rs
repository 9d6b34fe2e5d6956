//! 일별 프리미엄 기록.
//!
//! 로그 파일의 한 행에 대응하며, 컬럼 순서는 기존 로그와의 호환을 위해
//! 절대 바꾸지 않습니다.

use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::premium::{convert_to_local_per_gram, GoldPremium};
use crate::error::{CoreError, CoreResult};
use crate::types::{DecimalExt, Price, Rate, RECORD_DECIMAL_PLACES};

/// 기록 날짜 형식.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// 로그 파일 헤더 (순서 고정).
pub const LOG_HEADER: [&str; 6] = [
    "날짜",
    "국내금(원/g)",
    "국제금(달러/온스)",
    "환율(원/달러)",
    "김치프리미엄(원/g)",
    "김치프리미엄(%)",
];

/// 하루 한 건 기록되는 김치 프리미엄.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PremiumRecord {
    /// 수집 날짜 (로컬 기준, 일 단위)
    pub date: NaiveDate,
    /// 국내 금 시세 (원/g)
    pub domestic_price: Price,
    /// 국제 금 시세 (달러/온스)
    pub international_price: Price,
    /// 원/달러 환율
    pub exchange_rate: Rate,
    /// 김치 프리미엄 (원/g)
    pub premium_absolute: Price,
    /// 김치 프리미엄 (%)
    pub premium_percent: Decimal,
}

impl PremiumRecord {
    /// 계산 결과에 날짜를 붙여 기록을 만듭니다.
    pub fn from_premium(date: NaiveDate, premium: &GoldPremium) -> Self {
        Self {
            date,
            domestic_price: premium.domestic,
            international_price: premium.international,
            exchange_rate: premium.exchange_rate,
            premium_absolute: premium.premium_absolute,
            premium_percent: premium.premium_percent,
        }
    }

    /// 로그에 쓰일 여섯 개의 필드.
    ///
    /// 날짜는 `YYYY-MM-DD`, 숫자는 모두 소수점 둘째 자리로 고정됩니다.
    pub fn to_fields(&self) -> [String; 6] {
        let dp = RECORD_DECIMAL_PLACES;
        [
            self.date.format(DATE_FORMAT).to_string(),
            self.domestic_price.to_fixed(dp),
            self.international_price.to_fixed(dp),
            self.exchange_rate.to_fixed(dp),
            self.premium_absolute.to_fixed(dp),
            self.premium_percent.to_fixed(dp),
        ]
    }

    /// 로그 행을 기록으로 변환합니다.
    pub fn from_fields<S: AsRef<str>>(fields: &[S]) -> CoreResult<Self> {
        if fields.len() < LOG_HEADER.len() {
            return Err(CoreError::InvalidRecord(format!(
                "필드 수 부족: {}개 (필요: {}개)",
                fields.len(),
                LOG_HEADER.len()
            )));
        }

        let date_text = fields[0].as_ref().trim();
        let date = NaiveDate::parse_from_str(date_text, DATE_FORMAT).map_err(|e| {
            CoreError::InvalidRecord(format!("날짜 파싱 실패 '{}': {}", date_text, e))
        })?;

        Ok(Self {
            date,
            domestic_price: parse_field(fields, 1)?,
            international_price: parse_field(fields, 2)?,
            exchange_rate: parse_field(fields, 3)?,
            premium_absolute: parse_field(fields, 4)?,
            premium_percent: parse_field(fields, 5)?,
        })
    }

    /// 국제 금 시세의 원/g 환산가 (환율 반영).
    pub fn international_local_per_gram(&self) -> CoreResult<Price> {
        convert_to_local_per_gram(self.international_price, self.exchange_rate)
    }
}

fn parse_field<S: AsRef<str>>(fields: &[S], idx: usize) -> CoreResult<Decimal> {
    let text = fields[idx].as_ref().trim();
    Decimal::from_str(text).map_err(|e| {
        CoreError::InvalidRecord(format!("{} 파싱 실패 '{}': {}", LOG_HEADER[idx], text, e))
    })
}
