//! 시세 계산을 위한 Decimal 유틸리티.
//!
//! 로그 파일과 콘솔 출력은 모두 소수점 둘째 자리로 고정되어 있으므로
//! 반올림과 문자열 변환을 한 곳에서 처리합니다.

use rust_decimal::{Decimal, RoundingStrategy};

/// 가격 타입 (원/g, 달러/온스 등 단위는 필드 이름으로 구분).
pub type Price = Decimal;

/// 환율 타입 (외화 1단위당 원화).
pub type Rate = Decimal;

/// 로그에 기록되는 소수점 자릿수.
pub const RECORD_DECIMAL_PLACES: u32 = 2;

/// Decimal 연산을 위한 확장 트레이트.
pub trait DecimalExt {
    /// 지정된 소수점 자릿수로 반올림합니다 (0.5는 0에서 먼 쪽으로).
    fn round_half_up(&self, dp: u32) -> Decimal;

    /// 정확히 `dp` 자리의 소수를 갖는 문자열로 변환합니다 (예: "150000.00").
    fn to_fixed(&self, dp: u32) -> String;

    /// 천 단위 구분 기호가 포함된 문자열로 변환합니다 (예: "150,454.29").
    fn to_grouped(&self, dp: u32) -> String;

    /// 부호가 항상 붙는 퍼센트 문자열로 변환합니다 (예: "+1.25%", "-0.30%").
    fn to_signed_percent_string(&self) -> String;
}

impl DecimalExt for Decimal {
    fn round_half_up(&self, dp: u32) -> Decimal {
        let mut rounded = self.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero);
        // "-0.00" 방지
        if rounded.is_zero() {
            rounded.set_sign_positive(true);
        }
        rounded
    }

    fn to_fixed(&self, dp: u32) -> String {
        let mut rounded = self.round_half_up(dp);
        rounded.rescale(dp);
        rounded.to_string()
    }

    fn to_grouped(&self, dp: u32) -> String {
        let fixed = self.to_fixed(dp);
        let (sign, unsigned) = match fixed.strip_prefix('-') {
            Some(rest) => ("-", rest),
            None => ("", fixed.as_str()),
        };
        let (int_part, frac_part) = match unsigned.split_once('.') {
            Some((i, f)) => (i, Some(f)),
            None => (unsigned, None),
        };

        let digits: Vec<char> = int_part.chars().collect();
        let mut grouped = String::with_capacity(fixed.len() + digits.len() / 3);
        for (i, c) in digits.iter().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                grouped.push(',');
            }
            grouped.push(*c);
        }

        match frac_part {
            Some(f) => format!("{}{}.{}", sign, grouped, f),
            None => format!("{}{}", sign, grouped),
        }
    }

    fn to_signed_percent_string(&self) -> String {
        let fixed = self.to_fixed(RECORD_DECIMAL_PLACES);
        if fixed.starts_with('-') {
            format!("{}%", fixed)
        } else {
            format!("+{}%", fixed)
        }
    }
}
