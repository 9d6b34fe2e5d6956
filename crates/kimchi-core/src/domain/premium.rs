//! 금 김치 프리미엄 계산.
//!
//! 국제 금 시세(달러/트로이온스)를 환율과 트로이온스 상수로 원/g 단위로
//! 환산한 뒤, 국내 금 시세(원/g)와의 차이를 절대값과 비율로 구합니다.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::types::{Price, Rate};

/// 1 트로이온스의 그램 수.
pub const GRAMS_PER_TROY_OUNCE: Decimal = dec!(31.1035);

/// 한 번의 계산 결과.
///
/// 모든 값은 반올림되지 않은 전체 정밀도로 보관하며, 자릿수 고정은
/// 기록/출력 단계에서만 수행합니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GoldPremium {
    /// 국내 금 시세 (원/g)
    pub domestic: Price,
    /// 국제 금 시세 (달러/온스)
    pub international: Price,
    /// 국제 금 시세의 원화 환산 (원/g)
    pub international_local_per_gram: Price,
    /// 원/달러 환율
    pub exchange_rate: Rate,
    /// 김치 프리미엄 (원/g)
    pub premium_absolute: Price,
    /// 김치 프리미엄 (%)
    pub premium_percent: Decimal,
}

/// 달러/온스 시세를 원/g으로 환산합니다.
///
/// 곱셈이 `Decimal` 범위를 넘으면 `CoreError::ArithmeticOverflow`.
pub fn convert_to_local_per_gram(international: Price, exchange_rate: Rate) -> CoreResult<Price> {
    international
        .checked_mul(exchange_rate)
        .and_then(|v| v.checked_div(GRAMS_PER_TROY_OUNCE))
        .ok_or_else(|| {
            CoreError::ArithmeticOverflow(format!(
                "원화 환산 (international={}, exchange_rate={})",
                international, exchange_rate
            ))
        })
}

/// 세 시세로부터 김치 프리미엄을 계산합니다.
///
/// 환산 가격이 0이면(국제 시세 또는 환율이 0) 비율을 정의할 수 없으므로
/// `CoreError::DivisionByZero`를, 중간 값이 `Decimal` 범위를 넘으면
/// `CoreError::ArithmeticOverflow`를 반환합니다.
///
/// # Examples
///
/// ```
/// use kimchi_core::calculate_premium;
/// use rust_decimal_macros::dec;
///
/// let premium = calculate_premium(dec!(150000), dec!(3345), dec!(1399)).unwrap();
/// assert!(premium.premium_absolute < dec!(0));
/// ```
pub fn calculate_premium(
    domestic: Price,
    international: Price,
    exchange_rate: Rate,
) -> CoreResult<GoldPremium> {
    let international_local_per_gram = convert_to_local_per_gram(international, exchange_rate)?;
    if international_local_per_gram.is_zero() {
        return Err(CoreError::DivisionByZero(format!(
            "국제 금 원화 환산가가 0입니다 (international={}, exchange_rate={})",
            international, exchange_rate
        )));
    }

    let overflow = || {
        CoreError::ArithmeticOverflow(format!(
            "프리미엄 (domestic={}, international_local_per_gram={})",
            domestic, international_local_per_gram
        ))
    };
    let premium_absolute = domestic
        .checked_sub(international_local_per_gram)
        .ok_or_else(overflow)?;
    let premium_percent = premium_absolute
        .checked_div(international_local_per_gram)
        .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
        .ok_or_else(overflow)?;

    Ok(GoldPremium {
        domestic,
        international,
        international_local_per_gram,
        exchange_rate,
        premium_absolute,
        premium_percent,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::DecimalExt;

    #[test]
    fn test_reference_fixture() {
        let p = calculate_premium(dec!(150000.00), dec!(3345.00), dec!(1399.00)).unwrap();

        assert_eq!(p.international_local_per_gram.to_fixed(2), "150454.29");
        assert_eq!(p.premium_absolute.to_fixed(2), "-454.29");
        assert_eq!(p.premium_percent.to_fixed(2), "-0.30");
        assert_eq!(p.domestic, dec!(150000.00));
        assert_eq!(p.international, dec!(3345.00));
        assert_eq!(p.exchange_rate, dec!(1399.00));
    }

    #[test]
    fn test_percent_matches_formula() {
        let cases = [
            (dec!(80123.45), dec!(1999.99), dec!(1355.67)),
            (dec!(152340.12), dec!(3301.7), dec!(1412.3)),
            (dec!(99000), dec!(2000), dec!(1500)),
        ];

        for (domestic, international, rate) in cases {
            let p = calculate_premium(domestic, international, rate).unwrap();
            let converted = international * rate / dec!(31.1035);
            let expected = (domestic - converted) / converted * dec!(100);
            assert_eq!(p.premium_percent.to_fixed(2), expected.to_fixed(2));
        }
    }

    #[test]
    fn test_positive_premium() {
        // 환산가 100,000원/g 보다 국내가 5% 비싼 경우
        let international = dec!(31.1035) * dec!(100);
        let p = calculate_premium(dec!(105000), international, dec!(1000)).unwrap();
        assert_eq!(p.international_local_per_gram, dec!(100000));
        assert_eq!(p.premium_absolute, dec!(5000));
        assert_eq!(p.premium_percent.to_fixed(2), "5.00");
    }

    #[test]
    fn test_zero_exchange_rate_is_division_by_zero() {
        let err = calculate_premium(dec!(150000), dec!(3345), dec!(0)).unwrap_err();
        assert!(matches!(err, CoreError::DivisionByZero(_)));
    }

    #[test]
    fn test_oversized_quote_is_overflow_not_panic() {
        let err = calculate_premium(dec!(150000), Decimal::MAX, dec!(1399)).unwrap_err();
        assert!(matches!(err, CoreError::ArithmeticOverflow(_)));
        assert!(err.is_data_quality_fault());

        assert!(convert_to_local_per_gram(Decimal::MAX, dec!(2)).is_err());
    }

    #[test]
    fn test_tiny_converted_price_is_overflow_not_panic() {
        let err = calculate_premium(dec!(150000), dec!(0.000000000001), dec!(0.000000000001))
            .unwrap_err();
        assert!(matches!(err, CoreError::ArithmeticOverflow(_)));
    }

    #[test]
    fn test_zero_international_is_division_by_zero() {
        let err = calculate_premium(dec!(150000), dec!(0), dec!(1399)).unwrap_err();
        assert!(err.is_data_quality_fault());
    }
}
