//! 현재 김치 프리미엄 조회 (기록하지 않음).

use kimchi_core::{DecimalExt, GoldPremium, RECORD_DECIMAL_PLACES};
use kimchi_data::GoldQuoteSource;

use super::premium::compute_premium;
use crate::Result;

/// 현재 시세로 프리미엄을 계산합니다.
pub async fn current_premium<S>(source: &S) -> Result<GoldPremium>
where
    S: GoldQuoteSource + ?Sized,
{
    let premium = compute_premium(source).await?;
    tracing::info!(
        premium = %premium.premium_absolute.to_fixed(RECORD_DECIMAL_PLACES),
        premium_percent = %premium.premium_percent.to_signed_percent_string(),
        "현재 김치 프리미엄 조회"
    );
    Ok(premium)
}

/// 콘솔 출력용 세 줄 요약.
///
/// ```text
/// 국내 금가격         :   150,000.00 원/g
/// 국제 금 1g 원화환산 :   150,454.29 원/g
/// 김치프리미엄        :      -454.29 원/g (-0.30%)
/// ```
pub fn format_premium_report(premium: &GoldPremium) -> String {
    let dp = RECORD_DECIMAL_PLACES;
    format!(
        "국내 금가격         : {:>12} 원/g\n\
         국제 금 1g 원화환산 : {:>12} 원/g\n\
         김치프리미엄        : {:>12} 원/g ({})",
        premium.domestic.to_grouped(dp),
        premium.international_local_per_gram.to_grouped(dp),
        premium.premium_absolute.to_grouped(dp),
        premium.premium_percent.to_signed_percent_string(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::test_support::StaticQuotes;
    use rust_decimal_macros::dec;

    #[tokio::test]
    async fn test_report_format() {
        let source = StaticQuotes::new(dec!(150000.00), dec!(3345.00), dec!(1399.00));
        let premium = current_premium(&source).await.unwrap();

        let report = format_premium_report(&premium);
        let lines: Vec<&str> = report.lines().collect();
        assert_eq!(lines[0], "국내 금가격         :   150,000.00 원/g");
        assert_eq!(lines[1], "국제 금 1g 원화환산 :   150,454.29 원/g");
        assert_eq!(lines[2], "김치프리미엄        :      -454.29 원/g (-0.30%)");
    }

    #[tokio::test]
    async fn test_positive_premium_has_plus_sign() {
        let source = StaticQuotes::new(dec!(105), dec!(31.1035), dec!(100));
        let premium = current_premium(&source).await.unwrap();
        assert!(format_premium_report(&premium).ends_with("5.00 원/g (+5.00%)"));
    }
}
