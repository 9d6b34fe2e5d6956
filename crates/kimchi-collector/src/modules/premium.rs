//! 시세 소스로부터 김치 프리미엄 계산.

use kimchi_core::{calculate_premium, GoldPremium};
use kimchi_data::GoldQuoteSource;

use crate::Result;

/// 국내 금 → 국제 금 → 환율 순서로 시세를 조회해 프리미엄을 계산합니다.
///
/// 첫 번째 실패에서 즉시 중단하며 에러를 그대로 전달합니다.
pub async fn compute_premium<S>(source: &S) -> Result<GoldPremium>
where
    S: GoldQuoteSource + ?Sized,
{
    let domestic = source.domestic_gold_price().await?;
    let international = source.international_gold_price().await?;
    let exchange_rate = source.exchange_rate().await?;

    tracing::debug!(
        domestic = %domestic,
        international = %international,
        exchange_rate = %exchange_rate,
        "시세 조회 완료"
    );

    Ok(calculate_premium(domestic, international, exchange_rate)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::test_support::StaticQuotes;
    use crate::CollectorError;
    use kimchi_core::DecimalExt;
    use kimchi_data::DataError;
    use rust_decimal_macros::dec;

    #[tokio::test]
    async fn test_compute_premium_fixture() {
        let source = StaticQuotes::new(dec!(150000.00), dec!(3345.00), dec!(1399.00));
        let premium = compute_premium(&source).await.unwrap();

        assert_eq!(premium.international_local_per_gram.to_fixed(2), "150454.29");
        assert_eq!(premium.premium_absolute.to_fixed(2), "-454.29");
        assert_eq!(premium.premium_percent.to_fixed(2), "-0.30");
        assert_eq!(source.calls(), vec!["domestic", "international", "exchange_rate"]);
    }

    #[tokio::test]
    async fn test_first_failure_stops_remaining_calls() {
        let source = StaticQuotes::new(dec!(150000), dec!(3345), dec!(1399)).failing_on("international");
        let err = compute_premium(&source).await.unwrap_err();

        assert!(matches!(
            err,
            CollectorError::Quote(DataError::QuoteUnavailable(ref m))
                if m == "국제 금 가격 정보를 찾을 수 없습니다."
        ));
        assert_eq!(source.calls(), vec!["domestic", "international"]);
    }

    #[tokio::test]
    async fn test_zero_exchange_rate_is_core_error() {
        let source = StaticQuotes::new(dec!(150000), dec!(3345), dec!(0));
        let err = compute_premium(&source).await.unwrap_err();
        assert!(matches!(err, CollectorError::Core(_)));
    }

    #[tokio::test]
    async fn test_works_through_trait_object() {
        let source: Box<dyn GoldQuoteSource> =
            Box::new(StaticQuotes::new(dec!(100), dec!(31.1035), dec!(1)));
        let premium = compute_premium(source.as_ref()).await.unwrap();
        assert_eq!(premium.international_local_per_gram, dec!(1));
    }
}
