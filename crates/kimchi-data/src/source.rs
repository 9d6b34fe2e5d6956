//! 김치 프리미엄 계산에 필요한 세 가지 시세 소스.
//!
//! `GoldQuoteSource`는 계산기와 크롤러 사이의 교체 지점입니다.
//! 운영에서는 `NaverGoldQuotes`, 테스트에서는 고정 값을 돌려주는 구현을 씁니다.

use async_trait::async_trait;
use kimchi_core::{Price, Rate};

use crate::error::Result;
use crate::provider::NaverQuoteFetcher;

/// 네이버 모바일 시장지표 기본 주소.
pub const NAVER_MARKET_INDEX_BASE: &str = "https://m.stock.naver.com";

const DOMESTIC_GOLD_PATH: &str = "/marketindex/metals/M04020000";
const INTERNATIONAL_GOLD_PATH: &str = "/marketindex/metals/GCcv1";
const USD_KRW_PATH: &str = "/marketindex/exchange/FX_USDKRW";

/// 국내 금 가격 실패 메시지.
pub const DOMESTIC_GOLD_UNAVAILABLE: &str = "국내 금 가격 정보를 찾을 수 없습니다.";
/// 국제 금 가격 실패 메시지.
pub const INTERNATIONAL_GOLD_UNAVAILABLE: &str = "국제 금 가격 정보를 찾을 수 없습니다.";
/// 환율 실패 메시지.
pub const EXCHANGE_RATE_UNAVAILABLE: &str = "환율 정보를 찾을 수 없습니다.";

/// 시세 소스.
#[async_trait]
pub trait GoldQuoteSource: Send + Sync {
    /// 국내(KRX) 금 가격 (원/g)
    async fn domestic_gold_price(&self) -> Result<Price>;

    /// 국제 금 선물 가격 (달러/트로이온스)
    async fn international_gold_price(&self) -> Result<Price>;

    /// 원/달러 환율 (원/달러)
    async fn exchange_rate(&self) -> Result<Rate>;
}

/// 시세 페이지 하나와 실패 메시지.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuoteTarget {
    pub url: String,
    pub failure_message: String,
}

impl QuoteTarget {
    pub fn new(url: impl Into<String>, failure_message: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            failure_message: failure_message.into(),
        }
    }
}

/// 세 가지 시세 페이지 묶음.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuoteTargets {
    pub domestic_gold: QuoteTarget,
    pub international_gold: QuoteTarget,
    pub exchange_rate: QuoteTarget,
}

impl QuoteTargets {
    /// 네이버 모바일 시장지표 페이지.
    pub fn naver() -> Self {
        Self::with_base_url(NAVER_MARKET_INDEX_BASE)
    }

    /// 같은 경로 구조를 가진 다른 호스트 (미러, 테스트 서버).
    pub fn with_base_url(base_url: &str) -> Self {
        let base = base_url.trim_end_matches('/');
        Self {
            domestic_gold: QuoteTarget::new(
                format!("{}{}", base, DOMESTIC_GOLD_PATH),
                DOMESTIC_GOLD_UNAVAILABLE,
            ),
            international_gold: QuoteTarget::new(
                format!("{}{}", base, INTERNATIONAL_GOLD_PATH),
                INTERNATIONAL_GOLD_UNAVAILABLE,
            ),
            exchange_rate: QuoteTarget::new(
                format!("{}{}", base, USD_KRW_PATH),
                EXCHANGE_RATE_UNAVAILABLE,
            ),
        }
    }
}

impl Default for QuoteTargets {
    fn default() -> Self {
        Self::naver()
    }
}

/// 네이버 금융 기반 시세 소스.
#[derive(Debug, Clone)]
pub struct NaverGoldQuotes {
    fetcher: NaverQuoteFetcher,
    targets: QuoteTargets,
}

impl NaverGoldQuotes {
    pub fn new(fetcher: NaverQuoteFetcher, targets: QuoteTargets) -> Self {
        Self { fetcher, targets }
    }

    pub fn targets(&self) -> &QuoteTargets {
        &self.targets
    }

    async fn fetch(&self, target: &QuoteTarget) -> Result<Price> {
        self.fetcher
            .extract_price(&target.url, &target.failure_message, None)
            .await
    }
}

#[async_trait]
impl GoldQuoteSource for NaverGoldQuotes {
    async fn domestic_gold_price(&self) -> Result<Price> {
        self.fetch(&self.targets.domestic_gold).await
    }

    async fn international_gold_price(&self) -> Result<Price> {
        self.fetch(&self.targets.international_gold).await
    }

    async fn exchange_rate(&self) -> Result<Rate> {
        self.fetch(&self.targets.exchange_rate).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn page(price: &str) -> String {
        format!(
            r#"<html><body><strong class="DetailInfo_price__I_VJn">{}</strong></body></html>"#,
            price
        )
    }

    #[test]
    fn test_naver_targets() {
        let targets = QuoteTargets::default();
        assert_eq!(
            targets.domestic_gold.url,
            "https://m.stock.naver.com/marketindex/metals/M04020000"
        );
        assert_eq!(
            targets.international_gold.url,
            "https://m.stock.naver.com/marketindex/metals/GCcv1"
        );
        assert_eq!(
            targets.exchange_rate.url,
            "https://m.stock.naver.com/marketindex/exchange/FX_USDKRW"
        );
        assert_eq!(targets.exchange_rate.failure_message, "환율 정보를 찾을 수 없습니다.");
    }

    #[test]
    fn test_with_base_url_trims_trailing_slash() {
        let targets = QuoteTargets::with_base_url("http://127.0.0.1:8080/");
        assert_eq!(
            targets.international_gold.url,
            "http://127.0.0.1:8080/marketindex/metals/GCcv1"
        );
    }

    #[tokio::test]
    async fn test_naver_gold_quotes_against_mock_server() {
        let mut server = mockito::Server::new_async().await;
        let _domestic = server
            .mock("GET", "/marketindex/metals/M04020000")
            .with_body(page("150,000.00"))
            .create_async()
            .await;
        let _international = server
            .mock("GET", "/marketindex/metals/GCcv1")
            .with_body(page("3,345.00"))
            .create_async()
            .await;
        let _fx = server
            .mock("GET", "/marketindex/exchange/FX_USDKRW")
            .with_body(page("1,399.00"))
            .create_async()
            .await;

        let quotes = NaverGoldQuotes::new(
            NaverQuoteFetcher::new().unwrap(),
            QuoteTargets::with_base_url(&server.url()),
        );

        assert_eq!(quotes.domestic_gold_price().await.unwrap(), dec!(150000.00));
        assert_eq!(quotes.international_gold_price().await.unwrap(), dec!(3345.00));
        assert_eq!(quotes.exchange_rate().await.unwrap(), dec!(1399.00));
    }

    #[tokio::test]
    async fn test_each_source_reports_its_own_message() {
        let mut server = mockito::Server::new_async().await;
        let _any = server
            .mock("GET", mockito::Matcher::Any)
            .with_body("<html><body>layout changed</body></html>")
            .create_async()
            .await;

        let quotes = NaverGoldQuotes::new(
            NaverQuoteFetcher::new().unwrap(),
            QuoteTargets::with_base_url(&server.url()),
        );

        let domestic = quotes.domestic_gold_price().await.unwrap_err();
        let international = quotes.international_gold_price().await.unwrap_err();
        let fx = quotes.exchange_rate().await.unwrap_err();

        assert_eq!(domestic.to_string(), DOMESTIC_GOLD_UNAVAILABLE);
        assert_eq!(international.to_string(), INTERNATIONAL_GOLD_UNAVAILABLE);
        assert_eq!(fx.to_string(), EXCHANGE_RATE_UNAVAILABLE);
    }
}
