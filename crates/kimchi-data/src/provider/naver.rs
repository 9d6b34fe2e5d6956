//! 네이버 금융 시세 크롤러.
//!
//! 네이버 증권 모바일(`m.stock.naver.com`)의 시장지표 페이지에서
//! 헤드라인 가격 한 개를 추출합니다.
//!
//! ## 추출 방식
//! - 페이지 전체를 HTML로 파싱한 뒤 `<strong class="DetailInfo_price__I_VJn">`
//!   처럼 태그 + 클래스로 첫 번째 요소를 찾습니다.
//! - 요소의 텍스트에서 숫자 패턴(`[\d,]+(?:\.\d+)?`)을 찾고 천 단위 쉼표를
//!   제거해 `Decimal`로 변환합니다.
//!
//! 모바일 페이지는 브라우저가 아닌 클라이언트에 오류 페이지를 내려주므로
//! 데스크톱 브라우저 헤더와 Referer를 항상 함께 보냅니다.
//!
//! ## 사용 예시
//! ```rust,ignore
//! let fetcher = NaverQuoteFetcher::new()?;
//! let price = fetcher
//!     .extract_price(
//!         "https://m.stock.naver.com/marketindex/metals/M04020000",
//!         "국내 금 가격 정보를 찾을 수 없습니다.",
//!         None,
//!     )
//!     .await?;
//! ```

use std::str::FromStr;
use std::time::{Duration, Instant};

use once_cell::sync::Lazy;
use regex::Regex;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT_LANGUAGE, REFERER, USER_AGENT};
use reqwest::Client;
use rust_decimal::Decimal;
use scraper::{Html, Selector};

use crate::error::{DataError, Result};

/// 기본 숫자 패턴: 천 단위 쉼표와 선택적 소수부를 가진 숫자.
pub const DEFAULT_NUMBER_PATTERN: &str = r"[\d,]+(?:\.\d+)?";

/// 헤드라인 가격을 렌더링하는 태그.
pub const NAVER_PRICE_TAG: &str = "strong";

/// 헤드라인 가격을 렌더링하는 CSS 클래스.
pub const NAVER_PRICE_CLASS: &str = "DetailInfo_price__I_VJn";

/// 데스크톱 Chrome User-Agent.
pub const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
     AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36";

/// 페이지 언어(한국어)를 우선하는 Accept-Language.
pub const BROWSER_ACCEPT_LANGUAGE: &str = "ko-KR,ko;q=0.9,en-US;q=0.8,en;q=0.7";

/// 상위 사이트 Referer.
pub const NAVER_REFERER: &str = "https://m.stock.naver.com/";

/// 기본 요청 타임아웃.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

static DEFAULT_NUMBER_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(DEFAULT_NUMBER_PATTERN).expect("기본 숫자 패턴 컴파일 실패"));

static NAVER_PRICE_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse(&format!("{}.{}", NAVER_PRICE_TAG, NAVER_PRICE_CLASS))
        .expect("기본 셀렉터 파싱 실패")
});

/// 가격 요소 추출 전략 (태그 + 클래스 + 숫자 패턴).
///
/// 페이지 레이아웃이 바뀌면 이 값 하나만 교체하면 됩니다.
#[derive(Debug, Clone)]
pub struct ExtractionStrategy {
    tag: String,
    class: String,
    selector: Selector,
    pattern: Regex,
}

impl ExtractionStrategy {
    /// 새 전략 생성.
    ///
    /// # Arguments
    /// * `tag` - 요소 태그 이름 (예: "strong")
    /// * `class` - 요소가 가진 CSS 클래스 하나
    /// * `pattern` - 요소 텍스트에서 숫자를 찾을 정규식
    pub fn new(tag: &str, class: &str, pattern: &str) -> Result<Self> {
        let selector_str = format!("{}.{}", tag, class);
        let selector = Selector::parse(&selector_str).map_err(|e| {
            DataError::InvalidPattern(format!("셀렉터 '{}' 파싱 실패: {:?}", selector_str, e))
        })?;
        let pattern = Regex::new(pattern)
            .map_err(|e| DataError::InvalidPattern(format!("정규식 '{}': {}", pattern, e)))?;

        Ok(Self {
            tag: tag.to_string(),
            class: class.to_string(),
            selector,
            pattern,
        })
    }

    /// 네이버 모바일 시장지표 페이지의 헤드라인 가격.
    pub fn naver_headline() -> Self {
        Self {
            tag: NAVER_PRICE_TAG.to_string(),
            class: NAVER_PRICE_CLASS.to_string(),
            selector: NAVER_PRICE_SELECTOR.clone(),
            pattern: DEFAULT_NUMBER_REGEX.clone(),
        }
    }

    /// 태그 이름.
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// CSS 클래스.
    pub fn class(&self) -> &str {
        &self.class
    }

    /// 숫자 패턴.
    pub fn pattern(&self) -> &Regex {
        &self.pattern
    }

    /// HTML 문서에서 가격을 추출합니다.
    ///
    /// 요소가 없거나 텍스트에 숫자가 없으면
    /// `DataError::QuoteUnavailable(failure_message)`를 반환합니다.
    pub fn extract(&self, html: &str, failure_message: &str) -> Result<Decimal> {
        self.extract_with_pattern(html, failure_message, &self.pattern)
    }

    /// 전략의 기본 패턴 대신 `number_pattern`으로 가격을 추출합니다.
    pub fn extract_with_pattern(
        &self,
        html: &str,
        failure_message: &str,
        number_pattern: &Regex,
    ) -> Result<Decimal> {
        let document = Html::parse_document(html);

        document
            .select(&self.selector)
            .next()
            .and_then(|el| {
                let text = el.text().collect::<String>();
                parse_price_text(&text, number_pattern)
            })
            .ok_or_else(|| DataError::QuoteUnavailable(failure_message.to_string()))
    }
}

impl Default for ExtractionStrategy {
    fn default() -> Self {
        Self::naver_headline()
    }
}

/// 네이버 금융 시세 크롤러.
///
/// 요청마다 정확히 한 번의 GET을 보내며 재시도하지 않습니다.
/// 재시도 정책은 외부 스케줄러의 몫입니다.
#[derive(Debug, Clone)]
pub struct NaverQuoteFetcher {
    client: Client,
    strategy: ExtractionStrategy,
}

impl NaverQuoteFetcher {
    /// 기본 설정(타임아웃 30초)으로 생성
    pub fn new() -> Result<Self> {
        Self::with_timeout(Some(DEFAULT_REQUEST_TIMEOUT))
    }

    /// 커스텀 타임아웃으로 생성 (`None`이면 타임아웃 없음)
    pub fn with_timeout(timeout: Option<Duration>) -> Result<Self> {
        let mut builder = Client::builder().default_headers(Self::browser_headers());
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        let client = builder
            .build()
            .map_err(|e| DataError::Client(format!("HTTP 클라이언트 생성 실패: {}", e)))?;

        Ok(Self {
            client,
            strategy: ExtractionStrategy::default(),
        })
    }

    /// 추출 전략 교체 (페이지 클래스명이 바뀌었을 때)
    pub fn with_strategy(mut self, strategy: ExtractionStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// 모든 요청에 붙는 브라우저 헤더.
    pub fn browser_headers() -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, HeaderValue::from_static(BROWSER_USER_AGENT));
        headers.insert(
            ACCEPT_LANGUAGE,
            HeaderValue::from_static(BROWSER_ACCEPT_LANGUAGE),
        );
        headers.insert(REFERER, HeaderValue::from_static(NAVER_REFERER));
        headers
    }

    /// 페이지를 가져와 헤드라인 가격을 추출합니다.
    ///
    /// # Arguments
    /// * `page_url` - 시세 페이지 URL
    /// * `failure_message` - 가격을 찾지 못했을 때의 에러 메시지
    /// * `number_pattern` - 숫자 패턴 (`None`이면 전략의 기본 패턴)
    ///
    /// # Errors
    /// * `DataError::Fetch` - 전송 실패, 타임아웃, 2xx 이외의 응답
    /// * `DataError::QuoteUnavailable` - 가격 요소 또는 숫자 없음
    pub async fn extract_price(
        &self,
        page_url: &str,
        failure_message: &str,
        number_pattern: Option<&Regex>,
    ) -> Result<Decimal> {
        let html = self.fetch_page(page_url).await?;
        let pattern = number_pattern.unwrap_or_else(|| self.strategy.pattern());
        let price = self
            .strategy
            .extract_with_pattern(&html, failure_message, pattern);

        match &price {
            Ok(p) => tracing::debug!(url = page_url, price = %p, "가격 추출 완료"),
            Err(e) => tracing::warn!(url = page_url, error = %e, "가격 추출 실패"),
        }

        price
    }

    async fn fetch_page(&self, url: &str) -> Result<String> {
        let start = Instant::now();
        let response = self.client.get(url).send().await?.error_for_status()?;
        let html = response.text().await?;

        tracing::debug!(
            url = url,
            bytes = html.len(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "페이지 수신"
        );

        Ok(html)
    }
}

// ==================== 파싱 유틸리티 함수 ====================

/// 네트워크 없이 HTML 문자열에서 가격 추출.
pub fn parse_price(
    html: &str,
    strategy: &ExtractionStrategy,
    failure_message: &str,
) -> Result<Decimal> {
    strategy.extract(html, failure_message)
}

/// 가격 텍스트 파싱 (패턴 매칭 후 쉼표 제거)
///
/// "80,123.45원" -> 80123.45
fn parse_price_text(text: &str, pattern: &Regex) -> Option<Decimal> {
    let matched = pattern.find(text)?;
    let cleaned = matched.as_str().replace(',', "");

    if cleaned.is_empty() {
        return None;
    }

    Decimal::from_str(&cleaned).ok()
}
