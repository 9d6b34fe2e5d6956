//! 금/환율 시세 수집.
//!
//! 이 crate는 다음을 제공합니다:
//! - 네이버 금융 모바일 페이지에서 헤드라인 가격을 추출하는 크롤러
//! - 국내 금, 국제 금, 원/달러 환율 세 가지 시세 소스

pub mod error;
pub mod provider;
pub mod source;

pub use error::{DataError, Result};
pub use provider::{
    parse_price, ExtractionStrategy, NaverQuoteFetcher, DEFAULT_NUMBER_PATTERN, NAVER_PRICE_CLASS,
    NAVER_PRICE_TAG,
};
pub use source::{GoldQuoteSource, NaverGoldQuotes, QuoteTarget, QuoteTargets};
