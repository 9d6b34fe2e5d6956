//! 데이터 Provider 모듈.
//!
//! ## 네이버 금융
//! - `NaverQuoteFetcher`: 네이버 증권 모바일 시세 크롤러
//! - `ExtractionStrategy`: 가격 요소를 찾는 태그/클래스/숫자 패턴
//! - 국내 금(원/g), 국제 금(달러/온스), 원/달러 환율 헤드라인 가격

pub mod naver;

pub use naver::{
    parse_price, ExtractionStrategy, NaverQuoteFetcher, DEFAULT_NUMBER_PATTERN,
    DEFAULT_REQUEST_TIMEOUT, NAVER_PRICE_CLASS, NAVER_PRICE_TAG,
};
