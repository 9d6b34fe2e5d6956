//! 데이터 모듈 오류 타입.

use thiserror::Error;

/// 시세 수집 오류.
#[derive(Debug, Error)]
pub enum DataError {
    /// 네트워크/전송 오류 (타임아웃, DNS 실패, 2xx 이외의 응답)
    #[error("Fetch error: {0}")]
    Fetch(#[from] reqwest::Error),

    /// 페이지에서 가격 요소나 숫자를 찾지 못함.
    ///
    /// 메시지는 호출자가 지정한 그대로 표시됩니다.
    #[error("{0}")]
    QuoteUnavailable(String),

    /// 추출 패턴/셀렉터가 잘못됨
    #[error("Invalid extraction pattern: {0}")]
    InvalidPattern(String),

    /// HTTP 클라이언트 생성 실패
    #[error("HTTP client error: {0}")]
    Client(String),
}

impl DataError {
    /// 네트워크 단계에서 실패했는지 확인합니다.
    pub fn is_fetch_error(&self) -> bool {
        matches!(self, DataError::Fetch(_))
    }

    /// 페이지 구조 변경 등으로 시세를 읽지 못했는지 확인합니다.
    pub fn is_quote_unavailable(&self) -> bool {
        matches!(self, DataError::QuoteUnavailable(_))
    }
}

pub type Result<T> = std::result::Result<T, DataError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quote_unavailable_shows_message_verbatim() {
        let err = DataError::QuoteUnavailable("환율 정보를 찾을 수 없습니다.".to_string());
        assert_eq!(err.to_string(), "환율 정보를 찾을 수 없습니다.");
        assert!(err.is_quote_unavailable());
        assert!(!err.is_fetch_error());
    }
}
