//! 에러 타입 정의.

use std::fmt;

use kimchi_core::CoreError;
use kimchi_data::DataError;

/// Collector 에러 타입
#[derive(Debug)]
pub enum CollectorError {
    /// 시세 수집 에러 (네트워크, 페이지 구조 변경)
    Quote(DataError),
    /// 계산/기록 변환 에러
    Core(CoreError),
    /// 로그 파일 읽기/쓰기 에러 (CSV 에러 포함)
    LogIo(std::io::Error),
    /// 설정 에러
    Config(String),
}

impl CollectorError {
    /// 외부 사이트 문제로 실패했는지 확인합니다 (다음 실행에서 회복 가능).
    pub fn is_quote_error(&self) -> bool {
        matches!(self, Self::Quote(_))
    }

    /// 시세 값 자체가 비정상이라 계산하지 못했는지 확인합니다.
    pub fn is_data_quality_fault(&self) -> bool {
        matches!(self, Self::Core(e) if e.is_data_quality_fault())
    }
}

impl fmt::Display for CollectorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Quote(e) => write!(f, "{}", e),
            Self::Core(e) => write!(f, "{}", e),
            Self::LogIo(e) => write!(f, "Price log error: {}", e),
            Self::Config(msg) => write!(f, "Configuration error: {}", msg),
        }
    }
}

impl std::error::Error for CollectorError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Quote(e) => Some(e),
            Self::Core(e) => Some(e),
            Self::LogIo(e) => Some(e),
            Self::Config(_) => None,
        }
    }
}

impl From<DataError> for CollectorError {
    fn from(err: DataError) -> Self {
        Self::Quote(err)
    }
}

impl From<CoreError> for CollectorError {
    fn from(err: CoreError) -> Self {
        Self::Core(err)
    }
}

impl From<std::io::Error> for CollectorError {
    fn from(err: std::io::Error) -> Self {
        Self::LogIo(err)
    }
}

impl From<csv::Error> for CollectorError {
    fn from(err: csv::Error) -> Self {
        Self::LogIo(err.into())
    }
}

/// Result 타입 별칭
pub type Result<T> = std::result::Result<T, CollectorError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quote_error_displays_source_message() {
        let err: CollectorError =
            DataError::QuoteUnavailable("국내 금 가격 정보를 찾을 수 없습니다.".to_string()).into();
        assert!(err.is_quote_error());
        assert_eq!(err.to_string(), "국내 금 가격 정보를 찾을 수 없습니다.");
    }

    #[test]
    fn test_data_quality_fault() {
        let err: CollectorError = CoreError::DivisionByZero("환율".to_string()).into();
        assert!(err.is_data_quality_fault());
        assert!(!err.is_quote_error());

        let err: CollectorError = CoreError::InvalidRecord("열 개수".to_string()).into();
        assert!(!err.is_data_quality_fault());
    }

    #[test]
    fn test_io_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only");
        let err: CollectorError = io.into();
        assert!(matches!(err, CollectorError::LogIo(_)));
        assert!(err.to_string().contains("read-only"));
    }
}
