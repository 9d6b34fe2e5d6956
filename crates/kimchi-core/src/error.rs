//! 핵심 도메인 에러 타입.

use thiserror::Error;

/// 도메인 계산 및 기록 변환 에러.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    /// 0으로 나누기 (환산 가격이 0인 경우 등)
    #[error("0으로 나눌 수 없음: {0}")]
    DivisionByZero(String),

    /// 계산 중 `Decimal` 범위 초과 (비정상적으로 크거나 작은 시세)
    #[error("계산 범위 초과: {0}")]
    ArithmeticOverflow(String),

    /// 로그 행을 기록으로 변환할 수 없음
    #[error("잘못된 기록: {0}")]
    InvalidRecord(String),
}

/// 도메인 작업을 위한 Result 타입.
pub type CoreResult<T> = Result<T, CoreError>;

impl CoreError {
    /// 데이터 품질 문제(실제 시세에서는 발생하지 않아야 하는 값)인지 확인합니다.
    pub fn is_data_quality_fault(&self) -> bool {
        matches!(
            self,
            CoreError::DivisionByZero(_) | CoreError::ArithmeticOverflow(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_quality_fault() {
        let err = CoreError::DivisionByZero("international_local_per_gram".to_string());
        assert!(err.is_data_quality_fault());

        let err = CoreError::ArithmeticOverflow("premium_percent".to_string());
        assert!(err.is_data_quality_fault());

        let err = CoreError::InvalidRecord("empty row".to_string());
        assert!(!err.is_data_quality_fault());
    }

    #[test]
    fn test_error_display() {
        let err = CoreError::InvalidRecord("empty row".to_string());
        assert_eq!(err.to_string(), "잘못된 기록: empty row");
    }
}
