//! # Kimchi Core
//!
//! 금 김치 프리미엄 추적기의 핵심 도메인 모델 및 타입을 제공합니다.
//!
//! 이 크레이트는 수집기 전반에서 사용되는 기본 타입을 제공합니다:
//! - 프리미엄 계산 (트로이온스 → 그램 환산 포함)
//! - 일별 기록(`PremiumRecord`)과 CSV 필드 변환
//! - 날짜 기준을 주입하기 위한 `Clock`
//! - 로깅 인프라

pub mod domain;
pub mod error;
pub mod logging;
pub mod types;

pub use domain::*;
pub use error::*;
pub use logging::*;
pub use types::*;
