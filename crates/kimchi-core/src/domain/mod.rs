//! 김치 프리미엄 도메인 모델.

mod clock;
mod premium;
mod record;

pub use clock::*;
pub use premium::*;
pub use record::*;
