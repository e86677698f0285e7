//! # Core Module
//!
//! 저장소, 서비스, HTTP 계층이 공통으로 사용하는 기반 타입을 제공합니다.
//!
//! ## 모듈 구성
//!
//! ### [`errors`] - 통합 에러 처리
//! - **AppError**: 연산 이름과 식별자를 담는 구조화된 에러
//! - **ErrorKind**: 메시지 파싱 없이 분기하기 위한 에러 분류
//! - **HTTP 통합**: Actix-Web `ResponseError` 구현
//!
//! ### [`context`] - 연산 컨텍스트
//! - **OperationContext**: 저장소 호출마다 전달되는 타임아웃/취소 범위
//! - **CancelHandle**: 진행 중인 호출을 중단시키는 핸들

pub mod context;
pub mod errors;

pub use context::*;
pub use errors::*;
