//! # HTTP Request Handlers Module
//!
//! HTTP 요청을 처리하는 핸들러 함수들을 정의하는 모듈입니다.
//! 핸들러는 [`AppState`]에서 서비스를 꺼내 요청마다 [`OperationContext`]를 만들고,
//! 결과를 JSON 응답으로 변환합니다. 에러는 `AppError`의 `ResponseError` 구현이
//! 상태 코드와 본문으로 바꿉니다.
//!
//! ## 아키텍처 위치
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//!   Handlers (이 모듈) - HTTP 엔드포인트 처리         ← Web Layer
//! ├─────────────────────────────────────────────┤
//!   Services - 비즈니스 로직                        ← Service Layer
//! ├─────────────────────────────────────────────┤
//!   Repositories - 데이터 접근                     ← Repository Layer
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## 요청 컨텍스트
//!
//! 모든 저장소 호출은 `SERVER_REQUEST_TIMEOUT_SECS` 마감 시간을 가진 컨텍스트로 실행됩니다.
//! 클라이언트가 연결을 끊으면 actix가 핸들러 future를 드롭하므로 진행 중인 저장소 호출도 함께 중단됩니다.

use std::time::Duration;

use crate::core::context::OperationContext;
use crate::services::users::UserService;

pub mod users;

/// 핸들러가 공유하는 애플리케이션 상태
#[derive(Clone)]
pub struct AppState {
    pub users: UserService,
    pub request_timeout: Duration,
}

impl AppState {
    pub fn new(users: UserService, request_timeout: Duration) -> Self {
        Self { users, request_timeout }
    }

    /// 요청 하나에 쓰이는 연산 컨텍스트
    pub fn request_context(&self) -> OperationContext {
        OperationContext::with_timeout(self.request_timeout)
    }
}
