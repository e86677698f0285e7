//! # Application Error Handling System
//!
//! 사용자 저장소와 HTTP 계층이 공유하는 통합 에러 타입입니다.
//! 에러 메시지를 문자열로 파싱하지 않고 [`ErrorKind`]로 분기할 수 있도록,
//! 각 변형은 연산 이름과 식별자 같은 구조화된 컨텍스트를 함께 보관합니다.
//!
//! ## HTTP 응답 매핑
//!
//! | AppError | HTTP Status | 사용 시나리오 |
//! |----------|-------------|---------------|
//! | `MalformedIdentifier` | 400 Bad Request | 16진수 24자가 아닌 ID |
//! | `ValidationError` | 400 Bad Request | 본문 JSON 파싱 실패 |
//! | `NotFound` | 404 Not Found | ID에 해당하는 문서 없음 |
//! | `Cancelled` | 503 Service Unavailable | 호출자가 연산을 취소함 |
//! | `DeadlineExceeded` | 504 Gateway Timeout | 요청 타임아웃 초과 |
//! | 그 외 | 500 Internal Server Error | 드라이버, 인코딩, 설정 오류 |
//!
//! ## 사용 패턴
//!
//! ```rust,ignore
//! use user_rest_api::core::errors::{AppError, ErrorKind};
//!
//! match storage.find_one(&ctx, id).await {
//!     Ok(user) => Ok(user),
//!     Err(e) if e.is_not_found() => respond_404(),
//!     Err(e) => Err(e),
//! }
//! ```

use std::time::Duration;

use actix_web::http::StatusCode;
use thiserror::Error;

/// 에러 분류
///
/// [`AppError`]의 필드 없는 요약입니다. 호출자는 메시지 대신 이 값으로 분기합니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    MalformedIdentifier,
    NotFound,
    QueryError,
    EncodingError,
    DecodeError,
    ConnectionError,
    Cancelled,
    DeadlineExceeded,
    ConfigError,
    ValidationError,
    InternalError,
}

impl ErrorKind {
    /// 응답 본문의 `kind` 필드에 쓰이는 snake_case 이름
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::MalformedIdentifier => "malformed_identifier",
            ErrorKind::NotFound => "not_found",
            ErrorKind::QueryError => "query_error",
            ErrorKind::EncodingError => "encoding_error",
            ErrorKind::DecodeError => "decode_error",
            ErrorKind::ConnectionError => "connection_error",
            ErrorKind::Cancelled => "cancelled",
            ErrorKind::DeadlineExceeded => "deadline_exceeded",
            ErrorKind::ConfigError => "config_error",
            ErrorKind::ValidationError => "validation_error",
            ErrorKind::InternalError => "internal_error",
        }
    }
}

/// 애플리케이션 전역 에러 타입
///
/// 저장소 계층은 어떤 에러도 삼키지 않고, 연산 이름과 대상 ID를 붙여 그대로 반환합니다.
/// 드라이버 에러는 `#[source]`로 보존되어 에러 체인을 따라갈 수 있습니다.
#[derive(Error, Debug)]
pub enum AppError {
    /// 외부 식별자가 24자리 16진수 문자열이 아님
    #[error("malformed identifier {id:?}: expected 24 hexadecimal characters")]
    MalformedIdentifier { id: String },

    /// ID 기반 연산에서 일치하는 문서가 0개
    #[error("{operation}: user {id} not found")]
    NotFound { operation: &'static str, id: String },

    /// 드라이버 또는 커서 레벨 실패
    #[error("{operation} failed{}: {source}", describe_id(.id))]
    QueryError {
        operation: &'static str,
        id: Option<String>,
        #[source]
        source: mongodb::error::Error,
    },

    /// 문서 직렬화 실패 또는 저장소 프로토콜 불변식 위반
    #[error("{operation}: encoding failed: {reason}")]
    EncodingError { operation: &'static str, reason: String },

    /// 문서 → 엔티티 매핑 실패
    #[error("failed to decode user document{}: {reason}", describe_id(.id))]
    DecodeError { id: Option<String>, reason: String },

    /// 시작 시점 데이터베이스 연결 또는 ping 실패
    #[error("database connection failed during {stage}: {source}")]
    ConnectionError {
        stage: &'static str,
        #[source]
        source: mongodb::error::Error,
    },

    /// 호출자가 컨텍스트를 취소함
    #[error("{operation}: operation cancelled")]
    Cancelled { operation: &'static str },

    /// 컨텍스트 타임아웃 초과
    #[error("{operation}: deadline of {timeout:?} exceeded")]
    DeadlineExceeded { operation: &'static str, timeout: Duration },

    /// 필수 설정 누락 또는 잘못된 설정값
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// 요청 본문 타입 파싱 실패
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// 내부 서버 에러 (해싱 실패, 락 오염 등)
    #[error("Internal server error: {0}")]
    InternalError(String),
}

fn describe_id(id: &Option<String>) -> String {
    match id {
        Some(id) => format!(" for id {}", id),
        None => String::new(),
    }
}

impl AppError {
    /// 에러 분류를 반환합니다.
    pub fn kind(&self) -> ErrorKind {
        match self {
            AppError::MalformedIdentifier { .. } => ErrorKind::MalformedIdentifier,
            AppError::NotFound { .. } => ErrorKind::NotFound,
            AppError::QueryError { .. } => ErrorKind::QueryError,
            AppError::EncodingError { .. } => ErrorKind::EncodingError,
            AppError::DecodeError { .. } => ErrorKind::DecodeError,
            AppError::ConnectionError { .. } => ErrorKind::ConnectionError,
            AppError::Cancelled { .. } => ErrorKind::Cancelled,
            AppError::DeadlineExceeded { .. } => ErrorKind::DeadlineExceeded,
            AppError::ConfigError(_) => ErrorKind::ConfigError,
            AppError::ValidationError(_) => ErrorKind::ValidationError,
            AppError::InternalError(_) => ErrorKind::InternalError,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.kind() == ErrorKind::NotFound
    }

    pub(crate) fn malformed_identifier(id: impl Into<String>) -> Self {
        AppError::MalformedIdentifier { id: id.into() }
    }

    pub(crate) fn not_found(operation: &'static str, id: impl Into<String>) -> Self {
        AppError::NotFound { operation, id: id.into() }
    }

    pub(crate) fn query(
        operation: &'static str,
        id: Option<&str>,
        source: mongodb::error::Error,
    ) -> Self {
        AppError::QueryError {
            operation,
            id: id.map(str::to_string),
            source,
        }
    }
}

impl actix_web::ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self.kind() {
            ErrorKind::MalformedIdentifier | ErrorKind::ValidationError => StatusCode::BAD_REQUEST,
            ErrorKind::NotFound => StatusCode::NOT_FOUND,
            ErrorKind::Cancelled => StatusCode::SERVICE_UNAVAILABLE,
            ErrorKind::DeadlineExceeded => StatusCode::GATEWAY_TIMEOUT,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// HTTP 에러 응답을 생성합니다.
    ///
    /// 응답 형식:
    ///
    /// ```json
    /// { "error": "find user: user 507f1f77bcf86cd799439011 not found", "kind": "not_found" }
    /// ```
    ///
    /// 5xx 에러는 응답 전에 서버 로그에 기록됩니다.
    fn error_response(&self) -> actix_web::HttpResponse {
        let status = self.status_code();

        if status.is_server_error() {
            log::error!("요청 처리 실패 ({}): {}", self.kind().as_str(), self);
        }

        actix_web::HttpResponse::build(status).json(serde_json::json!({
            "error": self.to_string(),
            "kind": self.kind().as_str(),
        }))
    }
}

/// 편의성을 위한 Result 타입 별칭
pub type AppResult<T> = Result<T, AppError>;
