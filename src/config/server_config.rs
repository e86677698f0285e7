//! HTTP 서버 및 로깅 설정 관리 모듈
//!
//! 리스너 종류(TCP 포트 / 유닉스 소켓), 워커 수, 요청 타임아웃,
//! Rate Limiting, 로그 파일 위치를 관리합니다.

use std::time::Duration;

use super::EnvSource;
use crate::core::errors::{AppError, AppResult};

/// 리스너 종류
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListenType {
    /// `bind_ip:port` TCP 리스너
    Port,
    /// 실행 파일 디렉터리의 `app.sock` 유닉스 도메인 소켓
    Sock,
}

/// 리스너 설정
#[derive(Debug, Clone, PartialEq)]
pub struct ListenConfig {
    pub listen_type: ListenType,
    pub bind_ip: String,
    pub port: u16,
}

impl ListenConfig {
    pub(super) fn load(source: &EnvSource<'_>) -> AppResult<Self> {
        let listen_type = source
            .optional("LISTEN_TYPE")
            .unwrap_or_else(|| "port".to_string());

        let listen_type = match listen_type.trim().to_lowercase().as_str() {
            "port" => ListenType::Port,
            "sock" => ListenType::Sock,
            other => {
                return Err(AppError::ConfigError(format!(
                    "LISTEN_TYPE must be `port` or `sock`, got `{}`",
                    other
                )));
            }
        };

        Ok(Self {
            listen_type,
            bind_ip: source
                .optional("LISTEN_BIND_IP")
                .unwrap_or_else(|| "127.0.0.1".to_string()),
            port: source.parsed("LISTEN_PORT", 8080)?,
        })
    }

    /// TCP 바인딩 주소 (`ip:port`)
    pub fn address(&self) -> String {
        format!("{}:{}", self.bind_ip, self.port)
    }
}

/// HTTP 서버 동작 설정
#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    pub workers: usize,
    /// 요청마다 저장소 연산에 적용되는 타임아웃
    pub request_timeout: Duration,
}

impl ServerConfig {
    pub(super) fn load(source: &EnvSource<'_>) -> AppResult<Self> {
        Ok(Self {
            workers: non_zero("SERVER_WORKERS", source.parsed("SERVER_WORKERS", 4)?)?,
            request_timeout: Duration::from_secs(non_zero(
                "SERVER_REQUEST_TIMEOUT_SECS",
                source.parsed("SERVER_REQUEST_TIMEOUT_SECS", 15)?,
            )?),
        })
    }
}

/// Rate Limiting 설정
#[derive(Debug, Clone, PartialEq)]
pub struct RateLimitConfig {
    pub per_second: u64,
    pub burst_size: u32,
}

impl RateLimitConfig {
    pub(super) fn load(source: &EnvSource<'_>) -> AppResult<Self> {
        Ok(Self {
            per_second: non_zero("RATE_LIMIT_PER_SECOND", source.parsed("RATE_LIMIT_PER_SECOND", 100)?)?,
            burst_size: non_zero("RATE_LIMIT_BURST_SIZE", source.parsed("RATE_LIMIT_BURST_SIZE", 200)?)?,
        })
    }
}

/// 0이면 시작 시점에 패닉하거나 모든 요청이 실패하는 값
fn non_zero<T: Default + PartialEq>(key: &str, value: T) -> AppResult<T> {
    if value == T::default() {
        return Err(AppError::ConfigError(format!("{} must be greater than 0", key)));
    }
    Ok(value)
}

/// 로그 출력 설정
///
/// 로그는 표준 출력과 `directory/file` 양쪽에 기록됩니다.
#[derive(Debug, Clone, PartialEq)]
pub struct LogConfig {
    pub directory: String,
    pub file: String,
    /// env_logger 필터 문자열 (`RUST_LOG` 형식)
    pub filter: String,
}

impl LogConfig {
    pub(super) fn load(source: &EnvSource<'_>, is_debug: bool) -> Self {
        let default_filter = if is_debug { "debug" } else { "info,actix_web=info" };

        Self {
            directory: source.optional("LOG_DIR").unwrap_or_else(|| "logs".to_string()),
            file: source.optional("LOG_FILE").unwrap_or_else(|| "all.log".to_string()),
            filter: source
                .optional("RUST_LOG")
                .unwrap_or_else(|| default_filter.to_string()),
        }
    }
}
