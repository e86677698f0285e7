//! # Configuration Management Module
//!
//! 애플리케이션 설정을 환경 변수에서 한 번 읽어 [`AppConfig`] 값으로 만드는 모듈입니다.
//! 전역 싱글톤 대신, `main`에서 로드한 설정을 필요한 컴포넌트에 소유권이나
//! 참조로 전달합니다.
//!
//! ## 설계 원칙
//!
//! ### 1. 한 번만 로드 (Load Once)
//!
//! - 프로세스 시작 시 `AppConfig::from_env()`를 한 번 호출
//! - 이후에는 `Arc`/`web::Data`로 공유
//!
//! ### 2. 빠른 실패 (Fail Fast)
//!
//! - 필수 값 누락 또는 파싱 불가 값은 `AppError::ConfigError`
//! - 잘못된 값을 조용히 기본값으로 바꾸지 않음
//!
//! ## 환경 변수 설정 가이드
//!
//! ### 필수 환경 변수
//!
//! ```bash
//! export IS_DEBUG="false"
//!
//! # STORAGE_BACKEND=mongodb (기본값) 인 경우
//! export MONGODB_HOST="localhost"
//! export MONGODB_PORT="27017"
//! export MONGODB_DATABASE="user-service"
//! export MONGODB_COLLECTION="users"
//! ```
//!
//! ### 선택적 환경 변수
//!
//! ```bash
//! export MONGODB_USERNAME="admin"        # 비어 있으면 인증 없이 연결
//! export MONGODB_PASSWORD="secret"
//! export MONGODB_AUTH_DB="admin"         # 기본값: MONGODB_DATABASE
//! export LISTEN_TYPE="port"              # port | sock
//! export LISTEN_BIND_IP="127.0.0.1"
//! export LISTEN_PORT="8080"
//! export SERVER_REQUEST_TIMEOUT_SECS="15"
//! export LOG_DIR="logs"
//! export BCRYPT_COST="12"                # 4-15 범위
//! ```

pub mod data_config;
pub mod server_config;

pub use data_config::*;
pub use server_config::*;

use std::env;
use std::str::FromStr;

use crate::core::errors::{AppError, AppResult};

/// 환경 변수 조회 함수를 감싼 설정 소스
///
/// 테스트에서는 `HashMap` 기반 조회 함수를 넘겨 프로세스 환경과 분리합니다.
pub struct EnvSource<'a> {
    lookup: &'a dyn Fn(&str) -> Option<String>,
}

impl<'a> EnvSource<'a> {
    pub fn new(lookup: &'a dyn Fn(&str) -> Option<String>) -> Self {
        Self { lookup }
    }

    /// 설정된 값 (빈 문자열 포함)
    pub fn optional(&self, key: &str) -> Option<String> {
        (self.lookup)(key)
    }

    /// 비어 있지 않은 값이 반드시 있어야 함
    pub fn required(&self, key: &str) -> AppResult<String> {
        match self.optional(key) {
            Some(value) if !value.trim().is_empty() => Ok(value),
            _ => Err(AppError::ConfigError(format!("{} is required", key))),
        }
    }

    pub fn required_parsed<T: FromStr>(&self, key: &str) -> AppResult<T> {
        let raw = self.required(key)?;
        parse_value(key, &raw)
    }

    /// 값이 없으면 `default`, 있지만 파싱할 수 없으면 에러
    pub fn parsed<T: FromStr>(&self, key: &str, default: T) -> AppResult<T> {
        match self.optional(key) {
            Some(raw) if !raw.trim().is_empty() => parse_value(key, &raw),
            _ => Ok(default),
        }
    }
}

fn parse_value<T: FromStr>(key: &str, raw: &str) -> AppResult<T> {
    raw.trim()
        .parse()
        .map_err(|_| AppError::ConfigError(format!("{} has an invalid value: `{}`", key, raw)))
}

/// 애플리케이션 전체 설정
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub is_debug: bool,
    pub environment: Environment,
    pub listen: ListenConfig,
    pub server: ServerConfig,
    pub rate_limit: RateLimitConfig,
    pub logging: LogConfig,
    pub password: PasswordConfig,
    pub storage: StorageBackend,
}

impl AppConfig {
    /// 프로세스 환경 변수에서 설정을 로드합니다.
    ///
    /// `.env` 파일은 호출 전에 `dotenv`로 적용되어 있어야 합니다.
    pub fn from_env() -> AppResult<Self> {
        let lookup = |key: &str| env::var(key).ok();
        Self::from_lookup(&lookup)
    }

    /// 임의의 조회 함수로부터 설정을 로드합니다.
    pub fn from_lookup(lookup: &dyn Fn(&str) -> Option<String>) -> AppResult<Self> {
        let source = EnvSource::new(lookup);

        let is_debug = source.required_parsed::<bool>("IS_DEBUG")?;
        let environment = Environment::load(&source);

        Ok(Self {
            is_debug,
            listen: ListenConfig::load(&source)?,
            server: ServerConfig::load(&source)?,
            rate_limit: RateLimitConfig::load(&source)?,
            logging: LogConfig::load(&source, is_debug),
            password: PasswordConfig::load(&source, &environment)?,
            storage: StorageBackend::load(&source)?,
            environment,
        })
    }
}
