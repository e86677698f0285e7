//! 데이터 저장소 설정 관리 모듈
//!
//! 실행 환경, 패스워드 해싱, MongoDB 연결 및 저장소 백엔드 설정을 관리합니다.

use super::EnvSource;
use crate::core::errors::{AppError, AppResult};

/// 애플리케이션 실행 환경
#[derive(Debug, Clone, PartialEq)]
pub enum Environment {
    /// 개발 환경 - 빠른 개발을 위한 설정
    Development,
    /// 테스트 환경 - 자동화된 테스트용 설정
    Test,
    /// 스테이징 환경 - 프로덕션 유사 환경
    Staging,
    /// 프로덕션 환경 - 최고 수준의 보안 및 성능
    Production,
}

impl Environment {
    /// 문자열에서 Environment를 생성합니다.
    ///
    /// 알 수 없는 값인 경우 `Production`을 반환합니다.
    pub fn from_str(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "development" | "dev" => Environment::Development,
            "test" | "testing" => Environment::Test,
            "staging" | "stage" => Environment::Staging,
            _ => Environment::Production,
        }
    }

    pub(super) fn load(source: &EnvSource<'_>) -> Self {
        source
            .optional("ENVIRONMENT")
            .map(|value| Self::from_str(&value))
            .unwrap_or(Environment::Production)
    }
}

/// 패스워드 해싱 설정
#[derive(Debug, Clone, PartialEq)]
pub struct PasswordConfig {
    /// bcrypt cost (4-15)
    pub bcrypt_cost: u32,
}

impl PasswordConfig {
    /// 특정 환경에 대한 bcrypt cost를 반환합니다.
    ///
    /// - Development/Test: 4 (빠른 처리)
    /// - Staging: 10 (중간 보안)
    /// - Production: 12 (고보안)
    pub fn bcrypt_cost_for_env(env: &Environment) -> u32 {
        match env {
            Environment::Development => 4,
            Environment::Test => 4,
            Environment::Staging => 10,
            Environment::Production => 12,
        }
    }

    pub(super) fn load(source: &EnvSource<'_>, env: &Environment) -> AppResult<Self> {
        let bcrypt_cost = source.parsed("BCRYPT_COST", Self::bcrypt_cost_for_env(env))?;

        if !(4..=15).contains(&bcrypt_cost) {
            return Err(AppError::ConfigError(format!(
                "BCRYPT_COST must be between 4 and 15, got {}",
                bcrypt_cost
            )));
        }

        Ok(Self { bcrypt_cost })
    }
}

/// MongoDB 연결 설정
///
/// `username`과 `password`가 모두 비어 있으면 인증 없이 연결합니다.
/// 인증 정보가 있고 `auth_db`가 비어 있으면 `database`를 인증 DB로 사용합니다.
#[derive(Clone, PartialEq)]
pub struct MongoConfig {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    pub database: String,
    pub auth_db: String,
    pub collection: String,
    /// 서버 선택 타임아웃 (초)
    pub connect_timeout_secs: u64,
}

impl MongoConfig {
    pub fn has_credentials(&self) -> bool {
        !self.username.is_empty() || !self.password.is_empty()
    }

    /// 실제로 인증에 사용할 데이터베이스 이름
    pub fn auth_source(&self) -> &str {
        if self.auth_db.is_empty() {
            &self.database
        } else {
            &self.auth_db
        }
    }

    pub(super) fn load(source: &EnvSource<'_>) -> AppResult<Self> {
        Ok(Self {
            host: source.required("MONGODB_HOST")?,
            port: source.required_parsed("MONGODB_PORT")?,
            username: source.optional("MONGODB_USERNAME").unwrap_or_default(),
            password: source.optional("MONGODB_PASSWORD").unwrap_or_default(),
            database: source.required("MONGODB_DATABASE")?,
            auth_db: source.optional("MONGODB_AUTH_DB").unwrap_or_default(),
            collection: source.required("MONGODB_COLLECTION")?,
            connect_timeout_secs: source.parsed("MONGODB_CONNECT_TIMEOUT_SECS", 10)?,
        })
    }
}

// 비밀번호가 로그에 남지 않도록 직접 구현
impl std::fmt::Debug for MongoConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MongoConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("username", &self.username)
            .field("password", &if self.password.is_empty() { "" } else { "***" })
            .field("database", &self.database)
            .field("auth_db", &self.auth_db)
            .field("collection", &self.collection)
            .field("connect_timeout_secs", &self.connect_timeout_secs)
            .finish()
    }
}

/// 사용자 저장소 백엔드
#[derive(Debug, Clone, PartialEq)]
pub enum StorageBackend {
    /// MongoDB 컬렉션 (기본값)
    MongoDb(MongoConfig),
    /// 프로세스 내 메모리 저장소 (로컬 실행 및 테스트용)
    Memory,
}

impl StorageBackend {
    pub(super) fn load(source: &EnvSource<'_>) -> AppResult<Self> {
        let backend = source
            .optional("STORAGE_BACKEND")
            .unwrap_or_else(|| "mongodb".to_string());

        match backend.trim().to_lowercase().as_str() {
            "mongodb" | "mongo" => Ok(StorageBackend::MongoDb(MongoConfig::load(source)?)),
            "memory" => Ok(StorageBackend::Memory),
            other => Err(AppError::ConfigError(format!(
                "STORAGE_BACKEND must be `mongodb` or `memory`, got `{}`",
                other
            ))),
        }
    }
}
