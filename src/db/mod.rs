//! Database Connection Management Module
//!
//! MongoDB 데이터베이스 연결을 생성하고 검증하는 모듈입니다.
//! [`MongoConfig`]를 받아 인증 여부를 결정하고, ping으로 연결 상태를 확인한 뒤
//! 사용할 수 있는 핸들을 반환합니다.
//!
//! # 기본 사용법
//!
//! ```rust,ignore
//! use user_rest_api::db::Database;
//!
//! let database = Database::connect(&mongo_config).await?;
//! let users = database.collection("users");
//! ```

use std::time::Duration;

use log::{debug, info};
use mongodb::bson::{doc, Document};
use mongodb::options::{ClientOptions, Credential};
use mongodb::{Client, Collection};

use crate::config::MongoConfig;
use crate::core::errors::{AppError, AppResult};

/// MongoDB 데이터베이스 연결 래퍼
///
/// 클라이언트는 내부적으로 연결 풀을 가지며 clone 비용이 작습니다.
#[derive(Clone)]
pub struct Database {
    /// MongoDB 클라이언트 인스턴스
    client: Client,
    /// 사용할 데이터베이스 이름
    database_name: String,
}

impl Database {
    /// 새 MongoDB 데이터베이스 연결을 생성합니다.
    ///
    /// ## 인증 규칙
    /// - `username`, `password`가 모두 비어 있으면 인증 없이 연결
    /// - 인증 정보가 있고 `auth_db`가 비어 있으면 대상 데이터베이스를 인증 DB로 사용
    ///
    /// # Errors
    ///
    /// * `AppError::ConnectionError` - URI 파싱, 클라이언트 생성 또는 ping 실패
    pub async fn connect(config: &MongoConfig) -> AppResult<Self> {
        let uri = connection_uri(config);
        debug!("MongoDB URI: {}", uri);

        let mut client_options = ClientOptions::parse(&uri)
            .await
            .map_err(|source| AppError::ConnectionError { stage: "parse options", source })?;

        // 애플리케이션 이름 설정 (모니터링 및 로깅에 유용)
        client_options.app_name = Some("user_rest_api".to_string());
        client_options.server_selection_timeout =
            Some(Duration::from_secs(config.connect_timeout_secs));
        client_options.credential = credential(config);

        let client = Client::with_options(client_options)
            .map_err(|source| AppError::ConnectionError { stage: "connect", source })?;

        // 연결 테스트
        client
            .database(&config.database)
            .run_command(doc! { "ping": 1 })
            .await
            .map_err(|source| AppError::ConnectionError { stage: "ping", source })?;

        info!(
            "✅ MongoDB 연결 성공: {}:{}/{} (auth: {})",
            config.host,
            config.port,
            config.database,
            config.has_credentials()
        );

        Ok(Self {
            client,
            database_name: config.database.clone(),
        })
    }

    /// MongoDB 데이터베이스 인스턴스를 반환합니다.
    pub fn get_database(&self) -> mongodb::Database {
        self.client.database(&self.database_name)
    }

    /// 문서 단위로 다루는 컬렉션 핸들을 반환합니다.
    pub fn collection(&self, name: &str) -> Collection<Document> {
        self.get_database().collection::<Document>(name)
    }

    /// 데이터베이스 이름을 반환합니다.
    pub fn database_name(&self) -> &str {
        &self.database_name
    }
}

/// 인증 정보를 제외한 연결 URI
fn connection_uri(config: &MongoConfig) -> String {
    format!("mongodb://{}:{}", config.host, config.port)
}

fn credential(config: &MongoConfig) -> Option<Credential> {
    if !config.has_credentials() {
        return None;
    }

    Some(
        Credential::builder()
            .username(config.username.clone())
            .password(config.password.clone())
            .source(config.auth_source().to_string())
            .build(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(username: &str, password: &str, auth_db: &str) -> MongoConfig {
        MongoConfig {
            host: "db.internal".to_string(),
            port: 27018,
            username: username.to_string(),
            password: password.to_string(),
            database: "user-service".to_string(),
            auth_db: auth_db.to_string(),
            collection: "users".to_string(),
            connect_timeout_secs: 1,
        }
    }

    #[test]
    fn test_uri_never_contains_credentials() {
        let uri = connection_uri(&config("admin", "hunter2", ""));

        assert_eq!(uri, "mongodb://db.internal:27018");
    }

    #[test]
    fn test_no_credential_without_username_and_password() {
        assert!(credential(&config("", "", "admin")).is_none());
    }

    #[test]
    fn test_credential_source_defaults_to_database() {
        let credential = credential(&config("admin", "hunter2", "")).unwrap();

        assert_eq!(credential.username.as_deref(), Some("admin"));
        assert_eq!(credential.source.as_deref(), Some("user-service"));
    }

    #[test]
    fn test_credential_uses_explicit_auth_db() {
        let credential = credential(&config("admin", "hunter2", "admin")).unwrap();

        assert_eq!(credential.source.as_deref(), Some("admin"));
    }
}
