//! 사용자 REST API 메인 애플리케이션
//!
//! 설정을 읽고 로깅과 저장소를 초기화한 뒤 Actix-web HTTP 서버를 구동합니다.
//! 설정 오류, 저장소 연결 실패, 바인딩 실패는 모두 로그를 남기고 프로세스를 종료합니다.

use std::io;
use std::sync::Arc;

use actix_governor::Governor;
use actix_web::{middleware, web, App, HttpServer};
use dotenv::dotenv;
use log::{error, info, warn};
use user_rest_api::config::{AppConfig, ListenType, StorageBackend};
use user_rest_api::core::errors::AppResult;
use user_rest_api::db::Database;
use user_rest_api::handlers::AppState;
use user_rest_api::logging;
use user_rest_api::middlewares;
use user_rest_api::repositories::users::{MemoryUserRepository, UserRepository, UserStorage};
use user_rest_api::routes::configure_all_routes;
use user_rest_api::services::users::UserService;

#[cfg(unix)]
const SOCKET_FILE: &str = "app.sock";

#[actix_web::main]
async fn main() -> io::Result<()> {
    // 로거 설치 전이므로 결과는 초기화 후에 기록
    let env_file = load_env_file();

    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("configuration error: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = logging::init(&config.logging) {
        eprintln!("logger initialization failed: {}", e);
        std::process::exit(1);
    }

    info!("🚀 사용자 REST API 시작중... ({})", env_file);
    info!("environment={:?} debug={}", config.environment, config.is_debug);

    let storage = match open_storage(&config.storage).await {
        Ok(storage) => storage,
        Err(e) => {
            error!("저장소 초기화 실패: {}", e);
            std::process::exit(1);
        }
    };

    let state = AppState::new(
        UserService::new(storage, config.password.bcrypt_cost),
        config.server.request_timeout,
    );

    info!("✅ 모든 서비스가 성공적으로 초기화되었습니다!");

    start_http_server(config, state).await
}

/// HTTP 서버를 구성하고 실행합니다
///
/// Rate Limiting, CORS, 로깅, 경로 정규화 미들웨어를 포함합니다.
/// `LISTEN_TYPE`에 따라 TCP 포트 또는 실행 파일 옆의 유닉스 소켓에 바인딩합니다.
async fn start_http_server(config: AppConfig, state: AppState) -> io::Result<()> {
    let rate_limit = &config.rate_limit;
    let governor_conf = match middlewares::governor_config(rate_limit) {
        Ok(conf) => conf,
        Err(e) => {
            error!("잘못된 Rate Limiting 설정: {}", e);
            std::process::exit(1);
        }
    };

    info!(
        "🛡️ Rate Limiting 활성화: 초당 {}요청, 버스트 {}개",
        rate_limit.per_second, rate_limit.burst_size
    );

    let state = web::Data::new(state);
    let server = HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .wrap(Governor::new(&governor_conf))
            .wrap(middlewares::cors())
            .wrap(middleware::Logger::default())
            .wrap(middleware::NormalizePath::trim())
            .configure(configure_all_routes)
    })
    .workers(config.server.workers);

    let bound = match config.listen.listen_type {
        ListenType::Port => {
            let address = config.listen.address();
            info!("🌐 서버가 http://{} 에서 실행중입니다", address);
            info!("📍 Health check: http://{}/health", address);
            server.bind((config.listen.bind_ip.as_str(), config.listen.port))
        }
        #[cfg(unix)]
        ListenType::Sock => {
            let path = socket_path()?;
            if path.exists() {
                warn!("stale socket file removed: {}", path.display());
                std::fs::remove_file(&path)?;
            }
            info!("🌐 서버가 unix:{} 에서 실행중입니다", path.display());
            server.bind_uds(&path)
        }
        #[cfg(not(unix))]
        ListenType::Sock => Err(io::Error::new(
            io::ErrorKind::Unsupported,
            "LISTEN_TYPE=sock requires a unix platform",
        )),
    };

    match bound {
        Ok(server) => server.run().await,
        Err(e) => {
            error!("서버 바인딩 실패: {}", e);
            std::process::exit(1);
        }
    }
}

/// 환경별 설정 파일을 로드합니다
///
/// * `PROFILE=dev` - .env.dev 파일 로드 (기본값)
/// * `PROFILE=prod` - .env.prod 파일 로드
/// * 기타 - 기본 .env 파일 로드
///
/// 파일이 없어도 실패하지 않으며, 로드 결과를 설명하는 문자열을 반환합니다.
fn load_env_file() -> String {
    let profile = std::env::var("PROFILE").unwrap_or_else(|_| "dev".to_string());

    let loaded = match profile.as_str() {
        "prod" => dotenv::from_filename(".env.prod").map(|_| ".env.prod"),
        "dev" => dotenv::from_filename(".env.dev").map(|_| ".env.dev"),
        _ => dotenv().map(|_| ".env"),
    };

    match loaded {
        Ok(file) => format!("profile={}, {} 파일 로드 됨", profile, file),
        Err(e) => format!("profile={}, env 파일 로드 실패: {}", profile, e),
    }
}

/// 설정된 백엔드로 사용자 저장소를 엽니다
///
/// MongoDB는 연결 후 ping까지 성공해야 반환합니다.
async fn open_storage(backend: &StorageBackend) -> AppResult<Arc<dyn UserStorage>> {
    match backend {
        StorageBackend::MongoDb(mongo) => {
            info!("📡 데이터베이스 연결 중... {:?}", mongo);
            let database = Database::connect(mongo).await?;
            info!("✅ MongoDB 연결 성공: {}.{}", database.database_name(), mongo.collection);

            Ok(Arc::new(UserRepository::new(&database, &mongo.collection)))
        }
        StorageBackend::Memory => {
            warn!("메모리 저장소 사용 중: 프로세스 종료 시 데이터가 사라집니다");
            Ok(Arc::new(MemoryUserRepository::new()))
        }
    }
}

#[cfg(unix)]
fn socket_path() -> io::Result<std::path::PathBuf> {
    let exe = std::env::current_exe()?;
    let dir = exe
        .parent()
        .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "executable has no parent directory"))?;
    Ok(dir.join(SOCKET_FILE))
}
