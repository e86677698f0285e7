//! HTTP 미들웨어 구성 모듈
//!
//! `main`과 통합 테스트가 같은 미들웨어 스택을 쓰도록 Rate Limiting과 CORS 설정을 제공합니다.
//!
//! ```rust,ignore
//! let governor_conf = middlewares::governor_config(&config.rate_limit)?;
//!
//! App::new()
//!     .wrap(Governor::new(&governor_conf))
//!     .wrap(middlewares::cors())
//!     .wrap(middleware::Logger::default())
//!     .wrap(middleware::NormalizePath::trim())
//! ```

pub mod rate_limit;

pub use rate_limit::{governor_config, PeerOrLocalKeyExtractor, RateLimitGovernorConfig};

use actix_cors::Cors;
use actix_web::http::header;

/// CORS 설정을 구성합니다
///
/// 로컬 프론트엔드 개발 서버와 자체 서버 간 통신을 허용합니다.
pub fn cors() -> Cors {
    Cors::default()
        .allowed_origin("http://localhost:3000")
        .allowed_origin("http://127.0.0.1:3000")
        .allowed_origin("http://localhost:8080")
        .allowed_origin("http://127.0.0.1:8080")
        .allowed_methods(vec!["GET", "POST", "PUT", "DELETE", "PATCH", "OPTIONS"])
        .allowed_headers(vec![header::ACCEPT, header::CONTENT_TYPE])
        .max_age(3600)
}
