//! Rate Limiting 설정
//!
//! 클라이언트 IP별로 요청 수를 제한합니다. 유닉스 도메인 소켓 연결처럼 피어 주소가
//! 없는 요청은 하나의 공용 키를 나눠 씁니다.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use actix_governor::governor::middleware::StateInformationMiddleware;
use actix_governor::{GovernorConfig, GovernorConfigBuilder, KeyExtractor, SimpleKeyExtractionError};
use actix_web::dev::ServiceRequest;

use crate::config::RateLimitConfig;
use crate::core::errors::{AppError, AppResult};

/// 피어 주소가 없는 요청이 공유하는 키
pub const LOCAL_KEY: IpAddr = IpAddr::V4(Ipv4Addr::UNSPECIFIED);

pub type RateLimitGovernorConfig = GovernorConfig<PeerOrLocalKeyExtractor, StateInformationMiddleware>;

/// 피어 IP, 없으면 [`LOCAL_KEY`]를 키로 쓰는 추출기
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PeerOrLocalKeyExtractor;

impl PeerOrLocalKeyExtractor {
    pub fn key_for(peer: Option<SocketAddr>) -> IpAddr {
        peer.map(|addr| addr.ip()).unwrap_or(LOCAL_KEY)
    }
}

impl KeyExtractor for PeerOrLocalKeyExtractor {
    type Key = IpAddr;
    type KeyExtractionError = SimpleKeyExtractionError<&'static str>;

    fn extract(&self, req: &ServiceRequest) -> Result<Self::Key, Self::KeyExtractionError> {
        Ok(Self::key_for(req.peer_addr()))
    }
}

/// 설정값으로 Governor 설정을 만듭니다
///
/// # Errors
///
/// * `AppError::ConfigError` - 초당 요청 수 또는 버스트 크기가 0
pub fn governor_config(config: &RateLimitConfig) -> AppResult<RateLimitGovernorConfig> {
    if config.per_second == 0 {
        return Err(AppError::ConfigError(
            "RATE_LIMIT_PER_SECOND must be greater than 0".to_string(),
        ));
    }

    GovernorConfigBuilder::default()
        .key_extractor(PeerOrLocalKeyExtractor)
        .requests_per_second(config.per_second)
        .burst_size(config.burst_size)
        .use_headers()
        .finish()
        .ok_or_else(|| AppError::ConfigError(format!("invalid rate limit settings: {:?}", config)))
}
