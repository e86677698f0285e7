//! 비즈니스 로직을 담당하는 서비스 계층 모듈
//!
//! 서비스는 `main`에서 설정과 저장소를 받아 명시적으로 생성되며,
//! `web::Data`를 통해 핸들러에 공유됩니다.

pub mod users;
