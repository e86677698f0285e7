//! 사용자 관리 서비스 모듈
//!
//! 사용자 생명주기(등록, 조회, 교체, 부분 수정, 삭제)의 비즈니스 로직을 담당합니다.
//!
//! # Examples
//!
//! ```rust,ignore
//! use crate::services::users::UserService;
//!
//! let service = UserService::new(storage, config.password.bcrypt_cost);
//! let user = service.create_user(&ctx, request).await?;
//! ```

pub mod user_service;

pub use user_service::UserService;
