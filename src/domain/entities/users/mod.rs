//! Users Entity Module
//!
//! 사용자 도메인의 핵심 엔티티를 정의하는 모듈입니다.
//!
//! # 사용 예제
//!
//! ```rust,ignore
//! use user_rest_api::domain::entities::users::User;
//!
//! let user = User::new("alice".to_string(), password_hash, "a@x.com".to_string());
//! assert!(!user.is_persisted());
//! ```

pub mod user;

pub use user::User;
