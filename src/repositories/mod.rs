//! 데이터 액세스 계층을 담당하는 리포지토리 모듈
//!
//! 사용자 저장소 기능 트레이트와 MongoDB/메모리 구현을 제공합니다.
//!
//! # Examples
//!
//! ```rust,ignore
//! use crate::repositories::users::{UserRepository, UserStorage};
//!
//! let user_repo = UserRepository::new(&database, "users");
//! let user = user_repo.find_one(&ctx, "507f1f77bcf86cd799439011").await?;
//! ```

pub mod users;
