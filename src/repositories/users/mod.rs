//! 사용자 데이터 액세스 계층을 담당하는 리포지토리 모듈
//!
//! 호출자는 [`UserStorage`] 트레이트에만 의존하며, 구현체는 다음 두 가지입니다.
//!
//! - [`UserRepository`](user_repo::UserRepository) - MongoDB 컬렉션 어댑터
//! - [`MemoryUserRepository`](memory_repo::MemoryUserRepository) - 프로세스 내 어댑터
//!
//! 두 구현 모두 [`identifier`] 코덱과 [`document`] 매퍼를 거쳐 동일한 의미를 제공합니다.
//!
//! # Examples
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use user_rest_api::repositories::users::{UserStorage, user_repo::UserRepository};
//!
//! let storage: Arc<dyn UserStorage> = Arc::new(UserRepository::new(&database, "users"));
//! let id = storage.create(&ctx, &user).await?;
//! let found = storage.find_one(&ctx, &id).await?;
//! ```

pub mod document;
pub mod identifier;
pub mod memory_repo;
pub mod user_repo;

pub use memory_repo::MemoryUserRepository;
pub use user_repo::UserRepository;

use async_trait::async_trait;

use crate::core::context::OperationContext;
use crate::core::errors::AppResult;
use crate::domain::entities::users::User;

// 로그와 에러에 쓰는 연산 이름
const CREATE: &str = "create user";
const FIND_ALL: &str = "find all users";
const FIND_ONE: &str = "find user";
const UPDATE: &str = "update user";
const DELETE: &str = "delete user";

/// 사용자 저장소 기능 인터페이스
///
/// 모든 연산은 호출자가 제공한 [`OperationContext`]의 타임아웃/취소를 따르며,
/// 재시도하지 않고 실패를 그대로 반환합니다.
///
/// ## 에러 규약
///
/// * `MalformedIdentifier` - ID가 24자리 16진수가 아님
/// * `NotFound` - ID 기반 연산에서 일치하는 문서가 없음
/// * `QueryError` / `EncodingError` / `DecodeError` - 드라이버, 직렬화, 매핑 실패
/// * `Cancelled` / `DeadlineExceeded` - 컨텍스트에 의해 중단됨
#[async_trait]
pub trait UserStorage: Send + Sync {
    /// 새 사용자를 저장하고 할당된 ID를 반환합니다. `user.id`는 무시됩니다.
    async fn create(&self, ctx: &OperationContext, user: &User) -> AppResult<String>;

    /// 모든 사용자를 반환합니다. 비어 있으면 빈 벡터입니다.
    async fn find_all(&self, ctx: &OperationContext) -> AppResult<Vec<User>>;

    async fn find_one(&self, ctx: &OperationContext, id: &str) -> AppResult<User>;

    /// `user.id` 문서의 매핑 필드 전체를 덮어씁니다.
    async fn update(&self, ctx: &OperationContext, user: &User) -> AppResult<()>;

    async fn delete(&self, ctx: &OperationContext, id: &str) -> AppResult<()>;
}
