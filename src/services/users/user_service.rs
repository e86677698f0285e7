//! # 사용자 관리 서비스 구현
//!
//! HTTP 요청 DTO를 사용자 엔티티로 변환하고, 비밀번호를 해싱한 뒤
//! [`UserStorage`]에 위임합니다. 저장소 구현에는 의존하지 않으므로
//! MongoDB 어댑터와 메모리 어댑터 어느 쪽과도 동작합니다.
//!
//! ## 비밀번호 처리
//!
//! - 평문 비밀번호는 요청 DTO에만 존재하고 엔티티에는 bcrypt 해시만 저장됩니다.
//! - cost는 설정의 `BCRYPT_COST` (환경별 기본값 4/4/10/12)를 따릅니다.
//! - PATCH에서 비밀번호가 주어진 경우에만 다시 해싱합니다.

use std::sync::Arc;
use std::time::Instant;

use bcrypt::hash;
use log::{debug, info};

use crate::core::context::OperationContext;
use crate::core::errors::{AppError, AppResult};
use crate::domain::dto::users::request::{CreateUserRequest, PatchUserRequest, UpdateUserRequest};
use crate::domain::entities::users::User;
use crate::repositories::users::UserStorage;

/// 사용자 관리 비즈니스 로직 서비스
///
/// 저장소 핸들을 `Arc`로 공유하므로 복제 비용이 낮고, actix 워커 간에 그대로 공유됩니다.
///
/// ## 사용 예제
///
/// ```rust,ignore
/// let storage: Arc<dyn UserStorage> = Arc::new(MemoryUserRepository::new());
/// let service = UserService::new(storage, 4);
///
/// let user = service.create_user(&ctx, request).await?;
/// let found = service.get_user(&ctx, &user.id).await?;
/// ```
#[derive(Clone)]
pub struct UserService {
    storage: Arc<dyn UserStorage>,
    bcrypt_cost: u32,
}

impl UserService {
    pub fn new(storage: Arc<dyn UserStorage>, bcrypt_cost: u32) -> Self {
        Self { storage, bcrypt_cost }
    }

    /// 새 사용자 등록
    ///
    /// 비밀번호를 해싱해 저장하고, 저장소가 할당한 ID를 채운 엔티티를 반환합니다.
    ///
    /// # Errors
    ///
    /// * `AppError::InternalError` - 비밀번호 해싱 실패
    /// * 저장소 `create`의 모든 에러
    pub async fn create_user(&self, ctx: &OperationContext, request: CreateUserRequest) -> AppResult<User> {
        let start_time = Instant::now();

        let password_hash = self.hash_password(&request.password)?;
        let mut user = User::new(request.username, password_hash, request.email);

        user.id = self.storage.create(ctx, &user).await?;

        info!("User creation took: {:?}", start_time.elapsed());
        Ok(user)
    }

    pub async fn get_users(&self, ctx: &OperationContext) -> AppResult<Vec<User>> {
        self.storage.find_all(ctx).await
    }

    pub async fn get_user(&self, ctx: &OperationContext, id: &str) -> AppResult<User> {
        self.storage.find_one(ctx, id).await
    }

    /// 사용자 전체 교체 (PUT)
    ///
    /// 모든 필드를 요청 값으로 덮어씁니다. 대상이 없으면 `NotFound`입니다.
    pub async fn replace_user(
        &self,
        ctx: &OperationContext,
        id: &str,
        request: UpdateUserRequest,
    ) -> AppResult<User> {
        let password_hash = self.hash_password(&request.password)?;
        let mut user = User::new(request.username, password_hash, request.email);
        user.id = id.to_string();

        self.storage.update(ctx, &user).await?;
        Ok(user)
    }

    /// 사용자 부분 수정 (PATCH)
    ///
    /// 저장된 사용자를 읽어 주어진 필드만 덮어쓴 뒤 전체 필드로 업데이트합니다.
    /// 빈 본문이면 저장소 쓰기 없이 현재 값을 반환합니다.
    pub async fn patch_user(
        &self,
        ctx: &OperationContext,
        id: &str,
        request: PatchUserRequest,
    ) -> AppResult<User> {
        let mut user = self.storage.find_one(ctx, id).await?;

        if request.is_empty() {
            debug!("patch user {}: empty body, nothing to update", id);
            return Ok(user);
        }

        if let Some(username) = request.username {
            user.username = username;
        }
        if let Some(email) = request.email {
            user.email = email;
        }
        if let Some(password) = request.password {
            user.password_hash = self.hash_password(&password)?;
        }

        self.storage.update(ctx, &user).await?;
        Ok(user)
    }

    pub async fn delete_user(&self, ctx: &OperationContext, id: &str) -> AppResult<()> {
        self.storage.delete(ctx, id).await
    }

    fn hash_password(&self, password: &str) -> AppResult<String> {
        let hash_start = Instant::now();
        let password_hash = hash(password, self.bcrypt_cost)
            .map_err(|e| AppError::InternalError(format!("password hashing failed: {}", e)))?;

        debug!("Password hashing took: {:?}", hash_start.elapsed());
        Ok(password_hash)
    }
}
