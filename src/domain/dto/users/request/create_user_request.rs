//! 사용자 생성 요청 DTO
//!
//! 새로운 사용자 생성을 위한 HTTP 요청 데이터 구조를 정의합니다.

use serde::Deserialize;

/// 새로운 사용자 생성을 위한 요청 DTO
///
/// `password`는 평문이며, 서비스 계층에서 해시된 뒤 `User::password_hash`가 됩니다.
#[derive(Clone, Deserialize)]
pub struct CreateUserRequest {
    pub username: String,
    pub password: String,
    pub email: String,
}

impl std::fmt::Debug for CreateUserRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CreateUserRequest")
            .field("username", &self.username)
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}
