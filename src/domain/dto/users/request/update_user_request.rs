//! 사용자 수정 요청 DTO

use serde::Deserialize;

/// 전체 수정 요청 (`PUT /users/{id}`)
///
/// 매핑되는 모든 필드를 덮어씁니다.
#[derive(Clone, Deserialize)]
pub struct UpdateUserRequest {
    pub username: String,
    pub password: String,
    pub email: String,
}

/// 부분 수정 요청 (`PATCH /users/{id}`)
///
/// 값이 주어진 필드만 기존 사용자 위에 덮어씁니다.
#[derive(Clone, Default, Deserialize)]
pub struct PatchUserRequest {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

impl PatchUserRequest {
    pub fn is_empty(&self) -> bool {
        self.username.is_none() && self.password.is_none() && self.email.is_none()
    }
}

impl std::fmt::Debug for UpdateUserRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UpdateUserRequest")
            .field("username", &self.username)
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}

impl std::fmt::Debug for PatchUserRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PatchUserRequest")
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "***"))
            .field("email", &self.email)
            .finish()
    }
}
