//! User Entity Implementation
//!
//! 사용자 엔티티의 핵심 구현체입니다.
//! 저장소 문서 형태와는 분리된 메모리 내 표현이며, 문서 변환은
//! `repositories::users::document` 모듈이 담당합니다.

use serde::Serialize;

/// 사용자 엔티티
///
/// `id`는 저장되기 전까지 빈 문자열이며, 저장소가 생성 시 할당한
/// 24자리 16진수 문자열이 채워집니다.
///
/// 외부로 나가는 직렬화(`Serialize`, `Debug`)에는 `password_hash`가 절대 포함되지 않습니다.
#[derive(Clone, Default, PartialEq, Eq, Serialize)]
pub struct User {
    /// 외부 식별자 (저장 전에는 빈 문자열)
    pub id: String,
    /// 사용자 이름
    pub username: String,
    /// 해시된 비밀번호 (저장소 쓰기 전용)
    #[serde(skip_serializing)]
    pub password_hash: String,
    /// 사용자 이메일
    pub email: String,
}

impl User {
    /// 아직 저장되지 않은 사용자 생성
    pub fn new(username: String, password_hash: String, email: String) -> Self {
        Self {
            id: String::new(),
            username,
            password_hash,
            email,
        }
    }

    /// 저장소에 저장된 적이 있는지 확인
    pub fn is_persisted(&self) -> bool {
        !self.id.is_empty()
    }
}

impl std::fmt::Debug for User {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("User")
            .field("id", &self.id)
            .field("username", &self.username)
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}
