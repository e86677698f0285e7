//! # 사용자 관련 요청 DTO 모듈
//!
//! 클라이언트로부터 받은 JSON 데이터를 구조화된 Rust 타입으로 변환합니다.
//! 타입 파싱 이외의 입력 검증은 수행하지 않습니다.
//!
//! | DTO | 엔드포인트 | 의미 |
//! |-----|-----------|------|
//! | [`CreateUserRequest`] | `POST /users` | 새 사용자 |
//! | [`UpdateUserRequest`] | `PUT /users/{id}` | 전체 필드 덮어쓰기 |
//! | [`PatchUserRequest`] | `PATCH /users/{id}` | 지정한 필드만 변경 |

pub mod create_user_request;
pub mod update_user_request;

pub use create_user_request::CreateUserRequest;
pub use update_user_request::{PatchUserRequest, UpdateUserRequest};
