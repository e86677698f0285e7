//! # Data Transfer Objects
//!
//! HTTP 요청/응답 본문 구조를 정의합니다. 엔티티와 분리되어 있어
//! 평문 비밀번호는 요청 DTO에만, 해시는 엔티티에만 존재합니다.

pub mod users;

pub use users::*;
