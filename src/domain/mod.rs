//! # Domain Layer Module
//!
//! 사용자 리소스의 도메인 타입을 정의합니다.
//!
//! ## 아키텍처 개요
//!
//! ```text
//! Domain Layer (이 모듈)
//! ├── Entities      - 메모리 내 사용자 엔티티
//! └── DTOs          - HTTP 요청/응답 본문
//!      │
//!      ▼
//! Application Layer (Services)
//!      │
//!      ▼
//! Infrastructure Layer (Repositories, DB)
//! ```
//!
//! ## 비밀번호 취급 규칙
//!
//! | 타입 | 비밀번호 형태 | 외부 직렬화 |
//! |------|---------------|-------------|
//! | `CreateUserRequest` | 평문 (`password`) | 역직렬화 전용 |
//! | `User` | 해시 (`password_hash`) | 제외됨 |
//! | 저장소 문서 | 해시 (`password` 필드) | 저장소 내부 전용 |
//! | `UserResponse` | 없음 | - |

pub mod entities;
pub mod dto;
