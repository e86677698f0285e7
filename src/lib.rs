//! 사용자 REST API 서비스
//!
//! 단일 사용자 컬렉션에 대한 CRUD를 HTTP로 제공하는 Rust 서비스입니다.
//! MongoDB를 주 저장소로 사용하며, 테스트와 로컬 실행을 위한 메모리 저장소를 함께 제공합니다.
//!
//! # Features
//!
//! - **사용자 관리**: 생성, 목록/단건 조회, 전체 교체, 부분 수정, 삭제
//! - **저장소 추상화**: `UserStorage` 트레이트와 MongoDB/메모리 어댑터
//! - **연산 컨텍스트**: 모든 저장소 호출에 타임아웃과 취소 적용
//! - **구조화된 에러**: `ErrorKind` 기반 분기와 HTTP 상태 코드 매핑
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────┐
//! │   HTTP Routes   │ ← REST API 엔드포인트
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │    Handlers     │ ← 요청/응답 처리
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │    Services     │ ← 비밀번호 해싱, DTO 변환
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │  Repositories   │ ← 식별자 코덱, 문서 매퍼
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │ MongoDB / 메모리  │ ← 저장소
//! └─────────────────┘
//! ```
//!
//! # Examples
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use user_rest_api::core::context::OperationContext;
//! use user_rest_api::repositories::users::MemoryUserRepository;
//! use user_rest_api::services::users::UserService;
//!
//! let service = UserService::new(Arc::new(MemoryUserRepository::new()), 4);
//! let user = service.create_user(&OperationContext::background(), request).await?;
//! ```

pub mod core;
pub mod config;
pub mod db;
pub mod domain;
pub mod repositories;
pub mod services;
pub mod routes;
pub mod handlers;
pub mod logging;
pub mod middlewares;
