//! # User Management HTTP Handlers
//!
//! 사용자 리소스의 CRUD 엔드포인트입니다.
//!
//! | 메서드 | 경로 | 설명 | 상태 코드 |
//! |--------|------|------|-----------|
//! | `GET` | `/users` | 사용자 목록 조회 | 200 OK |
//! | `GET` | `/users/{id}` | 사용자 조회 | 200 OK |
//! | `POST` | `/users` | 새 사용자 생성 | 201 Created |
//! | `PUT` | `/users/{id}` | 사용자 전체 정보 수정 | 200 OK |
//! | `PATCH` | `/users/{id}` | 사용자 부분 정보 수정 | 200 OK |
//! | `DELETE` | `/users/{id}` | 사용자 삭제 | 204 No Content |
//!
//! 응답 본문은 항상 [`UserResponse`]이며 비밀번호 관련 필드는 포함되지 않습니다.

use actix_web::{delete, get, patch, post, put, web, HttpResponse};
use log::info;

use crate::core::errors::AppError;
use crate::domain::dto::users::request::{CreateUserRequest, PatchUserRequest, UpdateUserRequest};
use crate::domain::dto::users::response::UserResponse;
use crate::handlers::AppState;

#[get("")]
pub async fn get_users(state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let ctx = state.request_context();
    let users = state.users.get_users(&ctx).await?;

    let body: Vec<UserResponse> = users.into_iter().map(UserResponse::from).collect();
    Ok(HttpResponse::Ok().json(body))
}

#[get("/{user_id}")]
pub async fn get_user(
    state: web::Data<AppState>,
    user_id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let ctx = state.request_context();
    let user = state.users.get_user(&ctx, &user_id).await?;

    Ok(HttpResponse::Ok().json(UserResponse::from(user)))
}

#[post("")]
pub async fn create_user(
    state: web::Data<AppState>,
    payload: web::Json<CreateUserRequest>,
) -> Result<HttpResponse, AppError> {
    let ctx = state.request_context();
    let user = state.users.create_user(&ctx, payload.into_inner()).await?;

    info!("user {} created", user.id);
    Ok(HttpResponse::Created().json(UserResponse::from(user)))
}

#[put("/{user_id}")]
pub async fn update_user(
    state: web::Data<AppState>,
    user_id: web::Path<String>,
    payload: web::Json<UpdateUserRequest>,
) -> Result<HttpResponse, AppError> {
    let ctx = state.request_context();
    let user = state.users.replace_user(&ctx, &user_id, payload.into_inner()).await?;

    Ok(HttpResponse::Ok().json(UserResponse::from(user)))
}

#[patch("/{user_id}")]
pub async fn patch_user(
    state: web::Data<AppState>,
    user_id: web::Path<String>,
    payload: web::Json<PatchUserRequest>,
) -> Result<HttpResponse, AppError> {
    let ctx = state.request_context();
    let user = state.users.patch_user(&ctx, &user_id, payload.into_inner()).await?;

    Ok(HttpResponse::Ok().json(UserResponse::from(user)))
}

#[delete("/{user_id}")]
pub async fn delete_user(
    state: web::Data<AppState>,
    user_id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let ctx = state.request_context();
    state.users.delete_user(&ctx, &user_id).await?;

    info!("user {} deleted", user_id);
    Ok(HttpResponse::NoContent().finish())
}
