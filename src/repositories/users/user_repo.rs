//! # 사용자 리포지토리 구현
//!
//! 사용자 엔티티의 MongoDB 어댑터입니다. 단일 컬렉션에 대해 생성, 조회, 수정,
//! 삭제를 수행하며, 컬렉션 핸들만 보유하므로 여러 요청에서 동시에 사용해도 안전합니다.
//!
//! ## 특징
//!
//! - **식별자 코덱**: 외부 문자열 ID를 `ObjectId`로 변환해 `_id`로 조회
//! - **문서 매퍼**: 엔티티와 문서 사이의 필드 이름 변환
//! - **구분 가능한 NotFound**: 일치 문서 0개는 `AppError::NotFound`
//! - **감사 로그**: 모든 변경 연산 시도를 비밀번호 없이 기록

use async_trait::async_trait;
use futures_util::TryStreamExt;
use log::{debug, error, info, warn};
use mongodb::bson::{doc, Document};
use mongodb::Collection;

use super::{document, identifier, UserStorage, CREATE, DELETE, FIND_ALL, FIND_ONE, UPDATE};
use crate::core::context::OperationContext;
use crate::core::errors::{AppError, AppResult};
use crate::db::Database;
use crate::domain::entities::users::User;

/// MongoDB 사용자 리포지토리
///
/// ## 저장소
///
/// - **컬렉션명**: 설정의 `MONGODB_COLLECTION`
/// - **문서 형태**: `{ _id: ObjectId, username, password, email }`
///
/// ## 사용 예제
///
/// ```rust,ignore
/// let repo = UserRepository::new(&database, "users");
/// let ctx = OperationContext::with_timeout(Duration::from_secs(15));
///
/// let id = repo.create(&ctx, &User::new(username, hash, email)).await?;
/// let user = repo.find_one(&ctx, &id).await?;
/// repo.delete(&ctx, &id).await?;
/// ```
#[derive(Clone)]
pub struct UserRepository {
    collection: Collection<Document>,
}

impl UserRepository {
    pub fn new(database: &Database, collection: &str) -> Self {
        Self::from_collection(database.collection(collection))
    }

    pub fn from_collection(collection: Collection<Document>) -> Self {
        Self { collection }
    }

    pub fn collection_name(&self) -> &str {
        self.collection.name()
    }
}

#[async_trait]
impl UserStorage for UserRepository {
    /// 새 사용자 생성
    ///
    /// `_id`를 제외한 문서를 삽입하고, 서버가 할당한 `ObjectId`를
    /// 16진수 문자열로 반환합니다. 호출자가 이 값을 `user.id`에 설정합니다.
    async fn create(&self, ctx: &OperationContext, user: &User) -> AppResult<String> {
        info!("{}: username={} email={}", CREATE, user.username, user.email);

        let unsaved = User { id: String::new(), ..user.clone() };
        let new_document = document::to_document(&unsaved)?;

        let result = ctx
            .run(CREATE, async {
                self.collection
                    .insert_one(new_document)
                    .await
                    .map_err(|e| AppError::query(CREATE, None, e))
            })
            .await?;

        debug!("{}: convert inserted id to ObjectId", CREATE);
        match identifier::decode_inserted(CREATE, &result.inserted_id) {
            Ok(id) => {
                info!("{}: created {}", CREATE, id);
                Ok(id)
            }
            Err(e) => {
                error!("{}: username={} {}", CREATE, user.username, e);
                Err(e)
            }
        }
    }

    async fn find_all(&self, ctx: &OperationContext) -> AppResult<Vec<User>> {
        let documents: Vec<Document> = ctx
            .run(FIND_ALL, async {
                let cursor = self
                    .collection
                    .find(doc! {})
                    .await
                    .map_err(|e| AppError::query(FIND_ALL, None, e))?;

                cursor
                    .try_collect()
                    .await
                    .map_err(|e| AppError::query(FIND_ALL, None, e))
            })
            .await?;

        debug!("{}: {} documents", FIND_ALL, documents.len());
        documents.into_iter().map(document::from_document).collect()
    }

    /// ID로 사용자 조회
    ///
    /// # Errors
    ///
    /// * `AppError::MalformedIdentifier` - 잘못된 ObjectId 형식
    /// * `AppError::NotFound` - 해당 ID의 문서가 없음
    async fn find_one(&self, ctx: &OperationContext, id: &str) -> AppResult<User> {
        let object_id = identifier::encode(id)?;

        let found = ctx
            .run(FIND_ONE, async {
                self.collection
                    .find_one(doc! { "_id": object_id })
                    .await
                    .map_err(|e| AppError::query(FIND_ONE, Some(id), e))
            })
            .await?;

        match found {
            Some(stored) => document::from_document(stored),
            None => {
                debug!("{}: {} not found", FIND_ONE, id);
                Err(AppError::not_found(FIND_ONE, id))
            }
        }
    }

    /// 사용자 정보 업데이트
    ///
    /// `_id`를 제외한 매핑 필드 전체를 `$set`으로 덮어씁니다.
    /// 일치하는 문서가 없으면 `AppError::NotFound`를 반환합니다.
    async fn update(&self, ctx: &OperationContext, user: &User) -> AppResult<()> {
        info!("{}: id={} username={} email={}", UPDATE, user.id, user.username, user.email);

        if user.id.is_empty() {
            return Err(AppError::malformed_identifier(""));
        }
        let object_id = identifier::encode(&user.id)?;
        let fields = document::strip_identifier_for_update(&document::to_document(user)?);

        let result = ctx
            .run(UPDATE, async {
                self.collection
                    .update_one(doc! { "_id": object_id }, doc! { "$set": fields })
                    .await
                    .map_err(|e| AppError::query(UPDATE, Some(user.id.as_str()), e))
            })
            .await?;

        if result.matched_count == 0 {
            warn!("{}: {} not found", UPDATE, user.id);
            return Err(AppError::not_found(UPDATE, user.id.as_str()));
        }

        debug!(
            "{}: matched {} documents and modified {} documents",
            UPDATE, result.matched_count, result.modified_count
        );
        Ok(())
    }

    /// 사용자 삭제
    ///
    /// 물리적 삭제이며 복구할 수 없습니다.
    async fn delete(&self, ctx: &OperationContext, id: &str) -> AppResult<()> {
        info!("{}: id={}", DELETE, id);

        let object_id = identifier::encode(id)?;

        let result = ctx
            .run(DELETE, async {
                self.collection
                    .delete_one(doc! { "_id": object_id })
                    .await
                    .map_err(|e| AppError::query(DELETE, Some(id), e))
            })
            .await?;

        if result.deleted_count == 0 {
            warn!("{}: {} not found", DELETE, id);
            return Err(AppError::not_found(DELETE, id));
        }

        debug!("{}: deleted {} documents", DELETE, result.deleted_count);
        Ok(())
    }
}
