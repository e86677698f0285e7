//! 프로세스 내 사용자 저장소
//!
//! MongoDB 없이 같은 의미를 제공하는 [`UserStorage`] 구현입니다.
//! 문서를 매퍼로 변환해 보관하므로 식별자와 필드 매핑 규칙은 MongoDB 어댑터와 동일합니다.
//! 로컬 실행(`STORAGE_BACKEND=memory`)과 테스트에서 사용합니다.

use std::collections::BTreeMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;
use log::{debug, info, warn};
use mongodb::bson::oid::ObjectId;
use mongodb::bson::{Bson, Document};

use super::{document, identifier, UserStorage, CREATE, DELETE, FIND_ALL, FIND_ONE, UPDATE};
use crate::core::context::OperationContext;
use crate::core::errors::{AppError, AppResult};
use crate::domain::entities::users::User;

/// 16진수 ID를 키로 문서를 보관하는 저장소
#[derive(Default)]
pub struct MemoryUserRepository {
    documents: RwLock<BTreeMap<String, Document>>,
}

impl MemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> AppResult<RwLockReadGuard<'_, BTreeMap<String, Document>>> {
        self.documents
            .read()
            .map_err(|_| AppError::InternalError("user store lock poisoned".to_string()))
    }

    fn write(&self) -> AppResult<RwLockWriteGuard<'_, BTreeMap<String, Document>>> {
        self.documents
            .write()
            .map_err(|_| AppError::InternalError("user store lock poisoned".to_string()))
    }
}

#[async_trait]
impl UserStorage for MemoryUserRepository {
    async fn create(&self, ctx: &OperationContext, user: &User) -> AppResult<String> {
        info!("{}: username={} email={}", CREATE, user.username, user.email);

        ctx.run(CREATE, async {
            let unsaved = User { id: String::new(), ..user.clone() };
            let mut stored = document::to_document(&unsaved)?;
            let oid = ObjectId::new();
            stored.insert(document::PRIMARY_KEY, oid);

            let id = identifier::decode_inserted(CREATE, &Bson::ObjectId(oid))?;
            self.write()?.insert(id.clone(), stored);
            Ok(id)
        })
        .await
    }

    async fn find_all(&self, ctx: &OperationContext) -> AppResult<Vec<User>> {
        ctx.run(FIND_ALL, async {
            let documents: Vec<Document> = self.read()?.values().cloned().collect();
            documents.into_iter().map(document::from_document).collect()
        })
        .await
    }

    async fn find_one(&self, ctx: &OperationContext, id: &str) -> AppResult<User> {
        let key = identifier::decode(&identifier::encode(id)?);

        ctx.run(FIND_ONE, async {
            let found = self.read()?.get(&key).cloned();
            match found {
                Some(stored) => document::from_document(stored),
                None => Err(AppError::not_found(FIND_ONE, id)),
            }
        })
        .await
    }

    async fn update(&self, ctx: &OperationContext, user: &User) -> AppResult<()> {
        info!("{}: id={} username={} email={}", UPDATE, user.id, user.username, user.email);

        if user.id.is_empty() {
            return Err(AppError::malformed_identifier(""));
        }
        let key = identifier::decode(&identifier::encode(&user.id)?);
        let fields = document::strip_identifier_for_update(&document::to_document(user)?);

        ctx.run(UPDATE, async {
            let mut documents = self.write()?;
            let Some(stored) = documents.get_mut(&key) else {
                warn!("{}: {} not found", UPDATE, user.id);
                return Err(AppError::not_found(UPDATE, user.id.as_str()));
            };

            // $set 의미: 주어진 필드만 교체
            for (name, value) in fields {
                stored.insert(name, value);
            }
            debug!("{}: matched 1 documents", UPDATE);
            Ok(())
        })
        .await
    }

    async fn delete(&self, ctx: &OperationContext, id: &str) -> AppResult<()> {
        info!("{}: id={}", DELETE, id);

        let key = identifier::decode(&identifier::encode(id)?);

        ctx.run(DELETE, async {
            if self.write()?.remove(&key).is_none() {
                warn!("{}: {} not found", DELETE, id);
                return Err(AppError::not_found(DELETE, id));
            }
            debug!("{}: deleted 1 documents", DELETE);
            Ok(())
        })
        .await
    }
}
