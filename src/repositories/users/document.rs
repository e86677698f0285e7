//! 문서 매퍼
//!
//! 메모리 내 [`User`]와 저장소 문서 사이를 변환합니다.
//!
//! | User | 문서 필드 | 비고 |
//! |------|-----------|------|
//! | `id` | `_id` | `ObjectId`, 비어 있으면 생략 |
//! | `username` | `username` | |
//! | `password_hash` | `password` | 저장소 내부 전용 |
//! | `email` | `email` | |

use mongodb::bson::oid::ObjectId;
use mongodb::bson::{self, Document};
use serde::{Deserialize, Serialize};

use super::identifier;
use crate::core::errors::{AppError, AppResult};
use crate::domain::entities::users::User;

/// 저장소 기본 키 필드 이름
pub const PRIMARY_KEY: &str = "_id";

#[derive(Serialize, Deserialize)]
struct UserDocument {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none", default)]
    id: Option<ObjectId>,
    username: String,
    #[serde(rename = "password")]
    password_hash: String,
    email: String,
}

/// 사용자를 저장소 문서로 변환합니다.
///
/// # Errors
///
/// * `AppError::MalformedIdentifier` - `id`가 비어 있지 않지만 올바른 형식이 아님
/// * `AppError::EncodingError` - BSON 직렬화 실패
pub fn to_document(user: &User) -> AppResult<Document> {
    let id = if user.id.is_empty() {
        None
    } else {
        Some(identifier::encode(&user.id)?)
    };

    let document = UserDocument {
        id,
        username: user.username.clone(),
        password_hash: user.password_hash.clone(),
        email: user.email.clone(),
    };

    bson::to_document(&document).map_err(|e| AppError::EncodingError {
        operation: "encode user document",
        reason: e.to_string(),
    })
}

/// 저장소 문서를 사용자로 변환합니다.
///
/// 필수 필드가 없거나 타입이 맞지 않으면 `AppError::DecodeError`를 반환합니다.
pub fn from_document(document: Document) -> AppResult<User> {
    let id = document.get_object_id(PRIMARY_KEY).ok().map(|oid| identifier::decode(&oid));

    let decoded: UserDocument = bson::from_document(document).map_err(|e| AppError::DecodeError {
        id: id.clone(),
        reason: e.to_string(),
    })?;

    let oid = decoded.id.ok_or_else(|| AppError::DecodeError {
        id: None,
        reason: format!("missing `{}` field", PRIMARY_KEY),
    })?;

    Ok(User {
        id: identifier::decode(&oid),
        username: decoded.username,
        password_hash: decoded.password_hash,
        email: decoded.email,
    })
}

/// 기본 키 필드를 제거한 문서 사본을 반환합니다.
///
/// `$set` 절에서 `_id` 변경은 거부되므로 update 전에, 그리고 서버가 키를
/// 할당하도록 insert 전에 사용합니다.
pub fn strip_identifier_for_update(document: &Document) -> Document {
    let mut stripped = document.clone();
    stripped.remove(PRIMARY_KEY);
    stripped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::errors::ErrorKind;
    use mongodb::bson::doc;

    fn user(id: &str) -> User {
        User {
            id: id.to_string(),
            username: "alice".to_string(),
            password_hash: "h".to_string(),
            email: "a@x.com".to_string(),
        }
    }

    #[test]
    fn test_empty_id_has_no_primary_key() {
        let document = to_document(&user("")).unwrap();

        assert!(!document.contains_key(PRIMARY_KEY));
        assert_eq!(document.get_str("username").unwrap(), "alice");
        assert_eq!(document.get_str("password").unwrap(), "h");
        assert_eq!(document.get_str("email").unwrap(), "a@x.com");
        assert!(!document.contains_key("password_hash"));
    }

    #[test]
    fn test_set_id_becomes_object_id() {
        let document = to_document(&user("507f1f77bcf86cd799439011")).unwrap();

        assert_eq!(
            document.get_object_id(PRIMARY_KEY).unwrap().to_hex(),
            "507f1f77bcf86cd799439011"
        );
    }

    #[test]
    fn test_strip_keeps_other_fields() {
        let document = to_document(&user("507f1f77bcf86cd799439011")).unwrap();
        let stripped = strip_identifier_for_update(&document);

        assert!(!stripped.contains_key(PRIMARY_KEY));
        assert_eq!(stripped.len(), 3);
        for key in ["username", "password", "email"] {
            assert_eq!(stripped.get(key), document.get(key));
        }
        assert!(document.contains_key(PRIMARY_KEY));
    }

    #[test]
    fn test_malformed_id_is_rejected() {
        let error = to_document(&user("not-an-id")).unwrap_err();

        assert_eq!(error.kind(), ErrorKind::MalformedIdentifier);
    }

    #[test]
    fn test_from_document_maps_back() {
        let original = user("507f1f77bcf86cd799439011");
        let mapped = from_document(to_document(&original).unwrap()).unwrap();

        assert_eq!(mapped, original);
    }

    #[test]
    fn test_from_document_missing_field() {
        let oid = ObjectId::new();
        let error = from_document(doc! { "_id": oid, "username": "alice", "password": "h" })
            .unwrap_err();

        assert_eq!(error.kind(), ErrorKind::DecodeError);
        assert!(error.to_string().contains(&oid.to_hex()));
    }

    #[test]
    fn test_from_document_wrong_type() {
        let error = from_document(doc! {
            "_id": ObjectId::new(),
            "username": 42,
            "password": "h",
            "email": "a@x.com",
        })
        .unwrap_err();

        assert_eq!(error.kind(), ErrorKind::DecodeError);
    }

    #[test]
    fn test_from_document_missing_primary_key() {
        let error = from_document(doc! { "username": "alice", "password": "h", "email": "a@x.com" })
            .unwrap_err();

        assert_eq!(error.kind(), ErrorKind::DecodeError);
    }
}
