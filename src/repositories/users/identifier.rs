//! 식별자 코덱
//!
//! 외부 식별자(24자리 16진수 문자열)와 MongoDB 내부 식별자(12바이트 `ObjectId`)
//! 사이를 변환합니다.

use mongodb::bson::oid::ObjectId;
use mongodb::bson::Bson;

use crate::core::errors::{AppError, AppResult};

/// 외부 문자열을 `ObjectId`로 변환합니다.
///
/// 대소문자 구분 없이 16진수 24자만 허용하며, 그 외에는
/// `AppError::MalformedIdentifier`를 반환합니다.
pub fn encode(external: &str) -> AppResult<ObjectId> {
    ObjectId::parse_str(external).map_err(|_| AppError::malformed_identifier(external))
}

/// `ObjectId`를 소문자 16진수 문자열로 변환합니다.
pub fn decode(internal: &ObjectId) -> String {
    internal.to_hex()
}

/// insert 결과의 키를 외부 식별자로 변환합니다.
///
/// 서버가 할당한 키가 `ObjectId`가 아니면 저장소 프로토콜 위반이므로
/// `AppError::EncodingError`를 반환합니다.
pub fn decode_inserted(operation: &'static str, inserted_id: &Bson) -> AppResult<String> {
    match inserted_id {
        Bson::ObjectId(oid) => Ok(decode(oid)),
        other => Err(AppError::EncodingError {
            operation,
            reason: format!(
                "inserted id {} has type {:?}, expected ObjectId",
                other,
                other.element_type()
            ),
        }),
    }
}
