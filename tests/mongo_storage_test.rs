//! Integration tests for the MongoDB user storage.
//!
//! Skipped unless `TEST_MONGODB_HOST` is set. Optional: `TEST_MONGODB_PORT` (27017),
//! `TEST_MONGODB_DATABASE` (user_rest_api_test), `TEST_MONGODB_USERNAME`,
//! `TEST_MONGODB_PASSWORD`, `TEST_MONGODB_AUTH_DB`.
//!
//! Each test uses its own collection and drops it afterwards.

use std::time::Duration;

use mongodb::bson::doc;
use mongodb::bson::oid::ObjectId;

use user_rest_api::config::MongoConfig;
use user_rest_api::core::context::OperationContext;
use user_rest_api::core::errors::ErrorKind;
use user_rest_api::db::Database;
use user_rest_api::domain::entities::users::User;
use user_rest_api::repositories::users::{UserRepository, UserStorage};

const ABSENT: &str = "507f1f77bcf86cd799439011";

fn mongo_config() -> Option<MongoConfig> {
    let host = std::env::var("TEST_MONGODB_HOST").ok()?;
    let var = |key: &str, default: &str| std::env::var(key).unwrap_or_else(|_| default.to_string());

    Some(MongoConfig {
        host,
        port: var("TEST_MONGODB_PORT", "27017").parse().unwrap(),
        username: var("TEST_MONGODB_USERNAME", ""),
        password: var("TEST_MONGODB_PASSWORD", ""),
        database: var("TEST_MONGODB_DATABASE", "user_rest_api_test"),
        auth_db: var("TEST_MONGODB_AUTH_DB", ""),
        collection: format!("users_{}", ObjectId::new().to_hex()),
        connect_timeout_secs: 5,
    })
}

/// Connects to a fresh collection, or returns `None` when MongoDB is not configured
async fn setup() -> Option<(Database, UserRepository)> {
    let Some(config) = mongo_config() else {
        eprintln!("TEST_MONGODB_HOST not set, skipping");
        return None;
    };

    let database = Database::connect(&config).await.unwrap();
    let repo = UserRepository::new(&database, &config.collection);
    Some((database, repo))
}

async fn teardown(database: &Database, repo: &UserRepository) {
    database.collection(repo.collection_name()).drop().await.unwrap();
}

fn alice() -> User {
    User::new("alice".to_string(), "h".to_string(), "a@x.com".to_string())
}

#[actix_web::test]
async fn test_create_find_update_delete() {
    let Some((database, repo)) = setup().await else { return };
    let ctx = OperationContext::with_timeout(Duration::from_secs(10));

    let mut user = alice();
    user.id = repo.create(&ctx, &user).await.unwrap();
    assert_eq!(user.id.len(), 24);
    assert_eq!(repo.find_one(&ctx, &user.id).await.unwrap(), user);

    user.email = "new@x.com".to_string();
    repo.update(&ctx, &user).await.unwrap();
    let found = repo.find_one(&ctx, &user.id).await.unwrap();
    assert_eq!(found.email, "new@x.com");
    assert_eq!(found.username, "alice");

    repo.delete(&ctx, &user.id).await.unwrap();
    let error = repo.delete(&ctx, &user.id).await.unwrap_err();
    assert_eq!(error.kind(), ErrorKind::NotFound);

    teardown(&database, &repo).await;
}

#[actix_web::test]
async fn test_stored_document_shape() {
    let Some((database, repo)) = setup().await else { return };
    let ctx = OperationContext::background();

    let id = repo.create(&ctx, &alice()).await.unwrap();
    let oid = ObjectId::parse_str(&id).unwrap();

    let stored = database
        .collection(repo.collection_name())
        .find_one(doc! { "_id": oid })
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.get_str("username").unwrap(), "alice");
    assert_eq!(stored.get_str("password").unwrap(), "h");
    assert_eq!(stored.get_str("email").unwrap(), "a@x.com");

    teardown(&database, &repo).await;
}

#[actix_web::test]
async fn test_find_all_and_absent_ids() {
    let Some((database, repo)) = setup().await else { return };
    let ctx = OperationContext::background();

    assert!(repo.find_all(&ctx).await.unwrap().is_empty());

    repo.create(&ctx, &alice()).await.unwrap();
    repo.create(&ctx, &alice()).await.unwrap();
    assert_eq!(repo.find_all(&ctx).await.unwrap().len(), 2);

    let error = repo.find_one(&ctx, ABSENT).await.unwrap_err();
    assert_eq!(error.kind(), ErrorKind::NotFound);

    let mut ghost = alice();
    ghost.id = ABSENT.to_string();
    let error = repo.update(&ctx, &ghost).await.unwrap_err();
    assert_eq!(error.kind(), ErrorKind::NotFound);

    let error = repo.find_one(&ctx, "zz").await.unwrap_err();
    assert_eq!(error.kind(), ErrorKind::MalformedIdentifier);

    teardown(&database, &repo).await;
}

#[actix_web::test]
async fn test_cancelled_context_skips_driver() {
    let Some((database, repo)) = setup().await else { return };
    let (ctx, handle) = OperationContext::background().cancellable();
    handle.cancel();

    let error = repo.create(&ctx, &alice()).await.unwrap_err();
    assert_eq!(error.kind(), ErrorKind::Cancelled);
    assert!(repo.find_all(&OperationContext::background()).await.unwrap().is_empty());

    teardown(&database, &repo).await;
}
