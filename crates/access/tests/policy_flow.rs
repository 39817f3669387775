//! Single-resource reads and writes through the access service

mod common;

use common::{id, query, Fixture};
use lorekeeper_access::AccessService;
use lorekeeper_core::{
    AccessConfig, Actor, Error, ErrorCode, ResourceKind, Role, UserId, Visibility,
};
use rstest::rstest;
use serde_json::json;
use std::sync::Arc;

const ITEMS: ResourceKind = ResourceKind::Items;

fn code<T: std::fmt::Debug>(result: Result<T, Error>) -> ErrorCode {
    result.unwrap_err().code()
}

#[tokio::test]
async fn test_moderator_on_hidden_user_resource() {
    let fx = Fixture::new();
    fx.seed(ITEMS, "i1", Some(("u1", Role::User)), Visibility::Hidden, "Cloak");
    let moderator = Actor::moderator("m1");

    let seen = fx.service.get(ITEMS, &id("i1"), Some(&moderator)).await.unwrap();
    assert_eq!(seen.owner_id, Some(UserId::new("u1")));

    let updated = fx
        .service
        .update(ITEMS, &id("i1"), &query(json!({"name": "Shroud"})), Some(&moderator))
        .await
        .unwrap();
    assert_eq!(updated.attributes["name"], json!("Shroud"));
}

#[tokio::test]
async fn test_moderator_cannot_touch_other_moderators() {
    let fx = Fixture::new();
    fx.seed(ITEMS, "pub", Some(("m2", Role::Moderator)), Visibility::Public, "Banner");
    fx.seed(ITEMS, "priv", Some(("m2", Role::Moderator)), Visibility::Private, "Diary");
    let moderator = Actor::moderator("m1");

    assert_eq!(
        code(fx.service.update(ITEMS, &id("pub"), &query(json!({"name": "x"})), Some(&moderator)).await),
        ErrorCode::Forbidden
    );
    assert_eq!(
        code(fx.service.delete(ITEMS, &id("priv"), Some(&moderator)).await),
        ErrorCode::NotFound
    );
}

#[tokio::test]
async fn test_admin_carve_out() {
    let fx = Fixture::new();
    fx.seed(ITEMS, "mod-owned", Some(("m1", Role::Moderator)), Visibility::Private, "Ledger");
    fx.seed(ITEMS, "admin-owned", Some(("a2", Role::Admin)), Visibility::Private, "Keys");
    let admin = Actor::admin("a1");

    assert!(fx.service.get(ITEMS, &id("admin-owned"), Some(&admin)).await.is_ok());
    assert!(fx.service.delete(ITEMS, &id("mod-owned"), Some(&admin)).await.is_ok());
    assert_eq!(
        code(fx.service.delete(ITEMS, &id("admin-owned"), Some(&admin)).await),
        ErrorCode::Forbidden
    );
    // the owning admin still can
    assert!(fx
        .service
        .delete(ITEMS, &id("admin-owned"), Some(&Actor::admin("a2")))
        .await
        .is_ok());
}

#[tokio::test]
async fn test_not_found_wins_over_forbidden() {
    let fx = Fixture::new();
    fx.seed(ITEMS, "secret", Some(("u1", Role::User)), Visibility::Private, "Map");
    let stranger = Actor::user("u2");

    let existing = fx
        .service
        .update(ITEMS, &id("secret"), &query(json!({"name": "x"})), Some(&stranger))
        .await
        .unwrap_err();
    let absent = fx
        .service
        .update(ITEMS, &id("nothing"), &query(json!({"name": "x"})), Some(&stranger))
        .await
        .unwrap_err();
    assert_eq!(existing.code(), ErrorCode::NotFound);
    assert_eq!(absent.code(), ErrorCode::NotFound);
    assert_eq!(
        existing.to_string().replace("secret", "<id>"),
        absent.to_string().replace("nothing", "<id>")
    );
}

#[rstest]
#[case(Visibility::Public)]
#[case(Visibility::Private)]
#[case(Visibility::Hidden)]
#[tokio::test]
async fn test_anonymous_writes_are_unauthorized(#[case] visibility: Visibility) {
    let fx = Fixture::new();
    fx.seed(ITEMS, "i1", Some(("u1", Role::User)), visibility, "Lamp");

    assert_eq!(
        code(fx.service.update(ITEMS, &id("i1"), &query(json!({"name": "x"})), None).await),
        ErrorCode::Unauthorized
    );
    assert_eq!(code(fx.service.delete(ITEMS, &id("i1"), None).await), ErrorCode::Unauthorized);
    assert_eq!(
        code(fx.service.delete(ITEMS, &id("missing"), None).await),
        ErrorCode::Unauthorized
    );
    assert_eq!(
        code(fx.service.create(ITEMS, &query(json!({"name": "x"})), None).await),
        ErrorCode::Unauthorized
    );
}

#[tokio::test]
async fn test_anonymous_read_is_masked_and_public_only() {
    let fx = Fixture::new();
    fx.seed(ITEMS, "open", Some(("u1", Role::User)), Visibility::Public, "Torch");
    fx.seed(ITEMS, "hidden", Some(("u1", Role::User)), Visibility::Hidden, "Dagger");

    let open = fx.service.get(ITEMS, &id("open"), None).await.unwrap();
    assert!(open.owner_id.is_none());
    assert!(open.owner_role.is_none());
    assert_eq!(open.attributes["name"], json!("Torch"));

    assert_eq!(code(fx.service.get(ITEMS, &id("hidden"), None).await), ErrorCode::NotFound);
}

#[tokio::test]
async fn test_owner_reads_and_deletes_own_private_resource() {
    let fx = Fixture::new();
    fx.seed(ITEMS, "mine", Some(("u1", Role::User)), Visibility::Private, "Journal");
    let owner = Actor::user("u1");

    let seen = fx.service.get(ITEMS, &id("mine"), Some(&owner)).await.unwrap();
    assert_eq!(seen.owner_id, Some(UserId::new("u1")));

    fx.service.delete(ITEMS, &id("mine"), Some(&owner)).await.unwrap();
    assert_eq!(code(fx.service.get(ITEMS, &id("mine"), Some(&owner)).await), ErrorCode::NotFound);
}

#[tokio::test]
async fn test_create_stamps_owner_and_defaults_visibility() {
    let fx = Fixture::new();
    let user = Actor::user("u1");

    let created = fx
        .service
        .create(
            ITEMS,
            &query(json!({"name": "Rope", "ownerRole": "ADMIN", "id": "forged"})),
            Some(&user),
        )
        .await
        .unwrap();
    assert_eq!(created.owner_id, Some(UserId::new("u1")));
    assert_eq!(created.owner_role, Some(Role::User));
    assert_eq!(created.visibility, Visibility::Public);
    assert_ne!(created.id.as_str(), "forged");
    assert!(!created.attributes.contains_key("ownerRole"));
}

#[tokio::test]
async fn test_create_validation_and_ownership_rules() {
    let fx = Fixture::new();
    fx.store.insert_user("m7", Role::Moderator);
    let user = Actor::user("u1");
    let admin = Actor::admin("a1");

    assert_eq!(
        code(fx.service.create(ITEMS, &query(json!({"visibility": "SECRET"})), Some(&user)).await),
        ErrorCode::ValidationError
    );
    assert_eq!(
        code(fx.service.create(ITEMS, &query(json!({"ownerId": "u2"})), Some(&user)).await),
        ErrorCode::Forbidden
    );
    assert_eq!(
        code(fx.service.create(ITEMS, &query(json!({"ownerId": "ghost"})), Some(&admin)).await),
        ErrorCode::ValidationError
    );

    let on_behalf = fx
        .service
        .create(ITEMS, &query(json!({"ownerId": "m7", "visibility": "HIDDEN"})), Some(&admin))
        .await
        .unwrap();
    assert_eq!(on_behalf.owner_id, Some(UserId::new("m7")));
    assert_eq!(on_behalf.owner_role, Some(Role::Moderator));
    assert_eq!(on_behalf.visibility, Visibility::Hidden);
    assert_eq!(fx.store.len(ITEMS), 1);
}

#[tokio::test]
async fn test_update_cannot_move_ownership_or_set_bad_visibility() {
    let fx = Fixture::new();
    fx.seed(ITEMS, "i1", Some(("u1", Role::User)), Visibility::Public, "Bell");
    let owner = Actor::user("u1");

    assert_eq!(
        code(fx.service.update(ITEMS, &id("i1"), &query(json!({"ownerId": "u2"})), Some(&owner)).await),
        ErrorCode::ValidationError
    );
    assert_eq!(
        code(fx.service.update(ITEMS, &id("i1"), &query(json!({"visibility": "NOPE"})), Some(&owner)).await),
        ErrorCode::ValidationError
    );

    let updated = fx
        .service
        .update(ITEMS, &id("i1"), &query(json!({"visibility": "PRIVATE"})), Some(&owner))
        .await
        .unwrap();
    assert_eq!(updated.visibility, Visibility::Private);
    assert_eq!(updated.owner_id, Some(UserId::new("u1")));
}

#[tokio::test]
async fn test_storage_errors_propagate() {
    let fx = Fixture::new();
    fx.store.fail_next("connection refused");
    let err = fx.service.get(ITEMS, &id("i1"), None).await.unwrap_err();
    assert!(matches!(err, Error::Storage { .. }));
    assert_eq!(err.code(), ErrorCode::InternalError);
}

#[test]
fn test_builder_requires_store_and_valid_config() {
    let err = AccessService::builder().build().unwrap_err();
    assert!(matches!(err, Error::MissingStore { .. }));

    let mut config = AccessConfig::default();
    config.pagination.default_limit = 500;
    let store = Arc::new(lorekeeper_store::MemoryStore::new());
    let err = AccessService::builder()
        .store(store)
        .config(config)
        .build()
        .unwrap_err();
    assert!(matches!(err, Error::Configuration { .. }));
}
