//! Integration tests for the comment repository.
//!
//! Exercises the repository layer against a real database:
//! - Ordering of listed comments
//! - Author join on create and update
//! - Parent lookup scoped to a dashboard
//! - Direct and recursive delete cascades
//! - User lookups used by auth and fixtures

use sqlx::PgPool;
use vista_core::comment::DeleteCascade;
use vista_db::models::dashboard::{CreateDashboard, Dashboard};
use vista_db::models::user::{CreateUser, User};
use vista_db::repositories::{CommentRepo, DashboardRepo, UserRepo};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn new_user(pool: &PgPool, name: &str) -> User {
    UserRepo::create(
        pool,
        &CreateUser {
            username: name.to_string(),
            email: format!("{name}@example.com"),
            avatar_url: Some(format!("https://avatars.example.com/{name}.png")),
        },
    )
    .await
    .unwrap()
}

async fn new_dashboard(pool: &PgPool, owner: &User, name: &str) -> Dashboard {
    DashboardRepo::create(
        pool,
        &CreateDashboard {
            owner_id: owner.id,
            name: name.to_string(),
            description: None,
        },
    )
    .await
    .unwrap()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_list_is_oldest_first_with_author(pool: PgPool) {
    let alice = new_user(&pool, "alice").await;
    let bob = new_user(&pool, "bob").await;
    let dashboard = new_dashboard(&pool, &alice, "Revenue").await;

    for (user, text) in [(&alice, "first"), (&bob, "second"), (&alice, "third")] {
        CommentRepo::create(&pool, dashboard.id, user.id, text, None)
            .await
            .unwrap();
    }

    let comments = CommentRepo::list_for_dashboard(&pool, dashboard.id)
        .await
        .unwrap();
    let texts: Vec<_> = comments.iter().map(|c| c.content.as_str()).collect();
    assert_eq!(texts, ["first", "second", "third"]);
    assert!(comments
        .windows(2)
        .all(|pair| pair[0].created_at <= pair[1].created_at));
    assert_eq!(comments[1].username, "bob");
    assert_eq!(comments[1].email, "bob@example.com");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_list_excludes_other_dashboards(pool: PgPool) {
    let alice = new_user(&pool, "alice").await;
    let a = new_dashboard(&pool, &alice, "A").await;
    let b = new_dashboard(&pool, &alice, "B").await;

    CommentRepo::create(&pool, a.id, alice.id, "on a", None)
        .await
        .unwrap();
    CommentRepo::create(&pool, b.id, alice.id, "on b", None)
        .await
        .unwrap();

    let comments = CommentRepo::list_for_dashboard(&pool, a.id).await.unwrap();
    assert_eq!(comments.len(), 1);
    assert_eq!(comments[0].content, "on a");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_find_in_dashboard_scopes_parent_lookup(pool: PgPool) {
    let alice = new_user(&pool, "alice").await;
    let a = new_dashboard(&pool, &alice, "A").await;
    let b = new_dashboard(&pool, &alice, "B").await;
    let comment = CommentRepo::create(&pool, a.id, alice.id, "hello", None)
        .await
        .unwrap();

    assert!(CommentRepo::find_in_dashboard(&pool, comment.id, a.id)
        .await
        .unwrap()
        .is_some());
    assert!(CommentRepo::find_in_dashboard(&pool, comment.id, b.id)
        .await
        .unwrap()
        .is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_content_bumps_updated_at(pool: PgPool) {
    let alice = new_user(&pool, "alice").await;
    let dashboard = new_dashboard(&pool, &alice, "A").await;
    let comment = CommentRepo::create(&pool, dashboard.id, alice.id, "draft", None)
        .await
        .unwrap();

    let updated = CommentRepo::update_content(&pool, comment.id, "final")
        .await
        .unwrap()
        .expect("comment should exist");

    assert_eq!(updated.content, "final");
    assert_eq!(updated.created_at, comment.created_at);
    assert!(updated.updated_at > comment.updated_at);
    assert_eq!(updated.username, "alice");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_missing_comment_returns_none(pool: PgPool) {
    let result = CommentRepo::update_content(&pool, uuid::Uuid::new_v4(), "x")
        .await
        .unwrap();
    assert!(result.is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_direct_delete_orphans_grandchildren(pool: PgPool) {
    let alice = new_user(&pool, "alice").await;
    let dashboard = new_dashboard(&pool, &alice, "A").await;
    let root = CommentRepo::create(&pool, dashboard.id, alice.id, "root", None)
        .await
        .unwrap();
    let reply = CommentRepo::create(&pool, dashboard.id, alice.id, "reply", Some(root.id))
        .await
        .unwrap();
    let nested = CommentRepo::create(&pool, dashboard.id, alice.id, "nested", Some(reply.id))
        .await
        .unwrap();
    let sibling = CommentRepo::create(&pool, dashboard.id, alice.id, "sibling", None)
        .await
        .unwrap();

    let removed = CommentRepo::delete(&pool, root.id, DeleteCascade::Direct)
        .await
        .unwrap();
    assert_eq!(removed, 2);

    assert!(CommentRepo::find_by_id(&pool, root.id).await.unwrap().is_none());
    assert!(CommentRepo::find_by_id(&pool, reply.id).await.unwrap().is_none());

    let orphan = CommentRepo::find_by_id(&pool, nested.id)
        .await
        .unwrap()
        .expect("grandchild should be kept");
    assert_eq!(orphan.parent_id, Some(reply.id));
    assert!(CommentRepo::find_by_id(&pool, sibling.id).await.unwrap().is_some());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_recursive_delete_removes_whole_thread(pool: PgPool) {
    let alice = new_user(&pool, "alice").await;
    let dashboard = new_dashboard(&pool, &alice, "A").await;
    let root = CommentRepo::create(&pool, dashboard.id, alice.id, "root", None)
        .await
        .unwrap();
    let reply = CommentRepo::create(&pool, dashboard.id, alice.id, "reply", Some(root.id))
        .await
        .unwrap();
    CommentRepo::create(&pool, dashboard.id, alice.id, "nested", Some(reply.id))
        .await
        .unwrap();
    let sibling = CommentRepo::create(&pool, dashboard.id, alice.id, "sibling", None)
        .await
        .unwrap();

    let removed = CommentRepo::delete(&pool, root.id, DeleteCascade::Recursive)
        .await
        .unwrap();
    assert_eq!(removed, 3);

    let remaining = CommentRepo::list_for_dashboard(&pool, dashboard.id)
        .await
        .unwrap();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].id, sibling.id);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_user_exists_and_find_by_username(pool: PgPool) {
    let alice = new_user(&pool, "alice").await;

    assert!(UserRepo::exists(&pool, alice.id).await.unwrap());
    assert!(!UserRepo::exists(&pool, uuid::Uuid::new_v4()).await.unwrap());

    let found = UserRepo::find_by_username(&pool, "alice").await.unwrap();
    assert_eq!(found.map(|u| u.id), Some(alice.id));
    assert!(UserRepo::find_by_username(&pool, "bob")
        .await
        .unwrap()
        .is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_dashboard_exists_and_delete_cascades_comments(pool: PgPool) {
    let alice = new_user(&pool, "alice").await;
    let dashboard = new_dashboard(&pool, &alice, "A").await;
    let comment = CommentRepo::create(&pool, dashboard.id, alice.id, "hi", None)
        .await
        .unwrap();

    assert!(DashboardRepo::exists(&pool, dashboard.id).await.unwrap());
    assert!(DashboardRepo::delete(&pool, dashboard.id).await.unwrap());
    assert!(!DashboardRepo::exists(&pool, dashboard.id).await.unwrap());
    assert!(CommentRepo::find_by_id(&pool, comment.id).await.unwrap().is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_delete_users_by_email_suffix(pool: PgPool) {
    new_user(&pool, "alice").await;
    UserRepo::create(
        &pool,
        &CreateUser {
            username: "e2e-runner".to_string(),
            email: "runner@e2e.test".to_string(),
            avatar_url: None,
        },
    )
    .await
    .unwrap();

    let removed = UserRepo::delete_by_email_suffix(&pool, "@e2e.test")
        .await
        .unwrap();
    assert_eq!(removed, 1);
    assert!(UserRepo::find_by_email(&pool, "alice@example.com")
        .await
        .unwrap()
        .is_some());
}
