//! Database fixtures for browser tests.
//!
//! Every seeded user gets an email under [`E2E_EMAIL_DOMAIN`], so
//! [`cleanup`] can remove all fixture data (dashboards and comments follow
//! their owner via `ON DELETE CASCADE`) without touching real accounts.

use sqlx::PgPool;
use uuid::Uuid;
use vista_db::models::comment::CommentWithAuthor;
use vista_db::models::dashboard::{CreateDashboard, Dashboard};
use vista_db::models::user::{CreateUser, User};
use vista_db::repositories::{CommentRepo, DashboardRepo, UserRepo};

use crate::error::E2eResult;

pub const E2E_EMAIL_DOMAIN: &str = "e2e.test";

/// What [`seed_dashboard`] should create.
#[derive(Debug, Clone)]
pub struct DashboardSeed {
    pub username: String,
    pub dashboard_name: String,
    pub description: Option<String>,
    /// Top-level comments, oldest first, authored by the seeded user.
    pub comments: Vec<String>,
}

impl Default for DashboardSeed {
    fn default() -> Self {
        Self {
            username: format!("e2e-{}", Uuid::new_v4().simple()),
            dashboard_name: "E2E Dashboard".to_string(),
            description: None,
            comments: Vec::new(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct SeededDashboard {
    pub user: User,
    pub dashboard: Dashboard,
    pub comments: Vec<CommentWithAuthor>,
}

/// Fixture email address for a username.
pub fn e2e_email(username: &str) -> String {
    format!("{username}@{E2E_EMAIL_DOMAIN}")
}

/// Create a user or return the existing one with the same fixture email.
///
/// If a non-fixture account already holds `username`, the fixture user is
/// created as `<username>.e2e` instead; the email stays `e2e_email(username)`
/// so later calls still find it.
pub async fn seed_user(pool: &PgPool, username: &str) -> E2eResult<User> {
    let email = e2e_email(username);
    if let Some(user) = UserRepo::find_by_email(pool, &email).await? {
        return Ok(user);
    }

    let fixture_username = match UserRepo::find_by_username(pool, username).await? {
        Some(taken) => {
            tracing::warn!(
                username,
                existing_user_id = %taken.id,
                "Username taken by a non-fixture user, suffixing"
            );
            format!("{username}.e2e")
        }
        None => username.to_string(),
    };

    let user = UserRepo::create(
        pool,
        &CreateUser {
            username: fixture_username,
            email,
            avatar_url: None,
        },
    )
    .await?;
    Ok(user)
}

/// Create a user, a dashboard they own, and the requested comments.
pub async fn seed_dashboard(pool: &PgPool, seed: &DashboardSeed) -> E2eResult<SeededDashboard> {
    let user = seed_user(pool, &seed.username).await?;

    let dashboard = DashboardRepo::create(
        pool,
        &CreateDashboard {
            owner_id: user.id,
            name: seed.dashboard_name.clone(),
            description: seed.description.clone(),
        },
    )
    .await?;

    let mut comments = Vec::with_capacity(seed.comments.len());
    for content in &seed.comments {
        let comment = CommentRepo::create(pool, dashboard.id, user.id, content, None).await?;
        comments.push(comment);
    }

    tracing::info!(
        user_id = %user.id,
        dashboard_id = %dashboard.id,
        comment_count = comments.len(),
        "Seeded e2e dashboard"
    );

    Ok(SeededDashboard {
        user,
        dashboard,
        comments,
    })
}

/// Remove every fixture user and everything they own.
pub async fn cleanup(pool: &PgPool) -> E2eResult<u64> {
    let removed = UserRepo::delete_by_email_suffix(pool, &format!("@{E2E_EMAIL_DOMAIN}")).await?;
    tracing::info!(removed, "Cleaned up e2e fixtures");
    Ok(removed)
}
