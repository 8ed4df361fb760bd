//! Demo Data Seed
//!
//! Creates the demo society and its two accounts (one society user, one
//! accountant) on first startup. Idempotent: skipped as soon as any
//! user or the demo society exists.

use auth::domain::entity::{society::Society, user::User};
use auth::domain::repository::{SocietyRepository, UserRepository};
use auth::domain::value_object::{email::Email, role::Role};
use auth::{AuthConfig, PgAuthRepository};
use platform::password::{ClearTextPassword, HashedPassword};

/// ICE of the demo society, also the seed's idempotency marker
const DEMO_SOCIETY_ICE: &str = "ICE123456";

/// Seed demo accounts; returns false when data already exists
pub async fn seed_demo_data(
    repo: &PgAuthRepository,
    config: &AuthConfig,
) -> anyhow::Result<bool> {
    if repo.find_by_ice(DEMO_SOCIETY_ICE).await?.is_some() || repo.exists_any().await? {
        return Ok(false);
    }

    let society = Society::new(
        "Al Amane",
        DEMO_SOCIETY_ICE,
        Some("Casablanca, Maroc".to_string()),
        Some("0522123456".to_string()),
        Email::new("contact@al-amane.ma")?,
    );
    SocietyRepository::create(repo, &society).await?;

    let mut society_user = User::new(
        Email::new("user1@example.com")?,
        hash_password("password123", config)?,
        "Ahmed El Houcine",
        Some(society.society_id),
    );
    society_user.grant_role(Role::Society);
    UserRepository::create(repo, &society_user).await?;

    let mut accountant = User::new(
        Email::new("comptable1@example.com")?,
        hash_password("secret456", config)?,
        "Fatima Zahra",
        None,
    );
    accountant.grant_role(Role::Accountant);
    UserRepository::create(repo, &accountant).await?;

    Ok(true)
}

fn hash_password(password: &str, config: &AuthConfig) -> anyhow::Result<HashedPassword> {
    let clear = ClearTextPassword::new(password.to_string())?;
    Ok(clear.hash(config.pepper())?)
}
