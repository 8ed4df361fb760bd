//! PostgreSQL Repository Implementations

use chrono::{DateTime, Utc};
use kernel::id::{SocietyId, UserId};
use platform::password::HashedPassword;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::entity::{society::Society, user::User};
use crate::domain::repository::{SocietyRepository, UserRepository};
use crate::domain::value_object::{email::Email, role::Role};
use crate::error::{AuthError, AuthResult};

/// PostgreSQL-backed auth repository
#[derive(Clone)]
pub struct PgAuthRepository {
    pool: PgPool,
}

impl PgAuthRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

// ============================================================================
// User Repository Implementation
// ============================================================================

impl UserRepository for PgAuthRepository {
    async fn create(&self, user: &User) -> AuthResult<()> {
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            INSERT INTO users (
                user_id,
                email,
                password_hash,
                full_name,
                society_id,
                active,
                created_at,
                updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(user.user_id.as_uuid())
        .bind(user.email.as_str())
        .bind(user.password_hash.as_phc_string())
        .bind(&user.full_name)
        .bind(user.society_id.as_ref().map(|id| *id.as_uuid()))
        .bind(user.active)
        .bind(user.created_at)
        .bind(user.updated_at)
        .execute(&mut *tx)
        .await?;

        for role in &user.roles {
            sqlx::query(
                r#"
                INSERT INTO user_roles (user_id, role_id)
                SELECT $1, role_id FROM roles WHERE code = $2
                "#,
            )
            .bind(user.user_id.as_uuid())
            .bind(role.code())
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        Ok(())
    }

    async fn find_by_email(&self, email: &Email) -> AuthResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT
                u.user_id,
                u.email,
                u.password_hash,
                u.full_name,
                u.society_id,
                u.active,
                u.created_at,
                u.updated_at,
                COALESCE(
                    array_agg(r.code) FILTER (WHERE r.code IS NOT NULL),
                    '{}'
                ) AS role_codes
            FROM users u
            LEFT JOIN user_roles ur ON ur.user_id = u.user_id
            LEFT JOIN roles r ON r.role_id = ur.role_id
            WHERE u.email = $1
            GROUP BY u.user_id
            "#,
        )
        .bind(email.as_str())
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| r.into_user()).transpose()
    }

    async fn exists_any(&self) -> AuthResult<bool> {
        let exists = sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM users)")
            .fetch_one(&self.pool)
            .await?;

        Ok(exists)
    }
}

// ============================================================================
// Society Repository Implementation
// ============================================================================

impl SocietyRepository for PgAuthRepository {
    async fn create(&self, society: &Society) -> AuthResult<()> {
        sqlx::query(
            r#"
            INSERT INTO societies (
                society_id,
                legal_name,
                ice,
                address,
                phone,
                contact_email,
                active,
                created_at,
                updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(society.society_id.as_uuid())
        .bind(&society.legal_name)
        .bind(&society.ice)
        .bind(&society.address)
        .bind(&society.phone)
        .bind(society.contact_email.as_str())
        .bind(society.active)
        .bind(society.created_at)
        .bind(society.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_by_ice(&self, ice: &str) -> AuthResult<Option<Society>> {
        let row = sqlx::query_as::<_, SocietyRow>(
            r#"
            SELECT
                society_id,
                legal_name,
                ice,
                address,
                phone,
                contact_email,
                active,
                created_at,
                updated_at
            FROM societies
            WHERE ice = $1
            "#,
        )
        .bind(ice)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|r| r.into_society()))
    }
}

// ============================================================================
// Row types
// ============================================================================

#[derive(sqlx::FromRow)]
struct UserRow {
    user_id: Uuid,
    email: String,
    password_hash: String,
    full_name: String,
    society_id: Option<Uuid>,
    active: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    role_codes: Vec<String>,
}

impl UserRow {
    fn into_user(self) -> AuthResult<User> {
        let password_hash = HashedPassword::from_phc_string(self.password_hash)
            .map_err(|e| AuthError::Internal(format!("Invalid password hash: {}", e)))?;

        let roles = self
            .role_codes
            .iter()
            .map(|code| {
                Role::from_code(code)
                    .ok_or_else(|| AuthError::Internal(format!("Unknown role code: {}", code)))
            })
            .collect::<AuthResult<Vec<Role>>>()?;

        Ok(User {
            user_id: UserId::from_uuid(self.user_id),
            email: Email::from_db(self.email),
            password_hash,
            full_name: self.full_name,
            society_id: self.society_id.map(SocietyId::from_uuid),
            active: self.active,
            roles,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

#[derive(sqlx::FromRow)]
struct SocietyRow {
    society_id: Uuid,
    legal_name: String,
    ice: String,
    address: Option<String>,
    phone: Option<String>,
    contact_email: String,
    active: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl SocietyRow {
    fn into_society(self) -> Society {
        Society {
            society_id: SocietyId::from_uuid(self.society_id),
            legal_name: self.legal_name,
            ice: self.ice,
            address: self.address,
            phone: self.phone,
            contact_email: Email::from_db(self.contact_email),
            active: self.active,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}
