//! PostgreSQL Store Implementations
//!
//! Each store owns its own pool, so credentials and profiles can live in
//! separate databases. Schema: `database/migrations/`.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::entity::{auth_record::AuthRecord, profile_record::ProfileRecord};
use crate::domain::repository::{CredentialStore, ProfileStore};
use crate::domain::value_object::{email::Email, user_id::UserId, user_password::UserPassword};
use crate::error::{AuthError, AuthResult};

// ============================================================================
// Credential Store
// ============================================================================

/// PostgreSQL-backed credential store (`auth_credentials`)
#[derive(Clone)]
pub struct PgCredentialStore {
    pool: PgPool,
}

impl PgCredentialStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl CredentialStore for PgCredentialStore {
    async fn find_by_email(&self, email: &Email) -> AuthResult<Option<AuthRecord>> {
        let row = sqlx::query_as::<_, AuthRow>(
            r#"
            SELECT
                user_id,
                email,
                password_hash,
                created_at
            FROM auth_credentials
            WHERE email = $1
            "#,
        )
        .bind(email.as_str())
        .fetch_optional(&self.pool)
        .await?;

        row.map(AuthRow::into_record).transpose()
    }

    async fn find_by_identifier(&self, user_id: &UserId) -> AuthResult<Option<AuthRecord>> {
        let row = sqlx::query_as::<_, AuthRow>(
            r#"
            SELECT
                user_id,
                email,
                password_hash,
                created_at
            FROM auth_credentials
            WHERE user_id = $1
            "#,
        )
        .bind(user_id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        row.map(AuthRow::into_record).transpose()
    }

    async fn insert(&self, record: &AuthRecord) -> AuthResult<UserId> {
        // The unique index on email surfaces as AuthError::Conflict
        let user_id: Uuid = sqlx::query_scalar(
            r#"
            INSERT INTO auth_credentials (
                user_id,
                email,
                password_hash,
                created_at
            ) VALUES ($1, $2, $3, $4)
            RETURNING user_id
            "#,
        )
        .bind(record.user_id.as_uuid())
        .bind(record.email.as_str())
        .bind(record.password_hash.as_phc_string())
        .bind(record.created_at)
        .fetch_one(&self.pool)
        .await?;

        Ok(UserId::from_uuid(user_id))
    }
}

// ============================================================================
// Profile Store
// ============================================================================

/// PostgreSQL-backed profile store (`user_profiles`)
#[derive(Clone)]
pub struct PgProfileStore {
    pool: PgPool,
}

impl PgProfileStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl ProfileStore for PgProfileStore {
    async fn find_by_identifier(&self, user_id: &UserId) -> AuthResult<Option<ProfileRecord>> {
        let row = sqlx::query_as::<_, ProfileRow>(
            r#"
            SELECT
                user_id,
                first_name,
                last_name,
                username,
                mobile,
                created_at
            FROM user_profiles
            WHERE user_id = $1
            "#,
        )
        .bind(user_id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(ProfileRow::into_record))
    }

    async fn insert(&self, record: &ProfileRecord) -> AuthResult<()> {
        sqlx::query(
            r#"
            INSERT INTO user_profiles (
                user_id,
                first_name,
                last_name,
                username,
                mobile,
                created_at
            ) VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(record.user_id.as_uuid())
        .bind(&record.first_name)
        .bind(&record.last_name)
        .bind(&record.username)
        .bind(&record.mobile)
        .bind(record.created_at)
        .execute(&self.pool)
        .await
        // Every profile write failure is internal, duplicates included
        .map_err(AuthError::Database)?;

        Ok(())
    }
}

// ============================================================================
// Row Types
// ============================================================================

#[derive(sqlx::FromRow)]
struct AuthRow {
    user_id: Uuid,
    email: String,
    password_hash: String,
    created_at: DateTime<Utc>,
}

impl AuthRow {
    fn into_record(self) -> AuthResult<AuthRecord> {
        let password_hash = UserPassword::from_phc_string(self.password_hash).map_err(|e| {
            AuthError::Internal(format!("Invalid password hash for {}: {}", self.user_id, e))
        })?;

        Ok(AuthRecord {
            user_id: UserId::from_uuid(self.user_id),
            email: Email::from_db(self.email),
            password_hash,
            created_at: self.created_at,
        })
    }
}

#[derive(sqlx::FromRow)]
struct ProfileRow {
    user_id: Uuid,
    first_name: String,
    last_name: String,
    username: String,
    mobile: String,
    created_at: DateTime<Utc>,
}

impl ProfileRow {
    fn into_record(self) -> ProfileRecord {
        ProfileRecord {
            user_id: UserId::from_uuid(self.user_id),
            first_name: self.first_name,
            last_name: self.last_name,
            username: self.username,
            mobile: self.mobile,
            created_at: self.created_at,
        }
    }
}
