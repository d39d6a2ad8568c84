//! User repository implementation

use sqlx::PgPool;
use chrono::Utc;
use crate::models::user::{User, Role, CreateUserRequest};
use crate::utils::errors::VolunteerHubError;

#[derive(Debug, Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a new user
    pub async fn create(&self, request: CreateUserRequest) -> Result<User, VolunteerHubError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (login, last_name, first_name, middle_name, role, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id, login, last_name, first_name, middle_name, role, created_at, updated_at
            "#
        )
        .bind(request.login)
        .bind(request.last_name)
        .bind(request.first_name)
        .bind(request.middle_name)
        .bind(request.role)
        .bind(Utc::now())
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await
        .map_err(VolunteerHubError::from_database)?;

        Ok(user)
    }

    /// Find user by ID
    pub async fn find_by_id(&self, id: i64) -> Result<Option<User>, VolunteerHubError> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, login, last_name, first_name, middle_name, role, created_at, updated_at FROM users WHERE id = $1"
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    /// Find user by login
    pub async fn find_by_login(&self, login: &str) -> Result<Option<User>, VolunteerHubError> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, login, last_name, first_name, middle_name, role, created_at, updated_at FROM users WHERE login = $1"
        )
        .bind(login)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    /// List users as a name directory, with pagination
    pub async fn list(&self, limit: i64, offset: i64) -> Result<Vec<User>, VolunteerHubError> {
        let users = sqlx::query_as::<_, User>(
            "SELECT id, login, last_name, first_name, middle_name, role, created_at, updated_at FROM users ORDER BY last_name, first_name, id LIMIT $1 OFFSET $2"
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(users)
    }

    /// Count total users
    pub async fn count(&self) -> Result<i64, VolunteerHubError> {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM users")
            .fetch_one(&self.pool)
            .await?;

        Ok(count.0)
    }

    /// Count users holding a given role
    pub async fn count_by_role(&self, role: Role) -> Result<i64, VolunteerHubError> {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM users WHERE role = $1")
            .bind(role)
            .fetch_one(&self.pool)
            .await?;

        Ok(count.0)
    }
}
