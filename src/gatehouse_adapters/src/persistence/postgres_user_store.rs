use gatehouse_core::{
    DisplayName, Email, PasswordHash, User, UserError, UserName, UserStore, UserStoreError,
};
use secrecy::{ExposeSecret, Secret};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

pub struct PostgresUserStore {
    pool: PgPool,
}

impl PostgresUserStore {
    pub fn new(pool: PgPool) -> Self {
        PostgresUserStore { pool }
    }
}

#[derive(FromRow)]
struct UserRow {
    id: Uuid,
    name: String,
    user_name: Option<String>,
    email: String,
    password_hash: String,
}

impl TryFrom<UserRow> for User {
    type Error = UserStoreError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        let corrupt = |e: UserError| UserStoreError::UnexpectedError(e.to_string());

        Ok(User::from_parts(
            row.id,
            DisplayName::parse(&row.name).map_err(corrupt)?,
            row.user_name
                .as_deref()
                .map(UserName::parse)
                .transpose()
                .map_err(corrupt)?,
            Email::try_from(Secret::from(row.email)).map_err(corrupt)?,
            PasswordHash::new(row.password_hash),
        ))
    }
}

fn unexpected(e: sqlx::Error) -> UserStoreError {
    UserStoreError::UnexpectedError(e.to_string())
}

const SELECT_USER: &str = "SELECT id, name, user_name, email, password_hash FROM users";

#[async_trait::async_trait]
impl UserStore for PostgresUserStore {
    #[tracing::instrument(name = "Adding user to PostgreSQL", skip_all)]
    async fn add_user(&self, user: User) -> Result<(), UserStoreError> {
        let query = sqlx::query(
            r#"
                INSERT INTO users (id, name, user_name, email, password_hash)
                VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(user.id())
        .bind(user.name().as_str())
        .bind(user.user_name().map(UserName::as_str))
        .bind(user.email().as_ref().expose_secret())
        .bind(user.password_hash().as_ref().expose_secret());

        query.execute(&self.pool).await.map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation() {
                    return UserStoreError::UserAlreadyExists;
                }
            }
            unexpected(e)
        })?;

        Ok(())
    }

    #[tracing::instrument(name = "Retrieving user from PostgreSQL", skip_all)]
    async fn get_user(&self, email: &Email) -> Result<User, UserStoreError> {
        let row = sqlx::query_as::<_, UserRow>(&format!("{SELECT_USER} WHERE email = $1"))
            .bind(email.as_ref().expose_secret())
            .fetch_optional(&self.pool)
            .await
            .map_err(unexpected)?;

        row.ok_or(UserStoreError::UserNotFound)?.try_into()
    }

    #[tracing::instrument(name = "Finding user by identifier in PostgreSQL", skip_all)]
    async fn find_by_identifier(&self, identifier: &str) -> Result<User, UserStoreError> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "{SELECT_USER} WHERE user_name = $1 OR email = $1 LIMIT 1"
        ))
        .bind(identifier)
        .fetch_optional(&self.pool)
        .await
        .map_err(unexpected)?;

        row.ok_or(UserStoreError::UserNotFound)?.try_into()
    }

    #[tracing::instrument(name = "Set new password", skip_all)]
    async fn update_password(
        &self,
        email: &Email,
        password_hash: PasswordHash,
    ) -> Result<(), UserStoreError> {
        let result = sqlx::query(
            r#"
                UPDATE users
                SET password_hash = $1, updated_at = now()
                WHERE email = $2
            "#,
        )
        .bind(password_hash.as_ref().expose_secret())
        .bind(email.as_ref().expose_secret())
        .execute(&self.pool)
        .await
        .map_err(unexpected)?;

        if result.rows_affected() == 0 {
            return Err(UserStoreError::UserNotFound);
        }

        Ok(())
    }

    #[tracing::instrument(name = "Listing users from PostgreSQL", skip_all)]
    async fn list_users(&self) -> Result<Vec<User>, UserStoreError> {
        sqlx::query_as::<_, UserRow>(&format!("{SELECT_USER} ORDER BY created_at"))
            .fetch_all(&self.pool)
            .await
            .map_err(unexpected)?
            .into_iter()
            .map(User::try_from)
            .collect()
    }

    #[tracing::instrument(name = "Removing all users from PostgreSQL", skip_all)]
    async fn remove_all(&self) -> Result<(), UserStoreError> {
        sqlx::query("DELETE FROM users")
            .execute(&self.pool)
            .await
            .map_err(unexpected)?;

        Ok(())
    }
}
