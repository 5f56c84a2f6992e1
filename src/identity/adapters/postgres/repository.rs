//! `PostgreSQL` repository implementation for user storage.

use super::{models::UserRow, schema::users};
use crate::{
    identity::{
        domain::{CredentialHash, DisplayName, PersistedUserData, User, UserId},
        ports::{UserRepository, UserRepositoryError, UserRepositoryResult},
    },
    persistence::{PgPool, get_conn_with, run_blocking_with},
};
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};

const DISPLAY_NAME_CONSTRAINT: &str = "users_display_name_unique";

/// `PostgreSQL`-backed user repository.
#[derive(Debug, Clone)]
pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> UserRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> UserRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        run_blocking_with(
            move || {
                let mut connection = get_conn_with(&pool, UserRepositoryError::persistence)?;
                f(&mut connection)
            },
            UserRepositoryError::persistence,
        )
        .await
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn store(&self, user: &User) -> UserRepositoryResult<()> {
        let user_id = user.id();
        let display_name = user.display_name().clone();
        let row = to_row(user);

        self.run_blocking(move |connection| {
            diesel::insert_into(users::table)
                .values(&row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, ref info)
                        if info.constraint_name() == Some(DISPLAY_NAME_CONSTRAINT) =>
                    {
                        UserRepositoryError::DuplicateDisplayName(display_name.clone())
                    }
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        UserRepositoryError::DuplicateUser(user_id)
                    }
                    _ => UserRepositoryError::persistence(err),
                })?;
            Ok(())
        })
        .await
    }

    async fn find_by_id(&self, id: UserId) -> UserRepositoryResult<Option<User>> {
        self.run_blocking(move |connection| {
            let row = users::table
                .find(id.into_inner())
                .select(UserRow::as_select())
                .first::<UserRow>(connection)
                .optional()
                .map_err(UserRepositoryError::persistence)?;
            row.map(row_to_user).transpose()
        })
        .await
    }

    async fn find_by_display_name(
        &self,
        name: &DisplayName,
    ) -> UserRepositoryResult<Option<User>> {
        let lookup = name.as_str().to_owned();
        self.run_blocking(move |connection| {
            let row = users::table
                .filter(users::display_name.eq(lookup))
                .select(UserRow::as_select())
                .first::<UserRow>(connection)
                .optional()
                .map_err(UserRepositoryError::persistence)?;
            row.map(row_to_user).transpose()
        })
        .await
    }
}

fn to_row(user: &User) -> UserRow {
    UserRow {
        id: user.id().into_inner(),
        display_name: user.display_name().as_str().to_owned(),
        credential_hash: user.credential_hash().as_str().to_owned(),
        created_at: user.created_at(),
    }
}

fn row_to_user(row: UserRow) -> UserRepositoryResult<User> {
    let UserRow {
        id,
        display_name,
        credential_hash,
        created_at,
    } = row;
    let name = DisplayName::new(display_name).map_err(UserRepositoryError::persistence)?;

    Ok(User::from_persisted(PersistedUserData {
        id: UserId::from_uuid(id),
        display_name: name,
        credential_hash: CredentialHash::new(credential_hash),
        created_at,
    }))
}

#[cfg(test)]
mod tests {
    use super::{UserRow, row_to_user, to_row};
    use crate::identity::{
        domain::{CredentialHash, DisplayName, User},
        ports::UserRepositoryError,
    };
    use mockable::DefaultClock;

    #[test]
    fn rows_preserve_every_user_field() {
        let user = User::register(
            DisplayName::new("Ada").expect("valid name"),
            CredentialHash::new("pbkdf2:1:00:11"),
            &DefaultClock,
        );

        let restored = row_to_user(to_row(&user)).expect("row converts back");
        assert_eq!(restored, user);
    }

    #[test]
    fn blank_persisted_display_name_is_rejected() {
        let row = UserRow {
            id: uuid::Uuid::new_v4(),
            display_name: "  ".to_owned(),
            credential_hash: String::new(),
            created_at: chrono::Utc::now(),
        };

        assert!(matches!(
            row_to_user(row),
            Err(UserRepositoryError::Persistence(_))
        ));
    }
}
