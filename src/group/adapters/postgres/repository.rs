//! `PostgreSQL` repository implementation for group storage.

use super::{models::GroupRow, schema::groups};
use crate::{
    group::{
        domain::{Group, GroupId, GroupName, InviteCode, PersistedGroupData},
        ports::{GroupRepository, GroupRepositoryError, GroupRepositoryResult},
    },
    identity::domain::UserId,
    persistence::{PgPool, get_conn_with, run_blocking_with},
};
use async_trait::async_trait;
use diesel::expression_methods::PgArrayExpressionMethods;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};

const INVITE_CODE_CONSTRAINT: &str = "groups_invite_code_unique";

/// `PostgreSQL`-backed group repository.
#[derive(Debug, Clone)]
pub struct PostgresGroupRepository {
    pool: PgPool,
}

impl PostgresGroupRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> GroupRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> GroupRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        run_blocking_with(
            move || {
                let mut connection = get_conn_with(&pool, GroupRepositoryError::persistence)?;
                f(&mut connection)
            },
            GroupRepositoryError::persistence,
        )
        .await
    }
}

#[async_trait]
impl GroupRepository for PostgresGroupRepository {
    async fn store(&self, group: &Group) -> GroupRepositoryResult<()> {
        let group_id = group.id();
        let invite_code = group.invite_code().clone();
        let row = to_row(group);

        self.run_blocking(move |connection| {
            diesel::insert_into(groups::table)
                .values(&row)
                .execute(connection)
                .map_err(|err| map_write_error(err, group_id, &invite_code))?;
            Ok(())
        })
        .await
    }

    async fn update(&self, group: &Group) -> GroupRepositoryResult<()> {
        let group_id = group.id();
        let invite_code = group.invite_code().clone();
        let row = to_row(group);

        self.run_blocking(move |connection| {
            let affected = diesel::update(groups::table.find(row.id))
                .set((
                    groups::name.eq(&row.name),
                    groups::owner_id.eq(row.owner_id),
                    groups::members.eq(&row.members),
                    groups::invite_code.eq(&row.invite_code),
                    groups::updated_at.eq(row.updated_at),
                ))
                .execute(connection)
                .map_err(|err| map_write_error(err, group_id, &invite_code))?;
            if affected == 0 {
                return Err(GroupRepositoryError::NotFound(group_id));
            }
            Ok(())
        })
        .await
    }

    async fn delete(&self, id: GroupId) -> GroupRepositoryResult<()> {
        self.run_blocking(move |connection| {
            let affected = diesel::delete(groups::table.find(id.into_inner()))
                .execute(connection)
                .map_err(GroupRepositoryError::persistence)?;
            if affected == 0 {
                return Err(GroupRepositoryError::NotFound(id));
            }
            Ok(())
        })
        .await
    }

    async fn find_by_id(&self, id: GroupId) -> GroupRepositoryResult<Option<Group>> {
        self.run_blocking(move |connection| {
            let row = groups::table
                .find(id.into_inner())
                .select(GroupRow::as_select())
                .first::<GroupRow>(connection)
                .optional()
                .map_err(GroupRepositoryError::persistence)?;
            row.map(row_to_group).transpose()
        })
        .await
    }

    async fn find_by_invite_code(
        &self,
        code: &InviteCode,
    ) -> GroupRepositoryResult<Option<Group>> {
        let lookup = code.as_str().to_owned();
        self.run_blocking(move |connection| {
            let row = groups::table
                .filter(groups::invite_code.eq(lookup))
                .select(GroupRow::as_select())
                .first::<GroupRow>(connection)
                .optional()
                .map_err(GroupRepositoryError::persistence)?;
            row.map(row_to_group).transpose()
        })
        .await
    }

    async fn list_for_member(&self, user: UserId) -> GroupRepositoryResult<Vec<Group>> {
        self.run_blocking(move |connection| {
            let rows = groups::table
                .filter(groups::members.contains(vec![user.into_inner()]))
                .order(groups::created_at.asc())
                .select(GroupRow::as_select())
                .load::<GroupRow>(connection)
                .map_err(GroupRepositoryError::persistence)?;
            rows.into_iter().map(row_to_group).collect()
        })
        .await
    }
}

fn map_write_error(
    err: DieselError,
    group_id: GroupId,
    invite_code: &InviteCode,
) -> GroupRepositoryError {
    match err {
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, ref info)
            if info.constraint_name() == Some(INVITE_CODE_CONSTRAINT) =>
        {
            GroupRepositoryError::DuplicateInviteCode(invite_code.clone())
        }
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
            GroupRepositoryError::DuplicateGroup(group_id)
        }
        _ => GroupRepositoryError::persistence(err),
    }
}

fn to_row(group: &Group) -> GroupRow {
    GroupRow {
        id: group.id().into_inner(),
        name: group.name().as_str().to_owned(),
        owner_id: group.owner().into_inner(),
        members: group
            .members()
            .iter()
            .map(|member| member.into_inner())
            .collect(),
        invite_code: group.invite_code().as_str().to_owned(),
        created_at: group.created_at(),
        updated_at: group.updated_at(),
    }
}

fn row_to_group(row: GroupRow) -> GroupRepositoryResult<Group> {
    let GroupRow {
        id,
        name,
        owner_id,
        members,
        invite_code,
        created_at,
        updated_at,
    } = row;

    let data = PersistedGroupData {
        id: GroupId::from_uuid(id),
        name: GroupName::new(name).map_err(GroupRepositoryError::persistence)?,
        owner: UserId::from_uuid(owner_id),
        members: members.into_iter().map(UserId::from_uuid).collect(),
        invite_code: InviteCode::new(invite_code).map_err(GroupRepositoryError::persistence)?,
        created_at,
        updated_at,
    };
    Ok(Group::from_persisted(data))
}

#[cfg(test)]
mod tests {
    use super::{GroupRow, row_to_group, to_row};
    use crate::{
        group::domain::{Group, GroupName, InviteCode},
        identity::domain::UserId,
    };
    use mockable::DefaultClock;

    #[test]
    fn rows_preserve_membership_order() {
        let clock = DefaultClock;
        let owner = UserId::new();
        let member = UserId::new();
        let group = Group::new(
            GroupName::new("Design").expect("valid name"),
            owner,
            InviteCode::new("abc123").expect("valid code"),
            &clock,
        )
        .with_member(member, &clock);

        let restored = row_to_group(to_row(&group)).expect("row converts back");
        assert_eq!(restored, group);
        assert_eq!(restored.members(), &[owner, member]);
    }

    #[test]
    fn persisted_rows_missing_the_owner_are_repaired() {
        let owner = uuid::Uuid::new_v4();
        let member = uuid::Uuid::new_v4();
        let row = GroupRow {
            id: uuid::Uuid::new_v4(),
            name: "Ops".to_owned(),
            owner_id: owner,
            members: vec![member, member],
            invite_code: "zz99zz99".to_owned(),
            created_at: chrono::Utc::now(),
            updated_at: chrono::Utc::now(),
        };

        let group = row_to_group(row).expect("row converts");
        assert_eq!(
            group.members(),
            &[UserId::from_uuid(owner), UserId::from_uuid(member)]
        );
    }
}
