//! `PostgreSQL` repository implementation for task storage.

use super::{models::TaskRow, schema::tasks};
use crate::{
    group::domain::GroupId,
    identity::domain::UserId,
    persistence::{PgPool, get_conn_with, run_blocking_with},
    task::{
        domain::{PersistedTaskData, Task, TaskId, TaskSchedule, TaskStatus, TaskTitle},
        ports::{TaskFilter, TaskRepository, TaskRepositoryError, TaskRepositoryResult},
    },
};
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};

/// `PostgreSQL`-backed task repository.
#[derive(Debug, Clone)]
pub struct PostgresTaskRepository {
    pool: PgPool,
}

impl PostgresTaskRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> TaskRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> TaskRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        run_blocking_with(
            move || {
                let mut connection = get_conn_with(&pool, TaskRepositoryError::persistence)?;
                f(&mut connection)
            },
            TaskRepositoryError::persistence,
        )
        .await
    }
}

#[async_trait]
impl TaskRepository for PostgresTaskRepository {
    async fn store(&self, task: &Task) -> TaskRepositoryResult<()> {
        let task_id = task.id();
        let row = to_row(task);

        self.run_blocking(move |connection| {
            diesel::insert_into(tasks::table)
                .values(&row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        TaskRepositoryError::DuplicateTask(task_id)
                    }
                    _ => TaskRepositoryError::persistence(err),
                })?;
            Ok(())
        })
        .await
    }

    async fn update(&self, task: &Task) -> TaskRepositoryResult<()> {
        let task_id = task.id();
        let row = to_row(task);

        self.run_blocking(move |connection| {
            let affected = diesel::update(tasks::table.find(row.id))
                .set((
                    tasks::title.eq(&row.title),
                    tasks::description.eq(&row.description),
                    tasks::start_date.eq(row.start_date),
                    tasks::end_date.eq(row.end_date),
                    tasks::status.eq(&row.status),
                    tasks::updated_at.eq(row.updated_at),
                ))
                .execute(connection)
                .map_err(TaskRepositoryError::persistence)?;
            if affected == 0 {
                return Err(TaskRepositoryError::NotFound(task_id));
            }
            Ok(())
        })
        .await
    }

    async fn delete(&self, id: TaskId) -> TaskRepositoryResult<()> {
        self.run_blocking(move |connection| {
            let affected = diesel::delete(tasks::table.find(id.into_inner()))
                .execute(connection)
                .map_err(TaskRepositoryError::persistence)?;
            if affected == 0 {
                return Err(TaskRepositoryError::NotFound(id));
            }
            Ok(())
        })
        .await
    }

    async fn delete_by_group(&self, group: GroupId) -> TaskRepositoryResult<u64> {
        self.run_blocking(move |connection| {
            let affected =
                diesel::delete(tasks::table.filter(tasks::group_id.eq(group.into_inner())))
                    .execute(connection)
                    .map_err(TaskRepositoryError::persistence)?;
            u64::try_from(affected).map_err(TaskRepositoryError::persistence)
        })
        .await
    }

    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>> {
        self.run_blocking(move |connection| {
            let row = tasks::table
                .find(id.into_inner())
                .select(TaskRow::as_select())
                .first::<TaskRow>(connection)
                .optional()
                .map_err(TaskRepositoryError::persistence)?;
            row.map(row_to_task).transpose()
        })
        .await
    }

    async fn find(&self, filter: &TaskFilter) -> TaskRepositoryResult<Vec<Task>> {
        let filter = filter.clone();
        self.run_blocking(move |connection| {
            let rows = match filter {
                TaskFilter::VisibleTo { actor, groups } => {
                    let group_ids: Vec<uuid::Uuid> =
                        groups.into_iter().map(GroupId::into_inner).collect();
                    tasks::table
                        .filter(
                            tasks::created_by
                                .eq(actor.into_inner())
                                .and(tasks::group_id.is_null())
                                .or(tasks::group_id.eq_any(group_ids)),
                        )
                        .order(tasks::created_at.desc())
                        .select(TaskRow::as_select())
                        .load::<TaskRow>(connection)
                }
                TaskFilter::InGroup(group) => tasks::table
                    .filter(tasks::group_id.eq(group.into_inner()))
                    .order(tasks::created_at.desc())
                    .select(TaskRow::as_select())
                    .load::<TaskRow>(connection),
            }
            .map_err(TaskRepositoryError::persistence)?;
            rows.into_iter().map(row_to_task).collect()
        })
        .await
    }
}

fn to_row(task: &Task) -> TaskRow {
    let schedule = task.schedule();
    TaskRow {
        id: task.id().into_inner(),
        title: task.title().as_str().to_owned(),
        description: task.description().to_owned(),
        group_id: task.group_id().map(GroupId::into_inner),
        created_by: task.created_by().into_inner(),
        start_date: schedule.start(),
        end_date: schedule.end(),
        status: task.status().as_str().to_owned(),
        created_at: task.created_at(),
        updated_at: task.updated_at(),
    }
}

fn row_to_task(row: TaskRow) -> TaskRepositoryResult<Task> {
    let TaskRow {
        id,
        title,
        description,
        group_id,
        created_by,
        start_date,
        end_date,
        status,
        created_at,
        updated_at,
    } = row;

    let data = PersistedTaskData {
        id: TaskId::from_uuid(id),
        title: TaskTitle::new(title).map_err(TaskRepositoryError::persistence)?,
        description,
        group_id: group_id.map(GroupId::from_uuid),
        created_by: UserId::from_uuid(created_by),
        schedule: TaskSchedule::new(start_date, end_date)
            .map_err(TaskRepositoryError::persistence)?,
        status: TaskStatus::try_from(status.as_str()).map_err(TaskRepositoryError::persistence)?,
        created_at,
        updated_at,
    };
    Ok(Task::from_persisted(data))
}

#[cfg(test)]
mod tests {
    use super::{TaskRow, row_to_task, to_row};
    use crate::{
        group::domain::GroupId,
        identity::domain::UserId,
        task::{
            domain::{NewTask, Task, TaskSchedule, TaskStatus, TaskTitle},
            ports::TaskRepositoryError,
        },
    };
    use chrono::{NaiveDate, Utc};
    use mockable::DefaultClock;

    fn day(value: &str) -> NaiveDate {
        NaiveDate::parse_from_str(value, "%Y-%m-%d").expect("valid test date")
    }

    fn row_with_status(status: &str) -> TaskRow {
        TaskRow {
            id: uuid::Uuid::new_v4(),
            title: "Draft agenda".to_owned(),
            description: String::new(),
            group_id: None,
            created_by: uuid::Uuid::new_v4(),
            start_date: None,
            end_date: None,
            status: status.to_owned(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn rows_round_trip_scheduled_group_tasks() {
        let task = Task::new(
            NewTask {
                title: TaskTitle::new("Ship release").expect("valid title"),
                description: "Tag and publish".to_owned(),
                group_id: Some(GroupId::new()),
                created_by: UserId::new(),
                schedule: TaskSchedule::new(Some(day("2025-11-20")), Some(day("2025-11-25")))
                    .expect("valid schedule"),
                status: TaskStatus::InProgress,
            },
            &DefaultClock,
        );

        let restored = row_to_task(to_row(&task)).expect("row converts back");
        assert_eq!(restored, task);
    }

    #[test]
    fn unknown_stored_status_is_a_persistence_error() {
        let result = row_to_task(row_with_status("archived"));
        assert!(matches!(result, Err(TaskRepositoryError::Persistence(_))));
    }

    #[test]
    fn inverted_stored_schedule_is_a_persistence_error() {
        let mut row = row_with_status("pending");
        row.start_date = Some(day("2025-11-25"));
        row.end_date = Some(day("2025-11-20"));

        assert!(matches!(
            row_to_task(row),
            Err(TaskRepositoryError::Persistence(_))
        ));
    }
}
