//! Task orchestration: authorize, validate, persist, then derive status.

use super::{CreateTaskRequest, UpdateTaskRequest};
use crate::{
    access,
    error::{Resource, ServiceError, ServiceResult},
    group::{
        domain::{Group, GroupId},
        ports::GroupRepository,
    },
    identity::domain::UserId,
    task::{
        domain::{
            NewTask, Task, TaskChanges, TaskDomainError, TaskId, TaskStatus, TaskTitle,
            TaskView, apply_schedule_patch, validate_new_schedule,
        },
        ports::{TaskFilter, TaskRepository},
    },
};
use chrono::NaiveDate;
use mockable::Clock;
use std::sync::Arc;

/// Task orchestration service.
#[derive(Clone)]
pub struct TaskService<T, G, C>
where
    T: TaskRepository,
    G: GroupRepository,
    C: Clock + Send + Sync,
{
    tasks: Arc<T>,
    groups: Arc<G>,
    clock: Arc<C>,
}

impl<T, G, C> TaskService<T, G, C>
where
    T: TaskRepository,
    G: GroupRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new task service.
    #[must_use]
    pub const fn new(tasks: Arc<T>, groups: Arc<G>, clock: Arc<C>) -> Self {
        Self {
            tasks,
            groups,
            clock,
        }
    }

    /// Creates a task, private or scoped to a group the actor belongs to.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::InvalidIdentifier`] for a malformed group id,
    /// [`ServiceError::NotFound`] for an unknown group,
    /// [`ServiceError::Forbidden`] when the actor is not a member, and
    /// [`ServiceError::Validation`] for an empty title, an unknown status,
    /// or rejected dates.
    pub async fn create_task(
        &self,
        actor: UserId,
        request: CreateTaskRequest,
    ) -> ServiceResult<TaskView> {
        let CreateTaskRequest {
            title,
            description,
            group_id: requested_group,
            start_date,
            end_date,
            status,
        } = request;

        let group_id = requested_group.as_deref().map(GroupId::parse).transpose()?;
        let group = match group_id {
            Some(id) => Some(self.load_group(id).await?),
            None => None,
        };
        access::authorize_task_creation(actor, group.as_ref())?;

        let today = self.today();
        let fields = NewTask {
            title: TaskTitle::new(title)?,
            description: description.unwrap_or_default(),
            group_id,
            created_by: actor,
            schedule: validate_new_schedule(start_date.as_deref(), end_date.as_deref(), today)?,
            status: parse_status(status.as_deref())?.unwrap_or_default(),
        };

        let task = Task::new(fields, &*self.clock);
        self.tasks.store(&task).await?;
        tracing::info!(
            task_id = %task.id(),
            user_id = %actor,
            group_id = ?task.group_id(),
            "task created"
        );
        Ok(TaskView::new(task, today))
    }

    /// Lists the actor's private tasks and every task of the actor's groups,
    /// newest first.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::Storage`] when a lookup fails.
    pub async fn list_tasks(&self, actor: UserId) -> ServiceResult<Vec<TaskView>> {
        let groups = self
            .groups
            .list_for_member(actor)
            .await?
            .iter()
            .map(Group::id)
            .collect();
        let tasks = self
            .tasks
            .find(&TaskFilter::VisibleTo { actor, groups })
            .await?;
        Ok(self.views(tasks))
    }

    /// Lists the tasks of one group for a member of that group.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::InvalidIdentifier`], [`ServiceError::NotFound`],
    /// or [`ServiceError::Forbidden`] for non-members.
    pub async fn list_group_tasks(
        &self,
        actor: UserId,
        group_id: &str,
    ) -> ServiceResult<Vec<TaskView>> {
        let group = self.load_group(GroupId::parse(group_id)?).await?;
        access::authorize_group_read(actor, &group)?;
        let tasks = self.tasks.find(&TaskFilter::InGroup(group.id())).await?;
        Ok(self.views(tasks))
    }

    /// Returns one task with its derived status.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::InvalidIdentifier`], [`ServiceError::NotFound`],
    /// or [`ServiceError::Forbidden`] when the actor is neither the creator
    /// nor a member of the task's group.
    pub async fn get_task(&self, actor: UserId, task_id: &str) -> ServiceResult<TaskView> {
        let task = self.load_task(TaskId::parse(task_id)?).await?;
        let group = self.task_group(&task).await?;
        access::authorize_task_read(actor, &task, group.as_ref())?;
        Ok(TaskView::new(task, self.today()))
    }

    /// Applies a partial update.
    ///
    /// Nothing is written unless every supplied field is valid.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::InvalidIdentifier`], [`ServiceError::NotFound`],
    /// [`ServiceError::Forbidden`], or [`ServiceError::Validation`].
    pub async fn update_task(
        &self,
        actor: UserId,
        task_id: &str,
        request: UpdateTaskRequest,
    ) -> ServiceResult<TaskView> {
        let task = self.load_task(TaskId::parse(task_id)?).await?;
        let group = self.task_group(&task).await?;
        access::authorize_task_mutation(actor, &task, group.as_ref())?;

        let today = self.today();
        let schedule = if request.touches_schedule() {
            Some(apply_schedule_patch(
                task.schedule(),
                &request.start_date,
                &request.end_date,
                today,
            )?)
        } else {
            None
        };
        let UpdateTaskRequest {
            title,
            description,
            status,
            ..
        } = request;
        let changes = TaskChanges {
            title: title.map(TaskTitle::new).transpose()?,
            description,
            schedule,
            status: parse_status(status.as_deref())?,
        };

        let updated = task.apply(changes, &*self.clock);
        self.tasks.update(&updated).await?;
        tracing::info!(task_id = %updated.id(), user_id = %actor, "task updated");
        Ok(TaskView::new(updated, today))
    }

    /// Deletes a task.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::InvalidIdentifier`], [`ServiceError::NotFound`],
    /// or [`ServiceError::Forbidden`].
    pub async fn delete_task(&self, actor: UserId, task_id: &str) -> ServiceResult<()> {
        let task = self.load_task(TaskId::parse(task_id)?).await?;
        let group = self.task_group(&task).await?;
        access::authorize_task_mutation(actor, &task, group.as_ref())?;

        self.tasks.delete(task.id()).await?;
        tracing::info!(task_id = %task.id(), user_id = %actor, "task deleted");
        Ok(())
    }

    async fn load_task(&self, id: TaskId) -> ServiceResult<Task> {
        self.tasks
            .find_by_id(id)
            .await?
            .ok_or(ServiceError::NotFound(Resource::Task(id)))
    }

    async fn load_group(&self, id: GroupId) -> ServiceResult<Group> {
        self.groups
            .find_by_id(id)
            .await?
            .ok_or(ServiceError::NotFound(Resource::Group(id)))
    }

    /// Loads the group a task references; `None` for private tasks and for
    /// references left behind by a deleted group.
    async fn task_group(&self, task: &Task) -> ServiceResult<Option<Group>> {
        match task.group_id() {
            Some(id) => Ok(self.groups.find_by_id(id).await?),
            None => Ok(None),
        }
    }

    fn views(&self, tasks: Vec<Task>) -> Vec<TaskView> {
        let today = self.today();
        tasks
            .into_iter()
            .map(|task| TaskView::new(task, today))
            .collect()
    }

    fn today(&self) -> NaiveDate {
        self.clock.utc().date_naive()
    }
}

fn parse_status(raw: Option<&str>) -> ServiceResult<Option<TaskStatus>> {
    raw.map(TaskStatus::try_from)
        .transpose()
        .map_err(|err| TaskDomainError::from(err).into())
}
