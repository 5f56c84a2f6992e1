//! Shared world state for group collaboration BDD scenarios.

use std::collections::HashMap;
use std::sync::Arc;

use atelier::{
    error::ServiceResult,
    group::{
        adapters::{RandomInviteCodeGenerator, memory::InMemoryGroupRepository},
        domain::Group,
        services::{GroupDeletion, GroupService},
    },
    identity::{
        adapters::{JwtIdentityProvider, Pbkdf2CredentialHasher, memory::InMemoryUserRepository},
        domain::UserId,
        services::{AccountService, LoginRequest, RegisterRequest},
    },
    task::{adapters::memory::InMemoryTaskRepository, domain::TaskView, services::TaskService},
};
use chrono::TimeDelta;
use eyre::WrapErr;
use mockable::DefaultClock;
use rstest::fixture;

/// Account service used by the BDD world.
pub type Accounts = AccountService<
    InMemoryUserRepository,
    JwtIdentityProvider<DefaultClock>,
    Pbkdf2CredentialHasher,
    DefaultClock,
>;

/// Group service used by the BDD world.
pub type Groups = GroupService<
    InMemoryGroupRepository,
    InMemoryTaskRepository,
    RandomInviteCodeGenerator,
    DefaultClock,
>;

/// Task service used by the BDD world.
pub type Tasks = TaskService<InMemoryTaskRepository, InMemoryGroupRepository, DefaultClock>;

/// Scenario world for group collaboration behaviour tests.
pub struct CollaborationWorld {
    pub accounts: Accounts,
    pub groups: Groups,
    pub tasks: Tasks,
    pub task_store: Arc<InMemoryTaskRepository>,
    pub actors: HashMap<String, UserId>,
    pub group: Option<Group>,
    pub last_task_result: Option<ServiceResult<TaskView>>,
    pub last_deletion: Option<ServiceResult<GroupDeletion>>,
}

impl CollaborationWorld {
    /// Creates a world backed by fresh in-memory repositories.
    #[must_use]
    pub fn new() -> Self {
        let clock = Arc::new(DefaultClock);
        let group_store = Arc::new(InMemoryGroupRepository::new());
        let task_store = Arc::new(InMemoryTaskRepository::new());
        let accounts = AccountService::new(
            Arc::new(InMemoryUserRepository::new()),
            Arc::new(JwtIdentityProvider::new(
                "scenario-secret",
                TimeDelta::hours(1),
                Arc::clone(&clock),
            )),
            Arc::new(Pbkdf2CredentialHasher::new(1_000)),
            Arc::clone(&clock),
        );
        let groups = GroupService::new(
            Arc::clone(&group_store),
            Arc::clone(&task_store),
            Arc::new(RandomInviteCodeGenerator::default()),
            Arc::clone(&clock),
        );
        let tasks = TaskService::new(Arc::clone(&task_store), group_store, clock);
        Self {
            accounts,
            groups,
            tasks,
            task_store,
            actors: HashMap::new(),
            group: None,
            last_task_result: None,
            last_deletion: None,
        }
    }

    /// Returns the actor registered under `name`, registering and logging in
    /// on first use.
    ///
    /// # Errors
    ///
    /// Returns an error when registration, login, or token verification fails.
    pub fn actor(&mut self, name: &str) -> Result<UserId, eyre::Report> {
        if let Some(id) = self.actors.get(name) {
            return Ok(*id);
        }
        let password = format!("{name}-password");
        run_async(
            self.accounts
                .register(RegisterRequest::new(name, password.clone())),
        )
        .wrap_err_with(|| format!("register {name}"))?;
        let issued = run_async(self.accounts.login(LoginRequest::new(name, password)))
            .wrap_err_with(|| format!("log in {name}"))?;
        let header = format!("Bearer {}", issued.token);
        let id = self
            .accounts
            .authenticate(Some(&header))
            .wrap_err_with(|| format!("authenticate {name}"))?;
        self.actors.insert(name.to_owned(), id);
        Ok(id)
    }

    /// Returns the scenario group.
    ///
    /// # Errors
    ///
    /// Returns an error when no group was created yet.
    pub fn current_group(&self) -> Result<&Group, eyre::Report> {
        self.group
            .as_ref()
            .ok_or_else(|| eyre::eyre!("missing group in scenario world"))
    }
}

impl Default for CollaborationWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> CollaborationWorld {
    CollaborationWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
