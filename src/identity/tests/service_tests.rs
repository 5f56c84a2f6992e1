//! Service orchestration tests for registration and authentication.

use std::sync::{
    Arc,
    atomic::{AtomicUsize, Ordering},
};

use crate::{
    error::{Resource, ServiceError, ValidationFailure},
    identity::{
        adapters::{JwtIdentityProvider, Pbkdf2CredentialHasher, memory::InMemoryUserRepository},
        domain::{CredentialHash, IdentityDomainError, MAX_DISPLAY_NAME_LENGTH, Password, UserId},
        ports::{CredentialHasher, IdentityError},
        services::{AccountService, LoginRequest, RegisterRequest},
    },
};
use chrono::TimeDelta;
use mockable::DefaultClock;
use rstest::{fixture, rstest};

type TestService = AccountService<
    InMemoryUserRepository,
    JwtIdentityProvider<DefaultClock>,
    Pbkdf2CredentialHasher,
    DefaultClock,
>;

struct CountingHasher {
    inner: Pbkdf2CredentialHasher,
    verifications: AtomicUsize,
}

impl CredentialHasher for CountingHasher {
    fn hash(&self, password: &Password) -> CredentialHash {
        self.inner.hash(password)
    }

    fn verify(&self, password: &Password, hash: &CredentialHash) -> bool {
        self.verifications.fetch_add(1, Ordering::SeqCst);
        self.inner.verify(password, hash)
    }
}

#[fixture]
fn service() -> TestService {
    let clock = Arc::new(DefaultClock);
    AccountService::new(
        Arc::new(InMemoryUserRepository::new()),
        Arc::new(JwtIdentityProvider::new(
            "service-test-secret",
            TimeDelta::days(1),
            Arc::clone(&clock),
        )),
        Arc::new(Pbkdf2CredentialHasher::new(1_000)),
        clock,
    )
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn registered_user_can_log_in_and_authenticate(service: TestService) {
    let user = service
        .register(RegisterRequest::new("  Grace  ", "hopper"))
        .await
        .expect("registration should succeed");
    assert_eq!(user.display_name().as_str(), "Grace");

    let issued = service
        .login(LoginRequest::new("Grace", "hopper"))
        .await
        .expect("login should succeed");
    let header = format!("Bearer {}", issued.token);
    let actor = service
        .authenticate(Some(&header))
        .expect("token should verify");
    assert_eq!(actor, user.id());

    let current = service
        .current_user(actor)
        .await
        .expect("current user lookup should succeed");
    assert_eq!(current, user);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn bare_token_is_accepted(service: TestService) {
    let user = service
        .register(RegisterRequest::new("Linus", "kernel"))
        .await
        .expect("registration should succeed");
    let issued = service
        .login(LoginRequest::new("Linus", "kernel"))
        .await
        .expect("login should succeed");

    assert_eq!(
        service.authenticate(Some(&issued.token)).ok(),
        Some(user.id())
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn duplicate_display_name_is_a_validation_failure(service: TestService) {
    service
        .register(RegisterRequest::new("Ada", "first"))
        .await
        .expect("first registration should succeed");

    let result = service.register(RegisterRequest::new("Ada", "second")).await;

    assert!(matches!(
        result,
        Err(ServiceError::Validation(ValidationFailure::Identity(
            IdentityDomainError::DisplayNameTaken(ref name)
        ))) if name == "Ada"
    ));
}

#[rstest]
#[case("", "secret", IdentityDomainError::EmptyDisplayName)]
#[case("Ada", "", IdentityDomainError::EmptyPassword)]
#[tokio::test(flavor = "multi_thread")]
async fn registration_requires_every_field(
    service: TestService,
    #[case] display_name: &str,
    #[case] password: &str,
    #[case] expected: IdentityDomainError,
) {
    let result = service
        .register(RegisterRequest::new(display_name, password))
        .await;

    assert!(matches!(
        result,
        Err(ServiceError::Validation(ValidationFailure::Identity(ref err))) if *err == expected
    ));
}

#[rstest]
#[case("Nobody", "whatever")]
#[case("Ada", "wrong")]
#[case("Ada", "")]
#[tokio::test(flavor = "multi_thread")]
async fn bad_credentials_are_unauthenticated(
    service: TestService,
    #[case] display_name: &str,
    #[case] password: &str,
) {
    service
        .register(RegisterRequest::new("Ada", "lovelace"))
        .await
        .expect("registration should succeed");

    let result = service
        .login(LoginRequest::new(display_name, password))
        .await;

    assert!(matches!(
        result,
        Err(ServiceError::Unauthenticated(IdentityError::InvalidCredentials))
    ));
}

#[rstest]
#[case("Nobody", "whatever")]
#[case("Ada", "wrong")]
#[tokio::test(flavor = "multi_thread")]
async fn failed_logins_always_check_a_credential(
    #[case] display_name: &str,
    #[case] password: &str,
) {
    let clock = Arc::new(DefaultClock);
    let hasher = Arc::new(CountingHasher {
        inner: Pbkdf2CredentialHasher::new(1_000),
        verifications: AtomicUsize::new(0),
    });
    let service = AccountService::new(
        Arc::new(InMemoryUserRepository::new()),
        Arc::new(JwtIdentityProvider::new(
            "service-test-secret",
            TimeDelta::days(1),
            Arc::clone(&clock),
        )),
        Arc::clone(&hasher),
        clock,
    );
    service
        .register(RegisterRequest::new("Ada", "lovelace"))
        .await
        .expect("registration should succeed");

    let result = service
        .login(LoginRequest::new(display_name, password))
        .await;

    assert!(matches!(
        result,
        Err(ServiceError::Unauthenticated(IdentityError::InvalidCredentials))
    ));
    assert_eq!(hasher.verifications.load(Ordering::SeqCst), 1);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn overlong_display_name_is_a_validation_failure(service: TestService) {
    let name = "n".repeat(MAX_DISPLAY_NAME_LENGTH + 1);

    let result = service.register(RegisterRequest::new(name, "secret")).await;

    assert!(matches!(
        result,
        Err(ServiceError::Validation(ValidationFailure::Identity(
            IdentityDomainError::DisplayNameTooLong(length)
        ))) if length == MAX_DISPLAY_NAME_LENGTH + 1
    ));
}

#[rstest]
#[case(None)]
#[case(Some(""))]
#[case(Some("Bearer "))]
fn missing_token_is_unauthenticated(service: TestService, #[case] header: Option<&str>) {
    let result = service.authenticate(header);
    assert!(matches!(
        result,
        Err(ServiceError::Unauthenticated(IdentityError::MissingToken))
    ));
    assert_eq!(result.map_err(|err| err.status_code()), Err(401));
}

#[rstest]
fn tampered_token_is_unauthenticated(service: TestService) {
    let result = service.authenticate(Some("Bearer abc.def.ghi"));
    assert!(matches!(
        result,
        Err(ServiceError::Unauthenticated(IdentityError::InvalidToken(_)))
    ));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn current_user_for_unknown_actor_is_not_found(service: TestService) {
    let stranger = UserId::new();
    let result = service.current_user(stranger).await;

    assert!(matches!(
        result,
        Err(ServiceError::NotFound(Resource::User(id))) if id == stranger
    ));
}
