use std::sync::Arc;

use crate::domain::users::errors::{RepositoryError, UserError};
use crate::domain::users::factory::UserFactory;
use crate::domain::users::ports::{IdGenerator, TokenGenerator, UserRepository};
use crate::domain::users::value_objects::{UserId, status};

/// Command for signing up a new user
#[derive(Debug, Clone)]
pub struct CreateUserCommand {
  /// Display name
  pub name: String,
  /// Email address, unique across all users
  pub email: String,
  /// Password as typed by the user
  pub password: String,
}

/// Response after a successful signup
#[derive(Debug, Clone)]
pub struct CreateUserResponse {
  /// Identifier assigned to the new user
  pub user_id: UserId,
}

/// Use case for signing up a new user
pub struct CreateUserUseCase {
  user_repo: Arc<dyn UserRepository>,
  user_factory: Arc<UserFactory>,
  id_generator: Arc<dyn IdGenerator>,
  token_generator: Arc<dyn TokenGenerator>,
}

impl CreateUserUseCase {
  /// Creates a new instance of CreateUserUseCase
  pub fn new(
    user_repo: Arc<dyn UserRepository>,
    user_factory: Arc<UserFactory>,
    id_generator: Arc<dyn IdGenerator>,
    token_generator: Arc<dyn TokenGenerator>,
  ) -> Self {
    Self {
      user_repo,
      user_factory,
      id_generator,
      token_generator,
    }
  }

  /// Executes the signup use case
  ///
  /// # Errors
  /// Returns `UserError::EmailAlreadyExists` when the email is taken, either
  /// by the lookup or by the storage constraint on insert. Nothing is saved
  /// or published in that case.
  pub async fn execute(&self, command: CreateUserCommand) -> Result<CreateUserResponse, UserError> {
    if self
      .user_repo
      .find_by_email(&command.email)
      .await?
      .is_some()
    {
      tracing::debug!(email = %command.email, "Signup rejected, email already registered");
      return Err(UserError::EmailAlreadyExists);
    }

    let id = self.id_generator.generate();
    let signup_verify_token = self.token_generator.generate().await?;

    // The lookup above races with concurrent signups; the unique index decides
    match self
      .user_repo
      .save(
        &id,
        &command.name,
        &command.email,
        &command.password,
        &signup_verify_token,
        status::PENDING,
      )
      .await
    {
      Ok(()) => {}
      Err(UserError::Repository(RepositoryError::DuplicateKey(constraint)))
        if constraint.contains("email") =>
      {
        tracing::debug!(email = %command.email, "Signup lost race on email constraint");
        return Err(UserError::EmailAlreadyExists);
      }
      Err(e) => return Err(e),
    }

    let user = self.user_factory.create(
      id,
      command.name,
      command.email,
      command.password,
      signup_verify_token,
      status::PENDING,
    );

    tracing::info!(user_id = %user.id(), email = %user.email(), "User created");

    Ok(CreateUserResponse { user_id: user.id() })
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::domain::users::entities::User;
  use crate::domain::users::events::DomainEvent;
  use crate::domain::users::ports::{
    MockEventPublisher, MockIdGenerator, MockTokenGenerator, MockUserRepository,
  };
  use uuid::Uuid;

  fn command() -> CreateUserCommand {
    CreateUserCommand {
      name: "minhyeong".to_string(),
      email: "usupool94@gmail.com".to_string(),
      password: "ehvkpfqhajwgofiv".to_string(),
    }
  }

  fn id_generator(id: UserId) -> MockIdGenerator {
    let mut generator = MockIdGenerator::new();
    generator.expect_generate().return_const(id);
    generator
  }

  fn token_generator(token: &'static str) -> MockTokenGenerator {
    let mut generator = MockTokenGenerator::new();
    generator
      .expect_generate()
      .returning(move || Ok(token.to_string()));
    generator
  }

  fn use_case(
    repo: MockUserRepository,
    publisher: MockEventPublisher,
    ids: MockIdGenerator,
    tokens: MockTokenGenerator,
  ) -> CreateUserUseCase {
    CreateUserUseCase::new(
      Arc::new(repo),
      Arc::new(UserFactory::new(Arc::new(publisher))),
      Arc::new(ids),
      Arc::new(tokens),
    )
  }

  #[tokio::test]
  async fn test_signup_saves_pending_user_and_publishes_once() {
    let id = UserId::from_uuid(Uuid::now_v7());

    let mut repo = MockUserRepository::new();
    repo.expect_find_by_email().returning(|_| Ok(None));
    repo
      .expect_save()
      .withf(move |saved_id, name, email, password, token, saved_status| {
        *saved_id == id
          && name == "minhyeong"
          && email == "usupool94@gmail.com"
          && password == "ehvkpfqhajwgofiv"
          && token == "tok-123"
          && *saved_status == status::PENDING
      })
      .times(1)
      .returning(|_, _, _, _, _, _| Ok(()));

    let mut publisher = MockEventPublisher::new();
    publisher
      .expect_publish()
      .withf(|event| match event {
        DomainEvent::UserCreated(created) => {
          created.email == "usupool94@gmail.com" && created.signup_verify_token == "tok-123"
        }
      })
      .times(1)
      .return_const(());

    let response = use_case(repo, publisher, id_generator(id), token_generator("tok-123"))
      .execute(command())
      .await
      .unwrap();

    assert_eq!(response.user_id, id);
  }

  #[tokio::test]
  async fn test_existing_email_is_rejected_without_side_effects() {
    let mut repo = MockUserRepository::new();
    repo.expect_find_by_email().returning(|email| {
      Ok(Some(User::reconstitute(
        UserId::from_uuid(Uuid::now_v7()),
        "someone".to_string(),
        email.to_string(),
        "secret".to_string(),
        "older-token".to_string(),
        status::ACTIVE,
      )))
    });
    repo.expect_save().never();

    let mut publisher = MockEventPublisher::new();
    publisher.expect_publish().never();

    let mut ids = MockIdGenerator::new();
    ids.expect_generate().never();
    let mut tokens = MockTokenGenerator::new();
    tokens.expect_generate().never();

    let result = use_case(repo, publisher, ids, tokens)
      .execute(command())
      .await;

    assert!(matches!(result, Err(UserError::EmailAlreadyExists)));
  }

  #[tokio::test]
  async fn test_unique_violation_on_insert_reports_email_conflict() {
    let mut repo = MockUserRepository::new();
    repo.expect_find_by_email().returning(|_| Ok(None));
    repo.expect_save().returning(|_, _, _, _, _, _| {
      Err(UserError::Repository(RepositoryError::DuplicateKey(
        "uq_users_email".to_string(),
      )))
    });

    let mut publisher = MockEventPublisher::new();
    publisher.expect_publish().never();

    let result = use_case(
      repo,
      publisher,
      id_generator(UserId::from_uuid(Uuid::now_v7())),
      token_generator("tok-123"),
    )
    .execute(command())
    .await;

    assert!(matches!(result, Err(UserError::EmailAlreadyExists)));
  }

  #[tokio::test]
  async fn test_storage_failure_propagates_and_publishes_nothing() {
    let mut repo = MockUserRepository::new();
    repo.expect_find_by_email().returning(|_| Ok(None));
    repo.expect_save().returning(|_, _, _, _, _, _| {
      Err(UserError::Repository(RepositoryError::TransactionFailed(
        "connection reset".to_string(),
      )))
    });

    let mut publisher = MockEventPublisher::new();
    publisher.expect_publish().never();

    let result = use_case(
      repo,
      publisher,
      id_generator(UserId::from_uuid(Uuid::now_v7())),
      token_generator("tok-123"),
    )
    .execute(command())
    .await;

    assert!(matches!(
      result,
      Err(UserError::Repository(RepositoryError::TransactionFailed(_)))
    ));
  }
}
