use std::sync::Arc;

use crate::domain::users::entities::UserInfo;
use crate::domain::users::errors::UserError;
use crate::domain::users::ports::UserRepository;
use crate::domain::users::value_objects::UserId;

/// Query for a user's public profile
#[derive(Debug, Clone)]
pub struct GetUserInfoQuery {
  pub user_id: UserId,
}

/// Use case for reading a user's public profile
pub struct GetUserInfoUseCase {
  user_repo: Arc<dyn UserRepository>,
}

impl GetUserInfoUseCase {
  /// Creates a new instance of GetUserInfoUseCase
  pub fn new(user_repo: Arc<dyn UserRepository>) -> Self {
    Self { user_repo }
  }

  /// # Errors
  /// Returns `UserError::UserNotFound` if no user has the given id
  pub async fn execute(&self, query: GetUserInfoQuery) -> Result<UserInfo, UserError> {
    let user = self
      .user_repo
      .find_by_id(&query.user_id)
      .await?
      .ok_or(UserError::UserNotFound)?;

    Ok(UserInfo::from(&user))
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::domain::users::entities::User;
  use crate::domain::users::ports::MockUserRepository;
  use crate::domain::users::value_objects::status;
  use uuid::Uuid;

  #[tokio::test]
  async fn test_existing_user_returns_public_fields() {
    let id = UserId::from_uuid(Uuid::now_v7());

    let mut repo = MockUserRepository::new();
    repo
      .expect_find_by_id()
      .withf(move |user_id| *user_id == id)
      .returning(|user_id| {
        Ok(Some(User::reconstitute(
          *user_id,
          "minhyeong".to_string(),
          "usupool94@gmail.com".to_string(),
          "ehvkpfqhajwgofiv".to_string(),
          "tok-123".to_string(),
          status::ACTIVE,
        )))
      });

    let info = GetUserInfoUseCase::new(Arc::new(repo))
      .execute(GetUserInfoQuery { user_id: id })
      .await
      .unwrap();

    assert_eq!(
      info,
      UserInfo {
        id,
        name: "minhyeong".to_string(),
        email: "usupool94@gmail.com".to_string(),
      }
    );
  }

  #[tokio::test]
  async fn test_missing_user_is_not_found() {
    let mut repo = MockUserRepository::new();
    repo.expect_find_by_id().returning(|_| Ok(None));

    let result = GetUserInfoUseCase::new(Arc::new(repo))
      .execute(GetUserInfoQuery {
        user_id: UserId::from_uuid(Uuid::now_v7()),
      })
      .await;

    assert!(matches!(result, Err(UserError::UserNotFound)));
  }
}
