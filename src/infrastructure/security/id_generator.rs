use uuid::Uuid;

use crate::domain::users::ports::IdGenerator;
use crate::domain::users::value_objects::UserId;

/// Hands out UUIDv7 identifiers, which sort by creation time
#[derive(Debug, Default)]
pub struct UuidV7Generator;

impl UuidV7Generator {
  pub fn new() -> Self {
    Self
  }
}

impl IdGenerator for UuidV7Generator {
  fn generate(&self) -> UserId {
    UserId::from_uuid(Uuid::now_v7())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_ids_are_v7_and_time_ordered() {
    let generator = UuidV7Generator::new();

    let first = generator.generate();
    let second = generator.generate();

    assert_eq!(first.as_uuid().get_version_num(), 7);
    assert_ne!(first, second);
    assert!(first.as_uuid() < second.as_uuid());
  }
}
