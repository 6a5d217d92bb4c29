use crate::domain::ports::IdGenerator;
use uuid::Uuid;

/// 隨機 v4 UUID，碰撞機率可忽略，不需另外檢查重複
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidGenerator;

impl IdGenerator for UuidGenerator {
    fn next_id(&self) -> String {
        Uuid::new_v4().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_ids_are_unique_uuids() {
        let generator = UuidGenerator;
        let ids: HashSet<String> = (0..1000).map(|_| generator.next_id()).collect();

        assert_eq!(ids.len(), 1000);
        for id in &ids {
            assert!(Uuid::parse_str(id).is_ok());
            assert!(!id.chars().any(char::is_whitespace));
        }
    }
}
