use super::NamedId;
use crate::property::{Property, PropertyStorage};
use serde::de::Deserializer;
use serde::Deserialize;
use std::hash::{Hash, Hasher};

/// Redmineのユーザーグループ
#[derive(Debug, Clone, Default)]
pub struct Group {
    id: Option<i32>,
    storage: PropertyStorage,
    users: Vec<NamedId>,
}

impl Group {
    pub const NAME: Property<String> = Property::new("name");

    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_id(id: i32) -> Self {
        Self {
            id: Some(id),
            ..Self::default()
        }
    }

    pub fn id(&self) -> Option<i32> {
        self.id
    }

    pub fn name(&self) -> Option<String> {
        self.storage.get(&Self::NAME)
    }

    pub fn set_name(&mut self, name: Option<String>) {
        self.storage.set(&Self::NAME, name);
    }

    /// `include=users`付きで取得したときだけ埋まる
    pub fn users(&self) -> &[NamedId] {
        &self.users
    }

    pub fn add_users(&mut self, users: impl IntoIterator<Item = NamedId>) {
        self.users.extend(users);
    }

    pub fn storage(&self) -> &PropertyStorage {
        &self.storage
    }
}

impl PartialEq for Group {
    fn eq(&self, other: &Self) -> bool {
        match (self.id, other.id) {
            (Some(a), Some(b)) => a == b,
            _ => false,
        }
    }
}

impl Hash for Group {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

#[derive(Deserialize)]
struct GroupWire {
    id: i32,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    users: Vec<NamedId>,
}

impl<'de> Deserialize<'de> for Group {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let wire = GroupWire::deserialize(deserializer)?;
        let mut group = Group::with_id(wire.id);
        if wire.name.is_some() {
            group.set_name(wire.name);
        }
        group.add_users(wire.users);
        Ok(group)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_group_deserialization() {
        let group: Group = serde_json::from_value(json!({
            "id": 20,
            "name": "Developers",
            "users": [
                {"id": 3, "name": "Dave Loper"},
                {"id": 5, "name": "Eva Mint"}
            ]
        }))
        .unwrap();

        assert_eq!(group.id(), Some(20));
        assert_eq!(group.name(), Some("Developers".to_string()));
        assert_eq!(group.users().len(), 2);
    }

    #[test]
    fn test_name_stays_unset_when_absent() {
        let group: Group = serde_json::from_value(json!({"id": 4})).unwrap();

        assert!(!group.storage().is_set(&Group::NAME));
        assert_eq!(group.name(), None);
    }

    #[test]
    fn test_equality_is_by_id() {
        assert_eq!(Group::with_id(20), Group::with_id(20));
        assert_ne!(Group::with_id(20), Group::with_id(21));
        assert_ne!(Group::new(), Group::new());
    }
}
