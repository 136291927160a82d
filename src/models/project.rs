use super::{CustomField, NamedId, Tracker};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Redmineのプロジェクト
///
/// Issue内にネストされて返る場合は `{"id", "name"}` だけなので、
/// identifier以下はすべてOptionになっている。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    pub id: i32,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub identifier: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub homepage: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_public: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent: Option<NamedId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_on: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_on: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub trackers: Vec<Tracker>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub custom_fields: Vec<CustomField>,
}

impl Project {
    pub fn new(id: i32, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            identifier: None,
            description: None,
            homepage: None,
            status: None,
            is_public: None,
            parent: None,
            created_on: None,
            updated_on: None,
            trackers: Vec::new(),
            custom_fields: Vec::new(),
        }
    }
}

impl PartialEq for Project {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_project_deserialization() {
        let project: Project = serde_json::from_value(json!({
            "id": 1,
            "name": "Sandbox",
            "identifier": "sandbox",
            "description": "Internal playground",
            "status": 1,
            "is_public": true,
            "created_on": "2023-06-01T00:00:00Z",
            "trackers": [
                {"id": 1, "name": "Bug"},
                {"id": 2, "name": "Feature"}
            ]
        }))
        .unwrap();

        assert_eq!(project.id, 1);
        assert_eq!(project.identifier, Some("sandbox".to_string()));
        assert_eq!(project.trackers.len(), 2);
        assert_eq!(project.trackers[1].name, "Feature");
    }

    #[test]
    fn test_nested_project_reference_deserialization() {
        // Issueのレスポンスに埋め込まれる省略形
        let project: Project =
            serde_json::from_value(json!({"id": 1, "name": "Sandbox"})).unwrap();

        assert_eq!(project.id, 1);
        assert_eq!(project.identifier, None);
        assert!(project.trackers.is_empty());
    }
}
