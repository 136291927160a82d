use super::NamedId;
use serde::{Deserialize, Serialize};

/// トラッカー（Bug, Feature など）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tracker {
    pub id: i32,
    pub name: String,
}

impl Tracker {
    pub fn new(id: i32, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

/// Issueのステータス（GET /issue_statuses.json）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IssueStatus {
    pub id: i32,
    pub name: String,
    #[serde(default)]
    pub is_closed: bool,
}

/// Issueの優先度（GET /enumerations/issue_priorities.json）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IssuePriority {
    pub id: i32,
    pub name: String,
    #[serde(default)]
    pub is_default: bool,
}

/// プロジェクト内のIssueカテゴリ
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IssueCategory {
    pub id: i32,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project: Option<NamedId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assigned_to: Option<NamedId>,
}
