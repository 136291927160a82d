use super::NamedId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Issueのウォッチャー
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Watcher {
    pub id: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// リポジトリ連携で紐づいたチェンジセット
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Changeset {
    pub revision: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<NamedId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comments: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub committed_on: Option<DateTime<Utc>>,
}
