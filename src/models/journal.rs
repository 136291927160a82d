use super::NamedId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Issue更新時に自動生成されるジャーナル（変更ログ）
///
/// `Include::Journals`付きでIssueを取得したときだけ埋まる。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Journal {
    pub id: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<NamedId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub created_on: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub details: Vec<JournalDetail>,
}

/// ジャーナル内の1フィールド分の変更内容
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JournalDetail {
    pub property: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub old_value: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub new_value: Option<String>,
}
