use serde::{Deserialize, Serialize};

/// Issue間のリレーション（relates, blocks, precedes など）
///
/// 等価性はサーバーが割り当てたIDのみで決まる。ID未設定の
/// リレーションは何とも等しくならない。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IssueRelation {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub issue_id: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub issue_to_id: Option<i32>,
    pub relation_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delay: Option<i32>,
}

impl IssueRelation {
    pub fn new(issue_to_id: i32, relation_type: impl Into<String>) -> Self {
        Self {
            id: None,
            issue_id: None,
            issue_to_id: Some(issue_to_id),
            relation_type: relation_type.into(),
            delay: None,
        }
    }
}

impl PartialEq for IssueRelation {
    fn eq(&self, other: &Self) -> bool {
        match (self.id, other.id) {
            (Some(a), Some(b)) => a == b,
            _ => false,
        }
    }
}
