use super::NamedId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Issueに添付されたファイルのメタデータ
///
/// アップロード自体はマルチパートのトークンフローで、このクレートの
/// 対象外。取得・削除のみサポートする。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Attachment {
    pub id: i32,
    #[serde(rename = "filename")]
    pub file_name: String,
    #[serde(rename = "filesize")]
    pub file_size: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub content_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<NamedId>,
    pub created_on: DateTime<Utc>,
}

impl PartialEq for Attachment {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}
